// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Seams between the repositories and the remote gateway.

use async_trait::async_trait;
use casona_gateway::{
    AuthClient, AuthUser, Document, DocumentClient, Fields, GatewayError, Session, Value,
};

/// A store of documents grouped in named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists every document of a collection.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, GatewayError>;

    /// Lists documents of a collection whose `field` equals `value`.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Document>, GatewayError>;

    /// Fetches one document, `None` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, GatewayError>;

    /// Adds a document under a generated id and returns the id.
    async fn add(&self, collection: &str, fields: &Fields) -> Result<String, GatewayError>;

    /// Writes a document under a known id, replacing it.
    async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<(), GatewayError>;

    /// Deletes a document.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError>;
}

/// An email/password identity provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Creates an account and signs it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, GatewayError>;

    /// Signs in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, GatewayError>;

    /// Signs out.
    async fn sign_out(&self);

    /// The signed-in principal, if any.
    async fn current_user(&self) -> Result<Option<AuthUser>, GatewayError>;

    /// Sets the display name of the signed-in principal.
    async fn update_display_name(&self, display_name: &str) -> Result<(), GatewayError>;

    /// Sends a link that changes the email once confirmed.
    async fn verify_before_update_email(&self, new_email: &str) -> Result<(), GatewayError>;

    /// Sends a password reset email.
    async fn send_password_reset(&self, email: &str) -> Result<(), GatewayError>;

    /// Exports the session so it can be restored by a later process.
    async fn session(&self) -> Option<Session> {
        None
    }

    /// Restores an exported session.
    async fn restore(&self, _session: Session) {}
}

#[async_trait]
impl DocumentStore for DocumentClient {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, GatewayError> {
        DocumentClient::list(self, collection).await
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Document>, GatewayError> {
        DocumentClient::query_eq(self, collection, field, value).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, GatewayError> {
        DocumentClient::get(self, collection, id).await
    }

    async fn add(&self, collection: &str, fields: &Fields) -> Result<String, GatewayError> {
        DocumentClient::add(self, collection, fields).await
    }

    async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<(), GatewayError> {
        DocumentClient::set(self, collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
        DocumentClient::delete(self, collection, id).await
    }
}

#[async_trait]
impl AuthProvider for AuthClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, GatewayError> {
        AuthClient::sign_up(self, email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, GatewayError> {
        AuthClient::sign_in(self, email, password).await
    }

    async fn sign_out(&self) {
        AuthClient::sign_out(self).await;
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, GatewayError> {
        AuthClient::current_user(self).await
    }

    async fn update_display_name(&self, display_name: &str) -> Result<(), GatewayError> {
        AuthClient::update_display_name(self, display_name).await
    }

    async fn verify_before_update_email(&self, new_email: &str) -> Result<(), GatewayError> {
        AuthClient::verify_before_update_email(self, new_email).await
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), GatewayError> {
        AuthClient::send_password_reset(self, email).await
    }

    async fn session(&self) -> Option<Session> {
        AuthClient::session(self).await
    }

    async fn restore(&self, session: Session) {
        AuthClient::restore(self, session).await;
    }
}
