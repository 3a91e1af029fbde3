// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use casona_gateway::GatewayError;

use crate::backend::{AuthProvider, DocumentStore};
use crate::user::{USERS, UserProfile};

/// User profile CRUD over the `users` collection, plus the display name
/// kept by the identity provider.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
    auth: Arc<dyn AuthProvider>,
}

impl std::fmt::Debug for UserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepository").finish_non_exhaustive()
    }
}

impl UserRepository {
    /// Creates a repository over the given store and identity provider.
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }

    /// Stores a profile under a generated id and returns the id.
    pub async fn create_user(&self, user: &UserProfile) -> Option<String> {
        match self.store.add(USERS, &user.to_fields()).await {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::error!(%err, "failed to create user");
                None
            }
        }
    }

    /// Replaces the profile stored under `id`.
    pub async fn update_user(&self, id: &str, user: &UserProfile) -> bool {
        match self.store.set(USERS, id, &user.to_fields()).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(id, %err, "failed to update user");
                false
            }
        }
    }

    /// Deletes the profile stored under `id`.
    pub async fn delete_user(&self, id: &str) -> bool {
        match self.store.delete(USERS, id).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(id, %err, "failed to delete user");
                false
            }
        }
    }

    /// The profile stored under `uid`.
    ///
    /// # Errors
    ///
    /// Returns the gateway error if the profile could not be read, so callers
    /// can tell a missing profile from a failed read.
    pub async fn fetch_user_profile(&self, uid: &str) -> Result<Option<UserProfile>, GatewayError> {
        Ok(self
            .store
            .get(USERS, uid)
            .await?
            .map(UserProfile::from_document))
    }

    /// The profile stored under `uid`, if it exists and could be read.
    pub async fn get_user_profile(&self, uid: &str) -> Option<UserProfile> {
        self.fetch_user_profile(uid).await.unwrap_or_else(|err| {
            tracing::error!(uid, %err, "failed to load user profile");
            None
        })
    }

    /// Writes a profile under its own uid.
    pub async fn save_user_profile(&self, profile: &UserProfile) -> bool {
        if profile.uid.is_empty() {
            tracing::error!("refusing to save a profile without uid");
            return false;
        }
        self.update_user(&profile.uid, profile).await
    }

    /// Sets the display name of the signed-in principal.
    pub async fn update_display_name(&self, display_name: &str) -> bool {
        match self.auth.update_display_name(display_name).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(%err, "failed to update display name");
                false
            }
        }
    }

    /// Every stored profile, with `uid` taken from the document id, or `None`
    /// if the collection could not be read.
    pub async fn get_all_users(&self) -> Option<Vec<UserProfile>> {
        match self.store.list(USERS).await {
            Ok(docs) => Some(
                docs.into_iter()
                    .map(|doc| {
                        let id = doc.id.clone();
                        let mut profile = UserProfile::from_document(doc);
                        profile.uid = id;
                        profile
                    })
                    .collect(),
            ),
            Err(err) => {
                tracing::error!(%err, "failed to load users");
                None
            }
        }
    }
}
