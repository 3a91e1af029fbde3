// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the accounts API.

use std::sync::Arc;

use jiff::Timestamp;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::http::{HttpClient, is_rejected_token};
use crate::request::{LookupRequest, OobCodeRequest, PasswordRequest, ProfileUpdateRequest};
use crate::types::{AuthUser, Session};

/// Client for email/password accounts.
///
/// Signing in stores a [`Session`] in the shared HTTP client, so that the
/// [`DocumentClient`](crate::DocumentClient) of the same gateway sends the
/// user's ID token. Signing out only drops the local session.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Arc<HttpClient>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<UserInfo>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    last_login_at: Option<String>,
}

impl From<UserInfo> for AuthUser {
    fn from(info: UserInfo) -> Self {
        Self {
            uid: info.local_id,
            email: info.email,
            display_name: info.display_name.filter(|s| !s.is_empty()),
            phone_number: info.phone_number.filter(|s| !s.is_empty()),
            created_at: info.created_at.as_deref().and_then(parse_millis),
            last_login: info.last_login_at.as_deref().and_then(parse_millis),
        }
    }
}

/// Account metadata times are epoch milliseconds encoded as strings.
fn parse_millis(s: &str) -> Option<Timestamp> {
    let millis: i64 = s.parse().ok()?;
    Timestamp::from_millisecond(millis).ok()
}

impl AuthClient {
    pub(crate) const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let req = self.http.accounts_request(method).json(body);
        match self.http.execute(req).await {
            Ok(resp) => Ok(resp.json().await?),
            Err(GatewayError::Status { status: 400, message }) => Err(GatewayError::Auth(message)),
            Err(e) => Err(e),
        }
    }

    /// Calls a method whose body carries the ID token. A rejected token is
    /// refreshed once and the call repeated with the new one.
    async fn call_as_user<B, R, F>(&self, method: &str, body: F) -> Result<R, GatewayError>
    where
        F: Fn(String) -> B,
        B: Serialize,
        R: DeserializeOwned,
    {
        let id_token = self.id_token().await?;
        match self.call(method, &body(id_token)).await {
            Err(e) if is_rejected_token(&e) => {
                if !self.http.refresh_session().await? {
                    return Err(e);
                }
                let id_token = self.id_token().await?;
                self.call(method, &body(id_token)).await
            }
            other => other,
        }
    }

    async fn id_token(&self) -> Result<String, GatewayError> {
        self.http
            .session()
            .await
            .map(|s| s.id_token)
            .ok_or(GatewayError::NotSignedIn)
    }

    async fn start_session(&self, token: TokenResponse) -> Result<AuthUser, GatewayError> {
        let session = Session {
            uid: token.local_id,
            email: token.email,
            id_token: token.id_token,
            refresh_token: token.refresh_token,
        };
        self.http.set_session(Some(session)).await;
        self.current_user()
            .await?
            .ok_or_else(|| GatewayError::InvalidResponse("signed-in user not found".to_string()))
    }

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`] if the service rejects the email or
    /// password, e.g. because the email is taken.
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, GatewayError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let token: TokenResponse = self.call("signUp", &body).await?;
        self.start_session(token).await
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`] if the credentials are rejected.
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, GatewayError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let token: TokenResponse = self.call("signInWithPassword", &body).await?;
        self.start_session(token).await
    }

    /// Drops the local session.
    pub async fn sign_out(&self) {
        self.http.set_session(None).await;
    }

    /// Looks up the signed-in user, or `None` without a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup request fails.
    pub async fn current_user(&self) -> Result<Option<AuthUser>, GatewayError> {
        if self.http.session().await.is_none() {
            return Ok(None);
        }

        let resp: LookupResponse = self
            .call_as_user("lookup", |id_token| LookupRequest { id_token })
            .await?;
        Ok(resp.users.into_iter().next().map(AuthUser::from))
    }

    /// Sets the display name of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotSignedIn`] without a session, or an error if
    /// the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn update_display_name(&self, display_name: &str) -> Result<(), GatewayError> {
        let _: serde_json::Value = self
            .call_as_user("update", |id_token| ProfileUpdateRequest {
                id_token,
                display_name,
                return_secure_token: false,
            })
            .await?;
        Ok(())
    }

    /// Sends a verification link to `new_email`; the address changes once it
    /// is confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotSignedIn`] without a session, or an error if
    /// the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn verify_before_update_email(&self, new_email: &str) -> Result<(), GatewayError> {
        let _: serde_json::Value = self
            .call_as_user("sendOobCode", |id_token| OobCodeRequest {
                request_type: "VERIFY_AND_CHANGE_EMAIL",
                email: None,
                id_token: Some(id_token),
                new_email: Some(new_email),
            })
            .await?;
        Ok(())
    }

    /// Sends a password reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn send_password_reset(&self, email: &str) -> Result<(), GatewayError> {
        let body = OobCodeRequest {
            request_type: "PASSWORD_RESET",
            email: Some(email),
            id_token: None,
            new_email: None,
        };
        let _: serde_json::Value = self.call("sendOobCode", &body).await?;
        Ok(())
    }

    /// Exchanges the refresh token of the session for a new ID token.
    ///
    /// Requests that get their ID token rejected call this on their own, so
    /// front ends only need it to renew a session eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotSignedIn`] without a session or refresh
    /// token, [`GatewayError::Auth`] if the refresh token is rejected, or an
    /// error if the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), GatewayError> {
        if self.http.refresh_session().await? {
            Ok(())
        } else {
            Err(GatewayError::NotSignedIn)
        }
    }

    /// The current session, for persisting it between runs.
    pub async fn session(&self) -> Option<Session> {
        self.http.session().await
    }

    /// Restores a previously exported session.
    pub async fn restore(&self, session: Session) {
        self.http.set_session(Some(session)).await;
    }
}
