// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with bearer session and error mapping.

use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, StatusCode, Url};
use tokio::sync::RwLock;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::types::Session;

/// Account service messages for an ID token that is expired or no longer valid.
const REJECTED_TOKEN_MESSAGES: [&str; 2] = ["INVALID_ID_TOKEN", "TOKEN_EXPIRED"];

#[derive(Debug, serde::Deserialize)]
struct RefreshResponse {
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

/// HTTP client shared by the document and account clients.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: GatewayConfig,
    session: RwLock<Option<Session>>,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            config,
            session: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Builds a request, attaching the ID token of the current session.
    pub async fn build_request<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        let req = self.client.request(method, url);
        match self.session.read().await.as_ref() {
            Some(session) => req.bearer_auth(&session.id_token),
            None => req,
        }
    }

    /// Builds an account service request keyed by the API key.
    pub fn accounts_request(&self, method: &str) -> RequestBuilder {
        self.client
            .post(self.config.accounts_url(method))
            .query(&[("key", self.config.api_key.as_str())])
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for 404 and [`GatewayError::Status`]
    /// for any other non-success status.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, GatewayError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let url = resp.url().path().to_string();
        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        tracing::debug!(%status, url, "request failed");

        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(url));
        }
        Err(GatewayError::Status {
            status: status.as_u16(),
            message: error_message(&text),
        })
    }

    /// Builds and executes a request with the session's ID token. When the
    /// token is rejected the session is refreshed once and the request is
    /// sent again with the new token.
    ///
    /// # Errors
    ///
    /// Returns the original error if the session cannot be refreshed, or
    /// any error of the refresh or the retried request.
    pub async fn execute_as_user<F>(
        &self,
        method: Method,
        url: Url,
        decorate: F,
    ) -> Result<Response, GatewayError>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let req = decorate(self.build_request(method.clone(), url.clone()).await);
        match self.execute(req).await {
            Err(e) if is_rejected_token(&e) => {
                if !self.refresh_session().await? {
                    return Err(e);
                }
                let req = decorate(self.build_request(method, url).await);
                self.execute(req).await
            }
            other => other,
        }
    }

    /// Exchanges the refresh token for a new ID token and installs it.
    /// Returns `false` when there is no session or no refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`] if the refresh token is rejected, or an
    /// error if the request fails.
    pub async fn refresh_session(&self) -> Result<bool, GatewayError> {
        let Some(session) = self.session().await else {
            return Ok(false);
        };
        if session.refresh_token.is_empty() {
            return Ok(false);
        }

        let req = self
            .client
            .post(self.config.refresh_url())
            .query(&[("key", self.config.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", session.refresh_token.as_str()),
            ]);
        let token: RefreshResponse = match self.execute(req).await {
            Ok(resp) => resp.json().await?,
            Err(GatewayError::Status { status: 400, message }) => {
                return Err(GatewayError::Auth(message));
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(uid = %session.uid, "refreshed session");
        let refreshed = Session {
            uid: token.user_id.unwrap_or(session.uid),
            email: session.email,
            id_token: token.id_token,
            refresh_token: token.refresh_token.unwrap_or(session.refresh_token),
        };
        self.set_session(Some(refreshed)).await;
        Ok(true)
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn set_session(&self, session: Option<Session>) {
        *self.session.write().await = session;
    }
}

/// Whether an error means the service refused the ID token itself.
pub fn is_rejected_token(err: &GatewayError) -> bool {
    match err {
        GatewayError::Status { status: 401, .. } => true,
        GatewayError::Status { status: 400, message } | GatewayError::Auth(message) => {
            REJECTED_TOKEN_MESSAGES
                .iter()
                .any(|code| message.starts_with(code))
        }
        _ => false,
    }
}

/// Pulls `error.message` out of a JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Envelope {
        error: Detail,
    }

    #[derive(serde::Deserialize)]
    struct Detail {
        message: String,
    }

    serde_json::from_str::<Envelope>(body)
        .map_or_else(|_| body.trim().to_string(), |e| e.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_reads_json_envelope() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#;
        assert_eq!(error_message(body), "EMAIL_EXISTS");
    }

    #[test]
    fn error_message_falls_back_to_body() {
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn rejected_token_errors() {
        let unauthenticated = GatewayError::Status {
            status: 401,
            message: "Request had invalid authentication credentials".to_string(),
        };
        assert!(is_rejected_token(&unauthenticated));
        assert!(is_rejected_token(&GatewayError::Auth("TOKEN_EXPIRED".to_string())));
        assert!(is_rejected_token(&GatewayError::Auth(
            "INVALID_ID_TOKEN : stale".to_string()
        )));

        assert!(!is_rejected_token(&GatewayError::Auth(
            "INVALID_LOGIN_CREDENTIALS".to_string()
        )));
        assert!(!is_rejected_token(&GatewayError::Status {
            status: 403,
            message: "Missing or insufficient permissions.".to_string(),
        }));
        assert!(!is_rejected_token(&GatewayError::NotFound("/x".to_string())));
    }
}
