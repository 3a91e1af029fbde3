// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Remote gateway configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GatewayConfig {
    /// Project identifier that owns the document database.
    pub project_id: String,
    /// Public API key sent to the account service.
    pub api_key: String,
    /// Database name inside the project.
    #[serde(default = "default_database")]
    pub database: String,
    /// Base URL of the document service.
    #[serde(default = "default_firestore_url")]
    pub firestore_url: String,
    /// Base URL of the account service.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Base URL of the token service that exchanges refresh tokens.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl GatewayConfig {
    /// Root of the documents tree, e.g. `.../v1/projects/p/databases/(default)/documents`.
    #[must_use]
    pub fn documents_root(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents",
            self.firestore_url.trim_end_matches('/'),
            self.project_id,
            self.database,
        )
    }

    /// Full URL of an account service method such as `signUp`.
    #[must_use]
    pub fn accounts_url(&self, method: &str) -> String {
        format!("{}/v1/accounts:{method}", self.auth_url.trim_end_matches('/'))
    }

    /// URL of the refresh token exchange.
    #[must_use]
    pub fn refresh_url(&self) -> String {
        format!("{}/v1/token", self.token_url.trim_end_matches('/'))
    }
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_firestore_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

fn default_auth_url() -> String {
    "https://identitytoolkit.googleapis.com".to_string()
}

fn default_token_url() -> String {
    "https://securetoken.googleapis.com".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("casona-gateway/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: String::new(),
            database: default_database(),
            firestore_url: default_firestore_url(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
