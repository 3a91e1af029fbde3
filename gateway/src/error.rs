// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Gateway client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport layer error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message reported by the service, or the raw body.
        message: String,
    },

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The account service rejected the credentials or the request.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// An operation needs a signed-in user but there is none.
    #[error("No user is signed in")]
    NotSignedIn,

    /// A document id that cannot name a single document.
    #[error("Invalid document id '{0}'")]
    InvalidDocumentId(String),

    /// Invalid response from the service.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// A document could not be mapped into the requested type.
    #[error("Failed to decode document: {0}")]
    Decode(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
