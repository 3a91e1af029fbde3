// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! REST client for the Casona document store and account service.
//!
//! A [`Gateway`] bundles a [`DocumentClient`] and an [`AuthClient`] that share
//! one HTTP connection pool and one signed-in session.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions, clippy::missing_panics_doc)]

mod accounts;
mod config;
mod documents;
mod error;
mod http;
mod request;
mod types;
mod value;

use std::sync::Arc;

pub use crate::accounts::AuthClient;
pub use crate::config::GatewayConfig;
pub use crate::documents::DocumentClient;
pub use crate::error::GatewayError;
pub use crate::request::EqualityQuery;
pub use crate::types::{AuthUser, Document, Session};
pub use crate::value::{Fields, Value};

use crate::http::HttpClient;

/// Document and account clients bound to one project.
#[derive(Debug, Clone)]
pub struct Gateway {
    /// Documents API client.
    pub documents: DocumentClient,
    /// Accounts API client.
    pub auth: AuthClient,
}

impl Gateway {
    /// Creates both clients over a shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the project id or API key is
    /// empty, or an error if HTTP client creation fails.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        if config.project_id.trim().is_empty() {
            return Err(GatewayError::Config("project_id is required".to_string()));
        }
        if config.api_key.trim().is_empty() {
            return Err(GatewayError::Config("api_key is required".to_string()));
        }

        let http = Arc::new(HttpClient::new(config)?);
        Ok(Self {
            documents: DocumentClient::new(http.clone()),
            auth: AuthClient::new(http),
        })
    }
}
