// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Legacy credential cache.
//!
//! Holds the last-used email and password in plain text so that a login can
//! be checked without the identity provider. This is insecure and only
//! enabled when `legacy_credentials` is set in the config.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

/// Key-value file holding one email/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialCache {
    path: PathBuf,
}

impl CredentialCache {
    /// A cache backed by the file at `path`. The file is created on the
    /// first [`save`](Self::save).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the cached pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, email: &str, password: &str) -> io::Result<()> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let content = toml::to_string(&credentials).map_err(invalid_data)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, content).await?;
        tracing::debug!(path = %self.path.display(), "saved legacy credentials");
        Ok(())
    }

    /// The cached pair, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> io::Result<Option<(String, String)>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        let credentials: Credentials = toml::from_str(&content).map_err(invalid_data)?;
        Ok(Some((credentials.email, credentials.password)))
    }

    /// Whether the cached pair equals the given one. An empty cache matches
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be read.
    pub async fn matches(&self, email: &str, password: &str) -> io::Result<bool> {
        Ok(self
            .load()
            .await?
            .is_some_and(|(e, p)| e == email && p == password))
    }
}

pub(crate) fn invalid_data(err: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}
