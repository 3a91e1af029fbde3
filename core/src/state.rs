// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::{Path, PathBuf};

use casona_gateway::Session;
use tokio::fs;

use crate::credentials::invalid_data;

/// The signed-in session kept between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> io::Result<Option<Session>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => toml::from_str(&content).map(Some).map_err(invalid_data),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes `session`, or removes the file when signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or removed.
    pub async fn store(&self, session: Option<&Session>) -> io::Result<()> {
        match session {
            Some(session) => {
                let content = toml::to_string(session).map_err(invalid_data)?;
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent).await?;
                }
                fs::write(&self.path, content).await
            }
            None => match fs::remove_file(&self.path).await {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
                _ => Ok(()),
            },
        }
    }
}
