// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary directory management for integration tests.

use std::path::PathBuf;

use tokio::fs;

/// Temporary state directory, removed when dropped.
#[derive(Debug)]
pub struct TempDirs {
    /// State directory for the session and credential files.
    pub state_dir: PathBuf,
}

impl TempDirs {
    /// Creates a new temporary state directory.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let base = tempfile::tempdir()?.keep();
        let state_dir = base.join("state");
        fs::create_dir_all(&state_dir).await?;
        Ok(Self { state_dir })
    }

    /// Gets the base temporary directory.
    #[must_use]
    pub fn base(&self) -> PathBuf {
        self.state_dir
            .parent()
            .expect("temp directories should have a parent")
            .to_path_buf()
    }
}

/// Sets up temporary directories for integration tests.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new().await
}

impl Drop for TempDirs {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(self.base());
    }
}
