// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use casona_gateway::GatewayConfig;

/// The name of the Casona application.
pub const APP_NAME: &str = "casona";

const SESSION_FILE: &str = "session.toml";
const CREDENTIALS_FILE: &str = "credentials.toml";

/// Configuration for the Casona application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Keep the last registered email and password in a plain file and accept
    /// them for `legacy-login`. Insecure, off by default.
    #[serde(default)]
    pub legacy_credentials: bool,

    /// Remote document store and account service.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Config {
    /// Normalize the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory path cannot be expanded.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                );
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        }

        if self.gateway.timeout_secs == 0 {
            tracing::warn!("gateway timeout_secs is 0, requests will fail immediately");
        }

        Ok(())
    }

    /// Path of the persisted sign-in session, if a state directory is known.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|a| a.join(SESSION_FILE))
    }

    /// Path of the legacy credential cache, if it is enabled and a state
    /// directory is known.
    #[must_use]
    pub fn credentials_path(&self) -> Option<PathBuf> {
        match (self.legacy_credentials, &self.state_dir) {
            (true, Some(a)) => Some(a.join(CREDENTIALS_FILE)),
            _ => None,
        }
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle state directories
    let state_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_STATE_HOME/", "${XDG_STATE_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in state_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_state_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or_else(|| "User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".into())
}
