// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::Arc;

use casona_gateway::{AuthUser, Gateway, GatewayError};
use tokio::fs;

use crate::backend::{AuthProvider, DocumentStore};
use crate::credentials::CredentialCache;
use crate::repository::{EventRepository, UserRepository};
use crate::state::SessionFile;
use crate::store::{EventStore, ProfileStore, SessionStore, UserStore};
use crate::user::UserProfile;
use crate::Config;

/// Casona application core.
///
/// Wires the repositories and stores to one backend. Stores are created on
/// demand and share the repositories but not their state.
#[derive(Clone)]
pub struct Casona {
    config: Config,
    auth: Arc<dyn AuthProvider>,
    events: Arc<EventRepository>,
    users: Arc<UserRepository>,
    session_file: Option<SessionFile>,
}

impl std::fmt::Debug for Casona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Casona")
            .field("config", &self.config)
            .field("session_file", &self.session_file)
            .finish_non_exhaustive()
    }
}

impl Casona {
    /// Creates a new instance talking to the configured gateway and restores
    /// the session saved by the previous run.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the state directory
    /// cannot be created, or the saved session cannot be read.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        prepare(&config).await?;

        let gateway = Gateway::new(config.gateway.clone())
            .map_err(|e| format!("Failed to initialize gateway: {e}"))?;
        let that = Self::with_backend(config, Arc::new(gateway.documents), Arc::new(gateway.auth));
        that.restore_session()
            .await
            .map_err(|e| format!("Failed to restore session: {e}"))?;

        Ok(that)
    }

    /// Creates an instance over the given backend. The configuration is used
    /// as is and no saved session is restored.
    pub fn with_backend(
        config: Config,
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        let session_file = config.session_path().map(SessionFile::new);
        Self {
            events: Arc::new(EventRepository::new(store.clone())),
            users: Arc::new(UserRepository::new(store, auth.clone())),
            auth,
            config,
            session_file,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn events(&self) -> &Arc<EventRepository> {
        &self.events
    }

    pub fn users(&self) -> &Arc<UserRepository> {
        &self.users
    }

    /// A new store over the `events` collection.
    pub fn event_store(&self) -> EventStore {
        EventStore::new(self.events.clone())
    }

    /// A new store over the `users` collection.
    pub fn user_store(&self) -> UserStore {
        UserStore::new(self.users.clone())
    }

    /// A new store for the signed-in user's own profile.
    pub fn profile_store(&self) -> ProfileStore {
        ProfileStore::new(self.users.clone(), self.auth.clone())
    }

    /// A new store for sign-in and sign-out, with the legacy credential
    /// cache when the config enables it.
    pub fn session_store(&self) -> SessionStore {
        let credentials = self.config.credentials_path().map(CredentialCache::new);
        SessionStore::new(self.auth.clone(), credentials)
    }

    /// The signed-in principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity provider cannot be reached.
    pub async fn current_user(&self) -> Result<Option<AuthUser>, GatewayError> {
        self.auth.current_user().await
    }

    /// The stored profile of the signed-in principal, if both exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the principal or the profile cannot be read.
    pub async fn current_profile(&self) -> Result<Option<UserProfile>, GatewayError> {
        match self.auth.current_user().await? {
            Some(principal) => self.user_profile(&principal.uid).await,
            None => Ok(None),
        }
    }

    /// The stored profile of `uid`, or `None` if it has none yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be read.
    pub async fn user_profile(&self, uid: &str) -> Result<Option<UserProfile>, GatewayError> {
        self.users.fetch_user_profile(uid).await
    }

    /// Loads the saved session into the identity provider. Returns whether
    /// one was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file exists but cannot be read.
    pub async fn restore_session(&self) -> Result<bool, Box<dyn Error>> {
        let Some(file) = &self.session_file else {
            return Ok(false);
        };
        match file.load().await? {
            Some(session) => {
                tracing::debug!(uid = session.uid, "restoring session");
                self.auth.restore(session).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Writes the current session to the state directory, or removes the
    /// saved one after a sign-out.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be written.
    pub async fn persist_session(&self) -> Result<(), Box<dyn Error>> {
        if let Some(file) = &self.session_file {
            let session = self.auth.session().await;
            file.store(session.as_ref())
                .await
                .map_err(|e| format!("Failed to save session to {}: {e}", file.path().display()))?;
        }
        Ok(())
    }

    /// Persists the session and releases the instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be saved.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.persist_session().await
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = &config.state_dir {
        tracing::debug!(path = %parent.display(), "ensuring state directory exists");
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}
