// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use casona_gateway::{AuthUser, GatewayError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::backend::AuthProvider;
use crate::credentials::CredentialCache;
use crate::store::{Observable, Sequencer};

/// Observable state of the sign-in screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// The signed-in principal.
    pub principal: Option<AuthUser>,
    /// Email accepted by the last successful legacy login.
    pub legacy_user: Option<String>,
    /// An action is running.
    pub is_loading: bool,
    /// Outcome of the last action.
    pub message: Option<String>,
    /// The last action succeeded.
    pub operation_success: bool,
}

/// View-model of registration, sign-in and sign-out.
#[derive(Clone)]
pub struct SessionStore {
    auth: Arc<dyn AuthProvider>,
    credentials: Option<CredentialCache>,
    state: Arc<Observable<SessionState>>,
    seq: Arc<Sequencer>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("credentials", &self.credentials)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates a store. Legacy logins are only possible with a credential
    /// cache.
    pub fn new(auth: Arc<dyn AuthProvider>, credentials: Option<CredentialCache>) -> Self {
        Self {
            auth,
            credentials,
            state: Arc::new(Observable::new(SessionState::default())),
            seq: Arc::new(Sequencer::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.snapshot()
    }

    /// The signed-in principal as last seen by this store.
    pub fn current(&self) -> Option<AuthUser> {
        self.state.snapshot().principal
    }

    /// Asks the identity provider who is signed in.
    pub fn refresh(&self) -> JoinHandle<()> {
        let this = self.clone();
        self.seq.spawn(async move {
            this.start();
            match this.auth.current_user().await {
                Ok(principal) => this.finish(principal, None),
                Err(err) => {
                    tracing::error!(%err, "failed to look up the current user");
                    this.fail(format!("Failed to load session: {err}"));
                }
            }
        })
    }

    /// Creates an account and signs it in.
    pub fn register(&self, email: impl Into<String>, password: impl Into<String>) -> JoinHandle<()> {
        let (email, password) = (email.into(), password.into());
        let this = self.clone();
        self.seq.spawn(async move {
            if has_blank_field(&email, &password) {
                this.fail("Please fill in all fields".to_string());
                return;
            }

            this.start();
            match this.auth.sign_up(email.trim(), &password).await {
                Ok(principal) => {
                    this.remember(email.trim(), &password).await;
                    this.finish(Some(principal), Some("Account created".to_string()));
                }
                Err(err) => this.fail(format!("Failed to register: {}", describe(&err))),
            }
        })
    }

    /// Signs in with email and password.
    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) -> JoinHandle<()> {
        let (email, password) = (email.into(), password.into());
        let this = self.clone();
        self.seq.spawn(async move {
            if has_blank_field(&email, &password) {
                this.fail("Please fill in all fields".to_string());
                return;
            }

            this.start();
            match this.auth.sign_in(email.trim(), &password).await {
                Ok(principal) => {
                    this.remember(email.trim(), &password).await;
                    this.finish(Some(principal), None);
                }
                Err(GatewayError::Auth(reason)) => {
                    tracing::debug!(reason, "sign-in rejected");
                    this.fail("Incorrect email or password".to_string());
                }
                Err(err) => this.fail(format!("Failed to sign in: {err}")),
            }
        })
    }

    /// Checks the pair against the legacy credential cache. The identity
    /// provider is not consulted.
    pub fn legacy_login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> JoinHandle<()> {
        let (email, password) = (email.into(), password.into());
        let this = self.clone();
        self.seq.spawn(async move {
            let Some(cache) = this.credentials.clone() else {
                this.fail("Legacy login is disabled".to_string());
                return;
            };

            this.start();
            match cache.matches(email.trim(), &password).await {
                Ok(true) => {
                    this.state.update(|s| {
                        s.legacy_user = Some(email.trim().to_string());
                        s.operation_success = true;
                        s.is_loading = false;
                    });
                }
                Ok(false) => this.fail("Incorrect username or password".to_string()),
                Err(err) => {
                    tracing::error!(%err, "failed to read legacy credentials");
                    this.fail(format!("Failed to read saved credentials: {err}"));
                }
            }
        })
    }

    /// Signs out locally.
    pub fn logout(&self) -> JoinHandle<()> {
        let this = self.clone();
        self.seq.spawn(async move {
            this.auth.sign_out().await;
            this.state.update(|s| {
                s.principal = None;
                s.legacy_user = None;
                s.message = None;
                s.operation_success = true;
            });
        })
    }

    /// Sends a password reset email.
    pub fn send_password_reset(&self, email: impl Into<String>) -> JoinHandle<()> {
        let email = email.into();
        let this = self.clone();
        self.seq.spawn(async move {
            if email.trim().is_empty() {
                this.fail("Please enter your email".to_string());
                return;
            }

            this.start();
            match this.auth.send_password_reset(email.trim()).await {
                Ok(()) => {
                    this.state.update(|s| {
                        s.message = Some("Password reset email sent".to_string());
                        s.operation_success = true;
                        s.is_loading = false;
                    });
                }
                Err(err) => this.fail(format!(
                    "Failed to send password reset email: {}",
                    describe(&err)
                )),
            }
        })
    }

    pub fn clear_message(&self) {
        self.state.update(|s| s.message = None);
    }

    /// Saves the pair to the legacy cache when one is configured. A failed
    /// write does not fail the sign-in.
    async fn remember(&self, email: &str, password: &str) {
        if let Some(cache) = &self.credentials {
            if let Err(err) = cache.save(email, password).await {
                tracing::warn!(%err, "failed to save legacy credentials");
            }
        }
    }

    fn start(&self) {
        self.state.update(|s| {
            s.is_loading = true;
            s.operation_success = false;
            s.message = None;
        });
    }

    fn finish(&self, principal: Option<AuthUser>, message: Option<String>) {
        self.state.update(|s| {
            s.principal = principal;
            s.message = message;
            s.operation_success = true;
            s.is_loading = false;
        });
    }

    fn fail(&self, message: String) {
        self.state.update(|s| {
            s.message = Some(message);
            s.operation_success = false;
            s.is_loading = false;
        });
    }
}

/// Provider rejections carry a short reason code; everything else is shown
/// as is.
fn describe(err: &GatewayError) -> String {
    match err {
        GatewayError::Auth(reason) => reason.clone(),
        err => err.to_string(),
    }
}

/// Registration and sign-in both treat a whitespace-only value as missing.
fn has_blank_field(email: &str, password: &str) -> bool {
    email.trim().is_empty() || password.trim().is_empty()
}
