// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::backend::AuthProvider;
use crate::repository::UserRepository;
use crate::store::{Loadable, Observable, Sequencer};
use crate::user::UserProfile;

/// Observable state of the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    /// Profile of the signed-in principal.
    pub profile: Loadable<UserProfile>,
    /// An action is running.
    pub is_loading: bool,
    /// Outcome of the last action.
    pub message: Option<String>,
    /// The last action succeeded.
    pub operation_success: bool,
}

/// View-model of the signed-in user's own profile.
#[derive(Clone)]
pub struct ProfileStore {
    users: Arc<UserRepository>,
    auth: Arc<dyn AuthProvider>,
    state: Arc<Observable<ProfileState>>,
    seq: Arc<Sequencer>,
}

impl fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ProfileStore {
    pub fn new(users: Arc<UserRepository>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            users,
            auth,
            state: Arc::new(Observable::new(ProfileState::default())),
            seq: Arc::new(Sequencer::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ProfileState {
        self.state.snapshot()
    }

    /// Loads the profile of the signed-in principal, creating it on first
    /// use. Without a principal the profile stays `NotLoaded`.
    pub fn load_profile(&self) -> JoinHandle<()> {
        let this = self.clone();
        self.seq.spawn(async move {
            this.state.update(|s| {
                s.is_loading = true;
                s.operation_success = false;
                s.profile = Loadable::Loading;
            });
            let profile = this.fetch_or_bootstrap().await;
            this.state.update(|s| {
                s.operation_success = matches!(profile, Loadable::Loaded(_));
                s.profile = profile;
                s.is_loading = false;
            });
        })
    }

    async fn fetch_or_bootstrap(&self) -> Loadable<UserProfile> {
        let principal = match self.auth.current_user().await {
            Ok(Some(principal)) => principal,
            Ok(None) => return Loadable::NotLoaded,
            Err(err) => return Loadable::Failed(format!("Failed to load profile: {err}")),
        };

        match self.users.fetch_user_profile(&principal.uid).await {
            Ok(Some(profile)) => Loadable::Loaded(profile),
            Ok(None) => {
                tracing::info!(uid = principal.uid, "bootstrapping user profile");
                let profile = UserProfile::bootstrap(&principal, Timestamp::now());
                if !self.users.save_user_profile(&profile).await {
                    self.state
                        .update(|s| s.message = Some("Failed to save new profile".to_string()));
                }
                Loadable::Loaded(profile)
            }
            Err(err) => Loadable::Failed(format!("Failed to load profile: {err}")),
        }
    }

    /// Changes the display name in the identity provider and the profile.
    pub fn update_display_name(&self, display_name: impl Into<String>) -> JoinHandle<()> {
        let display_name = display_name.into();
        let this = self.clone();
        self.seq.spawn(async move {
            let Some(mut profile) = this.begin() else {
                return;
            };

            if this.users.update_display_name(&display_name).await {
                profile.display_name = display_name;
                this.save(profile, "Display name updated").await;
            } else {
                this.finish(false, "Failed to update display name".to_string());
            }
        })
    }

    /// Requests an email change. The provider sends a verification link to
    /// the new address; the profile records it right away.
    pub fn update_email(&self, email: impl Into<String>) -> JoinHandle<()> {
        let email = email.into();
        let this = self.clone();
        self.seq.spawn(async move {
            let Some(mut profile) = this.begin() else {
                return;
            };

            match this.auth.verify_before_update_email(&email).await {
                Ok(()) => {
                    profile.email = email;
                    this.save(profile, "A verification link was sent to your new email")
                        .await;
                }
                Err(err) => this.finish(false, format!("Failed to update email: {err}")),
            }
        })
    }

    /// Changes the phone number of the profile.
    pub fn update_phone_number(&self, phone_number: impl Into<String>) -> JoinHandle<()> {
        let phone_number = phone_number.into();
        let this = self.clone();
        self.seq.spawn(async move {
            let Some(mut profile) = this.begin() else {
                return;
            };

            profile.phone_number = Some(phone_number);
            this.save(profile, "Phone number updated").await;
        })
    }

    /// Clears the message.
    pub fn clear_message(&self) {
        self.state.update(|s| s.message = None);
    }

    /// Marks the store busy and returns the loaded profile, or sets a message
    /// when there is none to edit.
    fn begin(&self) -> Option<UserProfile> {
        let profile = self.state.snapshot().profile.loaded().cloned();
        match profile {
            Some(profile) => {
                self.state.update(|s| {
                    s.is_loading = true;
                    s.operation_success = false;
                });
                Some(profile)
            }
            None => {
                self.finish(false, "No profile loaded".to_string());
                None
            }
        }
    }

    /// Saves the edited profile and publishes it. The edit stays visible even
    /// if the write fails, since the identity provider may already have it.
    async fn save(&self, profile: UserProfile, succeeded: &str) {
        let saved = self.users.save_user_profile(&profile).await;
        self.state.update(|s| s.profile = Loadable::Loaded(profile));
        if saved {
            self.finish(true, succeeded.to_string());
        } else {
            self.finish(false, "Failed to save profile".to_string());
        }
    }

    fn finish(&self, success: bool, message: String) {
        self.state.update(|s| {
            s.message = Some(message);
            s.operation_success = success;
            s.is_loading = false;
        });
    }
}
