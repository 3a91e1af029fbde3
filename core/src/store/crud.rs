// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::event::Event;
use crate::repository::{EventRepository, UserRepository};
use crate::store::{Observable, Sequencer, panic_message};
use crate::user::UserProfile;

/// An item managed through a [`CrudStore`].
pub trait Entity: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Document id of the item.
    fn id(&self) -> &str;

    /// Whether the item is active.
    fn is_active(&self) -> bool;

    /// A copy with the active flag set to `active`.
    #[must_use]
    fn with_active(&self, active: bool) -> Self;
}

impl Entity for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn with_active(&self, active: bool) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }
}

impl Entity for UserProfile {
    fn id(&self) -> &str {
        &self.uid
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn with_active(&self, active: bool) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }
}

/// Human-readable outcomes of the CRUD actions of one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrudMessages {
    pub load_failed: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub updated: &'static str,
    pub update_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    pub not_found: &'static str,
}

/// Repository operations a [`CrudStore`] orchestrates.
#[async_trait]
pub trait CrudRepository: Send + Sync + 'static {
    /// Item type of the collection.
    type Item: Entity;

    /// Messages shown for each outcome.
    const MESSAGES: CrudMessages;

    /// Every listed item, or `None` on failure.
    async fn list(&self) -> Option<Vec<Self::Item>>;

    /// Stores a new item and returns its id, or `None` on failure.
    async fn create(&self, item: &Self::Item) -> Option<String>;

    /// Replaces the item stored under `id`.
    async fn update(&self, id: &str, item: &Self::Item) -> bool;

    /// Deletes the item stored under `id`.
    async fn delete(&self, id: &str) -> bool;
}

#[async_trait]
impl CrudRepository for EventRepository {
    type Item = Event;

    const MESSAGES: CrudMessages = CrudMessages {
        load_failed: "Failed to load events",
        created: "Event created successfully",
        create_failed: "Failed to create event",
        updated: "Event updated successfully",
        update_failed: "Failed to update event",
        deleted: "Event deleted successfully",
        delete_failed: "Failed to delete event",
        not_found: "Event not found",
    };

    async fn list(&self) -> Option<Vec<Event>> {
        self.get_events().await
    }

    async fn create(&self, item: &Event) -> Option<String> {
        self.create_event(item).await
    }

    async fn update(&self, id: &str, item: &Event) -> bool {
        self.update_event(id, item).await
    }

    async fn delete(&self, id: &str) -> bool {
        self.delete_event(id).await
    }
}

#[async_trait]
impl CrudRepository for UserRepository {
    type Item = UserProfile;

    const MESSAGES: CrudMessages = CrudMessages {
        load_failed: "Failed to load users",
        created: "User created successfully",
        create_failed: "Failed to create user",
        updated: "User updated successfully",
        update_failed: "Failed to update user",
        deleted: "User deleted successfully",
        delete_failed: "Failed to delete user",
        not_found: "User not found",
    };

    async fn list(&self) -> Option<Vec<UserProfile>> {
        self.get_all_users().await
    }

    async fn create(&self, item: &UserProfile) -> Option<String> {
        self.create_user(item).await
    }

    async fn update(&self, id: &str, item: &UserProfile) -> bool {
        self.update_user(id, item).await
    }

    async fn delete(&self, id: &str) -> bool {
        self.delete_user(id).await
    }
}

/// Observable state of a managed collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CrudState<T> {
    /// Items of the last successful load.
    pub items: Vec<T>,

    /// An action is running.
    pub is_loading: bool,

    /// Outcome of the last action that reported one.
    pub message: Option<String>,

    /// Item picked for viewing or editing.
    pub selected: Option<T>,

    /// The last mutation succeeded. Cleared when a mutation starts and by
    /// [`CrudStore::reset_operation_success`].
    pub operation_success: bool,
}

impl<T> Default for CrudState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            message: None,
            selected: None,
            operation_success: false,
        }
    }
}

/// View-model of a managed collection.
///
/// A successful mutation sets its message, raises `operation_success` and
/// reloads the collection once. A failed one sets its message and leaves
/// `items` as they were.
pub struct CrudStore<R: CrudRepository> {
    repo: Arc<R>,
    state: Arc<Observable<CrudState<R::Item>>>,
    seq: Arc<Sequencer>,
}

/// Store of the event management screens.
pub type EventStore = CrudStore<EventRepository>;

/// Store of the user management screens.
pub type UserStore = CrudStore<UserRepository>;

impl<R: CrudRepository> Clone for CrudStore<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            state: self.state.clone(),
            seq: self.seq.clone(),
        }
    }
}

impl<R: CrudRepository> fmt::Debug for CrudStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<R: CrudRepository> CrudStore<R> {
    /// Creates a store with empty state.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            state: Arc::new(Observable::new(CrudState::default())),
            seq: Arc::new(Sequencer::default()),
        }
    }

    /// Receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<CrudState<R::Item>> {
        self.state.subscribe()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> CrudState<R::Item> {
        self.state.snapshot()
    }

    /// Fetches the collection. On failure the items are kept and a message
    /// is set.
    pub fn load(&self) -> JoinHandle<()> {
        let this = self.clone();
        self.seq.spawn(async move { this.run_load().await })
    }

    /// Stores a new item.
    pub fn create(&self, item: R::Item) -> JoinHandle<()> {
        let this = self.clone();
        self.seq.spawn(async move {
            let repo = this.repo.clone();
            let messages = R::MESSAGES;
            this.run_mutation(
                async move { repo.create(&item).await.is_some() },
                messages.created,
                messages.create_failed,
            )
            .await;
        })
    }

    /// Replaces the item stored under `id`.
    pub fn update(&self, id: impl Into<String>, item: R::Item) -> JoinHandle<()> {
        let id = id.into();
        let this = self.clone();
        self.seq.spawn(async move {
            let repo = this.repo.clone();
            let messages = R::MESSAGES;
            this.run_mutation(
                async move { repo.update(&id, &item).await },
                messages.updated,
                messages.update_failed,
            )
            .await;
        })
    }

    /// Deletes the item stored under `id`.
    pub fn delete(&self, id: impl Into<String>) -> JoinHandle<()> {
        let id = id.into();
        let this = self.clone();
        self.seq.spawn(async move {
            let repo = this.repo.clone();
            let messages = R::MESSAGES;
            this.run_mutation(
                async move { repo.delete(&id).await },
                messages.deleted,
                messages.delete_failed,
            )
            .await;
        })
    }

    /// Flips the active flag of a listed item and stores it.
    pub fn toggle_active(&self, id: impl Into<String>) -> JoinHandle<()> {
        let id = id.into();
        let this = self.clone();
        self.seq.spawn(async move {
            let messages = R::MESSAGES;
            let Some(item) = this.find(&id) else {
                this.state
                    .update(|s| s.message = Some(messages.not_found.to_string()));
                return;
            };

            let toggled = item.with_active(!item.is_active());
            let repo = this.repo.clone();
            this.run_mutation(
                async move { repo.update(&id, &toggled).await },
                messages.updated,
                messages.update_failed,
            )
            .await;
        })
    }

    /// Selects an item.
    pub fn select(&self, item: R::Item) {
        self.state.update(|s| s.selected = Some(item));
    }

    /// Clears the selection.
    pub fn clear_selection(&self) {
        self.state.update(|s| s.selected = None);
    }

    /// Clears the success flag and nothing else.
    pub fn reset_operation_success(&self) {
        self.state.update(|s| s.operation_success = false);
    }

    /// Clears the message.
    pub fn clear_message(&self) {
        self.state.update(|s| s.message = None);
    }

    /// Looks up a listed item by id.
    pub fn find(&self, id: &str) -> Option<R::Item> {
        self.state
            .snapshot()
            .items
            .into_iter()
            .find(|item| item.id() == id)
    }

    async fn run_load(&self) {
        tracing::debug!("loading collection");
        self.state.update(|s| s.is_loading = true);

        let outcome = AssertUnwindSafe(self.repo.list()).catch_unwind().await;
        let messages = R::MESSAGES;
        self.state.update(|s| {
            match outcome {
                Ok(Some(items)) => s.items = items,
                Ok(None) => s.message = Some(messages.load_failed.to_string()),
                Err(payload) => {
                    let reason = panic_message(payload.as_ref());
                    s.message = Some(format!("{}: {reason}", messages.load_failed));
                }
            }
            s.is_loading = false;
        });
    }

    async fn run_mutation<F>(&self, op: F, succeeded: &'static str, failed: &'static str)
    where
        F: Future<Output = bool> + Send,
    {
        self.state.update(|s| {
            s.is_loading = true;
            s.operation_success = false;
        });

        let outcome = AssertUnwindSafe(op).catch_unwind().await;
        let success = matches!(outcome, Ok(true));
        tracing::debug!(success, "mutation finished");
        self.state.update(|s| {
            s.message = Some(match outcome {
                Ok(true) => succeeded.to_string(),
                Ok(false) => failed.to_string(),
                Err(payload) => format!("Error: {}", panic_message(payload.as_ref())),
            });
            s.operation_success = success;
        });

        if success {
            self.run_load().await;
        }
        self.state.update(|s| s.is_loading = false);
    }
}

impl CrudStore<EventRepository> {
    /// Fetches one event into the selection, or sets the not-found message.
    pub fn load_by_id(&self, id: impl Into<String>) -> JoinHandle<()> {
        let id = id.into();
        let this = self.clone();
        self.seq.spawn(async move {
            this.state.update(|s| s.is_loading = true);
            let outcome = AssertUnwindSafe(this.repo.get_event_by_id(&id))
                .catch_unwind()
                .await;
            let messages = EventRepository::MESSAGES;
            this.state.update(|s| {
                match outcome {
                    Ok(Some(event)) => s.selected = Some(event),
                    Ok(None) => s.message = Some(messages.not_found.to_string()),
                    Err(payload) => {
                        let reason = panic_message(payload.as_ref());
                        s.message = Some(format!("Failed to load event: {reason}"));
                    }
                }
                s.is_loading = false;
            });
        })
    }
}
