// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use casona_gateway::Value;

use crate::backend::DocumentStore;
use crate::event::{EVENTS, Event};

/// Event CRUD over the `events` collection.
#[derive(Clone)]
pub struct EventRepository {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for EventRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRepository").finish_non_exhaustive()
    }
}

impl EventRepository {
    /// Creates a repository over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Active events with a non-blank title, or `None` if the query failed.
    pub async fn get_events(&self) -> Option<Vec<Event>> {
        match self.store.query_eq(EVENTS, "active", Value::from(true)).await {
            Ok(docs) => Some(
                docs.into_iter()
                    .map(Event::from_document)
                    .filter(|e| !e.title.trim().is_empty())
                    .collect(),
            ),
            Err(err) => {
                tracing::error!(%err, "failed to load events");
                None
            }
        }
    }

    /// Stores a new event and returns its generated id.
    pub async fn create_event(&self, event: &Event) -> Option<String> {
        match self.store.add(EVENTS, &event.to_fields()).await {
            Ok(id) => {
                tracing::debug!(id, "event created");
                Some(id)
            }
            Err(err) => {
                tracing::error!(%err, "failed to create event");
                None
            }
        }
    }

    /// Replaces the event stored under `id`.
    pub async fn update_event(&self, id: &str, event: &Event) -> bool {
        match self.store.set(EVENTS, id, &event.to_fields()).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(id, %err, "failed to update event");
                false
            }
        }
    }

    /// Deletes the event stored under `id`.
    pub async fn delete_event(&self, id: &str) -> bool {
        match self.store.delete(EVENTS, id).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(id, %err, "failed to delete event");
                false
            }
        }
    }

    /// The event stored under `id`, if it exists and could be read.
    pub async fn get_event_by_id(&self, id: &str) -> Option<Event> {
        match self.store.get(EVENTS, id).await {
            Ok(doc) => doc.map(Event::from_document),
            Err(err) => {
                tracing::error!(id, %err, "failed to load event");
                None
            }
        }
    }
}
