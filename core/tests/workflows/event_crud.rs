// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event management workflows through the CRUD store.

use std::sync::Arc;

use casona_core::{Config, EVENTS, EventStore, Fields, Value};

use crate::common::{MemoryStore, test_app, test_event};

fn event_store() -> (EventStore, Arc<MemoryStore>) {
    let (app, store, _) = test_app(Config::default());
    (app.event_store(), store)
}

#[tokio::test]
async fn create_sets_success_and_reloads_once() {
    // Arrange
    let (events, store) = event_store();

    // Act
    events.create(test_event("Concert")).await.unwrap();

    // Assert
    let state = events.snapshot();
    assert!(state.operation_success);
    assert!(!state.is_loading);
    assert_eq!(state.message.as_deref(), Some("Event created successfully"));
    assert_eq!(store.calls("add"), 1);
    assert_eq!(store.calls("query_eq"), 1);
    assert_eq!(state.items.len(), 1);
}

#[tokio::test]
async fn created_event_reads_back_equal() {
    let (events, _) = event_store();
    let event = test_event("Concert");

    events.create(event.clone()).await.unwrap();
    events.load().await.unwrap();

    let items = events.snapshot().items;
    assert_eq!(items.len(), 1);
    assert!(!items[0].id.is_empty());
    assert_eq!(items[0], event.with_id(items[0].id.clone()));
}

#[tokio::test]
async fn failed_create_leaves_items_unchanged() {
    // Arrange
    let (events, store) = event_store();
    store.insert(EVENTS, "e1", test_event("Existing").to_fields());
    events.load().await.unwrap();
    let before = events.snapshot().items;
    assert_eq!(before.len(), 1);

    // Act
    store.set_failing(true);
    events.create(test_event("Concert")).await.unwrap();

    // Assert
    let state = events.snapshot();
    assert_eq!(state.items, before);
    assert!(!state.operation_success);
    assert!(!state.is_loading);
    assert_eq!(state.message.as_deref(), Some("Failed to create event"));
    assert_eq!(store.calls("query_eq"), 1, "a failed mutation must not reload");
}

#[tokio::test]
async fn failed_load_keeps_previous_items() {
    let (events, store) = event_store();
    store.insert(EVENTS, "e1", test_event("Existing").to_fields());
    events.load().await.unwrap();

    store.set_failing(true);
    events.load().await.unwrap();

    let state = events.snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.message.as_deref(), Some("Failed to load events"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn panicking_repository_becomes_message() {
    let (events, store) = event_store();
    store.set_panicking(true);

    let result = events.create(test_event("Concert")).await;

    assert!(result.is_ok(), "the action task must not panic");
    let state = events.snapshot();
    assert!(!state.operation_success);
    assert!(!state.is_loading);
    assert!(state.items.is_empty());
    let message = state.message.unwrap();
    assert!(message.starts_with("Error: "), "got {message:?}");
    assert!(message.contains("store exploded during add"));
}

#[tokio::test]
async fn reset_operation_success_only_clears_flag() {
    // Arrange
    let (events, _) = event_store();
    events.create(test_event("Concert")).await.unwrap();
    let created = events.snapshot().items[0].clone();
    events.select(created);
    let before = events.snapshot();
    assert!(before.operation_success);

    // Act
    events.reset_operation_success();

    // Assert
    let after = events.snapshot();
    assert!(!after.operation_success);
    assert_eq!(after.items, before.items);
    assert_eq!(after.message, before.message);
    assert_eq!(after.selected, before.selected);
    assert_eq!(after.is_loading, before.is_loading);
}

#[tokio::test]
async fn inactive_and_untitled_events_are_not_listed() {
    let (events, store) = event_store();
    store.insert(EVENTS, "e1", test_event("Visible").to_fields());
    let mut hidden = test_event("Hidden");
    hidden.active = false;
    store.insert(EVENTS, "e2", hidden.to_fields());
    store.insert(EVENTS, "e3", test_event("   ").to_fields());
    let mut sparse = Fields::new();
    sparse.insert("active".to_string(), Value::from(true));
    store.insert(EVENTS, "e4", sparse);

    events.load().await.unwrap();

    let titles: Vec<_> = events
        .snapshot()
        .items
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Visible".to_string()]);
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let (events, store) = event_store();
    events.create(test_event("Concert")).await.unwrap();
    let mut event = events.snapshot().items[0].clone();

    event.title = "Concert (sold out)".to_string();
    event.available_tickets = 0;
    events.update(event.id.clone(), event.clone()).await.unwrap();

    let state = events.snapshot();
    assert_eq!(state.message.as_deref(), Some("Event updated successfully"));
    assert_eq!(state.items, vec![event.clone()]);

    events.delete(event.id.clone()).await.unwrap();

    let state = events.snapshot();
    assert_eq!(state.message.as_deref(), Some("Event deleted successfully"));
    assert!(state.operation_success);
    assert!(state.items.is_empty());
    assert_eq!(store.len(EVENTS), 0);
}

#[tokio::test]
async fn deleting_missing_event_succeeds() {
    let (events, store) = event_store();

    events.delete("missing").await.unwrap();

    let state = events.snapshot();
    assert!(state.operation_success);
    assert_eq!(state.message.as_deref(), Some("Event deleted successfully"));
    assert_eq!(store.len(EVENTS), 0);
}

#[tokio::test]
async fn failed_delete_reports_message() {
    let (events, store) = event_store();
    events.create(test_event("Concert")).await.unwrap();
    let id = events.snapshot().items[0].id.clone();
    store.set_failing(true);

    events.delete(id.clone()).await.unwrap();

    let state = events.snapshot();
    assert!(!state.operation_success);
    assert_eq!(state.message.as_deref(), Some("Failed to delete event"));
    assert_eq!(state.items.len(), 1);
    assert!(store.fields(EVENTS, &id).is_some());
}

#[tokio::test]
async fn toggle_active_hides_event() {
    let (events, store) = event_store();
    events.create(test_event("Concert")).await.unwrap();
    let id = events.snapshot().items[0].id.clone();

    events.toggle_active(id.clone()).await.unwrap();

    let state = events.snapshot();
    assert!(state.operation_success);
    assert!(state.items.is_empty(), "inactive events drop out of the list");
    let fields = store.fields(EVENTS, &id).unwrap();
    assert_eq!(fields.get("active"), Some(&Value::from(false)));
}

#[tokio::test]
async fn toggle_unknown_event_reports_not_found() {
    let (events, store) = event_store();

    events.toggle_active("missing").await.unwrap();

    assert_eq!(events.snapshot().message.as_deref(), Some("Event not found"));
    assert_eq!(store.calls("set"), 0);
}

#[tokio::test]
async fn load_by_id_selects_event() {
    let (events, store) = event_store();
    store.insert(EVENTS, "e1", test_event("Concert").to_fields());

    events.load_by_id("e1").await.unwrap();
    let selected = events.snapshot().selected.unwrap();
    assert_eq!(selected, test_event("Concert").with_id("e1"));

    events.clear_selection();
    events.load_by_id("missing").await.unwrap();
    let state = events.snapshot();
    assert_eq!(state.selected, None);
    assert_eq!(state.message.as_deref(), Some("Event not found"));
}

#[tokio::test]
async fn actions_apply_in_issue_order() {
    let (events, store) = event_store();

    let handles = vec![
        events.create(test_event("First")),
        events.create(test_event("Second")),
        events.load(),
    ];
    for handle in handles {
        handle.await.unwrap();
    }

    let state = events.snapshot();
    assert_eq!(state.items.len(), 2);
    assert_eq!(store.calls("query_eq"), 3);
    assert!(state.operation_success);
}

#[tokio::test]
async fn subscribers_see_settled_state() {
    let (events, _) = event_store();
    let mut rx = events.subscribe();

    events.create(test_event("Concert")).await.unwrap();

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.items.len(), 1);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn clear_message_keeps_the_rest() {
    let (events, _) = event_store();
    events.create(test_event("Concert")).await.unwrap();

    events.clear_message();

    let state = events.snapshot();
    assert_eq!(state.message, None);
    assert!(state.operation_success);
    assert_eq!(state.items.len(), 1);
}
