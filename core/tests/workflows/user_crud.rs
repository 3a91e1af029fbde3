// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! User management workflows through the CRUD store.

use casona_core::{Config, USERS, UserForm, UserType, Value};

use crate::common::{test_app, test_profile};

#[tokio::test]
async fn user_form_create_flow() {
    // Arrange
    let (app, store, _) = test_app(Config::default());
    let users = app.user_store();
    let mut form = UserForm::new();
    form.email = "bob@casona.mx".to_string();
    form.display_name = "Bob".to_string();
    form.phone_number = "+15550101".to_string();
    form.user_type = Some(UserType::Admin);

    // Act
    let profile = form.submit().unwrap();
    users.create(profile).await.unwrap();

    // Assert
    let state = users.snapshot();
    assert!(state.operation_success);
    assert_eq!(state.message.as_deref(), Some("User created successfully"));
    assert_eq!(store.calls("list"), 1);
    assert_eq!(state.items.len(), 1);

    let listed = &state.items[0];
    assert!(!listed.uid.is_empty(), "uid comes from the document id");
    assert_eq!(listed.user_name, "bob");
    assert!(listed.is_admin());
}

#[tokio::test]
async fn listed_uid_is_the_document_id() {
    let (app, store, _) = test_app(Config::default());
    store.insert(USERS, "doc-9", test_profile("stale-uid", "ann@casona.mx").to_fields());
    let users = app.user_store();

    users.load().await.unwrap();

    let items = users.snapshot().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].uid, "doc-9");
}

#[tokio::test]
async fn edit_form_updates_stored_profile() {
    let (app, store, _) = test_app(Config::default());
    store.insert(USERS, "u1", test_profile("u1", "ann@casona.mx").to_fields());
    let users = app.user_store();
    users.load().await.unwrap();
    let original = users.find("u1").unwrap();

    let mut form = UserForm::from_profile(&original);
    form.display_name = "Ann Smith".to_string();
    let edited = form.submit().unwrap();
    users.update("u1", edited).await.unwrap();

    let state = users.snapshot();
    assert_eq!(state.message.as_deref(), Some("User updated successfully"));
    let stored = store.fields(USERS, "u1").unwrap();
    assert_eq!(stored.get("displayName"), Some(&Value::from("Ann Smith")));
    assert_eq!(stored.get("bio"), Some(&Value::from("Hello")));
}

#[tokio::test]
async fn toggle_active_deactivates_user() {
    let (app, store, _) = test_app(Config::default());
    store.insert(USERS, "u1", test_profile("u1", "ann@casona.mx").to_fields());
    let users = app.user_store();
    users.load().await.unwrap();

    users.toggle_active("u1").await.unwrap();

    let state = users.snapshot();
    assert!(state.operation_success);
    assert!(!state.items[0].active, "users stay listed when inactive");

    users.toggle_active("u1").await.unwrap();
    assert!(users.snapshot().items[0].active);
}

#[tokio::test]
async fn failed_update_keeps_items() {
    let (app, store, _) = test_app(Config::default());
    store.insert(USERS, "u1", test_profile("u1", "ann@casona.mx").to_fields());
    let users = app.user_store();
    users.load().await.unwrap();
    let before = users.snapshot().items;

    store.set_failing(true);
    users.toggle_active("u1").await.unwrap();

    let state = users.snapshot();
    assert_eq!(state.items, before);
    assert!(!state.operation_success);
    assert_eq!(state.message.as_deref(), Some("Failed to update user"));
}

#[tokio::test]
async fn delete_removes_user() {
    let (app, store, _) = test_app(Config::default());
    store.insert(USERS, "u1", test_profile("u1", "ann@casona.mx").to_fields());
    let users = app.user_store();

    users.delete("u1").await.unwrap();

    let state = users.snapshot();
    assert_eq!(state.message.as_deref(), Some("User deleted successfully"));
    assert!(state.items.is_empty());
    assert_eq!(store.len(USERS), 0);
}
