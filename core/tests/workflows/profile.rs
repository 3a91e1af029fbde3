// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Profile bootstrap and self-service updates.

use casona_core::{
    AuthProvider, AuthUser, Config, DEFAULT_BIO, Loadable, USERS, UserType, Value,
};

use crate::common::{test_app, test_profile};

fn principal() -> AuthUser {
    AuthUser {
        uid: "u1".to_string(),
        email: Some("ann@casona.mx".to_string()),
        phone_number: Some("+15550100".to_string()),
        created_at: Some("2025-02-01T10:00:00Z".parse().unwrap()),
        last_login: Some("2025-02-03T10:00:00Z".parse().unwrap()),
        ..Default::default()
    }
}

#[tokio::test]
async fn no_principal_leaves_profile_unloaded() {
    let (app, store, _) = test_app(Config::default());
    let profiles = app.profile_store();

    profiles.load_profile().await.unwrap();

    let state = profiles.snapshot();
    assert_eq!(state.profile, Loadable::NotLoaded);
    assert!(!state.is_loading);
    assert_eq!(store.calls("get"), 0);
}

#[tokio::test]
async fn first_load_bootstraps_profile() {
    // Arrange
    let (app, store, auth) = test_app(Config::default());
    auth.sign_in_as(principal());
    let profiles = app.profile_store();

    // Act
    profiles.load_profile().await.unwrap();

    // Assert
    let state = profiles.snapshot();
    let profile = state.profile.loaded().unwrap().clone();
    assert_eq!(profile.uid, "u1");
    assert_eq!(profile.user_name, "ann");
    assert_eq!(profile.display_name, "ann");
    assert_eq!(profile.phone_number.as_deref(), Some("+15550100"));
    assert_eq!(profile.bio, DEFAULT_BIO);
    assert_eq!(profile.user_type, UserType::Client);
    assert_eq!(profile.created_at, principal().created_at.unwrap());
    assert_eq!(profile.last_login, principal().last_login);

    // Assert - the bootstrap is stored under the uid
    assert_eq!(store.calls("set"), 1);
    assert!(store.fields(USERS, "u1").is_some());
}

#[tokio::test]
async fn existing_profile_is_loaded_as_is() {
    let (app, store, auth) = test_app(Config::default());
    auth.sign_in_as(principal());
    let stored = test_profile("u1", "ann@casona.mx");
    store.insert(USERS, "u1", stored.to_fields());
    let profiles = app.profile_store();

    profiles.load_profile().await.unwrap();

    assert_eq!(profiles.snapshot().profile, Loadable::Loaded(stored));
    assert_eq!(store.calls("set"), 0);
}

#[tokio::test]
async fn gateway_failure_becomes_failed() {
    let (app, store, auth) = test_app(Config::default());
    auth.sign_in_as(principal());
    store.set_failing(true);
    let profiles = app.profile_store();

    profiles.load_profile().await.unwrap();

    match profiles.snapshot().profile {
        Loadable::Failed(message) => assert!(message.starts_with("Failed to load profile: ")),
        other => panic!("expected a failed load, got {other:?}"),
    }
    assert_eq!(store.calls("set"), 0, "a failed read must not overwrite the profile");
}

#[tokio::test]
async fn update_display_name_syncs_provider_and_profile() {
    let (app, store, auth) = test_app(Config::default());
    auth.sign_in_as(principal());
    let profiles = app.profile_store();
    profiles.load_profile().await.unwrap();

    profiles.update_display_name("Ann Smith").await.unwrap();

    let state = profiles.snapshot();
    assert_eq!(state.message.as_deref(), Some("Display name updated"));
    assert!(state.operation_success);
    assert!(!state.is_loading);
    assert_eq!(state.profile.loaded().unwrap().display_name, "Ann Smith");
    let current = auth.current_user().await.unwrap().unwrap();
    assert_eq!(current.display_name.as_deref(), Some("Ann Smith"));
    let fields = store.fields(USERS, "u1").unwrap();
    assert_eq!(fields.get("displayName"), Some(&Value::from("Ann Smith")));
}

#[tokio::test]
async fn failed_display_name_update_keeps_profile() {
    let (app, _, auth) = test_app(Config::default());
    auth.sign_in_as(principal());
    let profiles = app.profile_store();
    profiles.load_profile().await.unwrap();
    let before = profiles.snapshot().profile;

    auth.set_failing(true);
    profiles.update_display_name("Ann Smith").await.unwrap();

    let state = profiles.snapshot();
    assert_eq!(state.message.as_deref(), Some("Failed to update display name"));
    assert!(!state.operation_success);
    assert_eq!(state.profile, before);
}

#[tokio::test]
async fn update_email_sends_verification_link() {
    let (app, store, auth) = test_app(Config::default());
    auth.sign_in_as(principal());
    let profiles = app.profile_store();
    profiles.load_profile().await.unwrap();

    profiles.update_email("ann@new.mx").await.unwrap();

    let state = profiles.snapshot();
    assert_eq!(
        state.message.as_deref(),
        Some("A verification link was sent to your new email")
    );
    assert_eq!(auth.verify_emails(), vec!["ann@new.mx".to_string()]);
    assert_eq!(state.profile.loaded().unwrap().email, "ann@new.mx");
    let fields = store.fields(USERS, "u1").unwrap();
    assert_eq!(fields.get("email"), Some(&Value::from("ann@new.mx")));
}

#[tokio::test]
async fn update_phone_number_saves_profile() {
    let (app, store, auth) = test_app(Config::default());
    auth.sign_in_as(principal());
    let profiles = app.profile_store();
    profiles.load_profile().await.unwrap();

    profiles.update_phone_number("+15559999").await.unwrap();

    let state = profiles.snapshot();
    assert_eq!(state.message.as_deref(), Some("Phone number updated"));
    let fields = store.fields(USERS, "u1").unwrap();
    assert_eq!(fields.get("phoneNumber"), Some(&Value::from("+15559999")));

    profiles.clear_message();
    assert_eq!(profiles.snapshot().message, None);
}

#[tokio::test]
async fn updates_need_a_loaded_profile() {
    let (app, store, _) = test_app(Config::default());
    let profiles = app.profile_store();

    profiles.update_phone_number("+15559999").await.unwrap();

    let state = profiles.snapshot();
    assert_eq!(state.message.as_deref(), Some("No profile loaded"));
    assert!(!state.is_loading);
    assert_eq!(store.calls("set"), 0);
}
