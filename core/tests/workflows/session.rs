// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Registration, sign-in and the legacy credential check.

use casona_core::{AuthProvider, Config, CredentialCache};

use crate::common::{setup_temp_dirs, test_app, test_config};

#[tokio::test]
async fn register_rejects_blank_fields() {
    let (app, _, auth) = test_app(Config::default());
    let session = app.session_store();

    session.register("  ", "secret").await.unwrap();
    assert_eq!(
        session.snapshot().message.as_deref(),
        Some("Please fill in all fields")
    );

    session.register("ann@casona.mx", "").await.unwrap();
    let state = session.snapshot();
    assert_eq!(state.message.as_deref(), Some("Please fill in all fields"));
    assert_eq!(state.principal, None);
    assert!(auth.sign_in("ann@casona.mx", "").await.is_err());
}

#[tokio::test]
async fn login_rejects_blank_fields_like_register() {
    let (app, _, auth) = test_app(Config::default());
    auth.add_account("ann@casona.mx", "   ");
    let session = app.session_store();

    session.login("ann@casona.mx", "   ").await.unwrap();

    let state = session.snapshot();
    assert_eq!(state.message.as_deref(), Some("Please fill in all fields"));
    assert_eq!(state.principal, None);
    assert!(!state.operation_success);
    assert_eq!(auth.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn register_signs_in_new_account() {
    let (app, _, auth) = test_app(Config::default());
    let session = app.session_store();

    session.register("ann@casona.mx", "secret").await.unwrap();

    let state = session.snapshot();
    assert_eq!(state.message.as_deref(), Some("Account created"));
    assert!(!state.is_loading);
    let principal = state.principal.unwrap();
    assert_eq!(principal.email.as_deref(), Some("ann@casona.mx"));
    assert_eq!(session.current(), Some(principal.clone()));
    assert_eq!(auth.current_user().await.unwrap(), Some(principal));
}

#[tokio::test]
async fn register_existing_email_reports_reason() {
    let (app, _, auth) = test_app(Config::default());
    auth.add_account("ann@casona.mx", "secret");
    let session = app.session_store();

    session.register("ann@casona.mx", "other").await.unwrap();

    let state = session.snapshot();
    assert_eq!(state.message.as_deref(), Some("Failed to register: EMAIL_EXISTS"));
    assert_eq!(state.principal, None);
}

#[tokio::test]
async fn login_and_logout() {
    // Arrange
    let (app, _, auth) = test_app(Config::default());
    let account = auth.add_account("ann@casona.mx", "secret");
    let session = app.session_store();

    // Act - wrong password
    session.login("ann@casona.mx", "wrong").await.unwrap();

    // Assert
    let state = session.snapshot();
    assert_eq!(state.message.as_deref(), Some("Incorrect email or password"));
    assert!(!state.operation_success);
    assert_eq!(state.principal, None);

    // Act - right password
    session.login("ann@casona.mx", "secret").await.unwrap();

    // Assert
    let state = session.snapshot();
    assert_eq!(state.message, None);
    assert!(state.operation_success);
    assert_eq!(state.principal, Some(account));

    // Act - sign out
    session.logout().await.unwrap();

    // Assert
    assert_eq!(session.current(), None);
    assert_eq!(auth.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn login_surfaces_provider_outage() {
    let (app, _, auth) = test_app(Config::default());
    auth.add_account("ann@casona.mx", "secret");
    auth.set_failing(true);
    let session = app.session_store();

    session.login("ann@casona.mx", "secret").await.unwrap();

    let message = session.snapshot().message.unwrap();
    assert!(message.starts_with("Failed to sign in: "), "got {message:?}");
}

#[tokio::test]
async fn refresh_picks_up_principal() {
    let (app, _, auth) = test_app(Config::default());
    let account = auth.add_account("ann@casona.mx", "secret");
    auth.sign_in_as(account.clone());
    let session = app.session_store();
    assert_eq!(session.current(), None);

    session.refresh().await.unwrap();

    assert_eq!(session.current(), Some(account));
}

#[tokio::test]
async fn password_reset_messages() {
    let (app, _, auth) = test_app(Config::default());
    auth.add_account("ann@casona.mx", "secret");
    let session = app.session_store();

    session.send_password_reset(" ").await.unwrap();
    assert_eq!(
        session.snapshot().message.as_deref(),
        Some("Please enter your email")
    );

    session.send_password_reset("ann@casona.mx").await.unwrap();
    assert_eq!(
        session.snapshot().message.as_deref(),
        Some("Password reset email sent")
    );
    assert_eq!(auth.reset_emails(), vec!["ann@casona.mx".to_string()]);

    session.send_password_reset("nobody@casona.mx").await.unwrap();
    assert_eq!(
        session.snapshot().message.as_deref(),
        Some("Failed to send password reset email: EMAIL_NOT_FOUND")
    );

    session.clear_message();
    assert_eq!(session.snapshot().message, None);
}

#[tokio::test]
async fn legacy_login_is_off_by_default() {
    let (app, _, _) = test_app(Config::default());
    let session = app.session_store();

    session.legacy_login("ann@casona.mx", "secret").await.unwrap();

    let state = session.snapshot();
    assert_eq!(state.message.as_deref(), Some("Legacy login is disabled"));
    assert_eq!(state.legacy_user, None);
}

#[tokio::test]
async fn legacy_login_checks_cached_credentials() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    let (app, _, _) = test_app(test_config(&dirs.state_dir, true));
    let session = app.session_store();
    session.register("ann@casona.mx", "secret").await.unwrap();

    // Assert - registration cached the pair
    let cache = CredentialCache::new(dirs.state_dir.join("credentials.toml"));
    assert!(cache.matches("ann@casona.mx", "secret").await.unwrap());

    // Act - mismatch
    session.legacy_login("ann@casona.mx", "wrong").await.unwrap();

    // Assert
    let state = session.snapshot();
    assert_eq!(state.message.as_deref(), Some("Incorrect username or password"));
    assert_eq!(state.legacy_user, None);

    // Act - match
    session.legacy_login("ann@casona.mx", "secret").await.unwrap();

    // Assert
    let state = session.snapshot();
    assert_eq!(state.legacy_user.as_deref(), Some("ann@casona.mx"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn legacy_cache_is_not_written_when_disabled() {
    let dirs = setup_temp_dirs().await.unwrap();
    let (app, _, _) = test_app(test_config(&dirs.state_dir, false));
    let session = app.session_store();

    session.register("ann@casona.mx", "secret").await.unwrap();

    assert!(!dirs.state_dir.join("credentials.toml").exists());
}
