// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! App construction and session persistence across runs.

use casona_core::{AuthProvider, Casona, Config, GatewayConfig, USERS};

use crate::common::{setup_temp_dirs, test_app, test_config, test_profile};

#[tokio::test]
async fn session_survives_restart() {
    // Arrange
    let dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&dirs.state_dir, false);
    let (app, store, auth) = test_app(config.clone());
    let account = auth.add_account("ann@casona.mx", "secret");
    auth.sign_in("ann@casona.mx", "secret").await.unwrap();

    // Act - first run ends
    app.close().await.unwrap();
    auth.sign_out().await;
    assert!(dirs.state_dir.join("session.toml").exists());

    // Act - second run restores
    let app = Casona::with_backend(config, store, auth.clone());
    let restored = app.restore_session().await.unwrap();

    // Assert
    assert!(restored);
    assert_eq!(app.current_user().await.unwrap(), Some(account));
}

#[tokio::test]
async fn signing_out_removes_saved_session() {
    let dirs = setup_temp_dirs().await.unwrap();
    let (app, _, auth) = test_app(test_config(&dirs.state_dir, false));
    auth.add_account("ann@casona.mx", "secret");
    auth.sign_in("ann@casona.mx", "secret").await.unwrap();
    app.persist_session().await.unwrap();

    app.session_store().logout().await.unwrap();
    app.persist_session().await.unwrap();

    assert!(!dirs.state_dir.join("session.toml").exists());
    assert!(!app.restore_session().await.unwrap());
}

#[tokio::test]
async fn no_state_dir_means_nothing_persisted() {
    let (app, _, auth) = test_app(Config::default());
    auth.add_account("ann@casona.mx", "secret");
    auth.sign_in("ann@casona.mx", "secret").await.unwrap();

    app.persist_session().await.unwrap();

    assert!(!app.restore_session().await.unwrap());
}

#[tokio::test]
async fn current_profile_follows_principal() {
    let (app, store, auth) = test_app(Config::default());
    assert_eq!(app.current_profile().await.unwrap(), None);

    let account = auth.add_account("ann@casona.mx", "secret");
    auth.sign_in_as(account.clone());
    let profile = test_profile(&account.uid, "ann@casona.mx");
    store.insert(USERS, &account.uid, profile.to_fields());

    assert_eq!(app.current_profile().await.unwrap(), Some(profile));
}

#[tokio::test]
async fn new_requires_gateway_credentials() {
    let dirs = setup_temp_dirs().await.unwrap();
    let config = Config {
        gateway: GatewayConfig {
            project_id: "casona-test".to_string(),
            ..Default::default()
        },
        ..test_config(&dirs.state_dir, false)
    };

    let err = Casona::new(config).await.unwrap_err();

    assert!(err.to_string().contains("Failed to initialize gateway"));
}

#[tokio::test]
async fn new_creates_state_dir() {
    let dirs = setup_temp_dirs().await.unwrap();
    let state_dir = dirs.state_dir.join("nested");
    let config = Config {
        gateway: GatewayConfig {
            project_id: "casona-test".to_string(),
            api_key: "key".to_string(),
            ..Default::default()
        },
        ..test_config(&state_dir, false)
    };

    let app = Casona::new(config).await.unwrap();

    assert!(state_dir.is_dir());
    assert_eq!(app.config().state_dir.as_deref(), Some(state_dir.as_path()));
    assert_eq!(app.current_user().await.unwrap(), None);
}
