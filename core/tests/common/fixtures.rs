// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;
use std::sync::Arc;

use casona_core::{Casona, Config, Event, UserProfile, UserType};

use crate::common::{FakeAuth, MemoryStore};

/// Creates a test configuration rooted at `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path, legacy_credentials: bool) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        legacy_credentials,
        ..Default::default()
    }
}

/// Creates an app over fresh in-memory doubles and hands them back for
/// inspection.
#[must_use]
pub fn test_app(config: Config) -> (Casona, Arc<MemoryStore>, Arc<FakeAuth>) {
    let store = Arc::new(MemoryStore::new());
    let auth = Arc::new(FakeAuth::new());
    let app = Casona::with_backend(config, store.clone(), auth.clone());
    (app, store, auth)
}

/// Creates an active, valid event with the given title.
#[must_use]
pub fn test_event(title: &str) -> Event {
    Event {
        title: title.to_string(),
        description: format!("{title} description"),
        date: "2025-06-01T20:00:00Z".parse().unwrap(),
        location: "Main Hall".to_string(),
        price: 25.5,
        available_tickets: 120,
        created_by: "admin-1".to_string(),
        created_at: "2025-05-01T09:00:00Z".parse().unwrap(),
        ..Default::default()
    }
}

/// Creates a client profile with the given uid and email.
#[must_use]
pub fn test_profile(uid: &str, email: &str) -> UserProfile {
    UserProfile {
        uid: uid.to_string(),
        email: email.to_string(),
        user_name: casona_core::email_prefix(email).to_string(),
        display_name: "Test User".to_string(),
        created_at: "2025-01-01T00:00:00Z".parse().unwrap(),
        phone_number: Some("+15550100".to_string()),
        bio: "Hello".to_string(),
        user_type: UserType::Client,
        ..Default::default()
    }
}
