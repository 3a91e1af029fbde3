// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - In-memory doubles of the document store and identity provider
//! - Test data factories (fixtures)
//! - Temporary directory management with auto-cleanup

mod backend;
mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use backend::{FakeAuth, MemoryStore};
#[allow(unused_imports)]
pub use fixtures::{test_app, test_config, test_event, test_profile};
#[allow(unused_imports)]
pub use temp_dir::{TempDirs, setup_temp_dirs};
