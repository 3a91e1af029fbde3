// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the casona-core crate.
//!
//! These tests drive the stores through the repositories against in-memory
//! doubles of the document store and identity provider.

mod app_lifecycle;
mod event_crud;
mod profile;
mod session;
mod user_crud;
