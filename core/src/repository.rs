// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed adapters over the document store and the identity provider.
//!
//! Repositories never surface gateway errors. A failure is logged and
//! reported as `None` or `false`.

mod events;
mod users;

pub use crate::repository::events::EventRepository;
pub use crate::repository::users::UserRepository;
