// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of Casona EncantadApp.

mod arg;
mod cli;
mod cmd_auth;
mod cmd_event;
mod cmd_profile;
mod cmd_user;
mod config;
mod event_formatter;
mod table;
mod user_formatter;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::parse_config;
