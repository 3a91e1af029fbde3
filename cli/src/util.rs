// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use casona_core::{AuthUser, Casona, UserProfile};
use colored::Colorize;
use jiff::Timestamp;
use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;

use crate::arg::Password;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Parses an event date typed by the user, in local time unless an offset
/// is given.
///
/// Accepted: `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD` and
/// RFC 3339 timestamps.
pub fn parse_date(s: &str) -> Result<Timestamp, Box<dyn Error>> {
    parse_date_in(s, &TimeZone::system())
}

fn parse_date_in(s: &str, tz: &TimeZone) -> Result<Timestamp, Box<dyn Error>> {
    let s = s.trim();
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Ok(ts);
    }

    let dt = if let Ok(dt) = DateTime::strptime("%Y-%m-%d %H:%M", s) {
        dt
    } else if let Ok(dt) = s.parse::<DateTime>() {
        dt
    } else if let Ok(date) = s.parse::<Date>() {
        date.to_datetime(Time::midnight())
    } else {
        return Err(format!(
            "Invalid date '{s}'. Expected format: YYYY-MM-DD, YYYY-MM-DD HH:MM or RFC 3339"
        )
        .into());
    };
    Ok(dt.to_zoned(tz.clone())?.timestamp())
}

/// Formats a timestamp in local time.
pub fn format_timestamp(ts: Timestamp) -> String {
    format_timestamp_in(ts, TimeZone::system())
}

fn format_timestamp_in(ts: Timestamp, tz: TimeZone) -> String {
    ts.to_zoned(tz).strftime("%Y-%m-%d %H:%M").to_string()
}

/// Fails unless the signed-in user has an admin profile.
pub async fn require_admin(app: &Casona) -> Result<(), Box<dyn Error>> {
    let principal = app.current_user().await?;
    let profile = match &principal {
        Some(principal) => app.user_profile(&principal.uid).await?,
        None => None,
    };
    check_admin(principal.as_ref(), profile.as_ref())
}

fn check_admin(
    principal: Option<&AuthUser>,
    profile: Option<&UserProfile>,
) -> Result<(), Box<dyn Error>> {
    match (principal, profile) {
        (None, _) => Err("Not signed in, run `casona auth login` first".into()),
        (Some(principal), None) => {
            let who = principal.email.as_deref().unwrap_or(&principal.uid);
            Err(format!("No profile found for {who}, run `casona auth login` to create it").into())
        }
        (Some(_), Some(profile)) if profile.is_admin() && profile.active => Ok(()),
        (Some(_), Some(_)) => Err("Admin privileges required".into()),
    }
}

/// Prints the outcome of a store action, or turns a failure into an error.
pub fn report(success: bool, message: Option<String>) -> Result<(), Box<dyn Error>> {
    match (success, message) {
        (true, Some(message)) => {
            println!("{}", message.green());
            Ok(())
        }
        (true, None) => Ok(()),
        (false, Some(message)) => Err(message.into()),
        (false, None) => Err("Operation failed".into()),
    }
}

/// The given password, or one read from the terminal without echo.
pub fn password_or_prompt(password: Option<Password>) -> Result<String, Box<dyn Error>> {
    match password {
        Some(Password(password)) => Ok(password),
        None => Ok(dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?),
    }
}

/// Asks a yes/no question on the terminal, defaulting to no.
pub fn confirm(prompt: &str) -> Result<bool, Box<dyn Error>> {
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
