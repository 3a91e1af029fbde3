// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use casona_core::{Casona, SessionStore};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::arg::{AuthArgs, Password};
use crate::util::{password_or_prompt, report};

#[derive(Debug, Clone)]
pub struct CmdAuthRegister {
    pub email: String,
    pub password: Option<Password>,
}

impl CmdAuthRegister {
    pub const NAME: &str = "register";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Create an account and sign in")
            .arg(AuthArgs::email())
            .arg(AuthArgs::password())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            email: AuthArgs::get_email(matches)?,
            password: AuthArgs::get_password(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "registering...");
        let password = password_or_prompt(self.password)?;
        let store = app.session_store();
        store.register(self.email, password).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)?;

        // the first profile load creates the stored profile
        ensure_profile(app).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdAuthLogin {
    pub email: String,
    pub password: Option<Password>,
}

impl CmdAuthLogin {
    pub const NAME: &str = "login";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Sign in with email and password")
            .arg(AuthArgs::email())
            .arg(AuthArgs::password())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            email: AuthArgs::get_email(matches)?,
            password: AuthArgs::get_password(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "signing in...");
        let password = password_or_prompt(self.password)?;
        let store = app.session_store();
        store.login(self.email, password).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)?;
        print_principal(&store);
        ensure_profile(app).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdAuthLogout;

impl CmdAuthLogout {
    pub const NAME: &str = "logout";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Sign out and forget the saved session")
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!("signing out...");
        let store = app.session_store();
        store.logout().await?;
        println!("{}", "Signed out".green());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdAuthResetPassword {
    pub email: String,
}

impl CmdAuthResetPassword {
    pub const NAME: &str = "reset-password";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Send a password reset email")
            .arg(AuthArgs::email())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            email: AuthArgs::get_email(matches)?,
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "sending password reset...");
        let store = app.session_store();
        store.send_password_reset(self.email).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)
    }
}

/// Checks a username and password against the locally saved credentials.
#[derive(Debug, Clone)]
pub struct CmdAuthLegacyLogin {
    pub email: String,
    pub password: Option<Password>,
}

impl CmdAuthLegacyLogin {
    pub const NAME: &str = "legacy-login";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Check credentials against the locally saved ones")
            .long_about(
                "\
Check credentials against the ones saved by the last `register`. Only available \
when `legacy_credentials` is enabled in the configuration.",
            )
            .arg(AuthArgs::email())
            .arg(AuthArgs::password())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            email: AuthArgs::get_email(matches)?,
            password: AuthArgs::get_password(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "checking legacy credentials...");
        let password = password_or_prompt(self.password)?;
        let store = app.session_store();
        store.legacy_login(self.email, password).await?;
        let state = store.snapshot();
        match state.legacy_user {
            Some(user) => {
                println!("{} {}", "Credentials match for".green(), user);
                Ok(())
            }
            None => report(false, state.message),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdAuthWhoami;

impl CmdAuthWhoami {
    pub const NAME: &str = "whoami";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Show the signed-in account")
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        let store = app.session_store();
        store.refresh().await?;
        let state = store.snapshot();
        if !state.operation_success {
            return report(false, state.message);
        }
        print_principal(&store);
        Ok(())
    }
}

fn print_principal(store: &SessionStore) {
    match store.current() {
        Some(user) => {
            let name = user.email.as_deref().unwrap_or(&user.uid);
            println!("Signed in as {} ({})", name.bold(), user.uid);
        }
        None => println!("{}", "Not signed in".italic()),
    }
}

async fn ensure_profile(app: &Casona) -> Result<(), Box<dyn Error>> {
    let profiles = app.profile_store();
    profiles.load_profile().await?;
    let state = profiles.snapshot();
    if let Some(message) = state.message {
        println!("{} {}", "Warning:".yellow(), message);
    }
    if state.profile.loaded().is_some_and(|p| !p.active) {
        println!("{} this account is deactivated", "Warning:".yellow());
    }
    Ok(())
}
