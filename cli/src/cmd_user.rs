// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use casona_core::{Casona, UserForm, UserProfile, UserStore, UserType};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::arg::{CommonArgs, UserArgs};
use crate::user_formatter::UserFormatter;
use crate::util::{OutputFormat, confirm, report, require_admin};

const INVALID_USER: &str = "Invalid user: email, display name and phone number must not be blank";

#[derive(Debug, Clone, Copy)]
pub struct CmdUserList {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdUserList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List all users (admin only)")
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing users...");
        require_admin(app).await?;
        let users = load_users(&app.user_store()).await?;
        if users.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No users found".italic());
            return Ok(());
        }
        print_users(&users, self.output_format, self.verbose)
    }
}

#[derive(Debug, Clone)]
pub struct CmdUserNew {
    pub email: String,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
    pub user_type: Option<UserType>,
    pub inactive: bool,
}

impl CmdUserNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create a user profile (admin only)")
            .arg(UserArgs::email(true))
            .arg(UserArgs::display_name())
            .arg(UserArgs::phone())
            .arg(UserArgs::user_type())
            .arg(CommonArgs::inactive("user"))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            email: UserArgs::get_email(matches).ok_or("Email is required for new user")?,
            display_name: UserArgs::get_display_name(matches),
            phone_number: UserArgs::get_phone(matches),
            user_type: UserArgs::get_user_type(matches),
            inactive: CommonArgs::get_inactive(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating user...");
        require_admin(app).await?;

        let mut form = UserForm::new();
        form.email = self.email;
        form.display_name = self.display_name.unwrap_or_default();
        form.phone_number = self.phone_number.unwrap_or_default();
        form.active = !self.inactive;
        if let Some(user_type) = self.user_type {
            form.user_type = Some(user_type);
        }
        let profile = form.submit().ok_or(INVALID_USER)?;

        let store = app.user_store();
        store.create(profile).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)
    }
}

#[derive(Debug, Clone)]
pub struct CmdUserEdit {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
    pub user_type: Option<UserType>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdUserEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a user profile (admin only)")
            .arg(CommonArgs::id("user"))
            .arg(UserArgs::email(false))
            .arg(UserArgs::display_name())
            .arg(UserArgs::phone())
            .arg(UserArgs::user_type())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: CommonArgs::get_id(matches)?,
            email: UserArgs::get_email(matches),
            display_name: UserArgs::get_display_name(matches),
            phone_number: UserArgs::get_phone(matches),
            user_type: UserArgs::get_user_type(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing user...");
        require_admin(app).await?;

        let store = app.user_store();
        load_users(&store).await?;
        let original = store.find(&self.id).ok_or("User not found")?;

        let mut form = UserForm::from_profile(&original);
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(display_name) = self.display_name {
            form.display_name = display_name;
        }
        if let Some(phone_number) = self.phone_number {
            form.phone_number = phone_number;
        }
        if let Some(user_type) = self.user_type {
            form.user_type = Some(user_type);
        }
        let profile = form.submit().ok_or(INVALID_USER)?;

        store.update(&self.id, profile).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)?;
        if let Some(user) = store.find(&self.id) {
            print_users(&[user], self.output_format, self.verbose)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdUserToggle {
    pub id: String,
}

impl CmdUserToggle {
    pub const NAME: &str = "toggle";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Activate or deactivate a user (admin only)")
            .arg(CommonArgs::id("user"))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: CommonArgs::get_id(matches)?,
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "toggling user...");
        require_admin(app).await?;

        let store = app.user_store();
        load_users(&store).await?;
        store.toggle_active(&self.id).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)
    }
}

#[derive(Debug, Clone)]
pub struct CmdUserDelete {
    pub id: String,
    pub yes: bool,
}

impl CmdUserDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a user profile (admin only)")
            .arg(CommonArgs::id("user"))
            .arg(CommonArgs::yes())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: CommonArgs::get_id(matches)?,
            yes: CommonArgs::get_yes(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting user...");
        require_admin(app).await?;
        if !self.yes && !confirm(&format!("Delete user {}?", self.id))? {
            tracing::info!("user cancelled the deletion");
            return Ok(());
        }

        let store = app.user_store();
        store.delete(&self.id).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)
    }
}

async fn load_users(store: &UserStore) -> Result<Vec<UserProfile>, Box<dyn Error>> {
    store.load().await?;
    let state = store.snapshot();
    match state.message {
        Some(message) => Err(message.into()),
        None => Ok(state.items),
    }
}

fn print_users(
    users: &[UserProfile],
    output_format: OutputFormat,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let formatter = UserFormatter::new(verbose).with_output_format(output_format);
    println!("{}", formatter.format(users)?);
    Ok(())
}
