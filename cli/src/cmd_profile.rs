// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use casona_core::{Casona, Loadable, ProfileStore, UserProfile};
use clap::{ArgMatches, Command, arg};

use crate::arg::CommonArgs;
use crate::user_formatter::UserFormatter;
use crate::util::{OutputFormat, report};

#[derive(Debug, Clone, Copy)]
pub struct CmdProfileShow {
    pub output_format: OutputFormat,
}

impl CmdProfileShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show your profile, creating it on first use")
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing profile...");
        let store = app.profile_store();
        let profile = load(&store).await?;
        let formatter = UserFormatter::new(true).with_output_format(self.output_format);
        println!("{}", formatter.format(&[profile])?);
        Ok(())
    }
}

/// Which profile field a [`CmdProfileSet`] changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    DisplayName,
    Email,
    PhoneNumber,
}

impl ProfileField {
    const fn name(self) -> &'static str {
        match self {
            ProfileField::DisplayName => "set-name",
            ProfileField::Email => "set-email",
            ProfileField::PhoneNumber => "set-phone",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdProfileSet {
    pub field: ProfileField,
    pub value: String,
}

impl CmdProfileSet {
    pub const NAME_DISPLAY_NAME: &str = ProfileField::DisplayName.name();
    pub const NAME_EMAIL: &str = ProfileField::Email.name();
    pub const NAME_PHONE_NUMBER: &str = ProfileField::PhoneNumber.name();

    pub fn command(field: ProfileField) -> Command {
        let (about, value) = match field {
            ProfileField::DisplayName => ("Change your display name", arg!(value: <NAME>)),
            ProfileField::Email => (
                "Change your email, a verification link is sent to the new address",
                arg!(value: <EMAIL>),
            ),
            ProfileField::PhoneNumber => ("Change your phone number", arg!(value: <PHONE>)),
        };
        Command::new(field.name()).about(about).arg(value)
    }

    pub fn from(field: ProfileField, matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let value = matches
            .get_one::<String>("value")
            .cloned()
            .ok_or("value is required")?;
        Ok(Self { field, value })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "updating profile...");
        let store = app.profile_store();
        load(&store).await?;
        match self.field {
            ProfileField::DisplayName => store.update_display_name(self.value).await?,
            ProfileField::Email => store.update_email(self.value).await?,
            ProfileField::PhoneNumber => store.update_phone_number(self.value).await?,
        }
        let state = store.snapshot();
        report(state.operation_success, state.message)
    }
}

async fn load(store: &ProfileStore) -> Result<UserProfile, Box<dyn Error>> {
    store.load_profile().await?;
    match store.snapshot().profile {
        Loadable::Loaded(profile) => Ok(profile),
        Loadable::Failed(message) => Err(message.into()),
        Loadable::NotLoaded | Loadable::Loading => {
            Err("Not signed in, run `casona auth login` first".into())
        }
    }
}
