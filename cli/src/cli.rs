// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use casona_core::{APP_NAME, Casona};
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_auth::{
    CmdAuthLegacyLogin, CmdAuthLogin, CmdAuthLogout, CmdAuthRegister, CmdAuthResetPassword,
    CmdAuthWhoami,
};
use crate::cmd_event::{
    CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew, CmdEventShow, CmdEventToggle,
};
use crate::cmd_profile::{CmdProfileSet, CmdProfileShow, ProfileField};
use crate::cmd_user::{CmdUserDelete, CmdUserEdit, CmdUserList, CmdUserNew, CmdUserToggle};
use crate::config::parse_config;

/// Run the Casona command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let cli = match Cli::parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(2);
        }
    };

    init_tracing(cli.debug);
    if let Err(e) = cli.run().await {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
    Ok(())
}

/// Logs go to stderr, filtered by `RUST_LOG` when it is set.
fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Enable debug logging
    pub debug: bool,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Casona EncantadApp: events, tickets and users of the venue.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/casona/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/casona/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .arg(arg!(--debug "Enable debug logging").global(true))
            .subcommand(
                Command::new("auth")
                    .about("Sign in, sign out and manage your account")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdAuthRegister::command())
                    .subcommand(CmdAuthLogin::command())
                    .subcommand(CmdAuthLogout::command())
                    .subcommand(CmdAuthResetPassword::command())
                    .subcommand(CmdAuthLegacyLogin::command())
                    .subcommand(CmdAuthWhoami::command()),
            )
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Browse and manage events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventShow::command())
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventToggle::command())
                    .subcommand(CmdEventDelete::command()),
            )
            .subcommand(
                Command::new("user")
                    .alias("u")
                    .about("Manage users (admin only)")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdUserList::command())
                    .subcommand(CmdUserNew::command())
                    .subcommand(CmdUserEdit::command())
                    .subcommand(CmdUserToggle::command())
                    .subcommand(CmdUserDelete::command()),
            )
            .subcommand(
                Command::new("profile")
                    .alias("p")
                    .about("View and edit your own profile")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdProfileShow::command())
                    .subcommand(CmdProfileSet::command(ProfileField::DisplayName))
                    .subcommand(CmdProfileSet::command(ProfileField::Email))
                    .subcommand(CmdProfileSet::command(ProfileField::PhoneNumber)),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let unknown = || -> Box<dyn Error> { "Unknown command".into() };
        let command = match matches.subcommand() {
            Some(("auth", matches)) => match matches.subcommand() {
                Some((CmdAuthRegister::NAME, m)) => AuthRegister(CmdAuthRegister::from(m)?),
                Some((CmdAuthLogin::NAME, m)) => AuthLogin(CmdAuthLogin::from(m)?),
                Some((CmdAuthLogout::NAME, _)) => AuthLogout(CmdAuthLogout),
                Some((CmdAuthResetPassword::NAME, m)) => {
                    AuthResetPassword(CmdAuthResetPassword::from(m)?)
                }
                Some((CmdAuthLegacyLogin::NAME, m)) => {
                    AuthLegacyLogin(CmdAuthLegacyLogin::from(m)?)
                }
                Some((CmdAuthWhoami::NAME, _)) => AuthWhoami(CmdAuthWhoami),
                _ => return Err(unknown()),
            },
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, m)) => EventList(CmdEventList::from(m)),
                Some((CmdEventShow::NAME, m)) => EventShow(CmdEventShow::from(m)?),
                Some((CmdEventNew::NAME, m)) => EventNew(CmdEventNew::from(m)?),
                Some((CmdEventEdit::NAME, m)) => EventEdit(CmdEventEdit::from(m)?),
                Some((CmdEventToggle::NAME, m)) => EventToggle(CmdEventToggle::from(m)?),
                Some((CmdEventDelete::NAME, m)) => EventDelete(CmdEventDelete::from(m)?),
                _ => return Err(unknown()),
            },
            Some(("user", matches)) => match matches.subcommand() {
                Some((CmdUserList::NAME, m)) => UserList(CmdUserList::from(m)),
                Some((CmdUserNew::NAME, m)) => UserNew(CmdUserNew::from(m)?),
                Some((CmdUserEdit::NAME, m)) => UserEdit(CmdUserEdit::from(m)?),
                Some((CmdUserToggle::NAME, m)) => UserToggle(CmdUserToggle::from(m)?),
                Some((CmdUserDelete::NAME, m)) => UserDelete(CmdUserDelete::from(m)?),
                _ => return Err(unknown()),
            },
            Some(("profile", matches)) => match matches.subcommand() {
                Some((CmdProfileShow::NAME, m)) => ProfileShow(CmdProfileShow::from(m)),
                Some((CmdProfileSet::NAME_DISPLAY_NAME, m)) => {
                    ProfileSet(CmdProfileSet::from(ProfileField::DisplayName, m)?)
                }
                Some((CmdProfileSet::NAME_EMAIL, m)) => {
                    ProfileSet(CmdProfileSet::from(ProfileField::Email, m)?)
                }
                Some((CmdProfileSet::NAME_PHONE_NUMBER, m)) => {
                    ProfileSet(CmdProfileSet::from(ProfileField::PhoneNumber, m)?)
                }
                _ => return Err(unknown()),
            },
            _ => return Err(unknown()),
        };

        let config = matches.get_one("config").cloned();
        let debug = matches.get_flag("debug");
        Ok(Cli {
            config,
            debug,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Create an account
    AuthRegister(CmdAuthRegister),

    /// Sign in
    AuthLogin(CmdAuthLogin),

    /// Sign out
    AuthLogout(CmdAuthLogout),

    /// Send a password reset email
    AuthResetPassword(CmdAuthResetPassword),

    /// Check the locally saved credentials
    AuthLegacyLogin(CmdAuthLegacyLogin),

    /// Show the signed-in account
    AuthWhoami(CmdAuthWhoami),

    /// List active events
    EventList(CmdEventList),

    /// Show an event
    EventShow(CmdEventShow),

    /// Create an event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Activate or deactivate an event
    EventToggle(CmdEventToggle),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// List users
    UserList(CmdUserList),

    /// Create a user profile
    UserNew(CmdUserNew),

    /// Edit a user profile
    UserEdit(CmdUserEdit),

    /// Activate or deactivate a user
    UserToggle(CmdUserToggle),

    /// Delete a user profile
    UserDelete(CmdUserDelete),

    /// Show your profile
    ProfileShow(CmdProfileShow),

    /// Change a field of your profile
    ProfileSet(CmdProfileSet),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            AuthRegister(a)      => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            AuthLogin(a)         => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            AuthLogout(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            AuthResetPassword(a) => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            AuthLegacyLogin(a)   => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            AuthWhoami(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventList(a)         => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventShow(a)         => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventNew(a)          => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventEdit(a)         => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventToggle(a)       => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            EventDelete(a)       => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            UserList(a)          => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            UserNew(a)           => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            UserEdit(a)          => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            UserToggle(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            UserDelete(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ProfileShow(a)       => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            ProfileSet(a)        => Self::run_with(config, |x| a.run(x).boxed_local()).await,
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Casona) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let core_config = parse_config(config).await?;
        let app = Casona::new(core_config).await?;

        // the session is saved even when the command failed, a sign-in may
        // have happened before the error
        let result = f(&app).await;
        app.close().await?;
        result
    }
}
