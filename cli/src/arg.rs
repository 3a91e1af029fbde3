// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;

use casona_core::UserType;
use clap::{Arg, ArgMatches, arg, value_parser};

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    pub fn id(kind: &str) -> Arg {
        arg!(id: <ID>).help(format!("The id of the {kind}"))
    }

    pub fn get_id(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
        matches
            .get_one::<String>("id")
            .cloned()
            .ok_or_else(|| "id is required".into())
    }

    pub fn inactive(kind: &str) -> Arg {
        arg!(--inactive).help(format!("Create the {kind} as inactive"))
    }

    pub fn get_inactive(matches: &ArgMatches) -> bool {
        matches.get_flag("inactive")
    }

    pub fn yes() -> Arg {
        arg!(-y --yes "Do not ask for confirmation")
    }

    pub fn get_yes(matches: &ArgMatches) -> bool {
        matches.get_flag("yes")
    }
}

/// Event fields, kept as typed so the form validator sees the raw input.
#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn title(positional: bool) -> Arg {
        if positional {
            arg!(title: <TITLE> "Title of the event")
        } else {
            arg!(title: -t --title <TITLE> "Title of the event")
        }
    }

    pub fn get_title(matches: &ArgMatches) -> Option<String> {
        matches.get_one("title").cloned()
    }

    pub fn description() -> Arg {
        arg!(-d --description <DESCRIPTION> "Description of the event")
    }

    pub fn get_description(matches: &ArgMatches) -> Option<String> {
        matches.get_one("description").cloned()
    }

    pub fn location() -> Arg {
        arg!(-l --location <LOCATION> "Where the event takes place")
    }

    pub fn get_location(matches: &ArgMatches) -> Option<String> {
        matches.get_one("location").cloned()
    }

    pub fn price() -> Arg {
        arg!(--price <PRICE> "Ticket price")
    }

    pub fn get_price(matches: &ArgMatches) -> Option<String> {
        matches.get_one("price").cloned()
    }

    pub fn tickets() -> Arg {
        arg!(--tickets <TICKETS> "Number of available tickets")
    }

    pub fn get_tickets(matches: &ArgMatches) -> Option<String> {
        matches.get_one("tickets").cloned()
    }

    pub fn date() -> Arg {
        arg!(--date <DATE> "Date and time of the event, e.g. '2025-03-01 20:30'")
    }

    pub fn get_date(matches: &ArgMatches) -> Option<String> {
        matches.get_one("date").cloned()
    }

    pub fn image_url() -> Arg {
        arg!(--"image-url" <URL> "Poster image URL, empty to remove")
    }

    pub fn get_image_url(matches: &ArgMatches) -> Option<String> {
        matches.get_one("image-url").cloned()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UserArgs;

impl UserArgs {
    pub fn email(positional: bool) -> Arg {
        if positional {
            arg!(email: <EMAIL> "Email address of the user")
        } else {
            arg!(email: -e --email <EMAIL> "Email address of the user")
        }
    }

    pub fn get_email(matches: &ArgMatches) -> Option<String> {
        matches.get_one("email").cloned()
    }

    pub fn display_name() -> Arg {
        arg!(-n --name <NAME> "Display name of the user")
    }

    pub fn get_display_name(matches: &ArgMatches) -> Option<String> {
        matches.get_one("name").cloned()
    }

    pub fn phone() -> Arg {
        arg!(-p --phone <PHONE> "Phone number of the user")
    }

    pub fn get_phone(matches: &ArgMatches) -> Option<String> {
        matches.get_one("phone").cloned()
    }

    pub fn user_type() -> Arg {
        Arg::new("type")
            .long("type")
            .value_name("TYPE")
            .help("Role of the user")
            .value_parser(value_parser!(UserType))
    }

    pub fn get_user_type(matches: &ArgMatches) -> Option<UserType> {
        matches.get_one("type").copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AuthArgs;

impl AuthArgs {
    pub fn email() -> Arg {
        arg!(email: <EMAIL> "Email address of the account")
    }

    pub fn get_email(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
        matches
            .get_one::<String>("email")
            .cloned()
            .ok_or_else(|| "email is required".into())
    }

    pub fn password() -> Arg {
        arg!(-p --password <PASSWORD> "Password, prompted for when omitted")
    }

    pub fn get_password(matches: &ArgMatches) -> Option<Password> {
        matches.get_one::<String>("password").cloned().map(Password)
    }
}

/// A password given on the command line, hidden from debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(pub String);

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
