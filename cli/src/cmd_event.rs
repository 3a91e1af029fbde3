// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use casona_core::{Casona, Event, EventForm, EventStore};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::arg::{CommonArgs, EventArgs};
use crate::event_formatter::EventFormatter;
use crate::util::{OutputFormat, confirm, parse_date, report, require_admin};

const INVALID_EVENT: &str = "Invalid event: title, description and location must not be blank, \
price must be a non-negative number and tickets a whole number";

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List active events")
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
        tracing::debug!(?self, "listing events...");
        let store = app.event_store();
        store.load().await?;

        let state = store.snapshot();
        if let Some(message) = state.message {
            return Err(message.into());
        }

        if state.items.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }
        print_events(&state.items, self.output_format, self.verbose)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventShow {
    pub id: String,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show an event, including inactive ones")
            .arg(CommonArgs::id("event"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: CommonArgs::get_id(matches)?,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing event...");
        let event = fetch_event(&app.event_store(), &self.id).await?;
        print_events(&[event], self.output_format, self.verbose)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub tickets: Option<String>,
    pub date: Option<String>,
    pub image_url: Option<String>,
    pub inactive: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create an event (admin only)")
            .arg(EventArgs::title(true))
            .arg(EventArgs::description())
            .arg(EventArgs::location())
            .arg(EventArgs::price())
            .arg(EventArgs::tickets())
            .arg(EventArgs::date())
            .arg(EventArgs::image_url())
            .arg(CommonArgs::inactive("event"))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            title: EventArgs::get_title(matches).ok_or("Title is required for new event")?,
            description: EventArgs::get_description(matches),
            location: EventArgs::get_location(matches),
            price: EventArgs::get_price(matches),
            tickets: EventArgs::get_tickets(matches),
            date: EventArgs::get_date(matches),
            image_url: EventArgs::get_image_url(matches),
            inactive: CommonArgs::get_inactive(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "creating event...");
        require_admin(app).await?;
        let principal = app.current_user().await?.ok_or("Not signed in")?;

        let mut form = EventForm::new();
        form.title = self.title;
        form.description = self.description.unwrap_or_default();
        form.location = self.location.unwrap_or_default();
        form.price = self.price.unwrap_or_default();
        form.available_tickets = self.tickets.unwrap_or_default();
        form.image_url = self.image_url.unwrap_or_default();
        form.active = !self.inactive;
        if let Some(date) = &self.date {
            form.date = parse_date(date)?;
        }
        let event = form.submit(&principal.uid).ok_or(INVALID_EVENT)?;

        let store = app.event_store();
        store.create(event).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub tickets: Option<String>,
    pub date: Option<String>,
    pub image_url: Option<String>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event (admin only)")
            .arg(CommonArgs::id("event"))
            .arg(EventArgs::title(false))
            .arg(EventArgs::description())
            .arg(EventArgs::location())
            .arg(EventArgs::price())
            .arg(EventArgs::tickets())
            .arg(EventArgs::date())
            .arg(EventArgs::image_url())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: CommonArgs::get_id(matches)?,
            title: EventArgs::get_title(matches),
            description: EventArgs::get_description(matches),
            location: EventArgs::get_location(matches),
            price: EventArgs::get_price(matches),
            tickets: EventArgs::get_tickets(matches),
            date: EventArgs::get_date(matches),
            image_url: EventArgs::get_image_url(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        require_admin(app).await?;

        let store = app.event_store();
        let original = fetch_event(&store, &self.id).await?;
        let mut form = EventForm::from_event(&original);
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(location) = self.location {
            form.location = location;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(tickets) = self.tickets {
            form.available_tickets = tickets;
        }
        if let Some(date) = &self.date {
            form.date = parse_date(date)?;
        }
        if let Some(image_url) = self.image_url {
            form.image_url = image_url;
        }
        // owner is kept from the stored event in edit mode
        let event = form.submit("").ok_or(INVALID_EVENT)?;

        store.update(&self.id, event).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)?;
        if let Some(event) = store.find(&self.id) {
            print_events(&[event], self.output_format, self.verbose)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventToggle {
    pub id: String,
}

impl CmdEventToggle {
    pub const NAME: &str = "toggle";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Activate or deactivate an event (admin only)")
            .arg(CommonArgs::id("event"))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: CommonArgs::get_id(matches)?,
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "toggling event...");
        require_admin(app).await?;

        let store = app.event_store();
        store.load().await?;
        if store.find(&self.id).is_some() {
            store.toggle_active(&self.id).await?;
        } else {
            // inactive events are not listed, fetch it directly to reactivate
            let event = fetch_event(&store, &self.id).await?;
            let active = !event.active;
            store.update(&self.id, Event { active, ..event }).await?;
        }
        let state = store.snapshot();
        report(state.operation_success, state.message)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
    pub yes: bool,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event (admin only)")
            .arg(CommonArgs::id("event"))
            .arg(CommonArgs::yes())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: CommonArgs::get_id(matches)?,
            yes: CommonArgs::get_yes(matches),
        })
    }

    pub async fn run(self, app: &Casona) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        require_admin(app).await?;
        if !self.yes && !confirm(&format!("Delete event {}?", self.id))? {
            tracing::info!("user cancelled the deletion");
            return Ok(());
        }

        let store = app.event_store();
        store.delete(&self.id).await?;
        let state = store.snapshot();
        report(state.operation_success, state.message)
    }
}

async fn fetch_event(store: &EventStore, id: &str) -> Result<Event, Box<dyn Error>> {
    store.load_by_id(id).await?;
    let state = store.snapshot();
    match state.selected {
        Some(event) => Ok(event),
        None => Err(state.message.unwrap_or_else(|| "Event not found".to_string()).into()),
    }
}

fn print_events(
    events: &[Event],
    output_format: OutputFormat,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let formatter = EventFormatter::new(verbose).with_output_format(output_format);
    println!("{}", formatter.format(events)?);
    Ok(())
}
