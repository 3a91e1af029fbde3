// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use casona_core::Event;
use colored::Color;

use crate::table::{Column, PaddingDirection, Table};
use crate::util::{OutputFormat, format_timestamp};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(verbose: bool) -> Self {
        use EventColumn::*;
        let columns = if verbose {
            vec![Id, Date, Title, Location, Price, Tickets, Active, CreatedBy]
        } else {
            vec![Id, Date, Title, Location, Price, Tickets]
        };
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self, events: &[Event]) -> Result<String, Box<dyn Error>> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(events)?,
            OutputFormat::Table => Table::new(&self.columns, events).to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    Id,
    Date,
    Title,
    Location,
    Price,
    Tickets,
    Active,
    CreatedBy,
}

impl Column<Event> for EventColumn {
    fn name(&self) -> &'static str {
        match self {
            EventColumn::Id => "ID",
            EventColumn::Date => "Date",
            EventColumn::Title => "Title",
            EventColumn::Location => "Location",
            EventColumn::Price => "Price",
            EventColumn::Tickets => "Tickets",
            EventColumn::Active => "Active",
            EventColumn::CreatedBy => "Created By",
        }
    }

    fn format(&self, event: &Event) -> String {
        match self {
            EventColumn::Id => event.id.clone(),
            EventColumn::Date => format_timestamp(event.date),
            EventColumn::Title => event.title.clone(),
            EventColumn::Location => event.location.clone(),
            EventColumn::Price => format!("{:.2}", event.price),
            EventColumn::Tickets => event.available_tickets.to_string(),
            EventColumn::Active => if event.active { "yes" } else { "no" }.to_string(),
            EventColumn::CreatedBy => event.created_by.clone(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Price | EventColumn::Tickets => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, event: &Event) -> Option<Color> {
        match self {
            EventColumn::Tickets if event.available_tickets == 0 => Some(Color::Red),
            EventColumn::Active if !event.active => Some(Color::BrightBlack),
            _ => None,
        }
    }
}
