// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use casona_gateway::{Document, Fields, Value};
use jiff::Timestamp;

use crate::fields::FieldReader;

/// Collection holding events.
pub const EVENTS: &str = "events";

/// An event offered by the venue.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Document id. Empty until the event is stored.
    pub id: String,

    /// Title shown in listings.
    pub title: String,

    /// Free-form description.
    pub description: String,

    /// When the event takes place.
    pub date: Timestamp,

    /// Where the event takes place.
    pub location: String,

    /// Ticket price, never negative.
    pub price: f64,

    /// Tickets left.
    pub available_tickets: u32,

    /// Poster image, if any.
    pub image_url: Option<String>,

    /// Uid of the admin who created the event.
    pub created_by: String,

    /// Creation time.
    pub created_at: Timestamp,

    /// Inactive events are hidden from listings.
    pub active: bool,
}

impl Default for Event {
    fn default() -> Self {
        let now = Timestamp::now();
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            date: now,
            location: String::new(),
            price: 0.0,
            available_tickets: 0,
            image_url: None,
            created_by: String::new(),
            created_at: now,
            active: true,
        }
    }
}

impl Event {
    /// Field map stored for this event. The id is the document name and is
    /// not part of the fields.
    #[must_use]
    pub fn to_fields(&self) -> Fields {
        Fields::from([
            ("title".to_string(), Value::from(self.title.as_str())),
            ("description".to_string(), Value::from(self.description.as_str())),
            ("date".to_string(), Value::from(self.date)),
            ("location".to_string(), Value::from(self.location.as_str())),
            ("price".to_string(), Value::from(self.price)),
            (
                "availableTickets".to_string(),
                Value::from(self.available_tickets),
            ),
            ("imageUrl".to_string(), Value::from(self.image_url.clone())),
            ("createdBy".to_string(), Value::from(self.created_by.as_str())),
            ("createdAt".to_string(), Value::from(self.created_at)),
            ("active".to_string(), Value::from(self.active)),
        ])
    }

    /// Reads an event from a document, filling missing fields with defaults.
    #[must_use]
    pub fn from_document(doc: Document) -> Self {
        let r = FieldReader(&doc.fields);
        let now = Timestamp::now();
        Self {
            title: r.string("title"),
            description: r.string("description"),
            date: r.timestamp_or("date", now),
            location: r.string("location"),
            price: r.f64("price"),
            available_tickets: r.u32("availableTickets"),
            image_url: r.opt_string("imageUrl"),
            created_by: r.string("createdBy"),
            created_at: r.timestamp_or("createdAt", now),
            active: r.bool_or("active", true),
            id: doc.id,
        }
    }

    /// Returns a copy with a different id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
