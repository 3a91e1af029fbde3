// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Create/edit forms and their validators.

use jiff::Timestamp;

use crate::event::Event;
use crate::user::{UserProfile, UserType, email_prefix};

/// Checks the raw inputs of the event form.
///
/// Title, description and location must not be blank. The price must parse
/// as a finite decimal that is not negative and the ticket count as a
/// non-negative integer. Surrounding whitespace is ignored.
#[must_use]
pub fn validate_event(
    title: &str,
    description: &str,
    location: &str,
    price: &str,
    ticket_count: &str,
) -> bool {
    !is_blank(title)
        && !is_blank(description)
        && !is_blank(location)
        && parse_price(price).is_some()
        && parse_tickets(ticket_count).is_some()
}

/// Checks the raw inputs of the user form.
///
/// Email, display name and phone number must not be blank and a user type
/// must be chosen. The email and phone number are not checked further.
#[must_use]
pub fn validate_user(
    email: &str,
    display_name: &str,
    phone_number: &str,
    user_type: Option<UserType>,
) -> bool {
    !is_blank(email) && !is_blank(display_name) && !is_blank(phone_number) && user_type.is_some()
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn parse_price(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

fn parse_tickets(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

/// Raw inputs of the event create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Location.
    pub location: String,
    /// Price as typed.
    pub price: String,
    /// Ticket count as typed.
    pub available_tickets: String,
    /// Event date.
    pub date: Timestamp,
    /// Image URL, blank for none.
    pub image_url: String,
    /// Active flag.
    pub active: bool,

    base: Option<Event>,
}

impl Default for EventForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EventForm {
    /// An empty form for creating an event.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            location: String::new(),
            price: String::new(),
            available_tickets: String::new(),
            date: Timestamp::now(),
            image_url: String::new(),
            active: true,
            base: None,
        }
    }

    /// A form prefilled from an existing event.
    #[must_use]
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            price: event.price.to_string(),
            available_tickets: event.available_tickets.to_string(),
            date: event.date,
            image_url: event.image_url.clone().unwrap_or_default(),
            active: event.active,
            base: Some(event.clone()),
        }
    }

    /// Whether the form edits an existing event.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.base.is_some()
    }

    /// Whether the inputs pass [`validate_event`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate_event(
            &self.title,
            &self.description,
            &self.location,
            &self.price,
            &self.available_tickets,
        )
    }

    /// Builds the event to persist, or `None` if the inputs are invalid.
    ///
    /// In edit mode the id, owner and creation time of the original event
    /// are kept and `created_by` is ignored.
    #[must_use]
    pub fn submit(&self, created_by: &str) -> Option<Event> {
        if !self.is_valid() {
            return None;
        }

        let price = parse_price(&self.price)?;
        let available_tickets = parse_tickets(&self.available_tickets)?;
        let image_url = Some(self.image_url.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        let (id, created_by, created_at) = match &self.base {
            Some(base) => (base.id.clone(), base.created_by.clone(), base.created_at),
            None => (String::new(), created_by.to_string(), Timestamp::now()),
        };

        Some(Event {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date,
            location: self.location.trim().to_string(),
            price,
            available_tickets,
            image_url,
            created_by,
            created_at,
            active: self.active,
        })
    }
}

/// Raw inputs of the user create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    /// Email.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Phone number.
    pub phone_number: String,
    /// Role, `None` until chosen.
    pub user_type: Option<UserType>,
    /// Active flag.
    pub active: bool,

    base: Option<UserProfile>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UserForm {
    /// An empty form for creating a user.
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: String::new(),
            display_name: String::new(),
            phone_number: String::new(),
            user_type: Some(UserType::Client),
            active: true,
            base: None,
        }
    }

    /// A form prefilled from an existing profile.
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            email: profile.email.clone(),
            display_name: profile.display_name.clone(),
            phone_number: profile.phone_number.clone().unwrap_or_default(),
            user_type: Some(profile.user_type),
            active: profile.active,
            base: Some(profile.clone()),
        }
    }

    /// Whether the form edits an existing profile.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.base.is_some()
    }

    /// Whether the inputs pass [`validate_user`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        validate_user(
            &self.email,
            &self.display_name,
            &self.phone_number,
            self.user_type,
        )
    }

    /// Builds the profile to persist, or `None` if the inputs are invalid.
    ///
    /// In edit mode the fields the form does not show are kept from the
    /// original profile.
    #[must_use]
    pub fn submit(&self) -> Option<UserProfile> {
        if !self.is_valid() {
            return None;
        }

        let email = self.email.trim().to_string();
        let mut profile = self.base.clone().unwrap_or_else(|| UserProfile {
            user_name: email_prefix(&email).to_string(),
            ..Default::default()
        });
        profile.email = email;
        profile.display_name = self.display_name.trim().to_string();
        profile.phone_number = Some(self.phone_number.trim().to_string());
        profile.user_type = self.user_type?;
        profile.active = self.active;
        Some(profile)
    }
}
