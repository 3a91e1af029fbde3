// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use casona_core::{UserProfile, UserType};
use colored::Color;

use crate::table::{Column, Table};
use crate::util::{OutputFormat, format_timestamp};

#[derive(Debug)]
pub struct UserFormatter {
    columns: Vec<UserColumn>,
    format: OutputFormat,
}

impl UserFormatter {
    pub fn new(verbose: bool) -> Self {
        use UserColumn::*;
        let columns = if verbose {
            vec![Uid, Type, DisplayName, Email, Phone, Active, Bio, CreatedAt, LastLogin]
        } else {
            vec![Uid, Type, DisplayName, Email, Phone]
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

    pub fn format(&self, users: &[UserProfile]) -> Result<String, Box<dyn Error>> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(users)?,
            OutputFormat::Table => Table::new(&self.columns, users).to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserColumn {
    Uid,
    Type,
    DisplayName,
    Email,
    Phone,
    Active,
    Bio,
    CreatedAt,
    LastLogin,
}

impl Column<UserProfile> for UserColumn {
    fn name(&self) -> &'static str {
        match self {
            UserColumn::Uid => "UID",
            UserColumn::Type => "Type",
            UserColumn::DisplayName => "Name",
            UserColumn::Email => "Email",
            UserColumn::Phone => "Phone",
            UserColumn::Active => "Active",
            UserColumn::Bio => "Bio",
            UserColumn::CreatedAt => "Created",
            UserColumn::LastLogin => "Last Login",
        }
    }

    fn format(&self, user: &UserProfile) -> String {
        match self {
            UserColumn::Uid => user.uid.clone(),
            UserColumn::Type => user.user_type.to_string(),
            UserColumn::DisplayName => user.display_name.clone(),
            UserColumn::Email => user.email.clone(),
            UserColumn::Phone => user.phone_number.clone().unwrap_or_default(),
            UserColumn::Active => if user.active { "yes" } else { "no" }.to_string(),
            UserColumn::Bio => user.bio.clone(),
            UserColumn::CreatedAt => format_timestamp(user.created_at),
            UserColumn::LastLogin => user.last_login.map(format_timestamp).unwrap_or_default(),
        }
    }

    fn get_color(&self, user: &UserProfile) -> Option<Color> {
        match self {
            UserColumn::Type if user.user_type == UserType::Admin => Some(Color::Yellow),
            UserColumn::Active if !user.active => Some(Color::BrightBlack),
            _ => None,
        }
    }
}
