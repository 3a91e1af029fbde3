// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use casona_gateway::{AuthUser, Document, Fields, Value};
use jiff::Timestamp;

use crate::fields::FieldReader;

/// Collection holding user profiles.
pub const USERS: &str = "users";

const USER_TYPE_ADMIN: &str = "ADMIN";
const USER_TYPE_CLIENT: &str = "CLIENT";

/// Greeting stored as the bio of a freshly bootstrapped profile.
pub const DEFAULT_BIO: &str = "Hi! I'm new to Casona EncantadApp.";

/// Fallback display name when the principal has neither a name nor an email.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum UserType {
    /// Manages events and users.
    #[serde(rename = "ADMIN")]
    #[cfg_attr(feature = "clap", clap(name = "admin"))]
    Admin,

    /// Regular customer.
    #[default]
    #[serde(rename = "CLIENT")]
    #[cfg_attr(feature = "clap", clap(name = "client"))]
    Client,
}

impl AsRef<str> for UserType {
    fn as_ref(&self) -> &str {
        match self {
            UserType::Admin => USER_TYPE_ADMIN,
            UserType::Client => USER_TYPE_CLIENT,
        }
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for UserType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            USER_TYPE_ADMIN => Ok(UserType::Admin),
            USER_TYPE_CLIENT => Ok(UserType::Client),
            _ => Err(()),
        }
    }
}

/// Profile of a user as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Auth uid, or the document id for profiles created by an admin.
    pub uid: String,

    /// Email address.
    pub email: String,

    /// Handle derived from the email.
    pub user_name: String,

    /// Name shown to others.
    pub display_name: String,

    /// Creation time.
    pub created_at: Timestamp,

    /// Last sign-in time.
    pub last_login: Option<Timestamp>,

    /// Deactivated users cannot access the system.
    pub active: bool,

    /// Contact phone number.
    pub phone_number: Option<String>,

    /// Short bio.
    pub bio: String,

    /// Role.
    pub user_type: UserType,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            uid: String::new(),
            email: String::new(),
            user_name: String::new(),
            display_name: String::new(),
            created_at: Timestamp::now(),
            last_login: None,
            active: true,
            phone_number: None,
            bio: String::new(),
            user_type: UserType::Client,
        }
    }
}

impl UserProfile {
    /// Whether the user may manage events and users.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    /// Builds the profile of a principal that has none yet.
    ///
    /// The user name is the part of the email before `@`. The display name is
    /// the principal's own, else that user name, else [`DEFAULT_DISPLAY_NAME`].
    #[must_use]
    pub fn bootstrap(principal: &AuthUser, now: Timestamp) -> Self {
        let email = principal.email.clone().unwrap_or_default();
        let user_name = email_prefix(&email).to_string();
        let display_name = principal
            .display_name
            .clone()
            .filter(|a| !a.trim().is_empty())
            .or_else(|| (!user_name.is_empty()).then(|| user_name.clone()))
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        Self {
            uid: principal.uid.clone(),
            email,
            user_name,
            display_name,
            created_at: principal.created_at.unwrap_or(now),
            last_login: Some(principal.last_login.unwrap_or(now)),
            active: true,
            phone_number: principal.phone_number.clone(),
            bio: DEFAULT_BIO.to_string(),
            user_type: UserType::Client,
        }
    }

    /// Field map stored for this profile.
    #[must_use]
    pub fn to_fields(&self) -> Fields {
        Fields::from([
            ("uid".to_string(), Value::from(self.uid.as_str())),
            ("email".to_string(), Value::from(self.email.as_str())),
            ("userName".to_string(), Value::from(self.user_name.as_str())),
            ("displayName".to_string(), Value::from(self.display_name.as_str())),
            ("createdAt".to_string(), Value::from(self.created_at)),
            ("lastLogin".to_string(), Value::from(self.last_login)),
            ("active".to_string(), Value::from(self.active)),
            ("phoneNumber".to_string(), Value::from(self.phone_number.clone())),
            ("bio".to_string(), Value::from(self.bio.as_str())),
            ("userType".to_string(), Value::from(self.user_type.as_ref())),
        ])
    }

    /// Reads a profile from a document, filling missing fields with defaults.
    /// The stored `uid` field wins over the document id.
    #[must_use]
    pub fn from_document(doc: Document) -> Self {
        let r = FieldReader(&doc.fields);
        Self {
            uid: r.opt_string("uid").filter(|a| !a.is_empty()).unwrap_or(doc.id),
            email: r.string("email"),
            user_name: r.string("userName"),
            display_name: r.string("displayName"),
            created_at: r.timestamp_or("createdAt", Timestamp::now()),
            last_login: r.opt_timestamp("lastLogin"),
            active: r.bool_or("active", true),
            phone_number: r.opt_string("phoneNumber"),
            bio: r.string("bio"),
            user_type: r
                .opt_string("userType")
                .and_then(|a| a.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// The part of an email before `@`, or the whole string without one.
#[must_use]
pub fn email_prefix(email: &str) -> &str {
    email.split_once('@').map_or(email, |(prefix, _)| prefix)
}
