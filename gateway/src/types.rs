// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;

use crate::value::Fields;

/// A document read from the store.
///
/// The `id` is the last segment of the document's resource name, so a
/// document named `projects/p/databases/(default)/documents/events/abc` has
/// the id `abc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Document id inside its collection.
    pub id: String,
    /// Field values.
    pub fields: Fields,
    /// Creation time reported by the service.
    pub create_time: Option<Timestamp>,
    /// Last update time reported by the service.
    pub update_time: Option<Timestamp>,
}

impl Document {
    /// Creates a document with the given id and fields.
    #[must_use]
    pub const fn new(id: String, fields: Fields) -> Self {
        Self {
            id,
            fields,
            create_time: None,
            update_time: None,
        }
    }
}

/// Wire form of a document.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentRaw {
    pub name: String,
    #[serde(default)]
    pub fields: Fields,
    #[serde(default)]
    pub create_time: Option<Timestamp>,
    #[serde(default)]
    pub update_time: Option<Timestamp>,
}

impl From<DocumentRaw> for Document {
    fn from(value: DocumentRaw) -> Self {
        let DocumentRaw {
            name,
            fields,
            create_time,
            update_time,
        } = value;
        Self {
            id: document_id(&name).to_string(),
            fields,
            create_time,
            update_time,
        }
    }
}

/// Extracts the trailing id segment of a resource name.
pub(crate) fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// An authenticated principal as reported by the account service.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AuthUser {
    /// Stable user id.
    pub uid: String,
    /// Email address, if any.
    pub email: Option<String>,
    /// Display name, if any.
    pub display_name: Option<String>,
    /// Phone number, if any.
    pub phone_number: Option<String>,
    /// Account creation time.
    pub created_at: Option<Timestamp>,
    /// Last sign-in time.
    pub last_login: Option<Timestamp>,
}

/// Tokens of a signed-in user.
///
/// The session is exported and restored by front ends that outlive a single
/// process, the gateway itself only keeps it in memory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    /// Stable user id.
    pub uid: String,
    /// Email used to sign in.
    #[serde(default)]
    pub email: Option<String>,
    /// Short-lived ID token sent as the bearer credential.
    pub id_token: String,
    /// Long-lived refresh token.
    #[serde(default)]
    pub refresh_token: String,
}
