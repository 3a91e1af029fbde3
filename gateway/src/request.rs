// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request bodies for the documents and accounts APIs.

use serde::Serialize;

use crate::value::{Fields, Value};

/// `runQuery` request with a single equality filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualityQuery {
    structured_query: StructuredQuery,
}

#[derive(Debug, Clone, Serialize)]
struct StructuredQuery {
    from: Vec<CollectionSelector>,
    #[serde(rename = "where")]
    filter: Filter,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionSelector {
    collection_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Filter {
    field_filter: FieldFilter,
}

#[derive(Debug, Clone, Serialize)]
struct FieldFilter {
    field: FieldReference,
    op: &'static str,
    value: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReference {
    field_path: String,
}

impl EqualityQuery {
    /// Selects documents of `collection` whose `field` equals `value`.
    #[must_use]
    pub fn new(collection: &str, field: &str, value: Value) -> Self {
        Self {
            structured_query: StructuredQuery {
                from: vec![CollectionSelector {
                    collection_id: collection.to_string(),
                }],
                filter: Filter {
                    field_filter: FieldFilter {
                        field: FieldReference {
                            field_path: field.to_string(),
                        },
                        op: "EQUAL",
                        value,
                    },
                },
            },
        }
    }
}

/// Body of a document write.
#[derive(Debug, Serialize)]
pub(crate) struct DocumentBody<'a> {
    pub fields: &'a Fields,
}

/// Email and password pair for `signUp` and `signInWithPassword`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// Out-of-band code request for `sendOobCode`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OobCodeRequest<'a> {
    pub request_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_email: Option<&'a str>,
}

/// Profile update for `update`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileUpdateRequest<'a> {
    pub id_token: String,
    pub display_name: &'a str,
    pub return_secure_token: bool,
}

/// Token lookup for `lookup`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupRequest {
    pub id_token: String,
}
