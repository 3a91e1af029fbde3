// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed field values in their JSON wire encoding.
//!
//! Every value travels as a single-key object naming its type, e.g.
//! `{"stringValue": "Concert"}` or `{"integerValue": "100"}`. Integers are
//! written as strings, the service accepts and emits both forms.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Field map of a document.
pub type Fields = BTreeMap<String, Value>;

/// A single typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Explicit null.
    #[serde(rename = "nullValue", with = "null_repr")]
    Null(()),

    /// Boolean value.
    #[serde(rename = "booleanValue")]
    Boolean(bool),

    /// 64-bit signed integer.
    #[serde(rename = "integerValue", with = "integer_repr")]
    Integer(i64),

    /// Double precision float.
    #[serde(rename = "doubleValue")]
    Double(f64),

    /// Point in time, RFC 3339 on the wire.
    #[serde(rename = "timestampValue")]
    Timestamp(Timestamp),

    /// UTF-8 string.
    #[serde(rename = "stringValue")]
    String(String),

    /// Ordered list of values.
    #[serde(rename = "arrayValue")]
    Array {
        /// Array elements, absent when the array is empty.
        #[serde(default)]
        values: Vec<Value>,
    },

    /// Nested map.
    #[serde(rename = "mapValue")]
    Map {
        /// Map entries, absent when the map is empty.
        #[serde(default)]
        fields: Fields,
    },
}

impl Value {
    /// The null value.
    #[must_use]
    pub const fn null() -> Self {
        Self::Null(())
    }

    /// Whether this is the null value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null(()))
    }

    /// The string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean content, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer content. Doubles without a fractional part are accepted.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Double(d) if d.is_finite() && d.fract() == 0.0 => Some(*d as i64),
            _ => None,
        }
    }

    /// The numeric content as a float, for doubles and integers.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The timestamp content, if this is a timestamp.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or_else(Self::null, Into::into)
    }
}

mod null_repr {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(_: &(), serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_none()
    }

    // Accepts `null` as well as the enum spelling `"NULL_VALUE"`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(), D::Error> {
        IgnoredAny::deserialize(deserializer).map(|_| ())
    }
}

mod integer_repr {
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}
