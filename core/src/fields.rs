// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lenient reads of document fields.
//!
//! Missing or mistyped fields fall back to the model default instead of
//! failing the whole document.

use casona_gateway::{Fields, Value};
use jiff::Timestamp;

#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldReader<'a>(pub &'a Fields);

impl FieldReader<'_> {
    fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn string(&self, key: &str) -> String {
        self.opt_string(key).unwrap_or_default()
    }

    pub fn opt_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_string)
    }

    pub fn f64(&self, key: &str) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or_default()
    }

    /// Negative or oversized counts clamp to the `u32` range.
    pub fn u32(&self, key: &str) -> u32 {
        self.get(key)
            .and_then(Value::as_i64)
            .map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
            .unwrap_or_default()
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn opt_timestamp(&self, key: &str) -> Option<Timestamp> {
        self.get(key).and_then(Value::as_timestamp)
    }

    pub fn timestamp_or(&self, key: &str, default: Timestamp) -> Timestamp {
        self.opt_timestamp(key).unwrap_or(default)
    }
}
