//! Loosely typed record fields
//!
//! Form input arrives with whatever JSON type the page produced: a score may
//! be `85`, `"85"` or `null`. A [`Field`] keeps that value untouched and tells
//! an absent key apart from an explicit `null`, so a record serializes back to
//! exactly what was supplied.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A record field holding any JSON value, or nothing when the key was absent
///
/// Record structs pair it with `skip_serializing_if = "Field::is_absent"`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field(Option<Value>);

impl Field {
    /// Field whose key was not supplied
    #[inline]
    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    /// Check if the key was not supplied
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Raw value, `None` when absent
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    /// Text content, `None` for absent or non-string values
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_ref().and_then(Value::as_str)
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Self(Some(value))
    }
}

impl From<&str> for Field {
    fn from(text: &str) -> Self {
        Self(Some(Value::from(text)))
    }
}

impl From<String> for Field {
    fn from(text: String) -> Self {
        Self(Some(Value::from(text)))
    }
}

impl From<f64> for Field {
    fn from(number: f64) -> Self {
        Self(Some(Value::from(number)))
    }
}

impl From<i64> for Field {
    fn from(number: i64) -> Self {
        Self(Some(Value::from(number)))
    }
}

/// ISO-8601 UTC with milliseconds, e.g. `2026-10-16T09:30:00.000Z`
impl From<DateTime<Utc>> for Field {
    fn from(at: DateTime<Utc>) -> Self {
        Self::from(at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl PartialEq<&str> for Field {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    /// A present key always yields a value, `null` included
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self(Some(value)))
    }
}
