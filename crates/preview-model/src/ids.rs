//! Record identifiers
//!
//! Identifiers are plain strings shaped `PREFIX-YYYYMMDD-SEQ`. The store never
//! rejects a malformed id; [`IdPrefix::matches`] only reports whether a value
//! follows the generated shape.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>[A-Z]+)-(?P<date>\d{8})-(?P<seq>\d{3,4})$").expect("id pattern compiles")
});

/// Width of the sequence part of generated ids
pub const SEQUENCE_WIDTH: usize = 4;

/// Number of distinct sequence values per prefix and day
pub const SEQUENCE_SPACE: u32 = 10_000;

/// Id prefix per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdPrefix {
    /// `PRJ`
    Project,
    /// `UC`
    UseCase,
}

impl IdPrefix {
    /// Literal prefix text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::Project => "PRJ",
            IdPrefix::UseCase => "UC",
        }
    }

    /// Render an id for `date` and `sequence`
    #[must_use]
    pub fn format(&self, date: NaiveDate, sequence: u32) -> String {
        format!(
            "{}-{}-{:0width$}",
            self.as_str(),
            date.format("%Y%m%d"),
            sequence % SEQUENCE_SPACE,
            width = SEQUENCE_WIDTH
        )
    }

    /// Check whether `id` has this prefix and a valid date and sequence
    #[must_use]
    pub fn matches(&self, id: &str) -> bool {
        let Some(caps) = ID_PATTERN.captures(id) else {
            return false;
        };
        &caps["prefix"] == self.as_str()
            && NaiveDate::parse_from_str(&caps["date"], "%Y%m%d").is_ok()
    }
}

impl fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id string
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the id text
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Project identifier (`PRJ-YYYYMMDD-####`)
    ProjectId
);

string_id!(
    /// Use case identifier (`UC-YYYYMMDD-####`)
    UseCaseId
);
