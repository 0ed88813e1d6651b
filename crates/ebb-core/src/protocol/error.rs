//! Validation errors

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The domain a field was expected to fall in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domain {
    /// Inclusive integer range
    Range {
        /// Smallest accepted value
        min: i64,
        /// Largest accepted value
        max: i64,
    },

    /// Member of a closed wire-code enumeration, given by name or by code
    Member {
        /// Protocol name of the enumeration
        enumeration: &'static str,
        /// `(name, code)` of every member
        members: &'static [(&'static str, u8)],
    },

    /// One of a fixed set of keywords
    Keyword(&'static [&'static str]),

    /// Any integer (the supplied value had the wrong type or a fractional part)
    Integer,

    /// A JSON object
    Object,

    /// The field is required
    Present,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Range { min, max } => write!(f, "an integer in {min}..={max}"),
            Domain::Member {
                enumeration,
                members,
            } => {
                write!(f, "a {enumeration} member (")?;
                for (i, (name, code)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}={code}")?;
                }
                f.write_str(")")
            }
            Domain::Keyword(words) => {
                f.write_str("one of ")?;
                for (i, word) in words.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{word}\"")?;
                }
                Ok(())
            }
            Domain::Integer => f.write_str("an integer"),
            Domain::Object => f.write_str("an object"),
            Domain::Present => f.write_str("a value"),
        }
    }
}

/// A field outside its legal domain
///
/// Raised before any command string is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "invalid value {} for '{field}': expected {expected}",
    .value.as_deref().unwrap_or("<missing>")
)]
pub struct ValidationError {
    /// Name of the offending field, as it appears in the command's arguments
    pub field: &'static str,
    /// The supplied value, or `None` if the field was omitted
    pub value: Option<String>,
    /// What the field should have been
    pub expected: Domain,
}

impl ValidationError {
    /// `value` is an integer outside `min..=max`
    pub fn out_of_range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self {
            field,
            value: Some(value.to_string()),
            expected: Domain::Range { min, max },
        }
    }

    /// `value` is neither a member name nor a member code of `enumeration`
    pub fn not_a_member(
        field: &'static str,
        value: impl fmt::Display,
        enumeration: &'static str,
        members: &'static [(&'static str, u8)],
    ) -> Self {
        Self {
            field,
            value: Some(value.to_string()),
            expected: Domain::Member {
                enumeration,
                members,
            },
        }
    }

    /// `value` is not one of `words`
    pub fn not_a_keyword(field: &'static str, value: &Value, words: &'static [&'static str]) -> Self {
        Self {
            field,
            value: Some(value.to_string()),
            expected: Domain::Keyword(words),
        }
    }

    /// `value` has the wrong JSON type for `expected`
    pub fn wrong_type(field: &'static str, value: &Value, expected: Domain) -> Self {
        Self {
            field,
            value: Some(value.to_string()),
            expected,
        }
    }

    /// A required field was omitted
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            value: None,
            expected: Domain::Present,
        }
    }
}
