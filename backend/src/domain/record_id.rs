//! Positive integer identifiers assigned by the relational store.
//!
//! Users, tickets, and assets all use `BIGSERIAL` keys. Each gets its own
//! newtype so a ticket id cannot be passed where an asset id is expected.

use super::validation::{ValidationFailure, validate_integer};

/// Error raised when an identifier is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a positive integer (got {value})")]
pub struct NonPositiveId {
    /// Rejected value.
    pub value: i64,
}

/// Failure converting raw caller input into an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdParseError {
    /// Raw text is not a base-10 integer.
    #[error("{0}")]
    NotAnInteger(ValidationFailure),
    /// Parsed integer is zero or negative.
    #[error(transparent)]
    NonPositive(#[from] NonPositiveId),
}

impl RecordIdParseError {
    /// Stable machine-readable code used in error details.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotAnInteger(failure) => failure.code(),
            Self::NonPositive(_) => "not_positive",
        }
    }
}

pub(crate) fn parse_positive(raw: &str) -> Result<i64, RecordIdParseError> {
    let value = validate_integer(raw).map_err(RecordIdParseError::NotAnInteger)?;
    if value < 1 {
        return Err(NonPositiveId { value }.into());
    }
    Ok(value)
}

/// Optional foreign key: blank input and `0` both mean "no reference".
pub(crate) fn parse_reference(raw: Option<&str>) -> Result<Option<i64>, RecordIdParseError> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };
    match validate_integer(raw).map_err(RecordIdParseError::NotAnInteger)? {
        0 => Ok(None),
        value if value < 0 => Err(NonPositiveId { value }.into()),
        value => Ok(Some(value)),
    }
}

macro_rules! define_record_id {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Wrap a positive integer.
            pub const fn new(value: i64) -> Result<Self, $crate::domain::record_id::NonPositiveId> {
                if value < 1 {
                    return Err($crate::domain::record_id::NonPositiveId { value });
                }
                Ok(Self(value))
            }

            /// Parse raw caller input, trimming whitespace first.
            pub fn parse(raw: &str) -> Result<Self, $crate::domain::record_id::RecordIdParseError> {
                $crate::domain::record_id::parse_positive(raw).map(Self)
            }

            /// Parse an optional reference to this record; blank or `0` is `None`.
            pub fn parse_reference(
                raw: Option<&str>,
            ) -> Result<Option<Self>, $crate::domain::record_id::RecordIdParseError> {
                $crate::domain::record_id::parse_reference(raw).map(|value| value.map(Self))
            }

            /// Underlying integer value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = $crate::domain::record_id::NonPositiveId;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_record_id;
