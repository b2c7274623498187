//! Field validation for untyped caller input.
//!
//! Every function here is pure and total: it inspects a raw value and either
//! returns the sanitized form or a [`ValidationFailure`]. Lengths are counted
//! in Unicode scalar values after trimming surrounding whitespace.

use std::fmt;

/// Lower bound applied to long free text when the caller has no stricter rule.
pub const TEXT_MIN_LEN: usize = 0;
/// Upper bound applied to long free text when the caller has no stricter rule.
pub const TEXT_MAX_LEN: usize = 5000;

/// Reasons a raw value failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    /// Trimmed value is shorter than the minimum.
    TooShort { min: usize, actual: usize },
    /// Trimmed value is longer than the maximum.
    TooLong { max: usize, actual: usize },
    /// Value is not a member of the allowed set.
    NotAllowed { value: String },
    /// Value is not a base-10 integer.
    NotAnInteger { value: String },
}

impl ValidationFailure {
    /// Stable machine-readable code used in error details.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::NotAllowed { .. } => "not_allowed",
            Self::NotAnInteger { .. } => "not_an_integer",
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min, actual } => {
                write!(f, "must be at least {min} characters (got {actual})")
            }
            Self::TooLong { max, actual } => {
                write!(f, "must be at most {max} characters (got {actual})")
            }
            Self::NotAllowed { value } => write!(f, "'{value}' is not an allowed value"),
            Self::NotAnInteger { value } => write!(f, "'{value}' is not an integer"),
        }
    }
}

impl std::error::Error for ValidationFailure {}

/// Trim `value` and check its length falls within `[min_len, max_len]`.
///
/// # Examples
/// ```
/// use service_desk::domain::validation::validate_string;
///
/// assert_eq!(validate_string("  Laptop  ", 3, 100).as_deref(), Ok("Laptop"));
/// assert!(validate_string("ab", 3, 100).is_err());
/// ```
pub fn validate_string(
    value: &str,
    min_len: usize,
    max_len: usize,
) -> Result<String, ValidationFailure> {
    let trimmed = value.trim();
    let actual = trimmed.chars().count();
    if actual < min_len {
        return Err(ValidationFailure::TooShort {
            min: min_len,
            actual,
        });
    }
    if actual > max_len {
        return Err(ValidationFailure::TooLong {
            max: max_len,
            actual,
        });
    }
    Ok(trimmed.to_owned())
}

/// Long free-text variant of [`validate_string`].
///
/// Pass [`TEXT_MIN_LEN`] and [`TEXT_MAX_LEN`] for the usual bounds.
pub fn validate_text(
    value: &str,
    min_len: usize,
    max_len: usize,
) -> Result<String, ValidationFailure> {
    validate_string(value, min_len, max_len)
}

/// Accept `value` only when it equals one of `allowed` byte for byte.
///
/// # Examples
/// ```
/// use service_desk::domain::validation::validate_enum;
///
/// let allowed = ["open", "closed"];
/// assert_eq!(validate_enum("open", &allowed), Ok("open"));
/// assert!(validate_enum("Open", &allowed).is_err());
/// ```
pub fn validate_enum<'a>(value: &str, allowed: &[&'a str]) -> Result<&'a str, ValidationFailure> {
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == value)
        .ok_or_else(|| ValidationFailure::NotAllowed {
            value: value.to_owned(),
        })
}

/// Parse `value` as a base-10 integer with an optional sign.
///
/// Surrounding whitespace is ignored. Fractions, exponents, and digit
/// separators are rejected.
pub fn validate_integer(value: &str) -> Result<i64, ValidationFailure> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationFailure::NotAnInteger {
            value: value.to_owned(),
        })
}
