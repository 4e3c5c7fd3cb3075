//! Field-level validation shared by the entity inputs.
//!
//! Inputs are validated once, when a request payload is turned into a domain
//! value; the stored entities assume these invariants hold.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN_LEN: usize = 6;

/// A single invalid input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Required text was missing or blank.
    #[error("El campo {field} es obligatorio")]
    Required {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Email did not look like `local@domain.tld`.
    #[error("El email no es válido")]
    InvalidEmail {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Password shorter than [`PASSWORD_MIN_LEN`].
    #[error("El password debe ser de al menos {min} caracteres")]
    PasswordTooShort {
        /// Name of the offending field.
        field: &'static str,
        /// Minimum accepted length.
        min: usize,
    },
    /// Numeric value below zero.
    #[error("El campo {field} no puede ser negativo")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Numeric value that must be strictly positive.
    #[error("El campo {field} debe ser mayor que cero")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Collection that must contain at least one element.
    #[error("El campo {field} no puede estar vacío")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Malformed identifier.
    #[error("El campo {field} no es un identificador válido")]
    InvalidId {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Value outside the accepted range.
    #[error("El campo {field} debe estar entre {min} y {max}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },
}

impl FieldError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::InvalidEmail { field }
            | Self::PasswordTooShort { field, .. }
            | Self::Negative { field }
            | Self::NotPositive { field }
            | Self::Empty { field }
            | Self::InvalidId { field }
            | Self::OutOfRange { field, .. } => field,
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::InvalidEmail { .. } => "invalid_email",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::Negative { .. } => "negative",
            Self::NotPositive { .. } => "not_positive",
            Self::Empty { .. } => "empty",
            Self::InvalidId { .. } => "invalid_id",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Self::invalid_request(value.to_string())
            .with_details(json!({ "field": value.field(), "code": value.reason() }))
    }
}

/// Trim `value` and reject it when nothing is left.
pub fn required_text(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required { field });
    }
    Ok(trimmed.to_owned())
}

/// Trim optional text, mapping blank input to `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address (trimmed, lower case).
///
/// # Examples
/// ```
/// use crm_backend::domain::Email;
///
/// let email = Email::parse("email", "  Ana@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "ana@example.com");
/// assert!(Email::parse("email", "ana.example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email for the named field.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, FieldError> {
        let normalised = raw.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(FieldError::Required { field });
        }
        if !email_regex().is_match(&normalised) {
            return Err(FieldError::InvalidEmail { field });
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse("email", &value)
    }
}
