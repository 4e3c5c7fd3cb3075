//! Strongly typed UUID identifiers for the stored entities.
//!
//! Each identifier keeps the parsed UUID and serialises as its canonical
//! hyphenated string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Input was empty.
    #[error("id must not be empty")]
    Empty,
    /// Input was not a UUID.
    #[error("id must be a valid UUID")]
    Invalid,
}

fn parse_uuid(raw: &str) -> Result<Uuid, IdValidationError> {
    if raw.is_empty() {
        return Err(IdValidationError::Empty);
    }
    if raw.trim() != raw {
        return Err(IdValidationError::Invalid);
    }
    Uuid::parse_str(raw).map_err(|_| IdValidationError::Invalid)
}

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its string form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                parse_uuid(id.as_ref()).map(Self)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an already parsed UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_uuid_id!(
    /// Identifier of a registered seller.
    UserId
);
define_uuid_id!(
    /// Identifier of a client record.
    ClientId
);
define_uuid_id!(
    /// Identifier of a catalogue product.
    ProductId
);
define_uuid_id!(
    /// Identifier of an order.
    OrderId
);
