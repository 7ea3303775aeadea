//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque strings chosen by clients. Two ways to build one:
//!
//! - `new`: wraps any string as-is. Used for path segments, where an unknown or
//!   odd-looking identifier simply fails the lookup later.
//! - `parse` / `FromStr`: checks the structural rules and is used for identifiers
//!   that are about to be *stored* (request bodies, seeds).

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Longest identifier accepted by `parse`.
pub const MAX_IDENTIFIER_LEN: usize = 32;

/// Identifier of a financial product (owned by the product registry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of a charge definition, unique within its owning product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeDefinitionId(String);

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

fn check_identifier(name: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::invalid_id(format!("{name}: must not be empty")));
    }
    if value.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(DomainError::invalid_id(format!(
            "{name}: must be at most {MAX_IDENTIFIER_LEN} characters"
        )));
    }
    if let Some(bad) = value.chars().find(|c| !is_identifier_char(*c)) {
        return Err(DomainError::invalid_id(format!(
            "{name}: illegal character {bad:?}"
        )));
    }
    Ok(())
}

macro_rules! impl_string_identifier {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw string without structural checks.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Build an identifier, enforcing the structural rules.
            pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                check_identifier($name, &value)?;
                Ok(Self(value))
            }

            /// Re-check an already constructed identifier (e.g. one deserialized from a body).
            pub fn validate(&self) -> Result<(), DomainError> {
                check_identifier($name, &self.0)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

impl_string_identifier!(ProductId, "ProductId");
impl_string_identifier!(ChargeDefinitionId, "ChargeDefinitionId");
