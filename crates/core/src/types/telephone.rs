//! Telephone number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TELEPHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("Invalid regex"));

/// Errors that can occur when parsing a [`Telephone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum TelephoneError {
    /// The input string is empty.
    #[error("telephone cannot be empty")]
    Empty,
    /// The input is not exactly ten digits.
    #[error("telephone must be exactly 10 digits")]
    InvalidFormat,
}

/// A North American telephone number.
///
/// Stored as exactly ten digits with no separators, matching how the clinic
/// records contact numbers.
///
/// ## Constraints
///
/// - Exactly 10 characters
/// - Digits only (no spaces, dashes, or country prefix)
///
/// ## Examples
///
/// ```
/// use willowvale_core::Telephone;
///
/// // Valid numbers
/// assert!(Telephone::parse("6085551023").is_ok());
///
/// // Invalid numbers
/// assert!(Telephone::parse("").is_err());            // empty
/// assert!(Telephone::parse("608555102").is_err());   // too short
/// assert!(Telephone::parse("608-555-1023").is_err()); // separators
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Telephone(String);

impl Telephone {
    /// Number of digits in a telephone number.
    pub const LENGTH: usize = 10;

    /// Parse a `Telephone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly ten ASCII digits
    pub fn parse(s: &str) -> Result<Self, TelephoneError> {
        if s.is_empty() {
            return Err(TelephoneError::Empty);
        }

        if !TELEPHONE_RE.is_match(s) {
            return Err(TelephoneError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the telephone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Telephone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Telephone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Telephone {
    type Err = TelephoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Telephone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Telephone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Telephone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Telephone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(Telephone::parse("6085551023").is_ok());
        assert!(Telephone::parse("0000000000").is_ok());
        assert!(Telephone::parse("9999999999").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Telephone::parse(""), Err(TelephoneError::Empty)));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Telephone::parse("608555102"),
            Err(TelephoneError::InvalidFormat)
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Telephone::parse("60855510233"),
            Err(TelephoneError::InvalidFormat)
        ));
    }

    #[test]
    fn test_parse_rejects_separators() {
        assert!(Telephone::parse("608-555-102").is_err());
        assert!(Telephone::parse("608 5551023").is_err());
        assert!(Telephone::parse("+6085551023").is_err());
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert!(matches!(
            Telephone::parse("60855510ab"),
            Err(TelephoneError::InvalidFormat)
        ));
    }

    #[test]
    fn test_display() {
        let phone = Telephone::parse("6085551023").unwrap();
        assert_eq!(format!("{phone}"), "6085551023");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Telephone::parse("6085551023").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"6085551023\"");

        let parsed: Telephone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }

    #[test]
    fn test_from_str() {
        let phone: Telephone = "6085551023".parse().unwrap();
        assert_eq!(phone.as_str(), "6085551023");
    }
}
