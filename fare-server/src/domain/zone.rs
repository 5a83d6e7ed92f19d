//! Fare zone codes.

use std::fmt;

/// Maximum length of a zone code.
const MAX_LEN: usize = 16;

/// Error returned when parsing an invalid zone code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid zone code {code:?}: {reason}")]
pub struct InvalidZone {
    code: String,
    reason: &'static str,
}

/// A fare zone (rail) or fare band (bus) code, such as `D1` or `D90`.
///
/// The standard, period and OD-pair tables name this column differently
/// (`FareZone`, `Zone`, `Value`, `Fare Band`); all of them parse into this
/// one type. A code is 1 to 16 characters of uppercase ASCII letters,
/// digits, `-` or `_`. Surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use fare_server::domain::ZoneCode;
///
/// let d1 = ZoneCode::parse("D1").unwrap();
/// assert_eq!(d1.as_str(), "D1");
///
/// assert_eq!(ZoneCode::parse(" D90 ").unwrap().as_str(), "D90");
/// assert!(ZoneCode::parse("d1").is_err());
/// assert!(ZoneCode::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneCode(String);

impl ZoneCode {
    /// Parse a zone code.
    pub fn parse(s: &str) -> Result<Self, InvalidZone> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidZone {
                code: s.to_string(),
                reason: "must not be empty",
            });
        }

        if trimmed.len() > MAX_LEN {
            return Err(InvalidZone {
                code: s.to_string(),
                reason: "must be at most 16 characters",
            });
        }

        let valid = trimmed
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
        if !valid {
            return Err(InvalidZone {
                code: s.to_string(),
                reason: "must be uppercase ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(ZoneCode(trimmed.to_string()))
    }

    /// Returns the zone code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZoneCode({})", self.0)
    }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
