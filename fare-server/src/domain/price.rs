//! Exact decimal fare amounts.

use std::fmt;

/// Error returned when parsing an invalid price.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price {text:?}: {reason}")]
pub struct InvalidPrice {
    text: String,
    reason: &'static str,
}

impl InvalidPrice {
    fn new(text: &str, reason: &'static str) -> Self {
        Self {
            text: text.to_string(),
            reason,
        }
    }
}

/// A non-negative fare, held exactly in hundredths of the currency unit.
///
/// Prices are currency-agnostic: `3.85` is stored as 385 minor units and
/// never passes through floating point.
///
/// # Examples
///
/// ```
/// use fare_server::domain::Price;
///
/// let p = Price::parse("3.85").unwrap();
/// assert_eq!(p.minor_units(), 385);
/// assert_eq!(p.to_string(), "3.85");
///
/// assert_eq!(Price::parse("2.5").unwrap().to_string(), "2.50");
/// assert!(Price::parse("-1.00").is_err());
/// assert!(Price::parse("1.005").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price(u64);

impl Price {
    /// A zero fare.
    pub const ZERO: Price = Price(0);

    /// Create a price from minor units (hundredths).
    pub const fn from_minor_units(units: u64) -> Self {
        Price(units)
    }

    /// Parse a decimal price such as `3`, `3.8`, `3.85` or `3.850`.
    ///
    /// Digits beyond the second decimal place must be zero.
    pub fn parse(s: &str) -> Result<Self, InvalidPrice> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidPrice::new(s, "must not be empty"));
        }
        if trimmed.starts_with('-') {
            return Err(InvalidPrice::new(s, "must not be negative"));
        }

        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(InvalidPrice::new(s, "must contain digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(InvalidPrice::new(s, "must be a decimal number"));
        }
        if frac.bytes().skip(2).any(|b| b != b'0') {
            return Err(InvalidPrice::new(s, "at most two decimal places"));
        }

        let whole_units: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| InvalidPrice::new(s, "value too large"))?
        };

        let mut cents = 0u64;
        for (i, b) in frac.bytes().take(2).enumerate() {
            let digit = u64::from(b - b'0');
            cents += if i == 0 { digit * 10 } else { digit };
        }

        whole_units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .map(Price)
            .ok_or_else(|| InvalidPrice::new(s, "value too large"))
    }

    /// Returns the price in hundredths.
    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forms() {
        assert_eq!(Price::parse("3.85").unwrap().minor_units(), 385);
        assert_eq!(Price::parse("3.8").unwrap().minor_units(), 380);
        assert_eq!(Price::parse("3").unwrap().minor_units(), 300);
        assert_eq!(Price::parse("3.").unwrap().minor_units(), 300);
        assert_eq!(Price::parse(".5").unwrap().minor_units(), 50);
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
        assert_eq!(Price::parse(" 12.40 ").unwrap().minor_units(), 1240);
    }

    #[test]
    fn trailing_zeros_allowed() {
        assert_eq!(Price::parse("3.850").unwrap().minor_units(), 385);
        assert_eq!(Price::parse("3.8500").unwrap().minor_units(), 385);
    }

    #[test]
    fn reject_invalid() {
        assert!(Price::parse("").is_err());
        assert!(Price::parse(".").is_err());
        assert!(Price::parse("-0.50").is_err());
        assert!(Price::parse("abc").is_err());
        assert!(Price::parse("3,85").is_err());
        assert!(Price::parse("3.855").is_err());
        assert!(Price::parse("1.2.3").is_err());
        assert!(Price::parse("99999999999999999999").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Price::from_minor_units(385).to_string(), "3.85");
        assert_eq!(Price::from_minor_units(5).to_string(), "0.05");
        assert_eq!(Price::from_minor_units(1200).to_string(), "12.00");
    }

    #[test]
    fn ordering() {
        assert!(Price::parse("2.10").unwrap() < Price::parse("3.85").unwrap());
    }
}
