//! Price type for product display.
//!
//! The catalog service sends prices as decimals, sometimes as JSON numbers and
//! sometimes as strings. Both are normalized to an integer count of minor
//! units (cents) so formatting never drifts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const DECIMAL_PLACES: u32 = 2;
const SCALE: i64 = 100;

/// A product price in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    minor_units: i64,
}

impl Price {
    /// Create a price from minor units (e.g., cents).
    pub fn from_minor_units(minor_units: i64) -> Self {
        Self { minor_units }
    }

    /// Create a price from a floating point amount.
    pub fn from_f64(amount: f64) -> Self {
        Self::from_minor_units((amount * SCALE as f64).round() as i64)
    }

    /// Parse a decimal string such as `"49.99"`, `"-3.5"` or `"12"`.
    ///
    /// Digits beyond the second decimal place are rounded half-up.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.strip_prefix('+').unwrap_or(input)),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut cents: i64 = 0;
        for (i, c) in fraction.chars().take(DECIMAL_PLACES as usize).enumerate() {
            let digit = c.to_digit(10)? as i64;
            cents += digit * 10_i64.pow(DECIMAL_PLACES - 1 - i as u32);
        }
        if let Some(next) = fraction.chars().nth(DECIMAL_PLACES as usize) {
            if next.to_digit(10)? >= 5 {
                cents += 1;
            }
        }

        let minor_units = whole.checked_mul(SCALE)?.checked_add(cents)?;
        Some(Self::from_minor_units(if negative { -minor_units } else { minor_units }))
    }

    /// Amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// Format as a plain decimal string (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / SCALE as u64, abs % SCALE as u64)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_amount())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display_amount())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Int(i64),
            Float(f64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Int(n) => n
                .checked_mul(SCALE)
                .map(Price::from_minor_units)
                .ok_or_else(|| serde::de::Error::custom("price out of range")),
            Wire::Float(n) => Ok(Price::from_f64(n)),
            Wire::Text(s) => Price::parse(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid price: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_strings() {
        assert_eq!(Price::parse("49.99").unwrap().minor_units(), 4999);
        assert_eq!(Price::parse("49.9").unwrap().minor_units(), 4990);
        assert_eq!(Price::parse("12").unwrap().minor_units(), 1200);
        assert_eq!(Price::parse(".5").unwrap().minor_units(), 50);
        assert_eq!(Price::parse("-3.25").unwrap().minor_units(), -325);
    }

    #[test]
    fn test_parse_rounds_extra_digits() {
        assert_eq!(Price::parse("1.005").unwrap().minor_units(), 101);
        assert_eq!(Price::parse("1.004").unwrap().minor_units(), 100);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Price::parse("").is_none());
        assert!(Price::parse("abc").is_none());
        assert!(Price::parse("1.2.3").is_none());
        assert!(Price::parse(".").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_minor_units(4999).to_string(), "49.99");
        assert_eq!(Price::from_minor_units(5).to_string(), "0.05");
        assert_eq!(Price::from_minor_units(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let a: Price = serde_json::from_str("19.5").unwrap();
        let b: Price = serde_json::from_str("\"19.50\"").unwrap();
        let c: Price = serde_json::from_str("19").unwrap();
        assert_eq!(a, b);
        assert_eq!(c.minor_units(), 1900);
    }
}
