//! Price range sanitizing.
//!
//! Prices travel as strings so the URL keeps whatever the user typed
//! (`"19.5"` stays `"19.5"`). Sanitizing only ever drops a value, it never
//! reformats one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Result of parsing a loosely typed price field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ParsedPrice {
    /// Blank field.
    Unset,
    /// Not a finite number.
    Invalid,
    /// A finite number, possibly negative.
    Value(f64),
}

/// Parse a trimmed price field.
pub(crate) fn parse_price(raw: &str) -> ParsedPrice {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedPrice::Unset;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => ParsedPrice::Value(value),
        _ => ParsedPrice::Invalid,
    }
}

/// A validated, non-negative price bound.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct PriceBound(f64);

impl PriceBound {
    /// Get the numeric value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl FromStr for PriceBound {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_price(s) {
            ParsedPrice::Value(v) if v >= 0.0 => Ok(PriceBound(v)),
            ParsedPrice::Value(_) => Err(Error::NegativePrice(s.trim().to_string())),
            ParsedPrice::Unset | ParsedPrice::Invalid => Err(Error::InvalidPrice(s.to_string())),
        }
    }
}

impl fmt::Display for PriceBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sanitized pair of price strings. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_price: String,
    pub max_price: String,
}

impl PriceRange {
    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min_price.is_empty() && self.max_price.is_empty()
    }
}

/// Trim a price string, dropping it when it is not a non-negative number.
pub fn sanitize_price_input(raw: &str) -> String {
    let trimmed = raw.trim();
    match parse_price(trimmed) {
        ParsedPrice::Value(v) if v >= 0.0 => trimmed.to_string(),
        _ => String::new(),
    }
}

/// Sanitize both bounds. An inverted range drops both bounds.
pub fn sanitize_price_range(min_raw: &str, max_raw: &str) -> PriceRange {
    let min_price = sanitize_price_input(min_raw);
    let max_price = sanitize_price_input(max_raw);

    if let (ParsedPrice::Value(min), ParsedPrice::Value(max)) =
        (parse_price(&min_price), parse_price(&max_price))
    {
        if min > max {
            return PriceRange::default();
        }
    }

    PriceRange {
        min_price,
        max_price,
    }
}
