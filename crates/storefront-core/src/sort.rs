//! Multi-key sort codec.
//!
//! A sort value is a comma-joined list of [`SortMode`] tokens, e.g.
//! `popularity,price_asc`. Canonical values hold at most one price mode and
//! keep the order in which the caller presented the modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Error;

/// Label used when no sort is selected.
pub const DEFAULT_SORT_LABEL: &str = "Default";

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Sort by popularity.
    Popularity,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
}

/// Every sort option, in the order the picker shows them.
pub const SORT_OPTIONS: [SortMode; 3] = [SortMode::Popularity, SortMode::PriceAsc, SortMode::PriceDesc];

impl SortMode {
    /// Get the query-string token.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Popularity => "popularity",
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::Popularity => "Popularity",
            SortMode::PriceAsc => "Price: Low to High",
            SortMode::PriceDesc => "Price: High to Low",
        }
    }

    /// Whether this mode orders by price.
    pub fn is_price(&self) -> bool {
        matches!(self, SortMode::PriceAsc | SortMode::PriceDesc)
    }

    /// Look up a token that is already trimmed and lowercased.
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "popularity" => Some(SortMode::Popularity),
            "price_asc" => Some(SortMode::PriceAsc),
            "price_desc" => Some(SortMode::PriceDesc),
            _ => None,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        SortMode::from_token(&token).ok_or_else(|| Error::UnknownSortMode(s.to_string()))
    }
}

/// Options for parsing sort values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortParseOptions {
    /// Discard the whole value when any token is unknown.
    pub strict: bool,
}

impl SortParseOptions {
    /// All-or-nothing parsing, used when restoring from a URL.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Skip unknown tokens and keep the rest.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// Parse sort modes from one or more raw entries.
///
/// Each entry may itself be comma-joined. Segments are trimmed and lowercased,
/// empty segments are dropped and duplicates keep their first position. In
/// strict mode the first unknown token empties the whole result.
pub fn parse_sort_modes<I, S>(raw: I, options: SortParseOptions) -> Vec<SortMode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut modes = Vec::new();

    for entry in raw {
        for part in entry.as_ref().split(',') {
            let token = part.trim().to_lowercase();
            if token.is_empty() {
                continue;
            }
            let Some(mode) = SortMode::from_token(&token) else {
                if options.strict {
                    trace!(token = %token, "discarding sort value with unknown token");
                    return Vec::new();
                }
                continue;
            };
            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }
    }

    modes
}

/// Keep at most one price mode. The first price mode wins and everything
/// else stays in its original order.
pub fn canonicalize_sort_modes(modes: &[SortMode]) -> Vec<SortMode> {
    let mut canonical = Vec::with_capacity(modes.len());
    let mut price_selected = false;

    for &mode in modes {
        if mode.is_price() {
            if price_selected {
                continue;
            }
            price_selected = true;
        }
        canonical.push(mode);
    }

    canonical
}

/// Join modes into a sort value.
pub fn join_sort_modes(modes: &[SortMode]) -> String {
    modes.iter().map(SortMode::as_str).collect::<Vec<_>>().join(",")
}

/// Parse and canonicalize a sort value. Returns an empty string when no
/// valid mode survives.
pub fn normalize_sort_value<I, S>(raw: I, options: SortParseOptions) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let modes = parse_sort_modes(raw, options);
    join_sort_modes(&canonicalize_sort_modes(&modes))
}

/// Human label for a sort value, e.g. `Popularity then Price: Low to High`.
///
/// Unknown tokens are skipped, so only canonical modes are ever labelled.
pub fn sort_value_label(raw: &str, empty_label: &str) -> String {
    let canonical = canonicalize_sort_modes(&parse_sort_modes([raw], SortParseOptions::lenient()));
    if canonical.is_empty() {
        return empty_label.to_string();
    }

    canonical
        .iter()
        .map(SortMode::display_name)
        .collect::<Vec<_>>()
        .join(" then ")
}

/// Sort label with the default empty label.
pub fn sort_label(raw: &str) -> String {
    sort_value_label(raw, DEFAULT_SORT_LABEL)
}

/// Working selection behind the sort picker.
///
/// Modes are kept in pick order. Picking a price mode unchecks the opposite
/// price mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSelection {
    modes: Vec<SortMode>,
}

impl SortSelection {
    /// Seed a selection from a sort value.
    pub fn from_value(value: &str) -> Self {
        let modes = parse_sort_modes([value], SortParseOptions::lenient());
        Self {
            modes: canonicalize_sort_modes(&modes),
        }
    }

    /// Check or uncheck a mode.
    pub fn toggle(&mut self, mode: SortMode) {
        if let Some(pos) = self.modes.iter().position(|&m| m == mode) {
            self.modes.remove(pos);
            return;
        }

        if mode.is_price() {
            self.modes.retain(|m| !m.is_price());
        }
        self.modes.push(mode);
    }

    /// Whether a mode is checked.
    pub fn is_selected(&self, mode: SortMode) -> bool {
        self.modes.contains(&mode)
    }

    /// Checked modes in pick order.
    pub fn modes(&self) -> &[SortMode] {
        &self.modes
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.modes.clear();
    }

    /// Canonical sort value for the current selection.
    pub fn value(&self) -> String {
        join_sort_modes(&canonicalize_sort_modes(&self.modes))
    }
}
