//! Canonical filter state.
//!
//! [`FilterState`] is what drives listing requests and the address bar.
//! [`RawFilterState`] is the loosely typed shape that comes out of URLs and
//! form fields before normalization.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::price::{parse_price, ParsedPrice};
use crate::sort::{normalize_sort_value, SortParseOptions};

/// Two-state toggle filter. Anything other than `"true"` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    /// Do not filter.
    #[default]
    All,
    /// Only matching products.
    True,
}

impl Flag {
    /// Normalize a raw value. Only the exact string `"true"` enables the flag.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("true") => Flag::True,
            _ => Flag::All,
        }
    }

    /// Get the query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::All => "all",
            Flag::True => "true",
        }
    }

    /// Whether the flag filters anything.
    pub fn is_active(&self) -> bool {
        matches!(self, Flag::True)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize the bestseller filter.
pub fn normalize_bestseller_value(raw: Option<&str>) -> Flag {
    Flag::from_raw(raw)
}

/// Normalize the on-sale filter.
pub fn normalize_on_sale_value(raw: Option<&str>) -> Flag {
    Flag::from_raw(raw)
}

/// Normalize the in-stock filter.
pub fn normalize_in_stock_value(raw: Option<&str>) -> Flag {
    Flag::from_raw(raw)
}

/// The filter state behind a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Free-text search.
    pub search: String,
    /// Category tokens.
    pub categories: Vec<String>,
    /// Brand tokens.
    pub brands: Vec<String>,
    /// Color tokens.
    pub colors: Vec<String>,
    /// Condition tokens.
    pub conditions: Vec<String>,
    /// Only bestsellers.
    pub bestseller: Flag,
    /// Only discounted products.
    pub on_sale: Flag,
    /// Only products in stock.
    pub in_stock: Flag,
    /// Comma-joined sort value, empty for the default order.
    pub sort: String,
    /// Minimum price, empty when unset.
    pub min_price: String,
    /// Maximum price, empty when unset.
    pub max_price: String,
}

/// Create the default (unfiltered) state.
pub fn create_default_filters() -> FilterState {
    FilterState::default()
}

impl FilterState {
    /// Normalize this state, keeping unknown sort tokens out.
    pub fn normalized(&self) -> FilterState {
        normalize_filter_state(&RawFilterState::from(self), NormalizeOptions::default())
    }

    /// Whether every field is at its default.
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

/// Loosely typed filter input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFilterState {
    pub search: Option<String>,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub colors: Vec<String>,
    pub conditions: Vec<String>,
    pub bestseller: Option<String>,
    pub on_sale: Option<String>,
    pub in_stock: Option<String>,
    /// Raw sort entries, each possibly comma-joined.
    pub sort: Vec<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl From<&FilterState> for RawFilterState {
    fn from(state: &FilterState) -> Self {
        Self {
            search: Some(state.search.clone()),
            categories: state.categories.clone(),
            brands: state.brands.clone(),
            colors: state.colors.clone(),
            conditions: state.conditions.clone(),
            bestseller: Some(state.bestseller.as_str().to_string()),
            on_sale: Some(state.on_sale.as_str().to_string()),
            in_stock: Some(state.in_stock.as_str().to_string()),
            sort: vec![state.sort.clone()],
            min_price: Some(state.min_price.clone()),
            max_price: Some(state.max_price.clone()),
        }
    }
}

/// Options for [`normalize_filter_state`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Parse the sort value strictly (all-or-nothing).
    pub strict_sort: bool,
}

/// Lowercase, trim, drop empties, dedup and sort a token list.
pub fn normalize_token_list<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| value.as_ref().to_lowercase().trim().to_string())
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build a fully normalized state from loosely typed input.
pub fn normalize_filter_state(source: &RawFilterState, options: NormalizeOptions) -> FilterState {
    let sort_options = SortParseOptions {
        strict: options.strict_sort,
    };

    FilterState {
        search: trimmed(source.search.as_deref()),
        categories: normalize_token_list(&source.categories),
        brands: normalize_token_list(&source.brands),
        colors: normalize_token_list(&source.colors),
        conditions: normalize_token_list(&source.conditions),
        bestseller: normalize_bestseller_value(source.bestseller.as_deref()),
        on_sale: normalize_on_sale_value(source.on_sale.as_deref()),
        in_stock: normalize_in_stock_value(source.in_stock.as_deref()),
        sort: normalize_sort_value(&source.sort, sort_options),
        min_price: trimmed(source.min_price.as_deref()),
        max_price: trimmed(source.max_price.as_deref()),
    }
}

fn trimmed(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}

/// Overwrite every field of `target` with a copy of `source`.
///
/// Used where the target is observed in place and must keep its identity.
pub fn assign_filter_state(target: &mut FilterState, source: &FilterState) {
    target.search.clone_from(&source.search);
    target.categories.clone_from(&source.categories);
    target.brands.clone_from(&source.brands);
    target.colors.clone_from(&source.colors);
    target.conditions.clone_from(&source.conditions);
    target.bestseller = source.bestseller;
    target.on_sale = source.on_sale;
    target.in_stock = source.in_stock;
    target.sort.clone_from(&source.sort);
    target.min_price.clone_from(&source.min_price);
    target.max_price.clone_from(&source.max_price);
}

/// Field-by-field equality. Both sides are expected to be normalized.
pub fn are_filter_states_equal(left: &FilterState, right: &FilterState) -> bool {
    left == right
}

/// Problems with draft price fields that the user has to fix.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Minimum price must be a valid number.")]
    MinNotANumber,
    #[error("Maximum price must be a valid number.")]
    MaxNotANumber,
    #[error("Minimum price must be greater than or equal to 0.")]
    MinNegative,
    #[error("Maximum price must be greater than or equal to 0.")]
    MaxNegative,
    #[error("Minimum price cannot be greater than maximum price.")]
    MinAboveMax,
}

/// Check draft price fields, returning the first issue found.
pub fn validate_filter_prices(min_price: &str, max_price: &str) -> Option<ValidationIssue> {
    let min = parse_price(min_price);
    let max = parse_price(max_price);

    if min == ParsedPrice::Invalid {
        return Some(ValidationIssue::MinNotANumber);
    }
    if max == ParsedPrice::Invalid {
        return Some(ValidationIssue::MaxNotANumber);
    }
    if let ParsedPrice::Value(v) = min {
        if v < 0.0 {
            return Some(ValidationIssue::MinNegative);
        }
    }
    if let ParsedPrice::Value(v) = max {
        if v < 0.0 {
            return Some(ValidationIssue::MaxNegative);
        }
    }
    if let (ParsedPrice::Value(lo), ParsedPrice::Value(hi)) = (min, max) {
        if lo > hi {
            return Some(ValidationIssue::MinAboveMax);
        }
    }

    None
}

/// Validation message for a draft, empty when the draft is valid.
pub fn build_filter_validation_message(source: &FilterState) -> String {
    validate_filter_prices(&source.min_price, &source.max_price)
        .map(|issue| issue.to_string())
        .unwrap_or_default()
}

/// Display label for a token: `"space-gray"` becomes `"Space Gray"`.
pub fn format_token_label(token: &str) -> String {
    token
        .split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(f: impl FnOnce(&mut RawFilterState)) -> RawFilterState {
        let mut source = RawFilterState::default();
        f(&mut source);
        source
    }

    #[test]
    fn test_defaults() {
        let state = create_default_filters();
        assert!(state.is_default());
        assert_eq!(state.bestseller, Flag::All);
        assert_eq!(state.sort, "");
    }

    #[test]
    fn test_token_list() {
        let tokens = normalize_token_list(["Red", " blue ", "red", "", "  ", "BLUE"]);
        assert_eq!(tokens, vec!["blue", "red"]);
    }

    #[test]
    fn test_flags_only_accept_exact_true() {
        assert_eq!(normalize_bestseller_value(Some("true")), Flag::True);
        assert_eq!(normalize_on_sale_value(Some("TRUE")), Flag::All);
        assert_eq!(normalize_in_stock_value(Some("yes")), Flag::All);
        assert_eq!(normalize_in_stock_value(None), Flag::All);
    }

    #[test]
    fn test_normalize_filter_state() {
        let source = raw(|s| {
            s.search = Some("  iphone ".to_string());
            s.brands = vec!["Samsung".to_string(), "apple".to_string()];
            s.on_sale = Some("true".to_string());
            s.sort = vec!["price_desc,bogus,popularity".to_string()];
            s.min_price = Some(" 10 ".to_string());
        });

        let state = normalize_filter_state(&source, NormalizeOptions::default());
        assert_eq!(state.search, "iphone");
        assert_eq!(state.brands, vec!["apple", "samsung"]);
        assert_eq!(state.on_sale, Flag::True);
        assert_eq!(state.sort, "price_desc,popularity");
        assert_eq!(state.min_price, "10");
        assert_eq!(state.max_price, "");

        let strict = normalize_filter_state(&source, NormalizeOptions { strict_sort: true });
        assert_eq!(strict.sort, "");
    }

    #[test]
    fn test_assign_copies_every_field() {
        let source = FilterState {
            search: "ipad".to_string(),
            colors: vec!["blue".to_string()],
            in_stock: Flag::True,
            sort: "popularity".to_string(),
            max_price: "500".to_string(),
            ..FilterState::default()
        };
        let mut target = FilterState {
            categories: vec!["laptops".to_string()],
            ..FilterState::default()
        };

        assign_filter_state(&mut target, &source);
        assert!(are_filter_states_equal(&target, &source));

        target.colors.push("red".to_string());
        assert_eq!(source.colors, vec!["blue"]);
    }

    #[test]
    fn test_validation_order() {
        let state = |min: &str, max: &str| FilterState {
            min_price: min.to_string(),
            max_price: max.to_string(),
            ..FilterState::default()
        };

        assert_eq!(
            build_filter_validation_message(&state("abc", "10")),
            "Minimum price must be a valid number."
        );
        assert_eq!(
            build_filter_validation_message(&state("-1", "abc")),
            "Maximum price must be a valid number."
        );
        assert_eq!(
            build_filter_validation_message(&state("-1", "-2")),
            "Minimum price must be greater than or equal to 0."
        );
        assert_eq!(
            build_filter_validation_message(&state("", "-2")),
            "Maximum price must be greater than or equal to 0."
        );
        assert_eq!(
            build_filter_validation_message(&state("30", "20")),
            "Minimum price cannot be greater than maximum price."
        );
        assert_eq!(build_filter_validation_message(&state("20", "30")), "");
        assert_eq!(build_filter_validation_message(&state(" ", "")), "");
    }

    #[test]
    fn test_format_token_label() {
        assert_eq!(format_token_label("space-gray"), "Space Gray");
        assert_eq!(format_token_label("apple"), "Apple");
        assert_eq!(format_token_label(""), "");
    }

    #[test]
    fn test_serde_shape() {
        let state = FilterState {
            on_sale: Flag::True,
            ..FilterState::default()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["onSale"], "true");
        assert_eq!(json["inStock"], "all");
        assert_eq!(json["minPrice"], "");
    }

    proptest! {
        #[test]
        fn test_token_list_idempotent(values in proptest::collection::vec("[ a-zA-Z-]{0,8}", 0..10)) {
            let once = normalize_token_list(&values);
            let twice = normalize_token_list(&once);
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(once.iter().all(|t| !t.is_empty()));
        }
    }
}
