//! URL query codec.
//!
//! Readers accept both repeated keys (`?color=red&color=blue`) and
//! comma-joined values (`?color=red,blue`). Writers only emit repeated keys.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::filter::{
    normalize_filter_state, normalize_token_list, FilterState, Flag, NormalizeOptions,
    RawFilterState,
};
use crate::params::QueryParams;
use crate::price::sanitize_price_range;

/// Query keys.
pub mod keys {
    pub const SEARCH: &str = "search";
    pub const CATEGORY: &str = "category";
    pub const BRAND: &str = "brand";
    pub const COLOR: &str = "color";
    pub const CONDITION: &str = "condition";
    pub const BESTSELLER: &str = "bestseller";
    pub const ON_SALE: &str = "onSale";
    pub const IN_STOCK: &str = "inStock";
    pub const SORT: &str = "sort";
    pub const MIN_PRICE: &str = "minPrice";
    pub const MAX_PRICE: &str = "maxPrice";
    pub const LIMIT: &str = "limit";
    pub const OFFSET: &str = "offset";
}

/// State restored from a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlState {
    /// Normalized filters.
    pub filters: FilterState,
    /// Page-aligned offset.
    pub offset: usize,
}

/// Options for [`build_url_search_params`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Emit `limit`.
    pub include_limit: bool,
    /// Emit `offset`.
    pub include_offset: bool,
    /// Value for `limit`.
    pub page_size: usize,
    /// Value for `offset`.
    pub offset: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            include_limit: false,
            include_offset: false,
            page_size: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl BuildOptions {
    /// Options for a listing request: both `limit` and `offset`.
    pub fn request(page_size: usize, offset: usize) -> Self {
        Self {
            include_limit: true,
            include_offset: true,
            page_size,
            offset,
        }
    }
}

/// Parse a leading integer the way a lenient form field would: optional
/// whitespace and sign, then digits, ignoring whatever follows.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Parse an offset and floor it to a page boundary. Negative or
/// non-numeric input yields 0.
pub fn parse_offset(raw: Option<&str>, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    match raw.and_then(parse_leading_int) {
        Some(value) if value >= 0 => {
            let value = usize::try_from(value).unwrap_or(usize::MAX);
            value / page_size * page_size
        }
        _ => 0,
    }
}

fn parse_param_list(params: &QueryParams, key: &str) -> Vec<String> {
    normalize_token_list(
        params
            .get_all(key)
            .into_iter()
            .flat_map(|value| value.split(',')),
    )
}

/// Restore filters and offset from a query string.
pub fn parse_url_state(search: &str, page_size: usize) -> UrlState {
    let params = QueryParams::parse(search);
    let prices = sanitize_price_range(
        params.get(keys::MIN_PRICE).unwrap_or_default(),
        params.get(keys::MAX_PRICE).unwrap_or_default(),
    );

    let raw = RawFilterState {
        search: params.get(keys::SEARCH).map(str::to_string),
        categories: parse_param_list(&params, keys::CATEGORY),
        brands: parse_param_list(&params, keys::BRAND),
        colors: parse_param_list(&params, keys::COLOR),
        conditions: parse_param_list(&params, keys::CONDITION),
        bestseller: params.get(keys::BESTSELLER).map(str::to_string),
        on_sale: params.get(keys::ON_SALE).map(str::to_string),
        in_stock: params.get(keys::IN_STOCK).map(str::to_string),
        sort: params
            .get_all(keys::SORT)
            .into_iter()
            .map(str::to_string)
            .collect(),
        min_price: Some(prices.min_price),
        max_price: Some(prices.max_price),
    };

    let filters = normalize_filter_state(&raw, NormalizeOptions { strict_sort: true });
    let offset = parse_offset(params.get(keys::OFFSET), page_size);
    debug!(query = %search, offset, "restored filter state from URL");

    UrlState { filters, offset }
}

fn set_flag(params: &mut QueryParams, key: &str, flag: Flag) {
    if flag.is_active() {
        params.set(key, flag.as_str());
    }
}

/// Append every non-default filter to `params`.
pub fn append_applied_filters_to_params<'a>(
    params: &'a mut QueryParams,
    filters: &FilterState,
) -> &'a mut QueryParams {
    if !filters.search.is_empty() {
        params.set(keys::SEARCH, filters.search.as_str());
    }

    let lists = [
        (keys::CATEGORY, &filters.categories),
        (keys::BRAND, &filters.brands),
        (keys::COLOR, &filters.colors),
        (keys::CONDITION, &filters.conditions),
    ];
    for (key, values) in lists {
        for value in values {
            params.append(key, value.as_str());
        }
    }

    set_flag(params, keys::BESTSELLER, filters.bestseller);
    set_flag(params, keys::ON_SALE, filters.on_sale);
    set_flag(params, keys::IN_STOCK, filters.in_stock);

    if !filters.sort.is_empty() {
        params.set(keys::SORT, filters.sort.as_str());
    }
    if !filters.min_price.is_empty() {
        params.set(keys::MIN_PRICE, filters.min_price.as_str());
    }
    if !filters.max_price.is_empty() {
        params.set(keys::MAX_PRICE, filters.max_price.as_str());
    }

    params
}

/// Serialize filters, plus `limit`/`offset` when asked for.
pub fn build_url_search_params(filters: &FilterState, options: BuildOptions) -> QueryParams {
    let mut params = QueryParams::new();

    if options.include_limit {
        params.set(keys::LIMIT, options.page_size.to_string());
    }
    if options.include_offset {
        params.set(keys::OFFSET, options.offset.to_string());
    }

    append_applied_filters_to_params(&mut params, filters);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset(Some("13"), 6), 12);
        assert_eq!(parse_offset(Some("12"), 6), 12);
        assert_eq!(parse_offset(Some("-5"), 6), 0);
        assert_eq!(parse_offset(Some("abc"), 6), 0);
        assert_eq!(parse_offset(Some("7px"), 6), 6);
        assert_eq!(parse_offset(Some(" 18"), 6), 18);
        assert_eq!(parse_offset(None, 6), 0);
        assert_eq!(parse_offset(Some("5"), 0), 5);
    }

    #[test]
    fn test_merges_repeated_and_comma_joined() {
        let state = parse_url_state("?color=red,blue&color=green", DEFAULT_PAGE_SIZE);
        assert_eq!(state.filters.colors, vec!["blue", "green", "red"]);
    }

    #[test]
    fn test_full_url() {
        let state = parse_url_state(
            "?search=+iphone+&category=Tablets&condition=refurbished&bestseller=true&onSale=true&inStock=true&sort=popularity&minPrice=200&maxPrice=900&offset=13",
            6,
        );
        let filters = &state.filters;
        assert_eq!(filters.search, "iphone");
        assert_eq!(filters.categories, vec!["tablets"]);
        assert_eq!(filters.conditions, vec!["refurbished"]);
        assert_eq!(filters.bestseller, Flag::True);
        assert_eq!(filters.on_sale, Flag::True);
        assert_eq!(filters.in_stock, Flag::True);
        assert_eq!(filters.sort, "popularity");
        assert_eq!(filters.min_price, "200");
        assert_eq!(filters.max_price, "900");
        assert_eq!(state.offset, 12);
    }

    #[test]
    fn test_foreign_url_falls_back_to_defaults() {
        let state = parse_url_state(
            "?bestseller=invalid&onSale=wrong&inStock=nope&sort=unknown&offset=abc&minPrice=oops&maxPrice=-20",
            6,
        );
        assert!(state.filters.is_default());
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn test_price_handling() {
        let state = parse_url_state("?minPrice=abc&maxPrice=500", 6);
        assert_eq!(state.filters.min_price, "");
        assert_eq!(state.filters.max_price, "500");

        let state = parse_url_state("?minPrice=-2&maxPrice=500", 6);
        assert_eq!(state.filters.min_price, "");
        assert_eq!(state.filters.max_price, "500");

        let state = parse_url_state("?minPrice=900&maxPrice=200", 6);
        assert_eq!(state.filters.min_price, "");
        assert_eq!(state.filters.max_price, "");
    }

    #[test]
    fn test_strict_sort_from_url() {
        let state = parse_url_state("?sort=price_asc&sort=bogus", 6);
        assert_eq!(state.filters.sort, "");

        let state = parse_url_state("?sort=price_desc&sort=popularity,price_asc", 6);
        assert_eq!(state.filters.sort, "price_desc,popularity");
    }

    #[test]
    fn test_build_omits_defaults() {
        let params = build_url_search_params(&FilterState::default(), BuildOptions::default());
        assert!(params.is_empty());

        let params = build_url_search_params(&FilterState::default(), BuildOptions::request(6, 0));
        assert_eq!(params.to_string(), "limit=6&offset=0");
    }

    #[test]
    fn test_build_key_order() {
        let filters = FilterState {
            search: "ipad".to_string(),
            colors: vec!["blue".to_string(), "red".to_string()],
            conditions: vec!["refurbished".to_string()],
            on_sale: Flag::True,
            sort: "price_asc".to_string(),
            max_price: "500".to_string(),
            ..FilterState::default()
        };

        let params = build_url_search_params(&filters, BuildOptions::request(6, 12));
        assert_eq!(
            params.to_string(),
            "limit=6&offset=12&search=ipad&color=blue&color=red&condition=refurbished&onSale=true&sort=price_asc&maxPrice=500"
        );
    }

    #[test]
    fn test_append_to_existing_params() {
        let mut params = QueryParams::parse("offset=6");
        let filters = FilterState {
            brands: vec!["apple".to_string()],
            ..FilterState::default()
        };
        append_applied_filters_to_params(&mut params, &filters);
        assert_eq!(params.to_string(), "offset=6&brand=apple");
    }

    fn token_list() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[a-z0-9-]{1,8}", 0..4).prop_map(|v| normalize_token_list(&v))
    }

    fn flag() -> impl Strategy<Value = Flag> {
        prop_oneof![Just(Flag::All), Just(Flag::True)]
    }

    fn filter_state() -> impl Strategy<Value = FilterState> {
        (
            "([a-z0-9&=+%]{1,6}( [a-z]{1,4})?)?",
            (token_list(), token_list(), token_list(), token_list()),
            (flag(), flag(), flag()),
            prop_oneof![
                Just(String::new()),
                Just("popularity".to_string()),
                Just("price_desc,popularity".to_string()),
            ],
            proptest::option::of(0u32..1000),
            proptest::option::of(0u32..1000),
        )
            .prop_map(|(search, lists, flags, sort, lo, hi)| {
                let (lo, hi) = match (lo, hi) {
                    (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
                    other => other,
                };
                FilterState {
                    search,
                    categories: lists.0,
                    brands: lists.1,
                    colors: lists.2,
                    conditions: lists.3,
                    bestseller: flags.0,
                    on_sale: flags.1,
                    in_stock: flags.2,
                    sort,
                    min_price: lo.map(|v| v.to_string()).unwrap_or_default(),
                    max_price: hi.map(|v| v.to_string()).unwrap_or_default(),
                }
            })
    }

    proptest! {
        #[test]
        fn test_url_round_trip(filters in filter_state()) {
            let query = build_url_search_params(&filters, BuildOptions::default()).to_string();
            let restored = parse_url_state(&query, 6);
            prop_assert_eq!(restored.filters, filters);
        }
    }
}
