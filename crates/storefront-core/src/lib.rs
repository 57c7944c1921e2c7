//! Filter, sort and URL state for the product discovery storefront.
//!
//! This crate holds the state layer behind the listing page:
//!
//! - **Sort**: multi-key sort values, canonicalization, labels
//! - **Filter**: the canonical [`FilterState`], normalization, validation
//! - **Price**: price input and range sanitizing
//! - **Query**: URL query parsing and serialization
//! - **Slider**: dual-thumb price slider clamping
//! - **Session**: applied/draft reconciliation and listing pagination
//!
//! Every normalization function is total: malformed input from a foreign
//! URL falls back to defaults instead of failing.
//!
//! # Example
//!
//! ```rust
//! use storefront_core::prelude::*;
//!
//! let state = parse_url_state("?color=red,blue&color=green&sort=price_asc,bogus", 6);
//! assert_eq!(state.filters.colors, vec!["blue", "green", "red"]);
//! assert_eq!(state.filters.sort, "");
//!
//! let query = build_url_search_params(&state.filters, BuildOptions::default());
//! assert_eq!(query.to_string(), "color=blue&color=green&color=red");
//! ```

pub mod error;
pub mod config;

pub mod chips;
pub mod colors;
pub mod debounce;
pub mod filter;
pub mod params;
pub mod price;
pub mod query;
pub mod session;
pub mod slider;
pub mod sort;
pub mod theme;

pub use error::{Error, Result};
pub use config::StorefrontConfig;
pub use filter::{FilterState, Flag, RawFilterState};
pub use session::FilterSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{StorefrontConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
    pub use crate::error::{Error, Result};

    // Sort
    pub use crate::sort::{
        canonicalize_sort_modes, normalize_sort_value, parse_sort_modes, sort_label,
        sort_value_label, SortMode, SortParseOptions, SortSelection, SORT_OPTIONS,
    };

    // Filter
    pub use crate::filter::{
        are_filter_states_equal, assign_filter_state, build_filter_validation_message,
        create_default_filters, format_token_label, normalize_bestseller_value,
        normalize_filter_state, normalize_in_stock_value, normalize_on_sale_value,
        normalize_token_list, validate_filter_prices, FilterState, Flag, NormalizeOptions,
        RawFilterState, ValidationIssue,
    };

    // Price
    pub use crate::price::{sanitize_price_input, sanitize_price_range, PriceBound, PriceRange};

    // Query
    pub use crate::params::QueryParams;
    pub use crate::query::{
        append_applied_filters_to_params, build_url_search_params, parse_offset,
        parse_url_state, BuildOptions, UrlState,
    };

    // Slider
    pub use crate::slider::{clamp_max_thumb, clamp_min_thumb, PriceSlider};

    // Session
    pub use crate::chips::{build_filter_chips, remove_chip, ChipId, FilterChip};
    pub use crate::debounce::SearchDebouncer;
    pub use crate::session::{FilterSession, ListingMeta, ListingPage, LoadTicket};
    pub use crate::theme::{MemoryThemeStore, Theme, ThemeController, ThemeStore};
    pub use crate::colors::swatch_color_for_token;
}
