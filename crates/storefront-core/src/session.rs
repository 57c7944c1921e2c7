//! Applied and draft filter state for one listing page.
//!
//! The session owns two independent [`FilterState`] values. The draft is
//! bound to the filter panel; the applied state drives listing requests and
//! the address bar. They are only reconciled through explicit actions
//! (apply, reset, chip removal, search dispatch).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chips::{build_filter_chips, remove_chip, ChipId, FilterChip};
use crate::config::{StorefrontConfig, MAX_PAGE_SIZE};
use crate::filter::{
    assign_filter_state, build_filter_validation_message, normalize_token_list, FilterState,
};
use crate::query::{build_url_search_params, parse_url_state, BuildOptions};
use crate::slider::{bounds_from_prices, PriceSlider};

/// Aggregates returned alongside a listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingMeta {
    /// Products matching the applied filters.
    pub total: usize,
    /// Lowest price among matching products.
    pub price_min: Option<f64>,
    /// Highest price among matching products.
    pub price_max: Option<f64>,
    /// Colors present in the catalog.
    #[serde(default)]
    pub available_colors: Vec<String>,
    /// Brands present in the catalog.
    #[serde(default)]
    pub available_brands: Vec<String>,
}

/// A loaded listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Number of products in this page.
    pub item_count: usize,
    /// Aggregates for the whole result set.
    pub meta: ListingMeta,
}

/// An outstanding listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    /// `offset` sent to the backend.
    pub offset: usize,
    /// `limit` sent to the backend.
    pub limit: usize,
    /// Offset shown in the address bar once the request completes.
    pub page_offset: usize,
    request: u64,
}

/// Filter session for a listing page.
#[derive(Debug, Clone)]
pub struct FilterSession {
    config: StorefrontConfig,
    applied: FilterState,
    draft: FilterState,
    /// Offset of the last loaded page.
    offset: usize,
    /// Offset requested by the URL, honored by the next initial load.
    restore_offset: usize,
    loaded: usize,
    meta: Option<ListingMeta>,
    in_flight: Option<LoadTicket>,
    requests: u64,
}

impl FilterSession {
    /// Create a session with default filters.
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            config,
            applied: FilterState::default(),
            draft: FilterState::default(),
            offset: 0,
            restore_offset: 0,
            loaded: 0,
            meta: None,
            in_flight: None,
            requests: 0,
        }
    }

    /// Create a session from the address bar query.
    pub fn from_query(search: &str, config: StorefrontConfig) -> Self {
        let mut session = Self::new(config);
        session.sync_from_location(search);
        session
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn applied(&self) -> &FilterState {
        &self.applied
    }

    pub fn draft(&self) -> &FilterState {
        &self.draft
    }

    /// Mutable access to the panel-bound draft.
    pub fn draft_mut(&mut self) -> &mut FilterState {
        &mut self.draft
    }

    /// Offset of the last loaded page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of products loaded so far.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn meta(&self) -> Option<&ListingMeta> {
        self.meta.as_ref()
    }

    /// Re-read filters from the address bar (page load, back/forward).
    pub fn sync_from_location(&mut self, search: &str) {
        let state = parse_url_state(search, self.config.page_size);
        self.applied = state.filters;
        assign_filter_state(&mut self.draft, &self.applied);
        self.reset_listing();
        self.restore_offset = state.offset;
        debug!(offset = state.offset, "session synced from location");
    }

    /// Whether the normalized draft differs from the applied state.
    pub fn has_pending_changes(&self) -> bool {
        self.draft.normalized() != self.applied
    }

    /// Message describing invalid draft prices, empty when valid.
    pub fn validation_message(&self) -> String {
        build_filter_validation_message(&self.draft)
    }

    pub fn apply_disabled(&self) -> bool {
        !self.validation_message().is_empty() || !self.has_pending_changes()
    }

    /// Apply the draft. Returns `false` when the draft is invalid or
    /// identical to the applied state.
    pub fn apply(&mut self) -> bool {
        let message = self.validation_message();
        if !message.is_empty() {
            debug!(reason = %message, "apply blocked by validation");
            return false;
        }

        let next = self.draft.normalized();
        if next == self.applied {
            debug!("apply skipped, no pending changes");
            return false;
        }

        self.applied = next;
        assign_filter_state(&mut self.draft, &self.applied);
        self.reset_listing();
        debug!(query = %self.location_query(), "filters applied");
        true
    }

    /// Throw away draft edits.
    pub fn reset_draft(&mut self) {
        assign_filter_state(&mut self.draft, &self.applied);
    }

    /// Reset both states to defaults.
    pub fn reset_all(&mut self) {
        let defaults = FilterState::default();
        assign_filter_state(&mut self.applied, &defaults);
        assign_filter_state(&mut self.draft, &defaults);
        self.reset_listing();
        debug!("filters reset");
    }

    /// Chips for the applied filters.
    pub fn chips(&self) -> Vec<FilterChip> {
        build_filter_chips(&self.applied)
    }

    /// Remove one applied filter. The draft follows the applied state.
    pub fn remove_chip(&mut self, chip: &ChipId) {
        self.applied = remove_chip(&self.applied, chip);
        assign_filter_state(&mut self.draft, &self.applied);
        self.reset_listing();
        debug!(chip = ?chip, "filter chip removed");
    }

    /// Remove every applied filter.
    pub fn clear_all(&mut self) {
        self.reset_all();
    }

    /// Apply a dispatched search directly. Returns whether it changed.
    pub fn set_search(&mut self, text: &str) -> bool {
        let search = text.trim();
        if search == self.applied.search {
            return false;
        }

        self.applied.search = search.to_string();
        self.draft.search = search.to_string();
        self.reset_listing();
        debug!(search = %search, "search applied");
        true
    }

    /// Query string for the address bar. `offset` only appears past the
    /// first page.
    pub fn location_query(&self) -> String {
        let options = BuildOptions {
            include_offset: self.offset > 0,
            offset: self.offset,
            ..BuildOptions::default()
        };
        build_url_search_params(&self.applied, options).to_string()
    }

    /// Query string for a listing request.
    pub fn request_query(&self, ticket: &LoadTicket) -> String {
        build_url_search_params(&self.applied, BuildOptions::request(ticket.limit, ticket.offset))
            .to_string()
    }

    /// Whether a listing request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether more products are available past what is loaded.
    pub fn has_more(&self) -> bool {
        self.meta
            .as_ref()
            .is_some_and(|meta| self.loaded < meta.total)
    }

    /// Start the first load for the current filters.
    ///
    /// A restored URL offset is honored by fetching every page up to it in
    /// one request, capped at the backend's maximum limit.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.in_flight.is_some() {
            debug!("load skipped, request already in flight");
            return None;
        }

        let page_size = self.config.page_size;
        let max_offset = (MAX_PAGE_SIZE - page_size.min(MAX_PAGE_SIZE)) / page_size.max(1)
            * page_size.max(1);
        let page_offset = self.restore_offset.min(max_offset);

        let ticket = LoadTicket {
            offset: 0,
            limit: page_offset + page_size,
            page_offset,
            request: self.next_request(),
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Start loading the next page. `None` while a request is in flight or
    /// when everything is loaded.
    pub fn begin_load_more(&mut self) -> Option<LoadTicket> {
        if self.in_flight.is_some() {
            debug!("load more ignored, request already in flight");
            return None;
        }
        if !self.has_more() {
            return None;
        }

        let ticket = LoadTicket {
            offset: self.loaded,
            limit: self.config.page_size,
            page_offset: self.loaded,
            request: self.next_request(),
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Record a completed request. Responses for superseded filters, or for
    /// requests that were already failed and retried, are dropped and
    /// `false` is returned.
    pub fn finish_load(&mut self, ticket: LoadTicket, page: ListingPage) -> bool {
        if self.in_flight != Some(ticket) {
            debug!(offset = ticket.offset, "dropping stale listing response");
            return false;
        }

        self.in_flight = None;
        if ticket.offset == 0 {
            self.loaded = page.item_count;
        } else {
            self.loaded += page.item_count;
        }
        self.offset = ticket.page_offset;
        self.restore_offset = 0;
        self.meta = Some(page.meta);
        true
    }

    /// Record a failed request so it can be retried.
    pub fn fail_load(&mut self, ticket: LoadTicket) {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
    }

    /// Slider bounds from the latest listing aggregates.
    pub fn slider_bounds(&self) -> (i64, i64) {
        match &self.meta {
            Some(meta) => bounds_from_prices(meta.price_min, meta.price_max),
            None => (0, 0),
        }
    }

    /// Slider for the draft price fields.
    pub fn price_slider(&self) -> PriceSlider {
        let (floor, ceiling) = self.slider_bounds();
        PriceSlider::new(floor, ceiling, &self.draft.min_price, &self.draft.max_price)
    }

    /// Brand options, always including selected brands.
    pub fn brand_options(&self) -> Vec<String> {
        let available = self.meta.iter().flat_map(|m| m.available_brands.iter());
        normalize_token_list(
            available
                .chain(&self.applied.brands)
                .chain(&self.draft.brands),
        )
    }

    /// Color options, always including selected colors.
    pub fn color_options(&self) -> Vec<String> {
        let available = self.meta.iter().flat_map(|m| m.available_colors.iter());
        normalize_token_list(
            available
                .chain(&self.applied.colors)
                .chain(&self.draft.colors),
        )
    }

    /// Category options from configuration.
    pub fn category_options(&self) -> &[String] {
        &self.config.category_options
    }

    /// Condition options from configuration.
    pub fn condition_options(&self) -> &[String] {
        &self.config.condition_options
    }

    fn next_request(&mut self) -> u64 {
        self.requests += 1;
        self.requests
    }

    fn reset_listing(&mut self) {
        self.in_flight = None;
        self.loaded = 0;
        self.offset = 0;
        self.restore_offset = 0;
    }
}
