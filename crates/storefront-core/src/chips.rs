//! Removable chips for the applied filters.

use serde::{Deserialize, Serialize};

use crate::filter::{format_token_label, FilterState, Flag};
use crate::sort::sort_label;

/// Which part of the filter state a chip stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "token", rename_all = "camelCase")]
pub enum ChipId {
    Search,
    Category(String),
    Brand(String),
    Color(String),
    Condition(String),
    Bestseller,
    OnSale,
    InStock,
    Sort,
    Price,
}

/// An active filter chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChip {
    pub id: ChipId,
    pub label: String,
}

impl FilterChip {
    fn new(id: ChipId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

fn price_bound_label(value: &str) -> &str {
    if value.is_empty() {
        "Any"
    } else {
        value
    }
}

/// Chips for every non-default field, in display order.
pub fn build_filter_chips(filters: &FilterState) -> Vec<FilterChip> {
    let mut chips = Vec::new();

    if !filters.search.is_empty() {
        chips.push(FilterChip::new(
            ChipId::Search,
            format!("Search: \"{}\"", filters.search),
        ));
    }

    for token in &filters.categories {
        chips.push(FilterChip::new(
            ChipId::Category(token.clone()),
            format!("Category: {}", format_token_label(token)),
        ));
    }
    for token in &filters.brands {
        chips.push(FilterChip::new(
            ChipId::Brand(token.clone()),
            format!("Brand: {}", format_token_label(token)),
        ));
    }
    for token in &filters.colors {
        chips.push(FilterChip::new(
            ChipId::Color(token.clone()),
            format!("Color: {}", format_token_label(token)),
        ));
    }
    for token in &filters.conditions {
        chips.push(FilterChip::new(
            ChipId::Condition(token.clone()),
            format!("Condition: {}", format_token_label(token)),
        ));
    }

    if filters.bestseller.is_active() {
        chips.push(FilterChip::new(ChipId::Bestseller, "Bestsellers only"));
    }
    if filters.on_sale.is_active() {
        chips.push(FilterChip::new(ChipId::OnSale, "On sale"));
    }
    if filters.in_stock.is_active() {
        chips.push(FilterChip::new(ChipId::InStock, "In stock"));
    }

    if !filters.sort.is_empty() {
        chips.push(FilterChip::new(
            ChipId::Sort,
            format!("Sort: {}", sort_label(&filters.sort)),
        ));
    }

    if !filters.min_price.is_empty() || !filters.max_price.is_empty() {
        chips.push(FilterChip::new(
            ChipId::Price,
            format!(
                "Price: {} - {}",
                price_bound_label(&filters.min_price),
                price_bound_label(&filters.max_price)
            ),
        ));
    }

    chips
}

/// Copy of `filters` with the chip's facet cleared.
pub fn remove_chip(filters: &FilterState, chip: &ChipId) -> FilterState {
    let mut next = filters.clone();
    match chip {
        ChipId::Search => next.search.clear(),
        ChipId::Category(token) => next.categories.retain(|t| t != token),
        ChipId::Brand(token) => next.brands.retain(|t| t != token),
        ChipId::Color(token) => next.colors.retain(|t| t != token),
        ChipId::Condition(token) => next.conditions.retain(|t| t != token),
        ChipId::Bestseller => next.bestseller = Flag::All,
        ChipId::OnSale => next.on_sale = Flag::All,
        ChipId::InStock => next.in_stock = Flag::All,
        ChipId::Sort => next.sort.clear(),
        ChipId::Price => {
            next.min_price.clear();
            next.max_price.clear();
        }
    }
    next
}
