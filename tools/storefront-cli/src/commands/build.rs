//! Build a query string from filter values.

use anyhow::Result;
use storefront_core::prelude::*;

use super::BuildArgs;
use crate::context::Context;

fn split_tokens(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::to_string)
        .collect()
}

fn flag(enabled: bool) -> Option<String> {
    enabled.then(|| Flag::True.as_str().to_string())
}

fn was_dropped(raw: Option<&str>, kept: &str) -> bool {
    kept.is_empty() && raw.is_some_and(|v| !v.trim().is_empty())
}

/// Run the build command.
pub fn run(args: BuildArgs, ctx: &Context) -> Result<()> {
    let prices = sanitize_price_range(
        args.min_price.as_deref().unwrap_or_default(),
        args.max_price.as_deref().unwrap_or_default(),
    );
    if was_dropped(args.min_price.as_deref(), &prices.min_price)
        || was_dropped(args.max_price.as_deref(), &prices.max_price)
    {
        ctx.output.warn("Dropped an invalid or inverted price bound");
    }

    let raw = RawFilterState {
        search: args.search,
        categories: split_tokens(&args.categories),
        brands: split_tokens(&args.brands),
        colors: split_tokens(&args.colors),
        conditions: split_tokens(&args.conditions),
        bestseller: flag(args.bestseller),
        on_sale: flag(args.on_sale),
        in_stock: flag(args.in_stock),
        sort: args.sort.clone(),
        min_price: Some(prices.min_price),
        max_price: Some(prices.max_price),
    };
    let filters = normalize_filter_state(&raw, NormalizeOptions { strict_sort: true });

    if filters.sort.is_empty() && args.sort.iter().any(|s| !s.trim().is_empty()) {
        ctx.output.warn("Sort value contained an unknown mode and was discarded");
    }

    let options = BuildOptions {
        include_limit: args.limit,
        include_offset: args.offset.is_some(),
        page_size: ctx.config.page_size,
        offset: parse_offset(
            args.offset.map(|o| o.to_string()).as_deref(),
            ctx.config.page_size,
        ),
    };
    let query = build_url_search_params(&filters, options).to_string();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "filters": filters,
            "query": query,
        }));
        return Ok(());
    }

    ctx.output.debug(&format!("page size {}", ctx.config.page_size));
    ctx.output.raw(&query);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tokens() {
        let tokens = split_tokens(&["red,blue".to_string(), "green".to_string()]);
        assert_eq!(tokens, vec!["red", "blue", "green"]);
    }

    #[test]
    fn test_was_dropped() {
        assert!(was_dropped(Some("-5"), ""));
        assert!(!was_dropped(Some(" "), ""));
        assert!(!was_dropped(Some("5"), "5"));
        assert!(!was_dropped(None, ""));
    }

    #[test]
    fn test_flag() {
        assert_eq!(flag(true).as_deref(), Some("true"));
        assert_eq!(flag(false), None);
    }
}
