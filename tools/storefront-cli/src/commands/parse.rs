//! Restore filter state from a query string.

use anyhow::Result;
use storefront_core::prelude::*;

use super::ParseArgs;
use crate::context::Context;
use crate::output::{format_list, format_value};

/// Run the parse command.
pub fn run(args: ParseArgs, ctx: &Context) -> Result<()> {
    let page_size = args.page_size.unwrap_or(ctx.config.page_size);
    let state = parse_url_state(&args.query, page_size);

    if ctx.output.is_json() {
        ctx.output.json(&state);
        return Ok(());
    }

    ctx.output.header("Filter State");
    print_filters(ctx, &state.filters);
    ctx.output.kv("offset", &state.offset.to_string());

    let canonical = build_url_search_params(&state.filters, BuildOptions::default()).to_string();
    ctx.output.info("");
    ctx.output.kv("canonical", &format_value(&canonical));

    Ok(())
}

/// Print every filter field.
pub fn print_filters(ctx: &Context, filters: &FilterState) {
    ctx.output.kv("search", &format_value(&filters.search));
    ctx.output.kv("categories", &format_list(&filters.categories));
    ctx.output.kv("brands", &format_list(&filters.brands));
    ctx.output.kv("colors", &format_list(&filters.colors));
    ctx.output.kv("conditions", &format_list(&filters.conditions));
    ctx.output.kv("bestseller", filters.bestseller.as_str());
    ctx.output.kv("onSale", filters.on_sale.as_str());
    ctx.output.kv("inStock", filters.in_stock.as_str());
    ctx.output.kv(
        "sort",
        &format!("{} ({})", format_value(&filters.sort), sort_label(&filters.sort)),
    );
    ctx.output.kv("minPrice", &format_value(&filters.min_price));
    ctx.output.kv("maxPrice", &format_value(&filters.max_price));
}
