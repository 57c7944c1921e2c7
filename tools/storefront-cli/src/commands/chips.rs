//! List active filter chips.

use anyhow::Result;
use storefront_core::prelude::*;

use super::ChipsArgs;
use crate::context::Context;

/// Run the chips command.
pub fn run(args: ChipsArgs, ctx: &Context) -> Result<()> {
    let state = parse_url_state(&args.query, ctx.config.page_size);
    let chips = build_filter_chips(&state.filters);

    if ctx.output.is_json() {
        ctx.output.json(&chips);
        return Ok(());
    }

    if chips.is_empty() {
        ctx.output.info("No active filters");
        return Ok(());
    }

    ctx.output.header("Active Filters");
    for chip in &chips {
        ctx.output.list_item(&chip.label);
    }
    Ok(())
}
