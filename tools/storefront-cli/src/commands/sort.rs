//! Canonicalize a sort value.

use anyhow::Result;
use storefront_core::prelude::*;

use super::SortArgs;
use crate::context::Context;

/// Run the sort command.
pub fn run(args: SortArgs, ctx: &Context) -> Result<()> {
    let options = SortParseOptions {
        strict: args.strict,
    };
    let modes = parse_sort_modes(&args.values, options);
    let canonical = canonicalize_sort_modes(&modes);
    let value = normalize_sort_value(&args.values, options);
    let label = sort_label(&value);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "modes": canonical,
            "value": value,
            "label": label,
        }));
        return Ok(());
    }

    if canonical.len() < modes.len() {
        ctx.output
            .warn("Conflicting price sorts, keeping the first one");
    }

    ctx.output.kv("value", &value);
    ctx.output.kv("label", &label);
    Ok(())
}
