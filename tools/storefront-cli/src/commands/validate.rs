//! Validate draft price fields.

use anyhow::{bail, Result};
use storefront_core::prelude::*;

use super::ValidateArgs;
use crate::context::Context;

/// Run the validate command.
pub fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let draft = FilterState {
        min_price: args.min_price,
        max_price: args.max_price,
        ..FilterState::default()
    };
    let message = build_filter_validation_message(&draft);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": message.is_empty(),
            "message": message,
        }));
    }

    if !message.is_empty() {
        bail!(message);
    }

    ctx.output.success("Price range is valid");
    Ok(())
}
