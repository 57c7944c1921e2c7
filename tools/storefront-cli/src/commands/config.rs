//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use storefront_core::config::generate_default_config;
use storefront_core::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::{Context, CONFIG_NAMES};
use crate::output::format_list;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;
    ctx.output.kv("page_size", &config.page_size.to_string());
    ctx.output
        .kv("search_debounce_ms", &config.search_debounce_ms.to_string());
    ctx.output.kv("backend", &config.backend_base_url());
    ctx.output.kv(
        "mobile_scroll_top_threshold",
        &config.mobile_scroll_top_threshold.to_string(),
    );
    ctx.output.kv("theme_storage_key", &config.theme_storage_key);
    ctx.output
        .kv("category_options", &format_list(&config.category_options));
    ctx.output
        .kv("condition_options", &format_list(&config.condition_options));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(CONFIG_NAMES[0]);

    if path.exists() && !force {
        if ctx.output.is_json() {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !overwrite {
            ctx.output.info("Keeping existing config");
            return Ok(());
        }
    }

    fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    ctx.output.success(&format!("Created {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        ctx.output.warn("No config file found, using defaults");
        return Ok(());
    };

    let config = StorefrontConfig::load(path)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "valid": true, "config": config }));
        return Ok(());
    }

    ctx.output
        .success(&format!("{} is valid", path.display()));
    Ok(())
}
