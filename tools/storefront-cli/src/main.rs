//! Storefront CLI - inspect filter, sort and URL state from the shell.
//!
//! Commands:
//! - `storefront parse` - Restore filters from a query string
//! - `storefront build` - Build a query string from filter flags
//! - `storefront sort` - Canonicalize a sort value
//! - `storefront validate` - Check draft price fields
//! - `storefront chips` - List active filter chips for a query string
//! - `storefront config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ChipsArgs, ConfigArgs, ParseArgs, SortArgs, ValidateArgs};

/// Storefront CLI - Inspect product listing filter state
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore filters and offset from a query string
    Parse(ParseArgs),

    /// Build a query string from filter values
    Build(BuildArgs),

    /// Canonicalize a sort value
    Sort(SortArgs),

    /// Validate draft price fields
    Validate(ValidateArgs),

    /// List active filter chips
    Chips(ChipsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Parse(args) => commands::parse::run(args, &ctx),
        Commands::Build(args) => commands::build::run(args, &ctx),
        Commands::Sort(args) => commands::sort::run(args, &ctx),
        Commands::Validate(args) => commands::validate::run(args, &ctx),
        Commands::Chips(args) => commands::chips::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_accepts_negative_prices() {
        let cli = Cli::try_parse_from([
            "storefront",
            "build",
            "--min-price",
            "-5",
            "--max-price",
            "-1",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.min_price.as_deref(), Some("-5"));
                assert_eq!(args.max_price.as_deref(), Some("-1"));
            }
            _ => panic!("expected build command"),
        }
    }
}
