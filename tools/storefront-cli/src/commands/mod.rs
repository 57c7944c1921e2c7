//! CLI command implementations.

pub mod build;
pub mod chips;
pub mod config;
pub mod parse;
pub mod sort;
pub mod validate;

use clap::{Args, Subcommand};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Query string, with or without the leading `?`.
    pub query: String,

    /// Page size used to align the offset (default: from config).
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for the build command.
#[derive(Args)]
pub struct BuildArgs {
    /// Free-text search.
    #[arg(long)]
    pub search: Option<String>,

    /// Category token (repeatable, comma-joined accepted).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Brand token (repeatable, comma-joined accepted).
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Color token (repeatable, comma-joined accepted).
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Condition token (repeatable, comma-joined accepted).
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Only bestsellers.
    #[arg(long)]
    pub bestseller: bool,

    /// Only products on sale.
    #[arg(long)]
    pub on_sale: bool,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort value (repeatable, comma-joined accepted).
    #[arg(long)]
    pub sort: Vec<String>,

    /// Minimum price.
    #[arg(long, allow_hyphen_values = true)]
    pub min_price: Option<String>,

    /// Maximum price.
    #[arg(long, allow_hyphen_values = true)]
    pub max_price: Option<String>,

    /// Include `limit` (request form).
    #[arg(long)]
    pub limit: bool,

    /// Include `offset`.
    #[arg(long)]
    pub offset: Option<usize>,
}

/// Arguments for the sort command.
#[derive(Args)]
pub struct SortArgs {
    /// Raw sort entries, each possibly comma-joined.
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Discard the whole value on any unknown token.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Draft minimum price.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub min_price: String,

    /// Draft maximum price.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub max_price: String,
}

/// Arguments for the chips command.
#[derive(Args)]
pub struct ChipsArgs {
    /// Query string, with or without the leading `?`.
    pub query: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
