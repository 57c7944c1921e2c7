//! Storefront error types.
//!
//! The normalization layer is total and never fails; these errors only come
//! out of the strict, typed entry points (parsing a single sort token or a
//! price bound) and out of configuration loading.

use thiserror::Error;

/// Errors that can occur outside of the normalization functions.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown sort mode token.
    #[error("Unknown sort mode: {0}")]
    UnknownSortMode(String),

    /// Price bound that is not a finite number.
    #[error("Invalid price: {0:?} is not a valid number")]
    InvalidPrice(String),

    /// Price bound below zero.
    #[error("Invalid price: {0} must be greater than or equal to 0")]
    NegativePrice(String),

    /// Unknown theme name.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Theme persistence failed.
    #[error("Theme store error: {0}")]
    ThemeStore(String),

    /// Configuration is structurally valid but semantically wrong.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or written.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML configuration could not be rendered.
    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON configuration could not be parsed or rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for fallible storefront operations.
pub type Result<T> = std::result::Result<T, Error>;
