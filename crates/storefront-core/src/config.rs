//! Storefront configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Products per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Largest `limit` the listing endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 100;

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Delay before a typed search is dispatched.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Port of the product listing backend.
    #[serde(default = "default_backend_port")]
    pub backend_port: u16,

    /// Scroll distance after which the mobile "back to top" control shows.
    #[serde(default = "default_scroll_top_threshold")]
    pub mobile_scroll_top_threshold: u32,

    /// Key the theme preference is stored under.
    #[serde(default = "default_theme_storage_key")]
    pub theme_storage_key: String,

    /// Category facet options.
    #[serde(default = "default_category_options")]
    pub category_options: Vec<String>,

    /// Condition facet options.
    #[serde(default = "default_condition_options")]
    pub condition_options: Vec<String>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_backend_port() -> u16 {
    8080
}

fn default_scroll_top_threshold() -> u32 {
    420
}

fn default_theme_storage_key() -> String {
    "refurbed-theme".to_string()
}

fn default_category_options() -> Vec<String> {
    ["smartphones", "tablets", "laptops", "desktops", "accessories"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_condition_options() -> Vec<String> {
    ["new", "refurbished", "used"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            backend_port: default_backend_port(),
            mobile_scroll_top_threshold: default_scroll_top_threshold(),
            theme_storage_key: default_theme_storage_key(),
            category_options: default_category_options(),
            condition_options: default_condition_options(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check semantic constraints.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::InvalidConfig(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.theme_storage_key.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "theme_storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Backend base URL on localhost.
    pub fn backend_base_url(&self) -> String {
        format!("http://localhost:{}", self.backend_port)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

# Products per page (1-100)
page_size = 6

# Delay before a typed search is sent, in milliseconds
search_debounce_ms = 500

backend_port = 8080
mobile_scroll_top_threshold = 420
theme_storage_key = "refurbed-theme"

category_options = ["smartphones", "tablets", "laptops", "desktops", "accessories"]
condition_options = ["new", "refurbished", "used"]
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.backend_base_url(), "http://localhost:8080");
        assert_eq!(config.condition_options, vec!["new", "refurbished", "used"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_config_matches_defaults() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "page_size = 12").unwrap();

        let config = StorefrontConfig::load(file.path()).unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.backend_port, 8080);
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"backend_port": 9000}}"#).unwrap();

        let config = StorefrontConfig::load(file.path()).unwrap();
        assert_eq!(config.backend_port, 9000);
        assert_eq!(config.page_size, 6);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "page_size = 0").unwrap();

        let err = StorefrontConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");

        let config = StorefrontConfig {
            page_size: 24,
            ..StorefrontConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
    }
}
