//! Light/dark theme preference.
//!
//! Persistence goes through the [`ThemeStore`] port so the controller never
//! touches browser storage directly.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// The other theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::UnknownTheme(other.to_string())),
        }
    }
}

/// Key-value storage for the theme preference.
pub trait ThemeStore {
    /// Read a stored value.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store a value.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory [`ThemeStore`].
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Tracks the active theme and persists changes.
pub struct ThemeController<S: ThemeStore> {
    store: S,
    key: String,
    theme: Theme,
}

impl<S: ThemeStore> ThemeController<S> {
    /// Initialize from the store, falling back to the system preference
    /// when nothing valid is stored or the store is unreadable. The resolved
    /// theme is written back.
    pub fn initialize(store: S, key: impl Into<String>, prefers_dark: bool) -> Self {
        let key = key.into();
        let fallback = if prefers_dark { Theme::Dark } else { Theme::Light };

        let theme = match store.load(&key) {
            Ok(Some(value)) => value.parse().unwrap_or(fallback),
            Ok(None) => fallback,
            Err(e) => {
                warn!(error = %e, "failed to read stored theme");
                fallback
            }
        };
        debug!(theme = %theme, "theme initialized");

        let mut controller = Self { store, key, theme };
        controller.set_theme(theme);
        controller
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Switch theme. Store failures are logged, the switch still happens.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.store.save(&self.key, theme.as_str()) {
            warn!(error = %e, "failed to persist theme");
        }
    }

    /// Flip between light and dark.
    pub fn toggle(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl ThemeStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::ThemeStore("storage disabled".to_string()))
        }

        fn save(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::ThemeStore("storage disabled".to_string()))
        }
    }

    #[test]
    fn test_initialize_from_store() {
        let store = MemoryThemeStore::new();
        store.save("theme", "dark").unwrap();

        let controller = ThemeController::initialize(store, "theme", false);
        assert_eq!(controller.theme(), Theme::Dark);
    }

    #[test]
    fn test_initialize_falls_back_to_system_preference() {
        let controller = ThemeController::initialize(MemoryThemeStore::new(), "theme", true);
        assert!(controller.is_dark());

        let store = MemoryThemeStore::new();
        store.save("theme", "sepia").unwrap();
        let controller = ThemeController::initialize(store, "theme", false);
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn test_initialize_persists_resolved_theme() {
        let controller = ThemeController::initialize(MemoryThemeStore::new(), "theme", true);
        assert_eq!(
            controller.store().load("theme").unwrap(),
            Some("dark".to_string())
        );

        let store = MemoryThemeStore::new();
        store.save("theme", "sepia").unwrap();
        let controller = ThemeController::initialize(store, "theme", false);
        assert_eq!(
            controller.store().load("theme").unwrap(),
            Some("light".to_string())
        );
    }

    #[test]
    fn test_toggle_persists() {
        let mut controller = ThemeController::initialize(MemoryThemeStore::new(), "theme", false);
        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(
            controller.store().load("theme").unwrap(),
            Some("dark".to_string())
        );
    }

    #[test]
    fn test_store_failures_are_not_fatal() {
        let mut controller = ThemeController::initialize(BrokenStore, "theme", false);
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(controller.toggle(), Theme::Dark);
    }
}
