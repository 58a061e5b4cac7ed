//! Theme state store
//!
//! Holds the user's theme choice and resolves "system" against the detected
//! platform preference. The choice is persisted in the configuration.

use crate::config_ext::StoreConfigExt;
use crate::store::Store;
use crossbeam_channel::Receiver;
use std::sync::Arc;
use velinconfig::Config;

/// User-selectable theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}

/// Observable theme store with persistence
#[derive(Clone)]
pub struct ThemeStore {
    state: Store<Theme>,
    config: Arc<Config>,
}

impl ThemeStore {
    /// Create the store, restoring the persisted choice
    pub fn new(config: Arc<Config>) -> Self {
        let initial = config
            .get_theme()
            .ok()
            .flatten()
            .and_then(|s| Theme::from_str(&s))
            .unwrap_or_default();

        Self {
            state: Store::new(initial),
            config,
        }
    }

    pub fn get(&self) -> Theme {
        self.state.get()
    }

    pub fn subscribe(&self) -> Receiver<Theme> {
        self.state.subscribe()
    }

    /// Change and persist the theme
    pub fn set(&self, theme: Theme) -> anyhow::Result<()> {
        self.config.set_theme(theme.as_str())?;
        self.state.set(theme);
        Ok(())
    }

    /// Resolve the effective theme given the platform's dark-mode preference
    pub fn effective(&self, system_prefers_dark: bool) -> Theme {
        match self.state.get() {
            Theme::System => {
                if system_prefers_dark {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
            explicit => explicit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config() -> (Arc<Config>, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (Arc::new(config), dir)
    }

    #[test]
    fn test_default_is_system() {
        let (config, _dir) = test_config();
        let store = ThemeStore::new(config);
        assert_eq!(store.get(), Theme::System);
    }

    #[test]
    fn test_effective_resolution() {
        let (config, _dir) = test_config();
        let store = ThemeStore::new(config);

        assert_eq!(store.effective(true), Theme::Dark);
        assert_eq!(store.effective(false), Theme::Light);

        store.set(Theme::Dark).unwrap();
        assert_eq!(store.effective(false), Theme::Dark);
    }

    #[test]
    fn test_choice_persists() {
        let (config, _dir) = test_config();

        ThemeStore::new(config.clone()).set(Theme::Light).unwrap();

        let restored = ThemeStore::new(config);
        assert_eq!(restored.get(), Theme::Light);
    }
}
