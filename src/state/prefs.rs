//! Persisted user preferences.
//!
//! One JSON object under a fixed localStorage key; currently only the theme
//! choice is stored. Malformed or missing data falls back to defaults so a
//! bad write can never wedge startup.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use serde::{Deserialize, Serialize};

use crate::util::storage;

/// Fixed localStorage key holding the serialized preferences object.
pub const PREFERENCES_KEY: &str = "user_preferences";

/// Theme selection; `System` defers to `prefers-color-scheme`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    Light,
    Dark,
    #[default]
    System,
}

/// User preferences persisted across reloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: ThemeChoice,
}

impl Preferences {
    /// Loads stored preferences, defaulting on absence or malformed JSON.
    pub fn load() -> Self {
        storage::load_json(PREFERENCES_KEY).unwrap_or_default()
    }

    /// Persists the preferences object.
    pub fn save(&self) {
        storage::save_json(PREFERENCES_KEY, self);
    }
}
