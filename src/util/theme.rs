//! Theme initialization and toggle.
//!
//! Reads the persisted preference and applies a `data-theme` attribute to
//! the `<html>` element; `System` resolves through `prefers-color-scheme`.
//! Requires a browser environment.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort browser-only behavior; SSR paths safely no-op
//! to keep server rendering deterministic.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::state::prefs::{Preferences, ThemeChoice};

/// Apply the stored theme at startup.
pub fn init() {
    apply(Preferences::load().theme);
}

/// The persisted theme choice.
pub fn current() -> ThemeChoice {
    Preferences::load().theme
}

/// Persist `choice` and apply it immediately.
pub fn set(choice: ThemeChoice) {
    let mut prefs = Preferences::load();
    prefs.theme = choice;
    prefs.save();
    apply(choice);
}

/// Flip between explicit light and dark, seeding from the effective theme
/// when the stored choice is `System`. Returns the new choice.
pub fn toggle() -> ThemeChoice {
    let next = if resolves_dark(current()) {
        ThemeChoice::Light
    } else {
        ThemeChoice::Dark
    };
    set(next);
    next
}

/// Whether `choice` renders dark, consulting the system preference for
/// `System`.
pub fn resolves_dark(choice: ThemeChoice) -> bool {
    match choice {
        ThemeChoice::Light => false,
        ThemeChoice::Dark => true,
        ThemeChoice::System => system_prefers_dark(),
    }
}

/// Set the `data-theme` attribute on `<html>`.
pub fn apply(choice: ThemeChoice) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let value = if resolves_dark(choice) { "dark" } else { "light" };
            let _ = el.set_attribute("data-theme", value);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = choice;
    }
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}
