use super::*;

#[test]
fn theme_choice_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ThemeChoice::Dark).unwrap(), r#""dark""#);
    assert_eq!(serde_json::to_string(&ThemeChoice::System).unwrap(), r#""system""#);
}

#[test]
fn preferences_round_trip() {
    let prefs = Preferences { theme: ThemeChoice::Light };
    let raw = serde_json::to_string(&prefs).unwrap();
    assert_eq!(raw, r#"{"theme":"light"}"#);
    let back: Preferences = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, prefs);
}

#[test]
fn missing_theme_field_defaults_to_system() {
    let prefs: Preferences = serde_json::from_str("{}").unwrap();
    assert_eq!(prefs.theme, ThemeChoice::System);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn load_defaults_without_a_browser() {
    assert_eq!(Preferences::load(), Preferences::default());
}
