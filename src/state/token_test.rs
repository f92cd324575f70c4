#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn memory_round_trip_returns_written_token() {
    let tokens = MemoryTokens::default();
    assert_eq!(tokens.read(), None);

    tokens.write("abc");
    assert_eq!(tokens.read(), Some("abc".to_owned()));
}

#[test]
fn write_supersedes_previous_token() {
    let tokens = MemoryTokens::holding("old");
    tokens.write("new");
    assert_eq!(tokens.read(), Some("new".to_owned()));
}

#[test]
fn clear_then_read_returns_none() {
    let tokens = MemoryTokens::holding("abc");
    tokens.clear();
    assert_eq!(tokens.read(), None);
}

#[test]
fn browser_store_degrades_without_a_window() {
    let tokens = BrowserTokens;
    tokens.write("abc");
    assert_eq!(tokens.read(), None);
    tokens.clear();
}
