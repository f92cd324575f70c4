//! Bearer-token persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session controller is the only writer; the HTTP gateway holds a
//! read-only handle to attach `Authorization` headers. Storage access is
//! best-effort: a missing or failing backend degrades to an in-memory-only
//! session for the current page lifetime rather than crashing. No expiry is
//! parsed client-side; the backend rejects stale tokens.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

/// Fixed localStorage key holding the bearer token.
pub const TOKEN_KEY: &str = "access_token";

/// Persisted single-slot credential store.
pub trait TokenStore {
    /// Returns the stored token, or `None` before the first write, after
    /// `clear`, or when storage is unavailable.
    fn read(&self) -> Option<String>;
    /// Persists a token, superseding any previous one.
    fn write(&self, token: &str);
    /// Removes the stored token.
    fn clear(&self);
}

/// `TokenStore` backed by browser localStorage; safe to call before any
/// network activity and in non-browser builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTokens;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokens {
    fn read(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(TOKEN_KEY).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn write(&self, token: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(TOKEN_KEY, token);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}

/// In-memory store used by tests in place of browser storage.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTokens {
    slot: std::cell::RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryTokens {
    pub fn holding(token: &str) -> Self {
        Self {
            slot: std::cell::RefCell::new(Some(token.to_owned())),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokens {
    fn read(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn write(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}
