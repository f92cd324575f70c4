//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and user-aware components read this to coordinate login
//! redirects and identity-dependent rendering. Only the session controller
//! mutates it, and every transition is applied in a single signal update so
//! observers never see a half-updated session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::{Role, UserProfile};

/// Who is logged in, plus the lifecycle flags the rest of the app keys off.
///
/// Invariant: `authenticated` is true iff `user` is present and was set by a
/// successful identity-verifying call. `initialized` latches true once, at
/// bootstrap completion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub authenticated: bool,
    /// True while any session operation is in flight.
    pub loading: bool,
    /// True once bootstrap has reached a definitive answer.
    pub initialized: bool,
}

impl Session {
    /// Applies a verified identity.
    pub fn sign_in(&mut self, user: UserProfile) {
        self.user = Some(user);
        self.authenticated = true;
    }

    /// Returns to the anonymous state.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.authenticated = false;
    }

    /// Marks bootstrap complete. Latches; never reverts.
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// "First Last", or an empty string when anonymous.
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| format!("{} {}", u.first_name, u.last_name))
            .unwrap_or_default()
    }

    /// Uppercased first letters of the first and last name.
    pub fn initials(&self) -> String {
        self.user
            .as_ref()
            .map(|u| {
                u.first_name
                    .chars()
                    .take(1)
                    .chain(u.last_name.chars().take(1))
                    .flat_map(char::to_uppercase)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.role == Role::Admin)
    }
}
