//! Session lifecycle orchestration.
//!
//! DESIGN
//! ======
//! One owner for all session and token mutations. Every operation follows
//! the same shape: stamp the current epoch, raise `loading` behind a Drop
//! guard, suspend on the gateway, and apply the result only if the epoch is
//! unchanged. Logout and account deletion advance the epoch before touching
//! state, so a stale in-flight fetch can never resurrect an authenticated
//! session — last-writer-wins is not good enough here.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::net::api::AuthGateway;
use crate::net::error::ApiError;
use crate::net::types::{
    ChangePasswordRequest, Message, ProfileUpdate, RegisterRequest, ResetPasswordRequest,
};
use crate::state::session::Session;
use crate::state::token::TokenStore;

/// Concrete controller wired to the real gateway.
pub type AppController = SessionController<crate::net::api::HttpAuthGateway>;

/// Context handle for the controller. The controller holds `Rc`s, so it is
/// shared through thread-local storage rather than the sync context arena.
pub type AppControllerHandle = StoredValue<AppController, LocalStorage>;

/// Returns the app-wide session controller provided by the root component.
pub fn use_controller() -> AppController {
    expect_context::<AppControllerHandle>().get_value()
}

/// Orchestrates auth operations, keeping [`Session`] and the token store in
/// sync from the caller's perspective. Cheap to clone; all clones share the
/// same session signal and epoch.
pub struct SessionController<G> {
    session: RwSignal<Session>,
    gateway: Rc<G>,
    tokens: Rc<dyn TokenStore>,
    epoch: Rc<Cell<u64>>,
    navigate: Rc<dyn Fn(&str)>,
}

impl<G> Clone for SessionController<G> {
    fn clone(&self) -> Self {
        Self {
            session: self.session,
            gateway: Rc::clone(&self.gateway),
            tokens: Rc::clone(&self.tokens),
            epoch: Rc::clone(&self.epoch),
            navigate: Rc::clone(&self.navigate),
        }
    }
}

/// Raises `Session::loading` for its lifetime; Drop lowers it on every exit
/// path, including early returns and discarded stale results.
struct LoadingGuard {
    session: RwSignal<Session>,
}

impl LoadingGuard {
    fn raise(session: RwSignal<Session>) -> Self {
        session.update(|s| s.loading = true);
        Self { session }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.session.update(|s| s.loading = false);
    }
}

impl<G: AuthGateway> SessionController<G> {
    pub fn new(
        session: RwSignal<Session>,
        gateway: G,
        tokens: Rc<dyn TokenStore>,
        navigate: Rc<dyn Fn(&str)>,
    ) -> Self {
        Self {
            session,
            gateway: Rc::new(gateway),
            tokens,
            epoch: Rc::new(Cell::new(0)),
            navigate,
        }
    }

    /// The session signal this controller owns; guards and UI subscribe here.
    pub fn session(&self) -> RwSignal<Session> {
        self.session
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// Starts a new session era, invalidating every in-flight operation.
    fn advance_epoch(&self) -> u64 {
        let next = self.epoch.get() + 1;
        self.epoch.set(next);
        next
    }

    fn epoch_is(&self, stamp: u64) -> bool {
        self.epoch.get() == stamp
    }

    /// Exchanges credentials for a verified session, persists the token, and
    /// navigates to the authenticated landing view. On failure the token
    /// store and session are both cleared before the error propagates.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let stamp = self.advance_epoch();
        let _loading = LoadingGuard::raise(self.session);
        match self.gateway.login(email, password).await {
            Ok(response) if self.epoch_is(stamp) => {
                self.tokens.write(&response.access_token);
                self.session.update(|s| s.sign_in(response.user));
                (self.navigate)("/dashboard");
                Ok(())
            }
            // Superseded by a newer operation (e.g. logout); drop the result.
            Ok(_) => Ok(()),
            Err(err) => {
                if self.epoch_is(stamp) {
                    self.tokens.clear();
                    self.session.update(Session::sign_out);
                }
                Err(err)
            }
        }
    }

    /// Creates an account and signs it in; same state contract as `login`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let stamp = self.advance_epoch();
        let _loading = LoadingGuard::raise(self.session);
        match self.gateway.register(request).await {
            Ok(response) if self.epoch_is(stamp) => {
                self.tokens.write(&response.access_token);
                self.session.update(|s| s.sign_in(response.user));
                (self.navigate)("/dashboard");
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(err) => {
                if self.epoch_is(stamp) {
                    self.tokens.clear();
                    self.session.update(Session::sign_out);
                }
                Err(err)
            }
        }
    }

    /// Clears the local session unconditionally, then attempts server-side
    /// invalidation as a best-effort call whose failure is logged, never
    /// surfaced. Safe to call when already anonymous.
    pub async fn logout(&self) {
        self.advance_epoch();
        let _loading = LoadingGuard::raise(self.session);
        self.tokens.clear();
        self.session.update(Session::sign_out);
        (self.navigate)("/");
        if let Err(err) = self.gateway.logout().await {
            log::warn!("server-side logout failed: {err}");
        }
    }

    /// Revalidates the cached identity against the backend. A rejected token
    /// tears the session down.
    pub async fn refresh_user(&self) -> Result<(), ApiError> {
        let stamp = self.current_epoch();
        let _loading = LoadingGuard::raise(self.session);
        match self.gateway.fetch_self().await {
            Ok(user) if self.epoch_is(stamp) => {
                self.session.update(|s| s.sign_in(user));
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(err) => {
                if self.epoch_is(stamp) {
                    self.tokens.clear();
                    self.session.update(Session::sign_out);
                }
                Err(err)
            }
        }
    }

    /// Partial profile update; the session keeps the server's returned record
    /// on success and is left untouched on failure.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        let stamp = self.current_epoch();
        let _loading = LoadingGuard::raise(self.session);
        let user = self.gateway.update_self(update).await?;
        if self.epoch_is(stamp) {
            self.session.update(|s| s.sign_in(user));
        }
        Ok(())
    }

    /// Changes the password. No session mutation, no navigation.
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<Message, ApiError> {
        let _loading = LoadingGuard::raise(self.session);
        self.gateway.change_password(request).await
    }

    /// Requests a reset email. The backend answers generically for unknown
    /// addresses; nothing here distinguishes them either.
    pub async fn request_password_reset(&self, email: &str) -> Result<Message, ApiError> {
        let _loading = LoadingGuard::raise(self.session);
        self.gateway.request_password_reset(email).await
    }

    /// Completes a reset started from an emailed token.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Message, ApiError> {
        let _loading = LoadingGuard::raise(self.session);
        self.gateway.reset_password(request).await
    }

    /// Deletes the account. Unlike logout this waits for the server: on
    /// failure the session and token are left untouched and the error
    /// propagates.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let _loading = LoadingGuard::raise(self.session);
        self.gateway.delete_self().await?;
        self.advance_epoch();
        self.tokens.clear();
        self.session.update(Session::sign_out);
        (self.navigate)("/");
        Ok(())
    }

    /// Reconciles any persisted token with server-verified identity, exactly
    /// once at startup. Never propagates: every failure degrades to an
    /// anonymous session. `initialized` flips true in the same update that
    /// settles the session, so guards never observe a half-applied state.
    pub async fn bootstrap(&self) {
        if self.session.with_untracked(|s| s.initialized) {
            return;
        }
        let stamp = self.current_epoch();
        if self.tokens.read().is_none() {
            self.session.update(|s| {
                s.sign_out();
                s.mark_initialized();
            });
            return;
        }
        let _loading = LoadingGuard::raise(self.session);
        match self.gateway.fetch_self().await {
            Ok(user) if self.epoch_is(stamp) => self.session.update(|s| {
                s.sign_in(user);
                s.mark_initialized();
            }),
            // A logout or login raced us and already settled the session.
            Ok(_) => self.session.update(Session::mark_initialized),
            Err(err) => {
                if self.epoch_is(stamp) {
                    log::debug!("bootstrap: stored token rejected: {err}");
                    self.tokens.clear();
                    self.session.update(|s| {
                        s.sign_out();
                        s.mark_initialized();
                    });
                } else {
                    self.session.update(Session::mark_initialized);
                }
            }
        }
    }
}
