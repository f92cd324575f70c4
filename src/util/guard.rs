//! Route guards gating navigation on session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two cooperating gates: protected routes bounce anonymous visitors to the
//! login view, guest-only routes bounce signed-in users to the dashboard.
//! Both wait for bootstrap: until `Session::initialized` is true the
//! decision is `Wait`, so a guard evaluated before the persisted token has
//! been reconciled can never redirect on a stale snapshot.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::Session;

/// Outcome of evaluating a guard against a session snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Bootstrap has not settled; render nothing and re-evaluate.
    Wait,
    Allow,
    Redirect(&'static str),
}

/// Gate for routes that require a signed-in user.
pub fn protected_route(session: &Session) -> GuardDecision {
    if !session.initialized {
        GuardDecision::Wait
    } else if session.authenticated {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect("/login")
    }
}

/// Gate for login/register routes that signed-in users should skip.
pub fn guest_route(session: &Session) -> GuardDecision {
    if !session.initialized {
        GuardDecision::Wait
    } else if session.authenticated {
        GuardDecision::Redirect("/dashboard")
    } else {
        GuardDecision::Allow
    }
}

/// Renders children only for signed-in users; anonymous visitors are sent to
/// the login view once bootstrap has settled.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let GuardDecision::Redirect(target) = protected_route(&session.get()) {
            navigate(target, NavigateOptions::default());
        }
    });

    view! {
        <Show when=move || matches!(protected_route(&session.get()), GuardDecision::Allow)>
            {children()}
        </Show>
    }
}

/// Renders children only for anonymous visitors; signed-in users are sent to
/// the dashboard once bootstrap has settled.
#[component]
pub fn RequireGuest(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let GuardDecision::Redirect(target) = guest_route(&session.get()) {
            navigate(target, NavigateOptions::default());
        }
    });

    view! {
        <Show when=move || matches!(guest_route(&session.get()), GuardDecision::Allow)>
            {children()}
        </Show>
    }
}
