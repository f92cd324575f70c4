use super::{GuardDecision, guest_route, protected_route};
use crate::net::types::{Role, UserProfile};
use crate::state::session::Session;

fn signed_in() -> Session {
    let mut session = Session::default();
    session.sign_in(UserProfile {
        id: "u-1".to_owned(),
        email: "a@b.com".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Byron".to_owned(),
        role: Role::User,
        is_active: true,
        is_verified: true,
        created_at: "2025-01-01T00:00:00Z".to_owned(),
        updated_at: "2025-01-01T00:00:00Z".to_owned(),
    });
    session.mark_initialized();
    session
}

fn anonymous() -> Session {
    let mut session = Session::default();
    session.mark_initialized();
    session
}

#[test]
fn both_guards_wait_before_bootstrap_settles() {
    let uninitialized = Session::default();
    assert_eq!(protected_route(&uninitialized), GuardDecision::Wait);
    assert_eq!(guest_route(&uninitialized), GuardDecision::Wait);

    // Even a signed-in-looking snapshot must wait until initialized.
    let mut premature = signed_in();
    premature.initialized = false;
    assert_eq!(protected_route(&premature), GuardDecision::Wait);
    assert_eq!(guest_route(&premature), GuardDecision::Wait);
}

#[test]
fn protected_route_redirects_anonymous_to_login() {
    assert_eq!(
        protected_route(&anonymous()),
        GuardDecision::Redirect("/login")
    );
}

#[test]
fn protected_route_allows_signed_in_users() {
    assert_eq!(protected_route(&signed_in()), GuardDecision::Allow);
}

#[test]
fn guest_route_redirects_signed_in_users_to_dashboard() {
    assert_eq!(
        guest_route(&signed_in()),
        GuardDecision::Redirect("/dashboard")
    );
}

#[test]
fn guest_route_allows_anonymous_visitors() {
    assert_eq!(guest_route(&anonymous()), GuardDecision::Allow);
}
