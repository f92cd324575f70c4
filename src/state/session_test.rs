use super::*;

fn user(first: &str, last: &str, role: Role) -> UserProfile {
    UserProfile {
        id: "u-1".to_owned(),
        email: "a@b.com".to_owned(),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        role,
        is_active: true,
        is_verified: true,
        created_at: "2025-01-01T00:00:00Z".to_owned(),
        updated_at: "2025-01-01T00:00:00Z".to_owned(),
    }
}

#[test]
fn default_session_is_anonymous_and_uninitialized() {
    let session = Session::default();
    assert!(session.user.is_none());
    assert!(!session.authenticated);
    assert!(!session.loading);
    assert!(!session.initialized);
}

#[test]
fn sign_in_sets_user_and_authenticated_together() {
    let mut session = Session::default();
    session.sign_in(user("Ada", "Byron", Role::User));
    assert!(session.authenticated);
    assert!(session.user.is_some());
}

#[test]
fn sign_out_clears_user_and_authenticated_together() {
    let mut session = Session::default();
    session.sign_in(user("Ada", "Byron", Role::User));
    session.sign_out();
    assert!(!session.authenticated);
    assert!(session.user.is_none());
}

#[test]
fn sign_out_preserves_initialized() {
    let mut session = Session::default();
    session.mark_initialized();
    session.sign_out();
    assert!(session.initialized);
}

#[test]
fn display_name_joins_first_and_last() {
    let mut session = Session::default();
    assert_eq!(session.display_name(), "");
    session.sign_in(user("Ada", "Byron", Role::User));
    assert_eq!(session.display_name(), "Ada Byron");
}

#[test]
fn initials_are_uppercased() {
    let mut session = Session::default();
    session.sign_in(user("ada", "byron", Role::User));
    assert_eq!(session.initials(), "AB");
}

#[test]
fn is_admin_reflects_role() {
    let mut session = Session::default();
    assert!(!session.is_admin());
    session.sign_in(user("Ada", "Byron", Role::Admin));
    assert!(session.is_admin());
}
