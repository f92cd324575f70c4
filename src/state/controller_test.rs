use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;

use super::*;
use crate::net::error::ErrorKind;
use crate::net::types::{AuthResponse, Role, UserProfile};
use crate::state::token::MemoryTokens;

fn user(email: &str) -> UserProfile {
    UserProfile {
        id: "u-1".to_owned(),
        email: email.to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Byron".to_owned(),
        role: Role::User,
        is_active: true,
        is_verified: true,
        created_at: "2025-01-01T00:00:00Z".to_owned(),
        updated_at: "2025-01-01T00:00:00Z".to_owned(),
    }
}

fn auth_response(token: &str) -> AuthResponse {
    AuthResponse {
        user: user("a@b.com"),
        access_token: token.to_owned(),
        token_type: "bearer".to_owned(),
        expires_in: 1800,
    }
}

fn auth_error(message: &str) -> ApiError {
    ApiError {
        kind: ErrorKind::Auth,
        message: message.to_owned(),
        status: Some(401),
    }
}

fn unexpected(op: &str) -> ApiError {
    ApiError::network(format!("unexpected call: {op}"))
}

/// Scripted gateway: each operation returns its configured result, or an
/// "unexpected call" error when the test did not script it. The oneshot
/// gates let a test hold a response in flight to force interleavings.
#[derive(Default)]
struct MockGateway {
    login: Option<Result<AuthResponse, ApiError>>,
    login_gate: RefCell<Option<oneshot::Receiver<()>>>,
    register: Option<Result<AuthResponse, ApiError>>,
    fetch: Option<Result<UserProfile, ApiError>>,
    fetch_gate: RefCell<Option<oneshot::Receiver<()>>>,
    fetch_calls: Cell<u32>,
    logout: Option<Result<(), ApiError>>,
    logout_calls: Cell<u32>,
    update: Option<Result<UserProfile, ApiError>>,
    change_password: Option<Result<Message, ApiError>>,
    request_reset: Option<Result<Message, ApiError>>,
    reset: Option<Result<Message, ApiError>>,
    delete: Option<Result<(), ApiError>>,
}

impl AuthGateway for MockGateway {
    async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.register.clone().unwrap_or_else(|| Err(unexpected("register")))
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        let gate = self.login_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.login.clone().unwrap_or_else(|| Err(unexpected("login")))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.logout_calls.set(self.logout_calls.get() + 1);
        self.logout.clone().unwrap_or_else(|| Err(unexpected("logout")))
    }

    async fn fetch_self(&self) -> Result<UserProfile, ApiError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        let gate = self.fetch_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.fetch.clone().unwrap_or_else(|| Err(unexpected("fetch_self")))
    }

    async fn update_self(&self, _update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.update.clone().unwrap_or_else(|| Err(unexpected("update_self")))
    }

    async fn change_password(
        &self,
        _request: &ChangePasswordRequest,
    ) -> Result<Message, ApiError> {
        self.change_password
            .clone()
            .unwrap_or_else(|| Err(unexpected("change_password")))
    }

    async fn request_password_reset(&self, _email: &str) -> Result<Message, ApiError> {
        self.request_reset
            .clone()
            .unwrap_or_else(|| Err(unexpected("request_password_reset")))
    }

    async fn reset_password(&self, _request: &ResetPasswordRequest) -> Result<Message, ApiError> {
        self.reset.clone().unwrap_or_else(|| Err(unexpected("reset_password")))
    }

    async fn delete_self(&self) -> Result<(), ApiError> {
        self.delete.clone().unwrap_or_else(|| Err(unexpected("delete_self")))
    }
}

struct Harness {
    controller: SessionController<MockGateway>,
    session: RwSignal<Session>,
    tokens: Rc<MemoryTokens>,
    visited: Rc<RefCell<Vec<String>>>,
}

fn harness(gateway: MockGateway, tokens: MemoryTokens) -> Harness {
    let session = RwSignal::new(Session::default());
    let tokens = Rc::new(tokens);
    let visited = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&visited);
    let controller = SessionController::new(
        session,
        gateway,
        Rc::clone(&tokens) as Rc<dyn TokenStore>,
        Rc::new(move |path: &str| sink.borrow_mut().push(path.to_owned())),
    );
    Harness {
        controller,
        session,
        tokens,
        visited,
    }
}

/// Store whose writes never land, standing in for an absent storage backend.
struct NullTokens;

impl TokenStore for NullTokens {
    fn read(&self) -> Option<String> {
        None
    }

    fn write(&self, _token: &str) {}

    fn clear(&self) {}
}

#[test]
fn bootstrap_without_token_settles_anonymous() {
    let h = harness(MockGateway::default(), MemoryTokens::default());
    block_on(h.controller.bootstrap());

    let session = h.session.get_untracked();
    assert!(!session.authenticated);
    assert!(session.user.is_none());
    assert!(session.initialized);
    assert!(!session.loading);
}

#[test]
fn bootstrap_with_valid_token_signs_in() {
    let gateway = MockGateway {
        fetch: Some(Ok(user("a@b.com"))),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    block_on(h.controller.bootstrap());

    let session = h.session.get_untracked();
    assert!(session.authenticated);
    assert_eq!(session.user.as_ref().map(|u| u.email.as_str()), Some("a@b.com"));
    assert!(session.initialized);
    assert!(!session.loading);
    assert_eq!(h.tokens.read(), Some("abc".to_owned()));
}

#[test]
fn bootstrap_with_rejected_token_clears_storage() {
    let gateway = MockGateway {
        fetch: Some(Err(auth_error("Could not validate credentials"))),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("expired"));
    block_on(h.controller.bootstrap());

    let session = h.session.get_untracked();
    assert!(!session.authenticated);
    assert!(session.user.is_none());
    assert!(session.initialized);
    assert!(!session.loading);
    assert_eq!(h.tokens.read(), None);
}

#[test]
fn bootstrap_runs_only_once() {
    let gateway = MockGateway {
        fetch: Some(Ok(user("a@b.com"))),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    block_on(h.controller.bootstrap());
    block_on(h.controller.bootstrap());
    assert_eq!(h.controller.gateway.fetch_calls.get(), 1);
}

#[test]
fn login_success_persists_token_and_navigates() {
    let gateway = MockGateway {
        login: Some(Ok(auth_response("fresh-token"))),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::default());
    block_on(h.controller.login("a@b.com", "pw")).unwrap();

    let session = h.session.get_untracked();
    assert!(session.authenticated);
    assert!(!session.loading);
    assert_eq!(h.tokens.read(), Some("fresh-token".to_owned()));
    assert_eq!(h.visited.borrow().as_slice(), ["/dashboard"]);
}

#[test]
fn login_failure_surfaces_backend_message() {
    let gateway = MockGateway {
        login: Some(Err(auth_error("Incorrect email or password"))),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::default());
    let err = block_on(h.controller.login("a@b.com", "wrong")).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Auth);
    assert_eq!(err.message, "Incorrect email or password");
    let session = h.session.get_untracked();
    assert!(!session.authenticated);
    assert!(!session.loading);
    assert_eq!(h.tokens.read(), None);
    assert!(h.visited.borrow().is_empty());
}

#[test]
fn login_with_unwritable_store_still_authenticates() {
    let gateway = MockGateway {
        login: Some(Ok(auth_response("fresh-token"))),
        ..MockGateway::default()
    };
    let session = RwSignal::new(Session::default());
    let controller = SessionController::new(
        session,
        gateway,
        Rc::new(NullTokens),
        Rc::new(|_: &str| {}),
    );
    block_on(controller.login("a@b.com", "pw")).unwrap();

    assert!(session.get_untracked().authenticated);
}

#[test]
fn register_success_signs_in() {
    let gateway = MockGateway {
        register: Some(Ok(auth_response("fresh-token"))),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::default());
    let request = RegisterRequest {
        email: "a@b.com".to_owned(),
        password: "secretpw".to_owned(),
        confirm_password: "secretpw".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Byron".to_owned(),
    };
    block_on(h.controller.register(&request)).unwrap();

    assert!(h.session.get_untracked().authenticated);
    assert_eq!(h.visited.borrow().as_slice(), ["/dashboard"]);
}

#[test]
fn logout_clears_state_even_when_server_call_fails() {
    let gateway = MockGateway {
        fetch: Some(Ok(user("a@b.com"))),
        logout: Some(Err(ApiError::network("connection reset"))),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    block_on(h.controller.bootstrap());
    block_on(h.controller.logout());

    let session = h.session.get_untracked();
    assert!(!session.authenticated);
    assert!(session.user.is_none());
    assert!(!session.loading);
    assert_eq!(h.tokens.read(), None);
    assert_eq!(h.visited.borrow().last().map(String::as_str), Some("/"));
}

#[test]
fn logout_twice_stays_anonymous_without_errors() {
    let gateway = MockGateway {
        logout: Some(Ok(())),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    block_on(h.controller.logout());
    block_on(h.controller.logout());

    assert!(!h.session.get_untracked().authenticated);
    assert_eq!(h.tokens.read(), None);
    assert_eq!(h.controller.gateway.logout_calls.get(), 2);
}

#[test]
fn logout_wins_over_stale_bootstrap_fetch() {
    let (release, gate) = oneshot::channel();
    let gateway = MockGateway {
        fetch: Some(Ok(user("a@b.com"))),
        fetch_gate: RefCell::new(Some(gate)),
        logout: Some(Ok(())),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));

    let mut pool = LocalPool::new();
    let controller = h.controller.clone();
    pool.spawner()
        .spawn_local(async move { controller.bootstrap().await })
        .unwrap();
    pool.run_until_stalled(); // bootstrap is suspended on the gated fetch

    pool.run_until(h.controller.logout());
    assert!(!h.session.get_untracked().authenticated);
    assert_eq!(h.tokens.read(), None);

    release.send(()).unwrap();
    pool.run_until_stalled(); // the stale fetch resolves and must be discarded

    let session = h.session.get_untracked();
    assert!(!session.authenticated);
    assert!(session.user.is_none());
    assert!(session.initialized);
    assert!(!session.loading);
    assert_eq!(h.tokens.read(), None);
}

#[test]
fn login_then_immediate_logout_ends_anonymous() {
    let (release, gate) = oneshot::channel();
    let gateway = MockGateway {
        login: Some(Ok(auth_response("fresh-token"))),
        login_gate: RefCell::new(Some(gate)),
        logout: Some(Ok(())),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::default());

    let mut pool = LocalPool::new();
    let controller = h.controller.clone();
    pool.spawner()
        .spawn_local(async move {
            let _ = controller.login("a@b.com", "pw").await;
        })
        .unwrap();
    pool.run_until_stalled(); // login is suspended on the gated response

    pool.run_until(h.controller.logout());
    release.send(()).unwrap();
    pool.run_until_stalled(); // login resolves after logout; result is stale

    let session = h.session.get_untracked();
    assert!(!session.authenticated);
    assert!(!session.loading);
    assert_eq!(h.tokens.read(), None);
    assert_eq!(h.visited.borrow().as_slice(), ["/"]);
}

#[test]
fn stale_refresh_after_logout_is_discarded() {
    let (release, gate) = oneshot::channel();
    let gateway = MockGateway {
        fetch: Some(Ok(user("a@b.com"))),
        fetch_gate: RefCell::new(Some(gate)),
        logout: Some(Ok(())),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));

    let mut pool = LocalPool::new();
    let controller = h.controller.clone();
    pool.spawner()
        .spawn_local(async move {
            let _ = controller.refresh_user().await;
        })
        .unwrap();
    pool.run_until_stalled();

    pool.run_until(h.controller.logout());
    release.send(()).unwrap();
    pool.run_until_stalled();

    let session = h.session.get_untracked();
    assert!(!session.authenticated);
    assert!(!session.loading);
    assert_eq!(h.tokens.read(), None);
}

#[test]
fn refresh_failure_tears_the_session_down() {
    let gateway = MockGateway {
        fetch: Some(Err(auth_error("Could not validate credentials"))),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    h.session.update(|s| {
        s.sign_in(user("a@b.com"));
        s.mark_initialized();
    });

    let err = block_on(h.controller.refresh_user()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Auth);
    assert!(!h.session.get_untracked().authenticated);
    assert_eq!(h.tokens.read(), None);
}

#[test]
fn update_profile_success_replaces_user() {
    let updated = UserProfile {
        first_name: "Grace".to_owned(),
        ..user("a@b.com")
    };
    let gateway = MockGateway {
        update: Some(Ok(updated)),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    h.session.update(|s| {
        s.sign_in(user("a@b.com"));
        s.mark_initialized();
    });

    let update = ProfileUpdate {
        first_name: Some("Grace".to_owned()),
        ..ProfileUpdate::default()
    };
    block_on(h.controller.update_profile(&update)).unwrap();

    let session = h.session.get_untracked();
    assert_eq!(
        session.user.as_ref().map(|u| u.first_name.as_str()),
        Some("Grace")
    );
    assert!(session.authenticated);
    assert!(!session.loading);
}

#[test]
fn update_profile_failure_leaves_user_unchanged() {
    let gateway = MockGateway {
        update: Some(Err(ApiError {
            kind: ErrorKind::Validation,
            message: "Email already registered".to_owned(),
            status: Some(400),
        })),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    h.session.update(|s| {
        s.sign_in(user("a@b.com"));
        s.mark_initialized();
    });

    let update = ProfileUpdate::default();
    let err = block_on(h.controller.update_profile(&update)).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    let session = h.session.get_untracked();
    assert_eq!(session.user.as_ref().map(|u| u.first_name.as_str()), Some("Ada"));
    assert!(session.authenticated);
    assert!(!session.loading);
}

#[test]
fn change_password_touches_neither_session_nor_navigation() {
    let gateway = MockGateway {
        change_password: Some(Ok(Message {
            message: "Password changed".to_owned(),
        })),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    h.session.update(|s| {
        s.sign_in(user("a@b.com"));
        s.mark_initialized();
    });
    let before = h.session.get_untracked().user.clone();

    let request = ChangePasswordRequest {
        current_password: "old".to_owned(),
        new_password: "newpassword".to_owned(),
        confirm_new_password: "newpassword".to_owned(),
    };
    let message = block_on(h.controller.change_password(&request)).unwrap();

    assert_eq!(message.message, "Password changed");
    let session = h.session.get_untracked();
    assert_eq!(session.user, before);
    assert!(!session.loading);
    assert!(h.visited.borrow().is_empty());
}

#[test]
fn delete_account_failure_leaves_state_untouched() {
    let gateway = MockGateway {
        delete: Some(Err(ApiError::network("connection reset"))),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    h.session.update(|s| {
        s.sign_in(user("a@b.com"));
        s.mark_initialized();
    });

    let err = block_on(h.controller.delete_account()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert!(h.session.get_untracked().authenticated);
    assert_eq!(h.tokens.read(), Some("abc".to_owned()));
    assert!(h.visited.borrow().is_empty());
}

#[test]
fn delete_account_success_clears_everything_and_goes_home() {
    let gateway = MockGateway {
        delete: Some(Ok(())),
        ..MockGateway::default()
    };
    let h = harness(gateway, MemoryTokens::holding("abc"));
    h.session.update(|s| {
        s.sign_in(user("a@b.com"));
        s.mark_initialized();
    });

    block_on(h.controller.delete_account()).unwrap();

    let session = h.session.get_untracked();
    assert!(!session.authenticated);
    assert!(session.user.is_none());
    assert!(!session.loading);
    assert_eq!(h.tokens.read(), None);
    assert_eq!(h.visited.borrow().as_slice(), ["/"]);
}
