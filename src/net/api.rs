//! HTTP gateway for the identity backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` with an abort-based
//! timeout. Server-side (SSR): stubs returning network errors, since identity
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every non-success response is normalized into `ApiError` and rethrown;
//! nothing is swallowed here. Best-effort semantics (server-side logout) live
//! in the session controller, not the gateway.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use crate::net::error::ApiError;
use crate::net::types::{
    AuthResponse, ChangePasswordRequest, Message, ProfileUpdate, RegisterRequest,
    ResetPasswordRequest, UserProfile,
};
use crate::state::token::TokenStore;

#[cfg(any(test, feature = "hydrate"))]
pub(crate) const REGISTER_PATH: &str = "/api/v1/auth/register";
#[cfg(any(test, feature = "hydrate"))]
pub(crate) const LOGIN_PATH: &str = "/api/v1/auth/login";
#[cfg(any(test, feature = "hydrate"))]
pub(crate) const LOGOUT_PATH: &str = "/api/v1/auth/logout";
#[cfg(any(test, feature = "hydrate"))]
pub(crate) const CHANGE_PASSWORD_PATH: &str = "/api/v1/auth/change-password";
#[cfg(any(test, feature = "hydrate"))]
pub(crate) const REQUEST_RESET_PATH: &str = "/api/v1/auth/request-password-reset";
#[cfg(any(test, feature = "hydrate"))]
pub(crate) const RESET_PASSWORD_PATH: &str = "/api/v1/auth/reset-password";
#[cfg(any(test, feature = "hydrate"))]
pub(crate) const ME_PATH: &str = "/api/v1/me";

/// Abort in-flight requests after this long to avoid hanging UI state.
#[cfg(feature = "hydrate")]
const REQUEST_TIMEOUT_MS: u32 = 10_000;

#[cfg(not(feature = "hydrate"))]
const NOT_IN_BROWSER: &str = "Identity API is not available on the server.";

#[cfg(any(test, feature = "hydrate"))]
fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// One operation per identity action; each performs exactly one network
/// round trip and maps failures into [`ApiError`].
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
    async fn fetch_self(&self) -> Result<UserProfile, ApiError>;
    async fn update_self(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError>;
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Message, ApiError>;
    async fn request_password_reset(&self, email: &str) -> Result<Message, ApiError>;
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Message, ApiError>;
    async fn delete_self(&self) -> Result<(), ApiError>;
}

/// Gateway over the real backend. Holds a read-only token handle so requests
/// can attach a bearer header when a token is present; absence of a token
/// simply omits the header.
#[derive(Clone)]
pub struct HttpAuthGateway {
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    tokens: Rc<dyn TokenStore>,
}

impl HttpAuthGateway {
    pub fn new(tokens: Rc<dyn TokenStore>) -> Self {
        Self { tokens }
    }

    #[cfg(feature = "hydrate")]
    fn authorization(&self) -> Option<String> {
        self.tokens.read().map(|token| bearer_value(&token))
    }
}

/// Form-encoded credential body for the OAuth2-style login endpoint, which
/// expects `username`/`password` fields rather than JSON.
#[cfg(feature = "hydrate")]
fn login_form_body(email: &str, password: &str) -> Result<String, ApiError> {
    let params = web_sys::UrlSearchParams::new()
        .map_err(|_| ApiError::network("Failed to encode login form."))?;
    params.append("username", email);
    params.append("password", password);
    Ok(String::from(params.to_string()))
}

/// Sends a request built against an abort signal that fires on timeout.
#[cfg(feature = "hydrate")]
async fn send_with_timeout(
    build: impl FnOnce(&web_sys::AbortSignal) -> Result<gloo_net::http::Request, ApiError>,
) -> Result<gloo_net::http::Response, ApiError> {
    let controller = web_sys::AbortController::new()
        .map_err(|_| ApiError::network("Failed to initialize request timeout."))?;
    let signal = controller.signal();
    let abort = controller.clone();
    let _timeout = gloo_timers::callback::Timeout::new(REQUEST_TIMEOUT_MS, move || abort.abort());

    let request = build(&signal)?;
    request.send().await.map_err(map_transport_error)
}

#[cfg(feature = "hydrate")]
fn map_transport_error(err: gloo_net::Error) -> ApiError {
    let message = err.to_string();
    if message.to_lowercase().contains("abort") {
        ApiError::network("Request timed out. Please try again.")
    } else {
        ApiError::network(format!("Unable to reach the server: {message}"))
    }
}

#[cfg(feature = "hydrate")]
fn build_error(err: &gloo_net::Error) -> ApiError {
    ApiError::network(format!("Failed to build request: {err}"))
}

#[cfg(feature = "hydrate")]
async fn expect_json<T: serde::de::DeserializeOwned>(
    response: gloo_net::http::Response,
    fallback: &str,
    default_status: u16,
) -> Result<T, ApiError> {
    if response.ok() {
        response.json::<T>().await.map_err(|err| ApiError {
            kind: crate::net::error::ErrorKind::Server,
            message: format!("Failed to decode response: {err}"),
            status: Some(response.status()),
        })
    } else {
        Err(error_from(response, fallback, default_status).await)
    }
}

#[cfg(feature = "hydrate")]
async fn expect_empty(
    response: gloo_net::http::Response,
    fallback: &str,
    default_status: u16,
) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(error_from(response, fallback, default_status).await)
    }
}

#[cfg(feature = "hydrate")]
async fn error_from(
    response: gloo_net::http::Response,
    fallback: &str,
    default_status: u16,
) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::from_response(status, &body, fallback, default_status)
}

impl AuthGateway for HttpAuthGateway {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::config::endpoint(REGISTER_PATH);
            let response = send_with_timeout(|signal| {
                gloo_net::http::Request::post(&url)
                    .abort_signal(Some(signal))
                    .json(request)
                    .map_err(|err| build_error(&err))
            })
            .await?;
            expect_json(response, "Registration failed", 400).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::network(NOT_IN_BROWSER))
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::config::endpoint(LOGIN_PATH);
            let body = login_form_body(email, password)?;
            let response = send_with_timeout(move |signal| {
                gloo_net::http::Request::post(&url)
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .abort_signal(Some(signal))
                    .body(body)
                    .map_err(|err| build_error(&err))
            })
            .await?;
            expect_json(response, "Login failed", 401).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(ApiError::network(NOT_IN_BROWSER))
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::config::endpoint(LOGOUT_PATH);
            let authorization = self.authorization();
            let response = send_with_timeout(move |signal| {
                let mut builder = gloo_net::http::Request::post(&url).abort_signal(Some(signal));
                if let Some(value) = &authorization {
                    builder = builder.header("Authorization", value);
                }
                builder.build().map_err(|err| build_error(&err))
            })
            .await?;
            expect_empty(response, "Logout failed", 400).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::network(NOT_IN_BROWSER))
        }
    }

    async fn fetch_self(&self) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::config::endpoint(ME_PATH);
            let authorization = self.authorization();
            let response = send_with_timeout(move |signal| {
                let mut builder = gloo_net::http::Request::get(&url).abort_signal(Some(signal));
                if let Some(value) = &authorization {
                    builder = builder.header("Authorization", value);
                }
                builder.build().map_err(|err| build_error(&err))
            })
            .await?;
            expect_json(response, "Failed to fetch user data", 401).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::network(NOT_IN_BROWSER))
        }
    }

    async fn update_self(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::config::endpoint(ME_PATH);
            let authorization = self.authorization();
            let response = send_with_timeout(move |signal| {
                let mut builder = gloo_net::http::Request::put(&url).abort_signal(Some(signal));
                if let Some(value) = &authorization {
                    builder = builder.header("Authorization", value);
                }
                builder.json(update).map_err(|err| build_error(&err))
            })
            .await?;
            expect_json(response, "Failed to update profile", 400).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = update;
            Err(ApiError::network(NOT_IN_BROWSER))
        }
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Message, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::config::endpoint(CHANGE_PASSWORD_PATH);
            let authorization = self.authorization();
            let response = send_with_timeout(move |signal| {
                let mut builder = gloo_net::http::Request::post(&url).abort_signal(Some(signal));
                if let Some(value) = &authorization {
                    builder = builder.header("Authorization", value);
                }
                builder.json(request).map_err(|err| build_error(&err))
            })
            .await?;
            expect_json(response, "Failed to change password", 400).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::network(NOT_IN_BROWSER))
        }
    }

    async fn request_password_reset(&self, email: &str) -> Result<Message, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::config::endpoint(REQUEST_RESET_PATH);
            let payload = serde_json::json!({ "email": email });
            let response = send_with_timeout(move |signal| {
                gloo_net::http::Request::post(&url)
                    .abort_signal(Some(signal))
                    .json(&payload)
                    .map_err(|err| build_error(&err))
            })
            .await?;
            expect_json(response, "Failed to send reset email", 400).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(ApiError::network(NOT_IN_BROWSER))
        }
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Message, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::config::endpoint(RESET_PASSWORD_PATH);
            let response = send_with_timeout(move |signal| {
                gloo_net::http::Request::post(&url)
                    .abort_signal(Some(signal))
                    .json(request)
                    .map_err(|err| build_error(&err))
            })
            .await?;
            expect_json(response, "Failed to reset password", 400).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::network(NOT_IN_BROWSER))
        }
    }

    async fn delete_self(&self) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = super::config::endpoint(ME_PATH);
            let authorization = self.authorization();
            let response = send_with_timeout(move |signal| {
                let mut builder = gloo_net::http::Request::delete(&url).abort_signal(Some(signal));
                if let Some(value) = &authorization {
                    builder = builder.header("Authorization", value);
                }
                builder.build().map_err(|err| build_error(&err))
            })
            .await?;
            expect_empty(response, "Failed to delete account", 400).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::network(NOT_IN_BROWSER))
        }
    }
}
