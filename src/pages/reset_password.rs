//! Password reset completion page, reached from an emailed token link.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::net::types::ResetPasswordRequest;
use crate::state::controller::use_controller;
use crate::state::session::Session;
use crate::util::validate::{passwords_match, validate_password};

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let done = RwSignal::new(false);
    let session = expect_context::<RwSignal<Session>>();
    let controller = use_controller();
    let query = use_query_map();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading || done.get_untracked() {
            return;
        }
        let token = query.get_untracked().get("token").unwrap_or_default();
        if token.is_empty() {
            info.set("This reset link is missing its token. Request a new one.".to_owned());
            return;
        }
        let password_value = password.get();
        let validation = validate_password(&password_value);
        if !validation.is_valid {
            info.set(validation.errors.join(" "));
            return;
        }
        if !passwords_match(&password_value, &confirm.get()) {
            info.set("Passwords do not match.".to_owned());
            return;
        }

        let request = ResetPasswordRequest {
            token,
            new_password: password_value,
            confirm_new_password: confirm.get(),
        };

        #[cfg(feature = "hydrate")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                match controller.reset_password(&request).await {
                    Ok(message) => {
                        info.set(message.message);
                        done.set(true);
                    }
                    Err(err) => info.set(err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&controller, &request);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Choose a New Password"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="New password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm new password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button
                        class="auth-button"
                        type="submit"
                        disabled=move || session.get().loading || done.get()
                    >
                        "Reset Password"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <Show when=move || done.get()>
                    <p class="auth-links">
                        <a href="/login">"Continue to sign in"</a>
                    </p>
                </Show>
            </div>
        </div>
    }
}
