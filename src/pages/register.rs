//! Registration page with client-side password checks before the round trip.

use leptos::prelude::*;

use crate::net::types::RegisterRequest;
use crate::state::controller::use_controller;
use crate::state::session::Session;
use crate::util::validate::{passwords_match, validate_password};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let session = expect_context::<RwSignal<Session>>();
    let controller = use_controller();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            error.set("Enter an email address.".to_owned());
            return;
        }
        let password_value = password.get();
        let validation = validate_password(&password_value);
        if !validation.is_valid {
            error.set(validation.errors.join(" "));
            return;
        }
        if !passwords_match(&password_value, &confirm.get()) {
            error.set("Passwords do not match.".to_owned());
            return;
        }
        error.set(String::new());

        let request = RegisterRequest {
            email: email_value,
            password: password_value,
            confirm_password: confirm.get(),
            first_name: first_name.get().trim().to_owned(),
            last_name: last_name.get().trim().to_owned(),
        };

        #[cfg(feature = "hydrate")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                if let Err(err) = controller.register(&request).await {
                    error.set(err.to_string());
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
                <h1>"Create Account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="First name"
                        prop:value=move || first_name.get()
                        on:input=move |ev| first_name.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Last name"
                        prop:value=move || last_name.get()
                        on:input=move |ev| last_name.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button
                        class="auth-button"
                        type="submit"
                        disabled=move || session.get().loading
                    >
                        "Sign Up"
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <p class="auth-links">
                    <a href="/login">"Already have an account? Sign in"</a>
                </p>
            </div>
        </div>
    }
}
