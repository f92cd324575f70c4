//! Login page with email + password credentials.

use leptos::prelude::*;

use crate::state::controller::use_controller;
use crate::state::session::Session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let session = expect_context::<RwSignal<Session>>();
    let controller = use_controller();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if email_value.is_empty() || password_value.is_empty() {
            error.set("Enter both email and password.".to_owned());
            return;
        }
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                if let Err(err) = controller.login(&email_value, &password_value).await {
                    error.set(err.to_string());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&controller, &email_value, &password_value);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign In"</h1>
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
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        class="auth-button"
                        type="submit"
                        disabled=move || session.get().loading
                    >
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <p class="auth-links">
                    <a href="/forgot-password">"Forgot password?"</a>
                    <a href="/register">"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
