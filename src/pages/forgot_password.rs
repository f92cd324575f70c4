//! Password reset request page.

use leptos::prelude::*;

use crate::state::controller::use_controller;
use crate::state::session::Session;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let session = expect_context::<RwSignal<Session>>();
    let controller = use_controller();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            info.set("Enter an email first.".to_owned());
            return;
        }
        info.set("Sending...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                match controller.request_password_reset(&email_value).await {
                    Ok(message) => info.set(message.message),
                    Err(err) => info.set(err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&controller, &email_value);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset Password"</h1>
                <p class="auth-card__subtitle">
                    "Enter your email and we will send a reset link."
                </p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button
                        class="auth-button"
                        type="submit"
                        disabled=move || session.get().loading
                    >
                        "Send Reset Link"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-links">
                    <a href="/login">"Back to sign in"</a>
                </p>
            </div>
        </div>
    }
}
