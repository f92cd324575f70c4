//! Authenticated landing view with an account overview.

use leptos::prelude::*;

use crate::state::session::Session;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>{move || format!("Welcome, {}", session.get().display_name())}</h1>
                <a class="btn" href="/settings">
                    "Account Settings"
                </a>
            </header>

            <section class="dashboard-page__account">
                {move || {
                    session
                        .get()
                        .user
                        .map(|user| {
                            view! {
                                <div class="account-card">
                                    <p class="account-card__email">{user.email.clone()}</p>
                                    <p class="account-card__status">
                                        {if user.is_verified {
                                            "Email verified"
                                        } else {
                                            "Email not verified yet"
                                        }}
                                    </p>
                                    <p class="account-card__since">
                                        {format!("Member since {}", user.created_at)}
                                    </p>
                                </div>
                            }
                        })
                }}
            </section>
        </div>
    }
}
