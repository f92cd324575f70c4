//! Public landing page.

use leptos::prelude::*;

use crate::state::session::Session;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    view! {
        <div class="home-page">
            <section class="home-hero">
                <h1>"FolioForge"</h1>
                <p class="home-hero__tagline">
                    "Build a structured profile once, shape it into a resume whenever you need one."
                </p>
                <div class="home-hero__actions">
                    <Show
                        when=move || session.get().authenticated
                        fallback=|| {
                            view! {
                                <a class="btn btn--primary" href="/register">
                                    "Get Started"
                                </a>
                                <a class="btn" href="/login">
                                    "Sign In"
                                </a>
                            }
                        }
                    >
                        <a class="btn btn--primary" href="/dashboard">
                            "Go to Dashboard"
                        </a>
                    </Show>
                </div>
            </section>
        </div>
    }
}
