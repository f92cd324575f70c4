//! Top navigation bar with auth-aware links and the theme toggle.

use leptos::prelude::*;

use crate::state::controller::AppControllerHandle;
use crate::state::session::Session;
use crate::util::theme;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let controller = expect_context::<AppControllerHandle>();

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let controller = controller.get_value();
            leptos::task::spawn_local(async move {
                controller.logout().await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &controller;
        }
    };

    view! {
        <header class="nav-bar">
            <a class="nav-bar__brand" href="/">
                "FolioForge"
            </a>
            <nav class="nav-bar__links">
                <button
                    class="nav-bar__theme"
                    title="Toggle theme"
                    on:click=move |_| {
                        theme::toggle();
                    }
                >
                    "Theme"
                </button>
                {move || {
                    if session.get().authenticated {
                        let on_logout = on_logout.clone();
                        view! {
                            <a class="nav-bar__initials" href="/settings" title="Account settings">
                                {session.get().initials()}
                            </a>
                            <button class="nav-bar__logout" on:click=on_logout>
                                "Log Out"
                            </button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <a href="/login">"Sign In"</a>
                            <a href="/register">"Sign Up"</a>
                        }
                            .into_any()
                    }
                }}
            </nav>
        </header>
    }
}
