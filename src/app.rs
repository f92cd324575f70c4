//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::nav_bar::NavBar;
use crate::net::api::HttpAuthGateway;
use crate::pages::{
    dashboard::DashboardPage, forgot_password::ForgotPasswordPage, home::HomePage,
    login::LoginPage, register::RegisterPage, reset_password::ResetPasswordPage,
    settings::SettingsPage,
};
use crate::state::controller::{AppController, AppControllerHandle, SessionController};
use crate::state::session::Session;
use crate::state::token::BrowserTokens;
use crate::util::guard::{RequireAuth, RequireGuest};
use crate::util::theme;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the single session signal and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Exactly one session per running app; everything else reads this signal.
    let session = RwSignal::new(Session::default());
    provide_context(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/folioforge.css"/>
        <Title text="FolioForge"/>

        <Router>
            <SessionProvider>
                <NavBar/>
                <main class="app-main">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route
                            path=StaticSegment("login")
                            view=|| view! { <RequireGuest><LoginPage/></RequireGuest> }
                        />
                        <Route
                            path=StaticSegment("register")
                            view=|| view! { <RequireGuest><RegisterPage/></RequireGuest> }
                        />
                        <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                        <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                        <Route
                            path=StaticSegment("dashboard")
                            view=|| view! { <RequireAuth><DashboardPage/></RequireAuth> }
                        />
                        <Route
                            path=StaticSegment("settings")
                            view=|| view! { <RequireAuth><SettingsPage/></RequireAuth> }
                        />
                    </Routes>
                </main>
            </SessionProvider>
        </Router>
    }
}

/// Builds the session controller (it needs the router's navigate handle),
/// provides it via context, applies the stored theme, and kicks off
/// bootstrap exactly once. Guards wait on `Session::initialized`, so routes
/// render only after bootstrap has settled the session.
#[component]
fn SessionProvider(children: Children) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    let tokens = Rc::new(BrowserTokens);
    let controller: AppController = SessionController::new(
        session,
        HttpAuthGateway::new(tokens.clone()),
        tokens,
        Rc::new(move |path: &str| navigate(path, NavigateOptions::default())),
    );
    provide_context::<AppControllerHandle>(StoredValue::new_local(controller.clone()));

    theme::init();

    #[cfg(feature = "hydrate")]
    {
        let controller = controller.clone();
        leptos::task::spawn_local(async move {
            controller.bootstrap().await;
        });
    }

    view! { {children()} }
}
