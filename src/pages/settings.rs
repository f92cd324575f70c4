//! Account settings: profile details, password change, and account deletion.

use leptos::prelude::*;

use crate::net::types::{ChangePasswordRequest, ProfileUpdate};
use crate::state::controller::use_controller;
use crate::state::session::Session;
use crate::util::validate::{passwords_match, validate_password};

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <div class="settings-page">
            <h1>"Account Settings"</h1>
            <ProfileSection/>
            <PasswordSection/>
            <DangerSection/>
        </div>
    }
}

/// First/last name update form, prefilled from the cached profile.
#[component]
fn ProfileSection() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let controller = use_controller();

    let current = session.get_untracked();
    let first_name = RwSignal::new(
        current
            .user
            .as_ref()
            .map(|u| u.first_name.clone())
            .unwrap_or_default(),
    );
    let last_name = RwSignal::new(
        current
            .user
            .as_ref()
            .map(|u| u.last_name.clone())
            .unwrap_or_default(),
    );
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let update = ProfileUpdate {
            first_name: Some(first_name.get().trim().to_owned()),
            last_name: Some(last_name.get().trim().to_owned()),
            ..ProfileUpdate::default()
        };
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                match controller.update_profile(&update).await {
                    Ok(()) => info.set("Profile updated.".to_owned()),
                    Err(err) => info.set(err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&controller, &update);
        }
    };

    view! {
        <section class="settings-section">
            <h2>"Profile"</h2>
            <form class="settings-form" on:submit=on_submit>
                <label class="settings-form__label">
                    "First name"
                    <input
                        class="auth-input"
                        type="text"
                        prop:value=move || first_name.get()
                        on:input=move |ev| first_name.set(event_target_value(&ev))
                    />
                </label>
                <label class="settings-form__label">
                    "Last name"
                    <input
                        class="auth-input"
                        type="text"
                        prop:value=move || last_name.get()
                        on:input=move |ev| last_name.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || session.get().loading>
                    "Save Changes"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}

/// Change-password form; leaves the session alone on success.
#[component]
fn PasswordSection() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let controller = use_controller();

    let current_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let new_value = new_password.get();
        let validation = validate_password(&new_value);
        if !validation.is_valid {
            info.set(validation.errors.join(" "));
            return;
        }
        if !passwords_match(&new_value, &confirm.get()) {
            info.set("New passwords do not match.".to_owned());
            return;
        }
        let request = ChangePasswordRequest {
            current_password: current_password.get(),
            new_password: new_value,
            confirm_new_password: confirm.get(),
        };
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                match controller.change_password(&request).await {
                    Ok(message) => {
                        info.set(message.message);
                        current_password.set(String::new());
                        new_password.set(String::new());
                        confirm.set(String::new());
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
        <section class="settings-section">
            <h2>"Password"</h2>
            <form class="settings-form" on:submit=on_submit>
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Current password"
                    prop:value=move || current_password.get()
                    on:input=move |ev| current_password.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="New password"
                    prop:value=move || new_password.get()
                    on:input=move |ev| new_password.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Confirm new password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || session.get().loading>
                    "Change Password"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}

/// Two-step account deletion.
#[component]
fn DangerSection() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let controller = use_controller();

    let armed = RwSignal::new(false);
    let info = RwSignal::new(String::new());

    let on_delete = move |_| {
        if !armed.get_untracked() {
            armed.set(true);
            return;
        }
        if session.get_untracked().loading {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                if let Err(err) = controller.delete_account().await {
                    info.set(err.to_string());
                    armed.set(false);
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &controller;
        }
    };

    view! {
        <section class="settings-section settings-section--danger">
            <h2>"Delete Account"</h2>
            <p>"This permanently removes your profile and all resume data."</p>
            <button class="btn btn--danger" on:click=on_delete disabled=move || session.get().loading>
                {move || {
                    if armed.get() {
                        "Click again to confirm deletion"
                    } else {
                        "Delete Account"
                    }
                }}
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-message settings-message--error">{move || info.get()}</p>
            </Show>
        </section>
    }
}
