//! Login page with email/password sign-in and sign-up.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// Login page delegating to the `/api/auth/*` credential endpoints.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let signing_up = RwSignal::new(false);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(None);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result = if signing_up.get_untracked() {
                crate::net::api::sign_up(
                    &name.get_untracked(),
                    &email.get_untracked(),
                    &password.get_untracked(),
                )
                .await
            } else {
                crate::net::api::sign_in(&email.get_untracked(), &password.get_untracked()).await
            };
            busy.set(false);
            match result {
                Ok(user) => {
                    auth.update(|a| a.resolve(Some(user)));
                    navigate("/", NavigateOptions::default());
                }
                Err(message) => error.set(Some(message)),
            }
        });
    };

    view! {
        <div class="login-page">
            <h1>"Siteforge"</h1>
            <p>"Describe a site. Click anything to edit it."</p>

            <form class="login-page__form" on:submit=on_submit>
                {move || {
                    signing_up
                        .get()
                        .then(|| {
                            view! {
                                <input
                                    type="text"
                                    placeholder="Name"
                                    prop:value=move || name.get()
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                />
                            }
                        })
                }}
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />

                {move || {
                    error.get().map(|message| view! { <p class="login-page__error">{message}</p> })
                }}

                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if signing_up.get() { "Create account" } else { "Sign in" }}
                </button>
            </form>

            <button
                class="login-page__switch"
                on:click=move |_| signing_up.update(|v| *v = !*v)
            >
                {move || {
                    if signing_up.get() {
                        "Have an account? Sign in"
                    } else {
                        "New here? Create an account"
                    }
                }}
            </button>
        </div>
    }
}
