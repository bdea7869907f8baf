//! Home page listing the caller's projects.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::project_card::ProjectCard;
use crate::net::types::ProjectSummary;
use crate::state::auth::AuthState;

/// What the project list area should show once the fetch settles.
#[derive(Debug, PartialEq, Eq)]
enum ListView {
    Empty,
    Items(Vec<ProjectSummary>),
    Failed(String),
}

/// Fold a settled fetch into the view to render.
fn list_view(result: Result<Vec<ProjectSummary>, String>) -> ListView {
    match result {
        Ok(list) if list.is_empty() => ListView::Empty,
        Ok(list) => ListView::Items(list),
        Err(message) => ListView::Failed(message),
    }
}

/// Home page showing the project list.
/// Redirects to `/login` once the session probe confirms the caller is
/// anonymous.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_none() {
            navigate("/login", NavigateOptions::default());
        }
    });

    let projects = LocalResource::new(|| crate::net::api::fetch_projects());

    let on_sign_out = move |_| {
        leptos::task::spawn_local(async move {
            crate::net::api::sign_out().await;
            auth.update(|a| a.resolve(None));
        });
    };

    view! {
        <div class="home-page">
            <header class="home-page__header">
                <h1>"Your sites"</h1>
                <button class="btn btn--ghost" on:click=on_sign_out>
                    "Sign out"
                </button>
            </header>

            <Suspense fallback=move || view! { <p>"Loading projects..."</p> }>
                {move || {
                    projects
                        .get()
                        .map(|result| match list_view(result) {
                            ListView::Empty => {
                                view! {
                                    <p class="home-page__empty">"No projects yet."</p>
                                }
                                    .into_any()
                            }
                            ListView::Failed(message) => {
                                view! {
                                    <p class="home-page__error">
                                        "Unable to load your projects: " {message}
                                    </p>
                                }
                                    .into_any()
                            }
                            ListView::Items(list) => {
                                view! {
                                    <div class="home-page__cards">
                                        {list
                                            .into_iter()
                                            .map(|p| {
                                                view! {
                                                    <ProjectCard
                                                        id=p.id
                                                        name=p.name
                                                        is_published=p.is_published
                                                    />
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
