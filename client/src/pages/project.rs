//! Project container page: toolbar, preview frame, editor panel, sidebar.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use uuid::Uuid;

use crate::components::editor_panel::EditorPanel;
use crate::components::preview_host::PreviewHost;
use crate::components::sidebar::Sidebar;
use crate::components::toolbar::Toolbar;
use crate::state::auth::AuthState;
use crate::state::project::{LoadStatus, ProjectState};
use crate::state::selection::SelectionState;
use crate::state::ui::UiState;

/// Project editor page.
///
/// Owns the fetch lifecycle and the selection invalidation rule: whenever the
/// project code is rebuilt, the tracked selection is dropped before the new
/// frame can announce anything.
#[component]
pub fn ProjectPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let project = expect_context::<RwSignal<ProjectState>>();
    let selection = expect_context::<RwSignal<SelectionState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();
    let params = use_params_map();

    let project_id = move || {
        params
            .read()
            .get("id")
            .and_then(|raw| Uuid::parse_str(&raw).ok())
    };

    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_none() {
            navigate("/login", NavigateOptions::default());
        }
    });

    // Fetch the project when the route's id changes.
    Effect::new(move || {
        let Some(id) = project_id() else {
            project.update(|p| p.fail("invalid project id"));
            return;
        };
        project.set(ProjectState::default());
        selection.set(SelectionState::default());
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_project(id).await {
                Ok(detail) => project.update(|p| p.apply_detail(detail)),
                Err(e) => {
                    leptos::logging::warn!("project fetch failed: {e}");
                    project.update(|p| p.fail(e));
                }
            }
        });
    });

    // Drop the selection whenever the preview document is rebuilt.
    Effect::new(move || {
        let rebuilds = project.get().rebuilds;
        selection.update(|s| {
            let _ = s.sync_rebuild(rebuilds);
        });
    });

    view! {
        <div class="project-page">
            {move || match project.get().load {
                LoadStatus::Loading => view! { <p class="project-page__loading">"Loading..."</p> }.into_any(),
                LoadStatus::Failed(_) => {
                    view! {
                        <p class="project-page__error">"Unable to load this project."</p>
                    }
                        .into_any()
                }
                LoadStatus::Ready => {
                    view! {
                        <Toolbar/>
                        <div
                            class="project-page__body"
                            class:project-page__body--sidebar=move || ui.get().sidebar_expanded
                        >
                            <Sidebar/>
                            <main class="project-page__main">
                                <PreviewHost editor_enabled=true/>
                                <EditorPanel/>
                            </main>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
