//! Editor toolbar: project name, device switcher, and project actions.

use leptos::prelude::*;

use crate::app::FrameSender;
use crate::state::project::ProjectState;
use crate::state::ui::{Device, UiState};

/// Toolbar across the top of the project page.
#[component]
pub fn Toolbar() -> impl IntoView {
    let project = expect_context::<RwSignal<ProjectState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let sender = expect_context::<RwSignal<FrameSender>>();

    let saving = RwSignal::new(false);

    let on_save = move |_| {
        let Some(project_id) = project.get().project_id else {
            return;
        };
        // Snapshot the live frame so applied edits are what gets stored.
        let Some(code) = sender.get().export_code() else {
            return;
        };
        saving.set(true);
        leptos::task::spawn_local(async move {
            match crate::net::api::save_code(project_id, &code).await {
                Ok(()) => project.update(|p| p.set_code(code)),
                Err(e) => leptos::logging::warn!("save failed: {e}"),
            }
            saving.set(false);
        });
    };

    let on_publish = move |_| {
        let Some(project_id) = project.get().project_id else {
            return;
        };
        leptos::task::spawn_local(async move {
            match crate::net::api::toggle_publish(project_id).await {
                Ok(is_published) => project.update(|p| p.is_published = is_published),
                Err(e) => leptos::logging::warn!("publish failed: {e}"),
            }
        });
    };

    let on_download = move |_| {
        let Some(project_id) = project.get().project_id else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let url = format!("/api/projects/{project_id}/export");
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(&url);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = project_id;
    };

    let preview_href = move || {
        project
            .get()
            .project_id
            .map(|id| format!("/preview/{id}"))
            .unwrap_or_default()
    };

    let device_button = move |device: Device| {
        view! {
            <button
                class="toolbar__device"
                class:toolbar__device--active=move || ui.get().device == device
                on:click=move |_| ui.update(|u| u.device = device)
            >
                {device.label()}
            </button>
        }
    };

    view! {
        <header class="toolbar">
            <button
                class="toolbar__sidebar-toggle"
                on:click=move |_| ui.update(|u| u.sidebar_expanded = !u.sidebar_expanded)
            >
                {move || if ui.get().sidebar_expanded { "Hide chat" } else { "Show chat" }}
            </button>
            <span class="toolbar__name">
                {move || project.get().name.clone().unwrap_or_default()}
            </span>

            <div class="toolbar__devices">
                {device_button(Device::Phone)}
                {device_button(Device::Tablet)}
                {device_button(Device::Desktop)}
            </div>

            <div class="toolbar__actions">
                <button class="btn" on:click=on_save disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
                <a class="btn" href=preview_href target="_blank">
                    "Preview"
                </a>
                <button class="btn" on:click=on_download>
                    "Download"
                </button>
                <button class="btn btn--primary" on:click=on_publish>
                    {move || if project.get().is_published { "Unpublish" } else { "Publish" }}
                </button>
            </div>
        </header>
    }
}
