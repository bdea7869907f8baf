//! Public read-only preview of a published project.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use uuid::Uuid;

/// Read-only preview page.
///
/// Renders the exported (instrumentation-free) HTML for a project. Works for
/// anonymous visitors when the project is published; the export route
/// enforces access.
#[component]
pub fn PreviewPage() -> impl IntoView {
    let params = use_params_map();

    let project_id = move || {
        params
            .read()
            .get("id")
            .and_then(|raw| Uuid::parse_str(&raw).ok())
    };

    let export = LocalResource::new(move || {
        let id = project_id();
        async move {
            match id {
                Some(id) => crate::net::api::fetch_export(id).await,
                None => Err("invalid project id".to_owned()),
            }
        }
    });

    view! {
        <div class="preview-page">
            <Suspense fallback=move || view! { <p>"Loading preview..."</p> }>
                {move || {
                    export
                        .get()
                        .map(|result| match result {
                            Ok(html) => {
                                view! {
                                    <iframe
                                        class="preview-page__frame"
                                        sandbox="allow-scripts"
                                        srcdoc=html
                                    ></iframe>
                                }
                                    .into_any()
                            }
                            Err(message) => {
                                view! { <p class="preview-page__error">{message}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
