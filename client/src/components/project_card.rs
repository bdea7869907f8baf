//! Reusable card component for project list items on the home page.

use leptos::prelude::*;
use uuid::Uuid;

/// A clickable card representing a project in the home list.
#[component]
pub fn ProjectCard(id: Uuid, name: String, is_published: bool) -> impl IntoView {
    let href = format!("/projects/{id}");

    view! {
        <a class="project-card" href=href>
            <span class="project-card__name">{name}</span>
            {is_published
                .then(|| view! { <span class="project-card__badge">"Published"</span> })}
        </a>
    }
}
