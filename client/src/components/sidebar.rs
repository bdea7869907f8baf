//! Sidebar with the build conversation transcript and version history.

use leptos::prelude::*;

use crate::net::types::ConversationMessage;
use crate::state::project::ProjectState;
use crate::util::markdown::render_markdown_html;

/// Sidebar tabs.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SidebarTab {
    Chat,
    Versions,
}

/// Sidebar showing the conversation transcript and saved versions.
///
/// Prompt submission only records the user's message; generation itself is
/// driven by an external collaborator that appends the assistant turns.
#[component]
pub fn Sidebar() -> impl IntoView {
    let project = expect_context::<RwSignal<ProjectState>>();

    let tab = RwSignal::new(SidebarTab::Chat);
    let input = RwSignal::new(String::new());

    let do_send = move || {
        let content = input.get();
        if content.trim().is_empty() {
            return;
        }
        project.update(|p| {
            p.conversation.push(ConversationMessage {
                id: uuid::Uuid::new_v4(),
                role: "user".to_owned(),
                content,
                created_at: 0,
            });
        });
        input.set(String::new());
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    view! {
        <aside class="sidebar">
            <nav class="sidebar__tabs">
                <button
                    class="sidebar__tab"
                    class:sidebar__tab--active=move || tab.get() == SidebarTab::Chat
                    on:click=move |_| tab.set(SidebarTab::Chat)
                >
                    "Chat"
                </button>
                <button
                    class="sidebar__tab"
                    class:sidebar__tab--active=move || tab.get() == SidebarTab::Versions
                    on:click=move |_| tab.set(SidebarTab::Versions)
                >
                    "Versions"
                </button>
            </nav>

            {move || match tab.get() {
                SidebarTab::Chat => {
                    view! {
                        <div class="sidebar__chat">
                            <div class="sidebar__messages">
                                {project
                                    .get()
                                    .conversation
                                    .iter()
                                    .map(render_message)
                                    .collect::<Vec<_>>()}
                            </div>
                            <textarea
                                class="sidebar__input"
                                placeholder="Describe a change..."
                                prop:value=move || input.get()
                                on:input=move |ev| input.set(event_target_value(&ev))
                                on:keydown=on_keydown
                            ></textarea>
                        </div>
                    }
                        .into_any()
                }
                SidebarTab::Versions => {
                    view! {
                        <ul class="sidebar__versions">
                            {project
                                .get()
                                .versions
                                .iter()
                                .map(|v| {
                                    view! {
                                        <li class="sidebar__version">
                                            <span class="sidebar__version-id">
                                                {v.id.to_string()[..8].to_owned()}
                                            </span>
                                            <span class="sidebar__version-size">
                                                {format!("{} bytes", v.code.len())}
                                            </span>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    }
                        .into_any()
                }
            }}
        </aside>
    }
}

fn render_message(message: &ConversationMessage) -> impl IntoView + use<> {
    let is_assistant = message.role == "assistant";
    let content = message.content.clone();

    view! {
        <div class="sidebar__message" class:sidebar__message--assistant=is_assistant>
            {if is_assistant {
                let rendered = render_markdown_html(&content);
                view! { <div class="sidebar__markdown" inner_html=rendered></div> }.into_any()
            } else {
                view! { <span>{content}</span> }.into_any()
            }}
        </div>
    }
}
