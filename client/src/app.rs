//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{home::HomePage, login::LoginPage, preview::PreviewPage, project::ProjectPage};
use crate::state::{
    auth::AuthState, project::ProjectState, selection::SelectionState, ui::UiState,
};

/// Handle for posting embedded-bound bridge messages into the preview frame.
///
/// `PreviewHost` attaches the live iframe element when it mounts; every other
/// component only sees this opaque sender via context. Messages cross the
/// frame boundary as plain objects, matching what the injected script reads.
#[derive(Clone, Default)]
pub struct FrameSender {
    #[cfg(feature = "hydrate")]
    frame: Option<web_sys::HtmlIFrameElement>,
}

impl FrameSender {
    /// Sender bound to a mounted iframe.
    #[cfg(feature = "hydrate")]
    pub fn attached(frame: web_sys::HtmlIFrameElement) -> Self {
        Self { frame: Some(frame) }
    }

    /// Post a message into the embedded document.
    ///
    /// Returns `false` when no frame is attached or the post fails.
    pub fn send(&self, message: &bridge::Message) -> bool {
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = self.frame.as_ref().and_then(|f| f.content_window()) else {
                return false;
            };
            // The injected script reads `event.data.type` directly, so the
            // payload goes over as an object rather than a JSON string.
            let Ok(value) = js_sys::JSON::parse(&bridge::encode_message(message)) else {
                return false;
            };
            window.post_message(&value, "*").is_ok()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = message;
            false
        }
    }

    /// Snapshot the live embedded document with instrumentation stripped.
    ///
    /// This is the save/export path: the live DOM may carry applied edits
    /// that the host's own copy of the code does not have yet.
    pub fn export_code(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let document = self.frame.as_ref()?.content_document()?;
            let html = document.document_element()?.outer_html();
            Some(preview::instrument::strip_html(&html))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Provide reactive state contexts for all child components.
    let auth = RwSignal::new(AuthState::default());
    let project = RwSignal::new(ProjectState::default());
    let selection = RwSignal::new(SelectionState::default());
    let ui = RwSignal::new(UiState::default());
    let sender = RwSignal::new(FrameSender::default());

    provide_context(auth);
    provide_context(project);
    provide_context(selection);
    provide_context(ui);
    provide_context(sender);

    // Initial session probe; pages hold their login redirect until this lands.
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_session().await;
        auth.update(|a| a.resolve(user));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/siteforge.css"/>
        <Title text="Siteforge"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("projects"), ParamSegment("id")) view=ProjectPage/>
                <Route path=(StaticSegment("preview"), ParamSegment("id")) view=PreviewPage/>
            </Routes>
        </Router>
    }
}
