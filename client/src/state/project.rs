#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use uuid::Uuid;

use crate::net::types::{ConversationMessage, ProjectDetail, ProjectVersion};

/// State for the currently open project.
///
/// `rebuilds` counts code replacements. The preview container regenerates its
/// frame whenever it changes, and any active selection is invalidated at the
/// same time since locators from the previous document no longer apply.
#[derive(Clone, Debug, Default)]
pub struct ProjectState {
    pub project_id: Option<Uuid>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub is_published: bool,
    pub load: LoadStatus,
    pub is_generating: bool,
    pub conversation: Vec<ConversationMessage>,
    pub versions: Vec<ProjectVersion>,
    pub rebuilds: u64,
}

/// Lifecycle of the project fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl ProjectState {
    /// Replace the loaded project with a freshly fetched detail payload.
    pub fn apply_detail(&mut self, detail: ProjectDetail) {
        self.project_id = Some(detail.id);
        self.name = Some(detail.name);
        self.code = detail.current_code;
        // A project with no code yet is still being generated.
        self.is_generating = self.code.is_none();
        self.is_published = detail.is_published;
        self.conversation = detail.conversation;
        self.versions = detail.versions;
        self.load = LoadStatus::Ready;
        self.rebuilds += 1;
    }

    /// Install new page code, counting the rebuild.
    pub fn set_code(&mut self, code: String) {
        self.code = Some(code);
        self.rebuilds += 1;
    }

    /// Mark the fetch as failed.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.load = LoadStatus::Failed(message.into());
    }
}
