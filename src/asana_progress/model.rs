//! # Data Model
//!
//! Two kinds of records live here:
//!
//! - **Wire records** ([`Workspace`], [`Project`], [`Task`], [`StatusUpdate`], [`User`])
//!   deserialized from the Asana API. They exist only for the duration of one run and
//!   are never mutated after fetch.
//! - **Derived records** ([`ProjectProgress`]) built once per project by
//!   [`crate::progress`] and consumed by the renderer.
//!
//! Every wire field the tool does not strictly need is optional with a default, so a
//! sparse `opt_fields` projection never fails to deserialize.

use serde::Deserialize;

pub const UNKNOWN_WORKSPACE: &str = "Unknown Workspace";
pub const UNNAMED_PROJECT: &str = "Unnamed Project";
pub const DEFAULT_PROJECT_COLOR: &str = "light-blue";

/// The authenticated user, as returned by the who-am-I call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub gid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.gid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workspace {
    pub gid: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Workspace {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_WORKSPACE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub gid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub color: Option<String>,
}

impl Project {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_PROJECT)
    }

    pub fn color_hint(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_PROJECT_COLOR)
    }
}

/// A task only matters for its completion flag; its identifier is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A project tagged with the workspace it was enumerated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceProject {
    pub workspace: Workspace,
    pub project: Project,
}

/// Per-project progress record, created once per run and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectProgress {
    pub name: String,
    /// Grouping key; two workspaces may share a display name.
    pub workspace_gid: String,
    pub workspace_name: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Completion in percent, `0.0..=100.0`.
    pub percentage: f64,
    pub completed: bool,
    pub archived: bool,
    pub status: String,
    pub color: String,
}

impl ProjectProgress {
    pub fn is_active(&self) -> bool {
        !self.completed && !self.archived
    }
}
