//! # Gateway Layer
//!
//! Read-only access to the Asana API behind the [`Gateway`] trait.
//!
//! ## Implementations
//!
//! - [`http::HttpGateway`]: Production client (blocking HTTP, bearer token, paginated)
//! - [`memory::MemoryGateway`]: Canned data for testing, with per-call failure injection
//!
//! Every list operation yields the full collection; the HTTP implementation walks the
//! API's pages lazily and stops at the first failing page. A failure is an
//! [`crate::error::TrackerError::Api`] carrying the upstream message. Callers decide
//! whether it is fatal: only the who-am-I check ([`Gateway::me`]) is.

use crate::error::Result;
use crate::model::{Project, StatusUpdate, Task, User, Workspace};

pub mod http;
pub mod memory;

pub const WORKSPACE_FIELDS: &[&str] = &["name"];

pub const PROJECT_FIELDS: &[&str] = &[
    "name",
    "completed",
    "completed_at",
    "owner",
    "team",
    "notes",
    "color",
    "created_at",
    "due_date",
    "start_on",
    "archived",
];

pub const TASK_FIELDS: &[&str] = &["completed", "completed_at", "name"];

pub const STATUS_UPDATE_FIELDS: &[&str] = &["text", "color", "created_at"];

pub trait Gateway {
    /// The authenticated user; doubles as the connectivity check.
    fn me(&self) -> Result<User>;

    fn list_workspaces(&self) -> Result<Vec<Workspace>>;

    fn list_projects(&self, workspace_gid: &str, fields: &[&str]) -> Result<Vec<Project>>;

    fn list_tasks(&self, project_gid: &str, fields: &[&str]) -> Result<Vec<Task>>;

    fn list_status_updates(&self, project_gid: &str, fields: &[&str])
        -> Result<Vec<StatusUpdate>>;
}
