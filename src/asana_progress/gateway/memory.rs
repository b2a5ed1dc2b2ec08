//! In-memory [`Gateway`] with canned responses.
//!
//! Every call is recorded so tests can assert on the exact sequence of requests, and
//! any single call can be made to fail.

use super::Gateway;
use crate::error::{Result, TrackerError};
use crate::model::{Project, StatusUpdate, Task, User, Workspace};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// A request the gateway received, in call order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    Me,
    Workspaces,
    Projects(String),
    Tasks(String),
    StatusUpdates(String),
}

#[derive(Debug, Default)]
pub struct MemoryGateway {
    user: Option<User>,
    workspaces: Vec<Workspace>,
    projects: HashMap<String, Vec<Project>>,
    tasks: HashMap<String, Vec<Task>>,
    status_updates: HashMap<String, Vec<StatusUpdate>>,
    failures: HashSet<Call>,
    calls: RefCell<Vec<Call>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, gid: &str, name: &str) -> Self {
        self.user = Some(User {
            gid: gid.to_string(),
            name: Some(name.to_string()),
            email: None,
        });
        self
    }

    pub fn with_workspace(mut self, gid: &str, name: &str) -> Self {
        self.workspaces.push(Workspace {
            gid: gid.to_string(),
            name: Some(name.to_string()),
        });
        self
    }

    pub fn with_project(mut self, workspace_gid: &str, project: Project) -> Self {
        self.projects
            .entry(workspace_gid.to_string())
            .or_default()
            .push(project);
        self
    }

    /// Sets the task list of a project from `(total, completed)` counts.
    pub fn with_task_counts(mut self, project_gid: &str, total: usize, completed: usize) -> Self {
        let tasks = (0..total)
            .map(|i| Task {
                completed: i < completed,
            })
            .collect();
        self.tasks.insert(project_gid.to_string(), tasks);
        self
    }

    pub fn with_status_update(mut self, project_gid: &str, update: StatusUpdate) -> Self {
        self.status_updates
            .entry(project_gid.to_string())
            .or_default()
            .push(update);
        self
    }

    /// Makes the given call fail with an API error.
    pub fn failing(mut self, call: Call) -> Self {
        self.failures.insert(call);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        let failed = self.failures.contains(&call);
        self.calls.borrow_mut().push(call.clone());
        if failed {
            return Err(TrackerError::api_status(500, format!("{:?} failed", call)));
        }
        Ok(())
    }
}

impl Gateway for MemoryGateway {
    fn me(&self) -> Result<User> {
        self.record(Call::Me)?;
        self.user
            .clone()
            .ok_or_else(|| TrackerError::api_status(401, "Not Authorized"))
    }

    fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        self.record(Call::Workspaces)?;
        Ok(self.workspaces.clone())
    }

    fn list_projects(&self, workspace_gid: &str, _fields: &[&str]) -> Result<Vec<Project>> {
        self.record(Call::Projects(workspace_gid.to_string()))?;
        Ok(self.projects.get(workspace_gid).cloned().unwrap_or_default())
    }

    fn list_tasks(&self, project_gid: &str, _fields: &[&str]) -> Result<Vec<Task>> {
        self.record(Call::Tasks(project_gid.to_string()))?;
        Ok(self.tasks.get(project_gid).cloned().unwrap_or_default())
    }

    fn list_status_updates(
        &self,
        project_gid: &str,
        _fields: &[&str],
    ) -> Result<Vec<StatusUpdate>> {
        self.record(Call::StatusUpdates(project_gid.to_string()))?;
        Ok(self
            .status_updates
            .get(project_gid)
            .cloned()
            .unwrap_or_default())
    }
}

/// Project fixture with only the fields the tracker reads.
pub fn project(gid: &str, name: &str) -> Project {
    Project {
        gid: gid.to_string(),
        name: Some(name.to_string()),
        completed: false,
        archived: false,
        color: None,
    }
}
