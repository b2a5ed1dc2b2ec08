//! # Tracker Facade
//!
//! The one entry point the CLI drives. A run is:
//!
//! ```text
//! check_connectivity  ->  collect_projects  ->  compute_all  ->  (CLI renders)
//!      fatal               per-workspace          per-project
//!                          failures skipped       failures degraded
//! ```
//!
//! The tracker never prints. Each phase returns its data together with the
//! [`Message`]s the user should see, and the CLI decides how to present them.

use crate::error::{Result, TrackerError};
use crate::gateway::{Gateway, PROJECT_FIELDS, STATUS_UPDATE_FIELDS, TASK_FIELDS};
use crate::message::Message;
use crate::model::{ProjectProgress, StatusUpdate, User, WorkspaceProject};
use crate::progress;
use tracing::{debug, info, warn};

/// Projects gathered across every readable workspace.
#[derive(Debug, Default)]
pub struct CollectedProjects {
    pub projects: Vec<WorkspaceProject>,
    pub messages: Vec<Message>,
}

/// One progress record per collected project, in collection order.
#[derive(Debug, Default)]
pub struct ComputedProgress {
    pub records: Vec<ProjectProgress>,
    pub messages: Vec<Message>,
}

pub struct Tracker<G: Gateway> {
    gateway: G,
}

impl<G: Gateway> Tracker<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Authenticated who-am-I call. Any failure here ends the run.
    pub fn check_connectivity(&self) -> Result<User> {
        info!("checking connectivity");
        self.gateway.me().map_err(|e| match e {
            TrackerError::Api { message, .. } => TrackerError::Connectivity(message),
            other => other,
        })
    }

    /// Enumerates workspaces, then the projects of each one, tagging every project
    /// with the workspace it came from.
    pub fn collect_projects(&self) -> CollectedProjects {
        let mut collected = CollectedProjects::default();
        collected
            .messages
            .push(Message::info("Fetching projects..."));

        let workspaces = match self.gateway.list_workspaces() {
            Ok(workspaces) => workspaces,
            Err(e) => {
                warn!(error = %e, "could not list workspaces");
                collected
                    .messages
                    .push(Message::error(format!("Error fetching workspaces: {}", e)));
                return collected;
            }
        };

        for workspace in workspaces {
            collected.messages.push(Message::info(format!(
                "Scanning workspace: {}",
                workspace.display_name()
            )));

            match self.gateway.list_projects(&workspace.gid, PROJECT_FIELDS) {
                Ok(projects) => {
                    debug!(workspace = %workspace.gid, count = projects.len(), "projects listed");
                    collected
                        .projects
                        .extend(projects.into_iter().map(|project| WorkspaceProject {
                            workspace: workspace.clone(),
                            project,
                        }));
                }
                Err(e) => {
                    warn!(workspace = %workspace.gid, error = %e, "could not list projects");
                    collected.messages.push(Message::error(format!(
                        "Error fetching projects for workspace {}: {}",
                        workspace.display_name(),
                        e
                    )));
                }
            }
        }

        collected.messages.push(Message::success(format!(
            "Found {} projects",
            collected.projects.len()
        )));
        collected
    }

    /// Progress for a single project.
    ///
    /// A task listing failure yields the degraded record plus an error message. A
    /// status listing failure only drops the status updates, so the flag-based label
    /// applies.
    pub fn compute_progress(&self, entry: &WorkspaceProject) -> (ProjectProgress, Option<Message>) {
        let project = &entry.project;

        let tasks = match self.gateway.list_tasks(&project.gid, TASK_FIELDS) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(project = %project.gid, error = %e, "could not list tasks");
                let message = Message::error(format!(
                    "Error calculating progress for project {}: {}",
                    project.display_name(),
                    e
                ));
                return (progress::degraded_progress(entry), Some(message));
            }
        };

        let updates: Vec<StatusUpdate> = self
            .gateway
            .list_status_updates(&project.gid, STATUS_UPDATE_FIELDS)
            .unwrap_or_else(|e| {
                warn!(project = %project.gid, error = %e, "could not list status updates");
                Vec::new()
            });

        (progress::compute_progress(entry, &tasks, &updates), None)
    }

    /// Computes every project in order. `on_progress(done, total)` runs before each
    /// project with the 1-based index of the project about to be processed.
    pub fn compute_all<F>(&self, projects: &[WorkspaceProject], mut on_progress: F) -> ComputedProgress
    where
        F: FnMut(usize, usize),
    {
        info!(count = projects.len(), "computing progress");
        let total = projects.len();
        let mut computed = ComputedProgress::default();

        for (index, entry) in projects.iter().enumerate() {
            on_progress(index + 1, total);
            let (record, message) = self.compute_progress(entry);
            computed.records.push(record);
            computed.messages.extend(message);
        }

        computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::{project, Call, MemoryGateway};
    use crate::message::MessageLevel;
    use crate::progress::{ERROR_STATUS, FALLBACK_ACTIVE, OFF_TRACK};

    fn two_workspace_gateway() -> MemoryGateway {
        MemoryGateway::new()
            .with_user("u1", "Ada")
            .with_workspace("w1", "Acme")
            .with_workspace("w2", "Side")
            .with_project("w1", project("p1", "Launch"))
            .with_project("w1", project("p2", "Docs"))
            .with_project("w2", project("p3", "Garden"))
            .with_task_counts("p1", 4, 2)
            .with_task_counts("p2", 2, 2)
            .with_task_counts("p3", 0, 0)
    }

    fn contents(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.content.as_str()).collect()
    }

    #[test]
    fn test_connectivity_returns_user() {
        let tracker = Tracker::new(two_workspace_gateway());
        assert_eq!(tracker.check_connectivity().unwrap().display_name(), "Ada");
    }

    #[test]
    fn test_connectivity_failure_is_fatal_error() {
        let tracker = Tracker::new(MemoryGateway::new());
        let err = tracker.check_connectivity().unwrap_err();
        match err {
            TrackerError::Connectivity(message) => assert_eq!(message, "Not Authorized"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_collect_tags_projects_with_workspace() {
        let tracker = Tracker::new(two_workspace_gateway());
        let collected = tracker.collect_projects();

        let tagged: Vec<(&str, &str)> = collected
            .projects
            .iter()
            .map(|e| (e.workspace.gid.as_str(), e.project.gid.as_str()))
            .collect();
        assert_eq!(tagged, [("w1", "p1"), ("w1", "p2"), ("w2", "p3")]);

        assert_eq!(
            contents(&collected.messages),
            [
                "Fetching projects...",
                "Scanning workspace: Acme",
                "Scanning workspace: Side",
                "Found 3 projects",
            ]
        );
    }

    #[test]
    fn test_failing_workspace_is_skipped() {
        let gw = two_workspace_gateway().failing(Call::Projects("w1".into()));
        let tracker = Tracker::new(gw);
        let collected = tracker.collect_projects();

        assert_eq!(collected.projects.len(), 1);
        assert_eq!(collected.projects[0].project.gid, "p3");
        assert!(collected
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Error && m.content.contains("Acme")));
    }

    #[test]
    fn test_workspace_listing_failure_yields_no_projects() {
        let gw = two_workspace_gateway().failing(Call::Workspaces);
        let tracker = Tracker::new(gw);
        let collected = tracker.collect_projects();

        assert!(collected.projects.is_empty());
        assert_eq!(collected.messages.last().unwrap().level, MessageLevel::Error);
        assert!(!tracker
            .gateway
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Projects(_))));
    }

    #[test]
    fn test_compute_all_in_collection_order() {
        let tracker = Tracker::new(two_workspace_gateway());
        let collected = tracker.collect_projects();

        let mut ticks = Vec::new();
        let computed = tracker.compute_all(&collected.projects, |done, total| {
            ticks.push((done, total))
        });

        assert_eq!(ticks, [(1, 3), (2, 3), (3, 3)]);
        let summary: Vec<(&str, usize, usize, f64)> = computed
            .records
            .iter()
            .map(|r| {
                (
                    r.name.as_str(),
                    r.total_tasks,
                    r.completed_tasks,
                    r.percentage,
                )
            })
            .collect();
        assert_eq!(
            summary,
            [
                ("Launch", 4, 2, 50.0),
                ("Docs", 2, 2, 100.0),
                ("Garden", 0, 0, 0.0)
            ]
        );
        assert!(computed.messages.is_empty());
    }

    #[test]
    fn test_task_failure_degrades_only_that_project() {
        let gw = two_workspace_gateway().failing(Call::Tasks("p2".into()));
        let tracker = Tracker::new(gw);
        let collected = tracker.collect_projects();
        let computed = tracker.compute_all(&collected.projects, |_, _| {});

        assert_eq!(computed.records.len(), 3);
        assert_eq!(computed.records[0].percentage, 50.0);
        assert_eq!(computed.records[1].status, ERROR_STATUS);
        assert_eq!(computed.records[1].total_tasks, 0);
        assert_eq!(computed.records[2].status, FALLBACK_ACTIVE);

        assert_eq!(computed.messages.len(), 1);
        assert!(computed.messages[0]
            .content
            .starts_with("Error calculating progress for project Docs"));
        // status updates are not requested for a degraded project
        assert!(!tracker
            .gateway
            .calls()
            .contains(&Call::StatusUpdates("p2".into())));
    }

    #[test]
    fn test_status_failure_falls_back_to_flags() {
        let gw = two_workspace_gateway()
            .with_status_update(
                "p1",
                StatusUpdate {
                    text: None,
                    color: Some("red".into()),
                    created_at: Some("2024-03-01T00:00:00Z".into()),
                },
            )
            .failing(Call::StatusUpdates("p2".into()));
        let tracker = Tracker::new(gw);
        let collected = tracker.collect_projects();
        let computed = tracker.compute_all(&collected.projects, |_, _| {});

        assert_eq!(computed.records[0].status, OFF_TRACK);
        assert_eq!(computed.records[1].status, FALLBACK_ACTIVE);
        assert_eq!(computed.records[1].percentage, 100.0);
        assert!(computed.messages.is_empty());
    }
}
