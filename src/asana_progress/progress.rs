//! # Progress Calculation
//!
//! Turns one project's task list and status feed into a [`ProjectProgress`].
//!
//! ## Completion
//!
//! `percentage = completed / total * 100`, or `0` for a project without tasks. The
//! completed count is a subset count, so `completed_tasks <= total_tasks` holds by
//! construction and the percentage stays within `0..=100`.
//!
//! ## Status Label
//!
//! Resolved in priority order:
//!
//! 1. The most recent status update (greatest `created_at`). Its color maps to a label;
//!    without a color, its free text is scanned for keywords; an unknown color reads
//!    as `"on hold"`.
//! 2. Without status updates, the project flags: `"completed"`, `"Archived"`, or
//!    `"Active"`.
//!
//! The label casing is part of the observable output and differs between sources;
//! the renderer styles labels case-insensitively.

use crate::model::{ProjectProgress, StatusUpdate, Task, WorkspaceProject};
use chrono::DateTime;
use std::cmp::Ordering;

pub const ON_TRACK: &str = "On track";
pub const ON_HOLD: &str = "On hold";
pub const AT_RISK: &str = "At risk";
pub const OFF_TRACK: &str = "Off track";
pub const COMPLETED: &str = "Completed";
pub const NO_STATUS: &str = "No status";
pub const UNKNOWN_COLOR: &str = "on hold";

pub const FALLBACK_COMPLETED: &str = "completed";
pub const FALLBACK_ARCHIVED: &str = "Archived";
pub const FALLBACK_ACTIVE: &str = "Active";

pub const ERROR_STATUS: &str = "Error";
pub const ERROR_COLOR: &str = "red";

/// Keyword groups scanned in order; the first group with a hit wins.
const TEXT_KEYWORDS: &[(&[&str], &str)] = &[
    (&["hold", "pause", "wait"], ON_HOLD),
    (&["risk", "delay", "issue"], AT_RISK),
    (&["off track", "problem", "red"], OFF_TRACK),
    (&["track", "progress", "good"], ON_TRACK),
    (&["complete", "done"], COMPLETED),
];

pub fn completion_percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Builds the progress record for one project.
///
/// An empty `status_updates` slice (none exist, or fetching them failed) selects the
/// flag-based fallback label.
pub fn compute_progress(
    entry: &WorkspaceProject,
    tasks: &[Task],
    status_updates: &[StatusUpdate],
) -> ProjectProgress {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();

    ProjectProgress {
        name: entry.project.display_name().to_string(),
        workspace_gid: entry.workspace.gid.clone(),
        workspace_name: entry.workspace.display_name().to_string(),
        total_tasks: total,
        completed_tasks: completed,
        percentage: completion_percentage(completed, total),
        completed: entry.project.completed,
        archived: entry.project.archived,
        status: resolve_status_label(entry, status_updates),
        color: entry.project.color_hint().to_string(),
    }
}

/// The record used when a project's tasks could not be read.
pub fn degraded_progress(entry: &WorkspaceProject) -> ProjectProgress {
    ProjectProgress {
        name: entry.project.display_name().to_string(),
        workspace_gid: entry.workspace.gid.clone(),
        workspace_name: entry.workspace.display_name().to_string(),
        total_tasks: 0,
        completed_tasks: 0,
        percentage: 0.0,
        completed: entry.project.completed,
        archived: entry.project.archived,
        status: ERROR_STATUS.to_string(),
        color: ERROR_COLOR.to_string(),
    }
}

pub fn resolve_status_label(entry: &WorkspaceProject, status_updates: &[StatusUpdate]) -> String {
    match latest_status_update(status_updates) {
        Some(update) => label_for_update(update).to_string(),
        None if entry.project.completed => FALLBACK_COMPLETED.to_string(),
        None if entry.project.archived => FALLBACK_ARCHIVED.to_string(),
        None => FALLBACK_ACTIVE.to_string(),
    }
}

/// Returns the most recently created update. On equal timestamps the first one seen
/// is kept.
pub fn latest_status_update(updates: &[StatusUpdate]) -> Option<&StatusUpdate> {
    updates.iter().fold(None, |best, candidate| match best {
        Some(current) if compare_created(candidate, current) != Ordering::Greater => {
            Some(current)
        }
        _ => Some(candidate),
    })
}

/// Compares creation times as instants when both parse as RFC 3339, else as strings.
fn compare_created(a: &StatusUpdate, b: &StatusUpdate) -> Ordering {
    let a_raw = a.created_at.as_deref().unwrap_or_default();
    let b_raw = b.created_at.as_deref().unwrap_or_default();

    match (
        DateTime::parse_from_rfc3339(a_raw),
        DateTime::parse_from_rfc3339(b_raw),
    ) {
        (Ok(a_time), Ok(b_time)) => a_time.cmp(&b_time),
        _ => a_raw.cmp(b_raw),
    }
}

fn label_for_update(update: &StatusUpdate) -> &'static str {
    let color = update
        .color
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    match color {
        Some(color) => label_for_color(color),
        None => label_for_text(update.text.as_deref().unwrap_or_default()),
    }
}

pub fn label_for_color(color: &str) -> &'static str {
    match color.to_ascii_lowercase().as_str() {
        "green" => ON_TRACK,
        "blue" => ON_HOLD,
        "yellow" => AT_RISK,
        "red" => OFF_TRACK,
        "complete" => COMPLETED,
        _ => UNKNOWN_COLOR,
    }
}

pub fn label_for_text(text: &str) -> &'static str {
    let text = text.to_lowercase();
    TEXT_KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| text.contains(w)))
        .map(|(_, label)| *label)
        .unwrap_or(NO_STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, Workspace};

    fn entry(completed: bool, archived: bool) -> WorkspaceProject {
        WorkspaceProject {
            workspace: Workspace {
                gid: "w1".into(),
                name: Some("Engineering".into()),
            },
            project: Project {
                gid: "p1".into(),
                name: Some("Roadmap".into()),
                completed,
                archived,
                color: Some("dark-blue".into()),
            },
        }
    }

    fn tasks(flags: &[bool]) -> Vec<Task> {
        flags.iter().map(|&completed| Task { completed }).collect()
    }

    fn update(color: Option<&str>, text: Option<&str>, created_at: &str) -> StatusUpdate {
        StatusUpdate {
            text: text.map(String::from),
            color: color.map(String::from),
            created_at: Some(created_at.to_string()),
        }
    }

    #[test]
    fn test_half_done_project() {
        let progress = compute_progress(
            &entry(false, false),
            &tasks(&[true, true, false, false]),
            &[],
        );
        assert_eq!(progress.total_tasks, 4);
        assert_eq!(progress.completed_tasks, 2);
        assert_eq!(progress.percentage, 50.0);
        assert_eq!(progress.name, "Roadmap");
        assert_eq!(progress.workspace_gid, "w1");
        assert_eq!(progress.workspace_name, "Engineering");
        assert_eq!(progress.color, "dark-blue");
    }

    #[test]
    fn test_no_tasks_is_zero_percent() {
        let progress = compute_progress(&entry(false, false), &[], &[]);
        assert_eq!(progress.total_tasks, 0);
        assert_eq!(progress.percentage, 0.0);
    }

    #[test]
    fn test_percentage_stays_in_range() {
        for total in 0..12 {
            for done in 0..=total {
                let pct = completion_percentage(done, total);
                assert!((0.0..=100.0).contains(&pct), "{done}/{total} -> {pct}");
            }
        }
        assert_eq!(completion_percentage(3, 3), 100.0);
    }

    #[test]
    fn test_most_recent_update_wins() {
        let updates = vec![
            update(Some("green"), None, "2023-01-01"),
            update(Some("red"), None, "2023-06-01"),
        ];
        assert_eq!(resolve_status_label(&entry(false, false), &updates), OFF_TRACK);
    }

    #[test]
    fn test_rfc3339_timestamps_compare_as_instants() {
        // Lexicographically the first is larger, but it is an hour earlier in UTC.
        let updates = vec![
            update(Some("green"), None, "2024-03-01T10:30:00+02:00"),
            update(Some("yellow"), None, "2024-03-01T09:30:00Z"),
        ];
        assert_eq!(resolve_status_label(&entry(false, false), &updates), AT_RISK);
    }

    #[test]
    fn test_equal_timestamps_keep_first() {
        let updates = vec![
            update(Some("blue"), None, "2024-01-01T00:00:00Z"),
            update(Some("red"), None, "2024-01-01T00:00:00Z"),
        ];
        let latest = latest_status_update(&updates).unwrap();
        assert_eq!(latest.color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(label_for_color("green"), ON_TRACK);
        assert_eq!(label_for_color("blue"), ON_HOLD);
        assert_eq!(label_for_color("yellow"), AT_RISK);
        assert_eq!(label_for_color("red"), OFF_TRACK);
        assert_eq!(label_for_color("complete"), COMPLETED);
        assert_eq!(label_for_color("purple"), "on hold");
    }

    #[test]
    fn test_text_keywords_in_priority_order() {
        assert_eq!(label_for_text("Paused until Q3"), ON_HOLD);
        // "hold" outranks "risk"
        assert_eq!(label_for_text("On hold: risk of slipping"), ON_HOLD);
        assert_eq!(label_for_text("Vendor DELAY"), AT_RISK);
        assert_eq!(label_for_text("We are off track"), OFF_TRACK);
        assert_eq!(label_for_text("Some problem with infra"), OFF_TRACK);
        assert_eq!(label_for_text("Looking good"), ON_TRACK);
        assert_eq!(label_for_text("All done"), COMPLETED);
        assert_eq!(label_for_text(""), NO_STATUS);
    }

    #[test]
    fn test_missing_or_blank_color_uses_text() {
        let updates = vec![update(None, Some("Making progress"), "2024-01-01")];
        assert_eq!(resolve_status_label(&entry(false, false), &updates), ON_TRACK);

        let updates = vec![update(Some("  "), Some("waiting on legal"), "2024-01-01")];
        assert_eq!(resolve_status_label(&entry(false, false), &updates), ON_HOLD);

        let updates = vec![update(None, None, "2024-01-01")];
        assert_eq!(resolve_status_label(&entry(false, false), &updates), NO_STATUS);
    }

    #[test]
    fn test_fallback_labels() {
        assert_eq!(resolve_status_label(&entry(true, false), &[]), "completed");
        assert_eq!(resolve_status_label(&entry(true, true), &[]), "completed");
        assert_eq!(resolve_status_label(&entry(false, true), &[]), "Archived");
        assert_eq!(resolve_status_label(&entry(false, false), &[]), "Active");
    }

    #[test]
    fn test_degraded_record() {
        let progress = degraded_progress(&entry(false, true));
        assert_eq!(progress.total_tasks, 0);
        assert_eq!(progress.completed_tasks, 0);
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.status, "Error");
        assert_eq!(progress.color, "red");
        assert!(progress.archived);
    }
}
