//! # Report Layout
//!
//! Presentation-independent pieces of the report: how records are grouped and
//! ordered, how a progress bar and a project name are laid out, which emphasis a
//! status label gets, and the aggregate summary. The CLI renderer turns these into
//! styled text.
//!
//! Groups are keyed by workspace identifier and appear in order of first appearance.
//! Within a group, records are ordered by percentage, highest first, with ties keeping
//! their input order.

use crate::model::ProjectProgress;
use crate::progress::completion_percentage;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const BAR_WIDTH: usize = 20;
pub const BAR_FILLED: char = '█';
pub const BAR_EMPTY: char = '░';
pub const NAME_WIDTH: usize = 35;
pub const ELLIPSIS: &str = "...";

/// Records of one workspace, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceGroup<'a> {
    pub workspace_gid: &'a str,
    pub workspace_name: &'a str,
    pub projects: Vec<&'a ProjectProgress>,
}

/// Groups records by workspace and sorts each group by percentage, descending.
pub fn group_by_workspace(records: &[ProjectProgress]) -> Vec<WorkspaceGroup<'_>> {
    let mut groups: Vec<WorkspaceGroup<'_>> = Vec::new();

    for record in records {
        match groups
            .iter()
            .position(|g| g.workspace_gid == record.workspace_gid)
        {
            Some(i) => groups[i].projects.push(record),
            None => groups.push(WorkspaceGroup {
                workspace_gid: &record.workspace_gid,
                workspace_name: &record.workspace_name,
                projects: vec![record],
            }),
        }
    }

    for group in &mut groups {
        // sort_by is stable, equal percentages keep input order
        group
            .projects
            .sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    }

    groups
}

/// Number of filled cells for a percentage, clamped to the bar width.
pub fn filled_cells(percentage: f64, width: usize) -> usize {
    let filled = (width as f64 * percentage / 100.0).floor();
    if filled.is_nan() || filled <= 0.0 {
        0
    } else {
        (filled as usize).min(width)
    }
}

/// `████░░░░ 37.5%` style bar: filled glyphs, empty glyphs, then the percentage.
pub fn progress_bar(percentage: f64) -> String {
    let filled = filled_cells(percentage, BAR_WIDTH);
    format!(
        "{}{} {:.1}%",
        BAR_FILLED.to_string().repeat(filled),
        BAR_EMPTY.to_string().repeat(BAR_WIDTH - filled),
        percentage
    )
}

/// Truncates `name` to [`NAME_WIDTH`] display columns, ending in `...` when cut.
pub fn truncate_name(name: &str) -> String {
    truncate_to_width(name, NAME_WIDTH)
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let limit = max_width.saturating_sub(ELLIPSIS.len());
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result.push_str(ELLIPSIS);
    result
}

/// Emphasis applied to a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    OnTrack,
    OnHold,
    AtRisk,
    OffTrack,
    Completed,
    Archived,
    Default,
}

impl StatusStyle {
    /// Exact (case-insensitive) match on the known labels, then a substring check
    /// for `archived`.
    pub fn for_label(label: &str) -> Self {
        let label = label.to_lowercase();
        match label.as_str() {
            "on track" => StatusStyle::OnTrack,
            "on hold" => StatusStyle::OnHold,
            "at risk" => StatusStyle::AtRisk,
            "off track" => StatusStyle::OffTrack,
            "completed" => StatusStyle::Completed,
            _ if label.contains("archived") => StatusStyle::Archived,
            _ => StatusStyle::Default,
        }
    }
}

/// Aggregate figures across every record of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub archived_projects: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overall_percentage: f64,
}

impl Summary {
    pub fn from_records(records: &[ProjectProgress]) -> Self {
        let total_tasks: usize = records.iter().map(|p| p.total_tasks).sum();
        let completed_tasks: usize = records.iter().map(|p| p.completed_tasks).sum();

        Self {
            total_projects: records.len(),
            active_projects: records.iter().filter(|p| p.is_active()).count(),
            completed_projects: records.iter().filter(|p| p.completed).count(),
            archived_projects: records.iter().filter(|p| p.archived).count(),
            total_tasks,
            completed_tasks,
            overall_percentage: completion_percentage(completed_tasks, total_tasks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, workspace: &str, percentage: f64) -> ProjectProgress {
        ProjectProgress {
            name: name.to_string(),
            workspace_gid: format!("gid-{}", workspace),
            workspace_name: workspace.to_string(),
            total_tasks: 10,
            completed_tasks: (percentage / 10.0) as usize,
            percentage,
            completed: false,
            archived: false,
            status: "Active".to_string(),
            color: "light-blue".to_string(),
        }
    }

    #[test]
    fn test_sort_descending_and_stable() {
        let records = vec![
            record("ten", "A", 10.0),
            record("ninety-first", "A", 90.0),
            record("ninety-second", "A", 90.0),
            record("fifty", "A", 50.0),
        ];
        let groups = group_by_workspace(&records);
        assert_eq!(groups.len(), 1);

        let names: Vec<&str> = groups[0].projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["ninety-first", "ninety-second", "fifty", "ten"]);
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let records = vec![
            record("a1", "Beta", 10.0),
            record("b1", "Alpha", 20.0),
            record("a2", "Beta", 30.0),
        ];
        let groups = group_by_workspace(&records);

        let names: Vec<&str> = groups.iter().map(|g| g.workspace_name).collect();
        assert_eq!(names, ["Beta", "Alpha"]);
        assert_eq!(groups[0].projects.len(), 2);
    }

    #[test]
    fn test_same_name_different_workspaces_stay_apart() {
        let mut first = record("x", "Shared", 10.0);
        first.workspace_gid = "1".into();
        let mut second = record("y", "Shared", 20.0);
        second.workspace_gid = "2".into();

        let records = [first, second];
        let groups = group_by_workspace(&records);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_progress_bar_partial() {
        let bar = progress_bar(37.5);
        assert_eq!(bar.chars().filter(|&c| c == BAR_FILLED).count(), 7);
        assert_eq!(bar.chars().filter(|&c| c == BAR_EMPTY).count(), 13);
        assert!(bar.ends_with(" 37.5%"));
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(
            progress_bar(0.0),
            format!("{} 0.0%", BAR_EMPTY.to_string().repeat(20))
        );
        assert_eq!(
            progress_bar(100.0),
            format!("{} 100.0%", BAR_FILLED.to_string().repeat(20))
        );
    }

    #[test]
    fn test_filled_cells_floors() {
        assert_eq!(filled_cells(4.99, 20), 0);
        assert_eq!(filled_cells(5.0, 20), 1);
        assert_eq!(filled_cells(99.9, 20), 19);
        assert_eq!(filled_cells(250.0, 20), 20);
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short"), "Short");

        let exact = "x".repeat(35);
        assert_eq!(truncate_name(&exact), exact);

        let long = "A very long project name that keeps on going";
        let cut = truncate_name(long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.width(), 35);
        assert!(long.starts_with(cut.trim_end_matches("...")));
    }

    #[test]
    fn test_truncate_wide_chars() {
        let name = "項目".repeat(20);
        let cut = truncate_name(&name);
        assert!(cut.width() <= 35);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_status_styles() {
        assert_eq!(StatusStyle::for_label("On track"), StatusStyle::OnTrack);
        assert_eq!(StatusStyle::for_label("on hold"), StatusStyle::OnHold);
        assert_eq!(StatusStyle::for_label("At risk"), StatusStyle::AtRisk);
        assert_eq!(StatusStyle::for_label("OFF TRACK"), StatusStyle::OffTrack);
        assert_eq!(StatusStyle::for_label("completed"), StatusStyle::Completed);
        assert_eq!(StatusStyle::for_label("Completed"), StatusStyle::Completed);
        assert_eq!(StatusStyle::for_label("Archived"), StatusStyle::Archived);
        assert_eq!(StatusStyle::for_label("Active"), StatusStyle::Default);
        assert_eq!(StatusStyle::for_label("Error"), StatusStyle::Default);
        // exact match only for the known labels
        assert_eq!(StatusStyle::for_label("Not on track"), StatusStyle::Default);
    }

    #[test]
    fn test_summary() {
        let mut done = record("done", "A", 100.0);
        done.completed = true;
        done.completed_tasks = 10;
        let mut shelved = record("shelved", "A", 0.0);
        shelved.archived = true;
        shelved.completed_tasks = 0;
        let mut active = record("active", "B", 50.0);
        active.completed_tasks = 5;

        let summary = Summary::from_records(&[done, shelved, active]);
        assert_eq!(summary.total_projects, 3);
        assert_eq!(summary.active_projects, 1);
        assert_eq!(summary.completed_projects, 1);
        assert_eq!(summary.archived_projects, 1);
        assert_eq!(summary.total_tasks, 30);
        assert_eq!(summary.completed_tasks, 15);
        assert_eq!(summary.overall_percentage, 50.0);
    }

    #[test]
    fn test_summary_without_tasks() {
        let mut empty = record("empty", "A", 0.0);
        empty.total_tasks = 0;
        empty.completed_tasks = 0;

        let summary = Summary::from_records(&[empty]);
        assert_eq!(summary.overall_percentage, 0.0);
    }
}
