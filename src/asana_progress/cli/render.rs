//! # Rendering Module
//!
//! Turns report data into styled terminal text through the templates in
//! [`super::templates`].
//!
//! Layout (column widths, padding, box borders) is computed here with Unicode display
//! widths, because block glyphs and non-ASCII project names do not have one column per
//! byte. Templates receive finished cells and only apply styles.
//!
//! Every public `render_*` function has an internal variant taking `use_color`, which
//! the tests call with `false` to compare plain text.

use super::styles::{names, status_style_name, THEME};
use super::templates::{
    HEADER_TEMPLATE, MESSAGES_TEMPLATE, SUMMARY_TEMPLATE, WORKSPACE_TABLE_TEMPLATE,
};
use super::theme::{colors_enabled, render_with_color};
use asana_progress::message::{Message, MessageLevel};
use asana_progress::model::ProjectProgress;
use asana_progress::report::{
    group_by_workspace, progress_bar, truncate_name, StatusStyle, Summary, WorkspaceGroup,
};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const APP_TITLE: &str = "Asana Project Progress Tracker";
pub const APP_SUBTITLE: &str = "Fetching and displaying progress for all your Asana projects...";
pub const SUMMARY_TITLE: &str = "Project Summary";

const HEADERS: [&str; 4] = ["Project", "Progress", "Tasks", "Status"];

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct HeaderData {
    top: String,
    bottom: String,
    title: &'static str,
    title_pad: String,
    subtitle: &'static str,
    subtitle_pad: String,
}

/// One table row; every cell is already padded to its column width.
#[derive(Serialize)]
struct RowData {
    name: String,
    progress: String,
    tasks: String,
    status: String,
    status_style: &'static str,
}

#[derive(Serialize)]
struct HeaderRow {
    name: String,
    progress: String,
    tasks: String,
    status: String,
}

#[derive(Serialize)]
struct TableData {
    title: String,
    top: String,
    separator: String,
    bottom: String,
    header: HeaderRow,
    rows: Vec<RowData>,
}

#[derive(Serialize)]
struct SummaryLine {
    label: &'static str,
    value: String,
    pad: String,
    style: &'static str,
}

#[derive(Serialize)]
struct SummaryData {
    top: String,
    bottom: String,
    lines: Vec<SummaryLine>,
}

pub fn render_messages(messages: &[Message]) -> String {
    render_messages_internal(messages, colors_enabled())
}

fn render_messages_internal(messages: &[Message], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render_with_color(MESSAGES_TEMPLATE, &data, &THEME, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

/// Prints messages to stdout.
pub fn print_messages(messages: &[Message]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

pub fn render_header() -> String {
    render_header_internal(colors_enabled())
}

fn render_header_internal(use_color: bool) -> String {
    let inner = APP_TITLE.width().max(APP_SUBTITLE.width());
    let data = HeaderData {
        top: format!("╭{}╮", "─".repeat(inner + 2)),
        bottom: format!("╰{}╯", "─".repeat(inner + 2)),
        title: APP_TITLE,
        title_pad: padding(APP_TITLE, inner),
        subtitle: APP_SUBTITLE,
        subtitle_pad: padding(APP_SUBTITLE, inner),
    };

    render_with_color(HEADER_TEMPLATE, &data, &THEME, use_color)
        .unwrap_or_else(|_| format!("{}\n{}", APP_TITLE, APP_SUBTITLE))
}

/// All workspace tables, then the summary, separated by blank lines.
pub fn render_report(records: &[ProjectProgress]) -> String {
    render_report_internal(records, colors_enabled())
}

fn render_report_internal(records: &[ProjectProgress], use_color: bool) -> String {
    let mut sections: Vec<String> = group_by_workspace(records)
        .iter()
        .map(|group| render_workspace_table(group, use_color))
        .collect();
    sections.push(render_summary(&Summary::from_records(records), use_color));
    sections.join("\n\n")
}

fn render_workspace_table(group: &WorkspaceGroup<'_>, use_color: bool) -> String {
    let cells: Vec<[String; 4]> = group
        .projects
        .iter()
        .map(|p| {
            [
                truncate_name(&p.name),
                progress_bar(p.percentage),
                format!("{}/{}", p.completed_tasks, p.total_tasks),
                p.status.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let rows = cells
        .into_iter()
        .zip(&group.projects)
        .map(|([name, progress, tasks, status], p)| RowData {
            name: pad(&name, widths[0]),
            progress: pad(&progress, widths[1]),
            tasks: pad(&tasks, widths[2]),
            status: pad(&status, widths[3]),
            status_style: status_style_name(StatusStyle::for_label(&p.status)),
        })
        .collect();

    let count = group.projects.len();
    let data = TableData {
        title: format!(
            "{} ({} {})",
            group.workspace_name,
            count,
            if count == 1 { "project" } else { "projects" }
        ),
        top: rule('┌', '┬', '┐', &widths),
        separator: rule('├', '┼', '┤', &widths),
        bottom: rule('└', '┴', '┘', &widths),
        header: HeaderRow {
            name: pad(HEADERS[0], widths[0]),
            progress: pad(HEADERS[1], widths[1]),
            tasks: pad(HEADERS[2], widths[2]),
            status: pad(HEADERS[3], widths[3]),
        },
        rows,
    };

    render_with_color(WORKSPACE_TABLE_TEMPLATE, &data, &THEME, use_color)
        .unwrap_or_else(|e| format!("Render error: {}", e))
}

fn render_summary(summary: &Summary, use_color: bool) -> String {
    let entries: [(&'static str, String, &'static str); 7] = [
        ("Total Projects: ", summary.total_projects.to_string(), names::REGULAR),
        ("Active Projects: ", summary.active_projects.to_string(), names::REGULAR),
        ("Completed Projects: ", summary.completed_projects.to_string(), names::REGULAR),
        ("Archived Projects: ", summary.archived_projects.to_string(), names::REGULAR),
        ("Total Tasks: ", summary.total_tasks.to_string(), names::REGULAR),
        ("Completed Tasks: ", summary.completed_tasks.to_string(), names::REGULAR),
        (
            "Overall Progress: ",
            format!("{:.1}%", summary.overall_percentage),
            names::SUCCESS,
        ),
    ];

    let title_width = SUMMARY_TITLE.width() + 1;
    let inner = entries
        .iter()
        .map(|(label, value, _)| label.width() + value.width())
        .max()
        .unwrap_or(0)
        .max(title_width);

    let lines = entries
        .into_iter()
        .map(|(label, value, style)| SummaryLine {
            pad: " ".repeat(inner - label.width() - value.width()),
            label,
            value,
            style,
        })
        .collect();

    let data = SummaryData {
        top: format!(
            "╭─ {} {}╮",
            SUMMARY_TITLE,
            "─".repeat(inner + 2 - SUMMARY_TITLE.width() - 3)
        ),
        bottom: format!("╰{}╯", "─".repeat(inner + 2)),
        lines,
    };

    render_with_color(SUMMARY_TEMPLATE, &data, &THEME, use_color)
        .unwrap_or_else(|e| format!("Render error: {}", e))
}

/// Horizontal table border with a joint between columns.
fn rule(left: char, joint: char, right: char, widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&joint.to_string()), right)
}

fn padding(s: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(s.width()))
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, padding(s, width))
}
