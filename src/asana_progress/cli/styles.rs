//! Styles for the asana-progress CLI.
//!
//! Templates only refer to semantic style names from [`names`]. Each name maps to a
//! concrete `console::Style` in a light and a dark palette, and the palette is picked
//! at runtime from the terminal's color mode.
//!
//! Status labels get their own names (`status-on-track`, `status-at-risk`, ...) so the
//! label-to-style rule stays in [`asana_progress::report::StatusStyle`] and the colors
//! stay here.

use super::theme::Theme;
use asana_progress::report::StatusStyle;
use console::Style;
use once_cell::sync::Lazy;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const BORDER: &str = "border";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    pub const TITLE: &str = "title";
    pub const SUBTITLE: &str = "subtitle";
    // Table cells
    pub const TABLE_TITLE: &str = "table-title";
    pub const TABLE_HEADER: &str = "table-header";
    pub const PROJECT_NAME: &str = "project-name";
    pub const PROGRESS_BAR: &str = "progress-bar";
    pub const TASK_COUNT: &str = "task-count";
    // Status labels
    pub const STATUS_ON_TRACK: &str = "status-on-track";
    pub const STATUS_ON_HOLD: &str = "status-on-hold";
    pub const STATUS_AT_RISK: &str = "status-at-risk";
    pub const STATUS_OFF_TRACK: &str = "status-off-track";
    pub const STATUS_COMPLETED: &str = "status-completed";
    pub const STATUS_ARCHIVED: &str = "status-archived";
    pub const STATUS_DEFAULT: &str = "status-default";
}

pub fn status_style_name(style: StatusStyle) -> &'static str {
    match style {
        StatusStyle::OnTrack => names::STATUS_ON_TRACK,
        StatusStyle::OnHold => names::STATUS_ON_HOLD,
        StatusStyle::AtRisk => names::STATUS_AT_RISK,
        StatusStyle::OffTrack => names::STATUS_OFF_TRACK,
        StatusStyle::Completed => names::STATUS_COMPLETED,
        StatusStyle::Archived => names::STATUS_ARCHIVED,
        StatusStyle::Default => names::STATUS_DEFAULT,
    }
}

/// Theme for the detected terminal mode, resolved once per process.
pub static THEME: Lazy<Theme> = Lazy::new(resolved_theme);

fn resolved_theme() -> Theme {
    match dark_light::detect() {
        dark_light::Mode::Dark => build_dark_theme(),
        _ => build_light_theme(),
    }
}

fn build_light_theme() -> Theme {
    let regular = Style::new().black();
    let muted = Style::new().color256(243);
    let info = Style::new().blue();

    build_theme(regular, muted, info)
        .add(names::BORDER, Style::new().blue())
        .add(names::PROJECT_NAME, Style::new().cyan())
        .add(names::TASK_COUNT, Style::new().color256(136))
}

fn build_dark_theme() -> Theme {
    let regular = Style::new().white();
    let muted = Style::new().color256(246);
    let info = Style::new().color256(75);

    build_theme(regular, muted, info)
        .add(names::BORDER, Style::new().color256(75))
        .add(names::PROJECT_NAME, Style::new().cyan().bright())
        .add(names::TASK_COUNT, Style::new().yellow())
}

/// Styles that only differ through the palette entries passed in.
fn build_theme(regular: Style, muted: Style, info: Style) -> Theme {
    let success = Style::new().green();
    let warning = Style::new().yellow().bold();
    let error = Style::new().red().bold();

    Theme::new()
        .add(names::REGULAR, regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::ERROR, error.clone())
        .add(names::WARNING, warning.clone())
        .add(names::SUCCESS, success.clone())
        .add(names::INFO, info.clone())
        .add(names::TITLE, info.clone().bold())
        .add(names::SUBTITLE, muted.clone())
        .add(names::TABLE_TITLE, regular.clone().bold())
        .add(names::TABLE_HEADER, Style::new().magenta().bold())
        .add(names::PROGRESS_BAR, success.clone())
        .add(names::STATUS_ON_TRACK, success.clone().bold())
        .add(names::STATUS_ON_HOLD, info.bold())
        .add(names::STATUS_AT_RISK, warning)
        .add(names::STATUS_OFF_TRACK, error)
        .add(names::STATUS_COMPLETED, success.bright().bold())
        .add(names::STATUS_ARCHIVED, muted.dim())
        .add(names::STATUS_DEFAULT, regular)
}
