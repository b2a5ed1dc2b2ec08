//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as standalone `.tmp`
//! files and embedded here at compile time.
//!
//! Conventions:
//!
//!  1. Line breaks are explicit. Loops sit on one line and end with the newline they
//!     emit, so every blank line in the output can be traced to the template.
//!  2. Widths, padding and truncation are computed in Rust (they need Unicode display
//!     widths). Templates receive pre-padded cells and only pick styles.
//!  3. Style selection that depends on data is passed in as a style name
//!     (`row.status_style`) instead of branching in the template.

pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const HEADER_TEMPLATE: &str = include_str!("templates/header.tmp");
pub const WORKSPACE_TABLE_TEMPLATE: &str = include_str!("templates/workspace_table.tmp");
pub const SUMMARY_TEMPLATE: &str = include_str!("templates/summary.tmp");
