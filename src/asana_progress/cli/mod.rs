//! # CLI Behavior
//!
//! This is **one possible UI client** for asana-progress, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output
//! formatting.
//!
//! For the overall architecture, see the crate-level documentation of `asana_progress`.
//!
//! ## Token Resolution
//!
//! 1. **Explicit** (`asana-progress <TOKEN>` or `ASANA_API_KEY`): used for this run,
//!    never saved.
//! 2. **Saved**: the token stored in `secrets.json` under the data directory.
//! 3. **Prompt**: asked on the terminal without echo. When stdin is not a terminal,
//!    one line is read from it instead (`echo $TOKEN | asana-progress`). A prompted
//!    token is saved for later runs.
//!
//! ## Output
//!
//! A header panel, progress messages, one table per workspace and a summary panel.
//! Styling follows the terminal's light/dark mode and is dropped entirely when
//! stdout is not a color terminal.
//!
//! ## Module Structure
//!
//! - `commands`: The run sequence
//! - `prompt`: Terminal/stdin token prompt
//! - `render`: Tables, panels and messages
//! - `setup`: Argument parsing via clap
//! - `styles`: Named styles and light/dark palettes
//! - `templates`: Output templates
//! - `theme`: Template rendering with the `style` filter

mod commands;
mod prompt;
mod render;
pub mod setup;
mod styles;
mod templates;
mod theme;

pub use commands::run;
