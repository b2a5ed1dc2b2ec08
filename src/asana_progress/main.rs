//! # asana-progress CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/asana_progress/cli/`, while
//! this file only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/asana_progress/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Token prompt on the terminal or stdin (prompt.rs)        │
//! │  - Run sequence (commands.rs)                               │
//! │  - Templated, themed rendering (render.rs, theme.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (asana_progress)                                   │
//! │  - Tracker facade, gateway, credentials, progress, report   │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to each module, the HTTP gateway against `wiremock`.
//! - **CLI rendering**: plain-text renders of canned records compared in `render.rs`.
//! - **Binary**: `tests/cli_e2e.rs` runs the executable against a mock API server.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!(
            "{}",
            console::style(format!("Error: {}", e)).for_stderr().red().bold()
        );
        std::process::exit(1);
    }
}
