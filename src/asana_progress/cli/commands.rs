//! # CLI Run
//!
//! The single command: resolve a token, connect, gather, compute, print.
//!
//! - stdout carries the report and the leveled messages.
//! - stderr carries the token prompt, the transient processing indicator and
//!   diagnostics from `tracing`.
//! - Errors returned from [`run`] are printed by `main` and exit with status 1.
//!
//! Without a data directory the run still proceeds on default settings, keeping any
//! prompted token in memory for this session only.

use super::prompt::ConsolePrompt;
use super::render::{print_messages, render_header, render_report};
use super::setup::Cli;
use asana_progress::config::{data_dir, TrackerConfig};
use asana_progress::credentials::file::FileSecretStore;
use asana_progress::credentials::memory::MemorySecretStore;
use asana_progress::credentials::{resolve_token, SecretStore};
use asana_progress::error::Result;
use asana_progress::gateway::http::HttpGateway;
use asana_progress::logging::init_subscriber;
use asana_progress::message::Message;
use asana_progress::tracker::Tracker;
use clap::Parser;
use console::Term;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const NO_PROJECTS_NOTICE: &str = "No projects found or error occurred.";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_subscriber("error");

    let Storage {
        config,
        mut store,
        messages,
    } = open_storage(data_dir());

    println!("{}", render_header());
    print_messages(&messages);

    let resolved = resolve_token(
        cli.token.as_deref(),
        &config.secret_service,
        store.as_mut(),
        &mut ConsolePrompt,
    )?;
    print_messages(&resolved.messages);

    let tracker = Tracker::new(HttpGateway::new(&config, &resolved.token)?);
    let user = tracker.check_connectivity()?;
    print_messages(&[Message::success(format!(
        "Connected to Asana as {}",
        user.display_name()
    ))]);

    let collected = tracker.collect_projects();
    print_messages(&collected.messages);
    if collected.projects.is_empty() {
        print_messages(&[Message::warning(NO_PROJECTS_NOTICE)]);
        return Ok(());
    }

    print_messages(&[Message::warning("Calculating project progress...")]);
    let indicator = Term::stderr();
    let show_indicator = indicator.is_term();
    let computed = tracker.compute_all(&collected.projects, |done, total| {
        if show_indicator {
            let _ = indicator.clear_line();
            let _ = indicator.write_str(&format!("Processing projects... [{}/{}]", done, total));
        }
    });
    if show_indicator {
        let _ = indicator.clear_line();
    }

    print_messages(&computed.messages);
    println!();
    println!("{}", render_report(&computed.records));
    Ok(())
}

/// Settings and secret store for this run.
struct Storage {
    config: TrackerConfig,
    store: Box<dyn SecretStore>,
    messages: Vec<Message>,
}

/// Opens the data directory, or falls back to defaults and an in-memory store when it
/// cannot be determined.
fn open_storage(dir: Result<PathBuf>) -> Storage {
    match dir {
        Ok(dir) => {
            let (config, messages) = load_config(&dir);
            Storage {
                config,
                store: Box::new(FileSecretStore::new(&dir)),
                messages,
            }
        }
        Err(e) => {
            warn!(error = %e, "no data directory, settings and token stay in memory");
            Storage {
                config: TrackerConfig::default().with_env_overrides(),
                store: Box::new(MemorySecretStore::new()),
                messages: vec![Message::warning(format!(
                    "Warning: {}; using default settings, API key will not be saved",
                    e
                ))],
            }
        }
    }
}

/// Config from `dir/config.json` with environment overrides. A broken file falls back
/// to defaults with a warning.
fn load_config(dir: &Path) -> (TrackerConfig, Vec<Message>) {
    match TrackerConfig::load(dir) {
        Ok(config) => (config.with_env_overrides(), Vec::new()),
        Err(e) => {
            warn!(error = %e, "ignoring config file");
            (
                TrackerConfig::default().with_env_overrides(),
                vec![Message::warning(format!(
                    "Warning: ignoring config in {} ({})",
                    dir.display(),
                    e
                ))],
            )
        }
    }
}
