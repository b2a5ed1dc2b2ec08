//! # Asana Progress Architecture
//!
//! Asana Progress is a **UI-agnostic reporting library** with a thin CLI client. The
//! library knows how to authenticate, walk workspaces and projects, and turn task lists
//! into progress records. The CLI knows how to print them.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, renders tables and panels     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Tracker Facade (tracker.rs)                                │
//! │  - Sequences connectivity, enumeration and computation      │
//! │  - Returns records plus structured messages                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (progress.rs, report.rs, credentials/)                │
//! │  - Pure calculation, grouping and token resolution          │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Gateway Layer (gateway/)                                   │
//! │  - Abstract Gateway trait                                   │
//! │  - HttpGateway (production), MemoryGateway (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `tracker.rs` inward, code:
//! - Takes regular Rust values (a gateway, a secret store, a prompt)
//! - Returns regular Rust types (`Result<T>`, `Vec<Message>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! Platform capabilities (secret storage, the interactive prompt, the remote API) sit
//! behind small traits so that tests run against in-memory implementations.
//!
//! ## Failure Policy
//!
//! Only two failures stop a run: a missing credential and a failed connectivity check.
//! Everything else (a workspace that cannot be listed, a project whose tasks cannot be
//! read, a status feed that errors) degrades the affected record and the run goes on.
//!
//! ## Module Overview
//!
//! - [`tracker`]: The orchestrating facade
//! - [`progress`]: Completion ratio and status label resolution
//! - [`report`]: Grouping, ordering, progress bars and the summary
//! - [`gateway`]: Remote API abstraction and implementations
//! - [`credentials`]: Token resolution, secret stores and prompts
//! - [`model`]: Wire records and the derived `ProjectProgress`
//! - [`config`]: Configuration management
//! - [`logging`]: Diagnostic subscriber setup
//! - [`message`]: Leveled user-facing messages
//! - [`error`]: Error types
//! - `cli`: Argument parsing, prompting and templated rendering for the binary (not part of the lib API)

pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod message;
pub mod model;
pub mod progress;
pub mod report;
pub mod tracker;
