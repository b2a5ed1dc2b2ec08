//! # Credentials
//!
//! Resolves the Asana access token through a fixed fallback chain:
//!
//! 1. An explicit token (command line argument or `ASANA_API_KEY`) is used verbatim
//!    and never persisted.
//! 2. Otherwise a token previously saved in the [`SecretStore`] is used.
//! 3. Otherwise the user is asked through the [`TokenPrompt`]. An empty answer is a
//!    [`TrackerError::MissingCredential`]. A non-empty answer is saved back to the
//!    store; failing to save only produces a warning.
//!
//! Secret storage and prompting are platform capabilities, so both sit behind traits:
//!
//! - [`file::FileSecretStore`]: JSON file with owner-only permissions (production)
//! - [`memory::MemorySecretStore`] / [`memory::FixedPrompt`]: in-memory doubles for
//!   tests and headless use
//!
//! The interactive prompt lives in the CLI layer, the only layer allowed to touch the
//! terminal.

use crate::error::{Result, TrackerError};
use crate::message::Message;
use tracing::{debug, warn};

pub mod file;
pub mod memory;

/// Account name under which the token is stored inside the service namespace.
pub const TOKEN_ACCOUNT: &str = "api_key";

/// A namespaced key/value store for secrets.
pub trait SecretStore {
    /// Reads the secret for `service`/`account`, `None` when nothing is stored.
    fn get(&self, service: &str, account: &str) -> Result<Option<String>>;

    /// Stores (or replaces) the secret for `service`/`account`.
    fn set(&mut self, service: &str, account: &str, secret: &str) -> Result<()>;
}

/// Asks the user for a token. Implementations must not echo the input.
pub trait TokenPrompt {
    fn prompt_token(&mut self) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct ResolvedToken {
    pub token: String,
    pub messages: Vec<Message>,
}

pub fn resolve_token<S, P>(
    explicit: Option<&str>,
    service: &str,
    store: &mut S,
    prompt: &mut P,
) -> Result<ResolvedToken>
where
    S: SecretStore + ?Sized,
    P: TokenPrompt + ?Sized,
{
    if let Some(token) = explicit.filter(|t| !t.is_empty()) {
        debug!("using explicitly supplied token");
        return Ok(ResolvedToken {
            token: token.to_string(),
            messages: vec![Message::success("Using explicitly provided API key")],
        });
    }

    match store.get(service, TOKEN_ACCOUNT) {
        Ok(Some(token)) if !token.is_empty() => {
            debug!(service, "using token from secret store");
            return Ok(ResolvedToken {
                token,
                messages: vec![Message::info("Using saved API key")],
            });
        }
        Ok(_) => debug!(service, "no saved token"),
        Err(e) => warn!(service, error = %e, "could not read secret store"),
    }

    let entered = prompt.prompt_token().map_err(|e| {
        warn!(error = %e, "token prompt failed");
        TrackerError::MissingCredential
    })?;
    let token = entered.trim().to_string();
    if token.is_empty() {
        return Err(TrackerError::MissingCredential);
    }

    let mut messages = Vec::new();
    match store.set(service, TOKEN_ACCOUNT, &token) {
        Ok(()) => messages.push(Message::success("API key saved for future runs")),
        Err(e) => {
            warn!(service, error = %e, "could not persist token");
            messages.push(Message::warning(format!(
                "Warning: could not save API key ({}); continuing with this session only",
                e
            )));
        }
    }

    Ok(ResolvedToken { token, messages })
}
