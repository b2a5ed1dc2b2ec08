use super::{SecretStore, TokenPrompt};
use crate::error::{Result, TrackerError};
use std::collections::HashMap;

/// In-memory secret store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: HashMap<(String, String), String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, service: &str, account: &str, secret: &str) -> Self {
        self.secrets
            .insert((service.to_string(), account.to_string()), secret.to_string());
        self
    }

    /// Every `get` fails as if the backing storage were unreadable.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Every `set` fails with a persistence error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of attempted writes, failed ones included.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, service: &str, account: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(TrackerError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "secret store is unreadable",
            )));
        }
        Ok(self
            .secrets
            .get(&(service.to_string(), account.to_string()))
            .cloned())
    }

    fn set(&mut self, service: &str, account: &str, secret: &str) -> Result<()> {
        self.writes += 1;
        if self.fail_writes {
            return Err(TrackerError::Persistence("secret store is read-only".into()));
        }
        self.secrets
            .insert((service.to_string(), account.to_string()), secret.to_string());
        Ok(())
    }
}

/// Prompt that returns a canned answer.
#[derive(Debug, Default)]
pub struct FixedPrompt {
    answer: Option<String>,
    calls: usize,
}

impl FixedPrompt {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            calls: 0,
        }
    }

    /// A prompt with no terminal behind it.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl TokenPrompt for FixedPrompt {
    fn prompt_token(&mut self) -> Result<String> {
        self.calls += 1;
        self.answer.clone().ok_or_else(|| {
            TrackerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "no terminal available",
            ))
        })
    }
}
