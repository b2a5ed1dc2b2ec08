//! File-backed secret store.
//!
//! Secrets live in a single JSON document keyed by service, then account:
//!
//! ```text
//! { "asana-progress": { "api_key": "1/1234..." } }
//! ```
//!
//! The file is created with owner-only permissions on unix. A file that cannot be
//! parsed is never overwritten, since it may hold other services' secrets.

use super::SecretStore;
use crate::error::{Result, TrackerError};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const SECRETS_FILENAME: &str = "secrets.json";

type SecretMap = BTreeMap<String, BTreeMap<String, String>>;

pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Store rooted in `dir` (the file itself is `dir/secrets.json`).
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(SECRETS_FILENAME),
        }
    }

    fn read_all(&self) -> Result<SecretMap> {
        if !self.path.exists() {
            return Ok(SecretMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, service: &str, account: &str) -> Result<Option<String>> {
        let secrets = self.read_all()?;
        Ok(secrets
            .get(service)
            .and_then(|accounts| accounts.get(account))
            .cloned())
    }

    fn set(&mut self, service: &str, account: &str, secret: &str) -> Result<()> {
        let persistence = |e: TrackerError| {
            TrackerError::Persistence(format!("{}: {}", self.path.display(), e))
        };

        let mut secrets = self.read_all().map_err(persistence)?;
        secrets
            .entry(service.to_string())
            .or_default()
            .insert(account.to_string(), secret.to_string());

        let persist = || -> Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(&secrets)?;
            let mut file = open_owner_only(&self.path)?;
            set_permissions_owner_only(&self.path)?;
            file.write_all(content.as_bytes())?;
            Ok(())
        };
        persist().map_err(persistence)
    }
}

/// Opens `path` for writing, truncating it. A new file gets mode 0600 from the start.
fn open_owner_only(path: &Path) -> std::io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

/// Tightens a pre-existing file that was created with looser permissions.
fn set_permissions_owner_only(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
    }
    #[cfg(not(unix))]
    {
        let _ = path;
        Ok(())
    }
}
