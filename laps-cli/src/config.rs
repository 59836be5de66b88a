//! Config file loading and merging with command-line arguments.
//!
//! The file is optional. When `--config` is not given the default location
//! `<config dir>/laps/config.json` is tried and silently skipped if absent.
//! Command-line flags and environment variables win over file values.
//! Passwords are never read from the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use laps_core::DirectoryTarget;
use laps_directory::{BindCredentials, DirectoryBackend, DirectoryConfig};
use serde::Deserialize;

use crate::cli::TargetArgs;

const CONFIG_DIR_NAME: &str = "laps";
const CONFIG_FILE_NAME: &str = "config.json";
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024; // 1MB

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LapsConfig {
    pub domain: Option<String>,
    pub server: Option<String>,
    pub username: Option<String>,
    pub fixture: Option<PathBuf>,
    pub directory: DirectoryConfig,
}

impl LapsConfig {
    /// Platform config location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load `explicit`, or the default file when it exists.
    pub async fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path).await;
        }

        match Self::default_path() {
            Some(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => {
                Self::read(&path).await
            }
            _ => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    async fn read(path: &Path) -> anyhow::Result<Self> {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            bail!(
                "config file {} is too large ({} bytes)",
                path.display(),
                metadata.len()
            );
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Pick the backend: a fixture from the command line or file, else LDAP.
    pub fn backend(&self, fixture: Option<PathBuf>) -> DirectoryBackend {
        match fixture.or_else(|| self.fixture.clone()) {
            Some(path) => DirectoryBackend::Fixture(path),
            None => DirectoryBackend::Ldap(self.directory.clone()),
        }
    }

    /// Merge `args` over the file values.
    ///
    /// With `require_credentials` both username and password must be known;
    /// otherwise they may both be absent, which searches as the calling
    /// identity.
    pub fn target(&self, args: TargetArgs, require_credentials: bool) -> anyhow::Result<DirectoryTarget> {
        let Some(domain) = args.domain.or_else(|| self.domain.clone()) else {
            bail!("--domain is required (or set \"domain\" in the config file)");
        };

        let mut target = DirectoryTarget::new(domain);
        target.server_name = args.server.or_else(|| self.server.clone());

        let username = args.username.or_else(|| self.username.clone());
        target.credentials = match (username, args.password) {
            (Some(username), Some(password)) => Some(BindCredentials::new(username, password)),
            (None, None) if !require_credentials => None,
            (None, None) => bail!("--username and --password are required"),
            (Some(_), None) => bail!("--password (or LAPS_PASSWORD) is required with --username"),
            (None, Some(_)) => bail!("--username is required with --password"),
        };

        Ok(target)
    }
}
