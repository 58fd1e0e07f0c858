//! Layered configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `RENOVA_*` environment variables (nested keys use `__`, e.g.
//! `RENOVA_REMOTE__ANON_KEY`). A `.env` file is loaded into the process
//! environment before reading.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment, File};
use renova_core::defaults::DEFAULT_ADMIN_EMAIL;
use renova_core::errors::{ExError, ExErrorKind, RenovaError, Result};
use renova_core::logging_facility::Profile;
use renova_core_types::Sensitive;
use renova_remote::config::{RemoteConfig, DEFAULT_BUCKET, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "renova.toml";
pub const DEFAULT_DATABASE_PATH: &str = "renova.db";
const ENV_PREFIX: &str = "RENOVA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Local,
    Remote,
}

impl FromStr for BackendKind {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "remote" => Ok(BackendKind::Remote),
            other => Err(RenovaError::invalid(
                "backend",
                format!("unknown backend '{}' (expected local or remote)", other),
            )
            .into()),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => f.write_str("local"),
            BackendKind::Remote => f.write_str("remote"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalSettings {
    pub database_path: PathBuf,
}

/// Hosted backend settings; only required when `backend = "remote"`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<Sensitive<String>>,
    pub bucket: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub profile: Profile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub backend: BackendKind,
    /// Email promoted to ADMIN on sign-in
    pub admin_email: String,
    pub local: LocalSettings,
    pub remote: RemoteSettings,
    pub log: LogSettings,
}

fn config_error(err: config::ConfigError) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_settings")
        .with_message(err.to_string())
}

impl Settings {
    /// Load from `.env`, the config file and the process environment
    ///
    /// `file` defaults to `renova.toml` in the working directory; a missing
    /// default file is not an error, a missing explicit one is.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::load_from(file, None)
    }

    /// Like [`load`](Self::load) but reading variables from `env` instead of
    /// the process environment
    pub fn load_from(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("backend", "local")
            .and_then(|b| b.set_default("admin_email", DEFAULT_ADMIN_EMAIL))
            .and_then(|b| b.set_default("local.database_path", DEFAULT_DATABASE_PATH))
            .and_then(|b| b.set_default("remote.bucket", DEFAULT_BUCKET))
            .and_then(|b| b.set_default("remote.timeout_secs", DEFAULT_TIMEOUT_SECS))
            .and_then(|b| b.set_default("log.profile", "development"))
            .map_err(config_error)?
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local.database_path = path.into();
        self
    }

    /// # Errors
    ///
    /// `InvalidInput` for a malformed admin email, or a remote backend
    /// without URL or key.
    pub fn validate(&self) -> Result<()> {
        if !self.admin_email.contains('@') {
            return Err(RenovaError::invalid("admin_email", "must be an email address").into());
        }
        if self.backend == BackendKind::Remote {
            self.remote_config()?;
        }
        Ok(())
    }

    /// Connection settings for the hosted backend
    pub fn remote_config(&self) -> Result<RemoteConfig> {
        let url = self
            .remote
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| RenovaError::invalid("remote.url", "required for the remote backend"))?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RenovaError::invalid("remote.url", "must be an http(s) URL").into());
        }
        let anon_key = self
            .remote
            .anon_key
            .as_ref()
            .filter(|key| !key.expose().trim().is_empty())
            .ok_or_else(|| {
                RenovaError::invalid("remote.anon_key", "required for the remote backend")
            })?;

        Ok(RemoteConfig {
            url: url.to_string(),
            anon_key: anon_key.clone(),
            bucket: self.remote.bucket.clone(),
            timeout_secs: self.remote.timeout_secs,
        })
    }
}
