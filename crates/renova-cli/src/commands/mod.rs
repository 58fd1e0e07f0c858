//! CLI commands
//!
//! Every command runs against one `Showroom` opened from the layered
//! settings plus the global flags below.

pub mod about;
pub mod account;
pub mod admin;
pub mod cars;
pub mod catalog;
pub mod data;
pub mod images;
pub mod inbox;
pub mod news;
pub mod testimonials;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use renova_core::logging_facility;
use renova_core_types::Sensitive;
use renova_engine::{Backend, BackendKind, Settings, Showroom};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Config file (defaults to ./renova.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend to use: local or remote
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Local database file
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Sign in with this email before running the command
    #[arg(long = "login", global = true, requires = "login_password")]
    pub login: Option<String>,

    /// Password for `--login`
    #[arg(long = "login-password", global = true, requires = "login")]
    pub login_password: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

pub struct Context {
    pub showroom: Showroom,
    pub json: bool,
}

impl Context {
    /// Load settings, select the backend and pick up the session
    pub async fn open(args: &GlobalArgs) -> anyhow::Result<Self> {
        let mut settings = Settings::load(args.config.as_deref())?;
        if let Some(backend) = &args.backend {
            settings = settings.with_backend(backend.parse::<BackendKind>()?);
        }
        if let Some(path) = &args.database {
            settings = settings.with_database_path(path);
        }
        settings.validate()?;
        logging_facility::init(settings.log.profile);

        let backend = Backend::open(&settings)?;
        let showroom = Showroom::new(backend, settings.admin_email.clone());

        match (&args.login, &args.login_password) {
            (Some(email), Some(password)) => {
                showroom
                    .sign_in(email, &Sensitive::new(password.clone()))
                    .await
                    .with_context(|| format!("sign in as {}", email))?;
            }
            _ => {
                // A session that cannot be checked leaves the caller anonymous
                if let Err(err) = showroom.restore_session().await {
                    tracing::warn!(op = "restore_session", err_code = err.code(), "{}", err);
                }
            }
        }

        Ok(Self {
            showroom,
            json: args.json,
        })
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Read a JSON document from a file, `-` meaning stdin
pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}
