//! Runtime configuration loaded from environment variables.
//!
//! # Responsibility
//! - Resolve application, storage, model and logging settings with defaults.
//! - Keep parsing testable through an injectable variable lookup.
//! - Read a `.env` file in the working directory as a lower-priority source.
//!
//! # Invariants
//! - Process environment variables win over `.env` entries.
//! - The `.env` file is read, never exported into the process environment.
//! - Relative paths are resolved against the process working directory.
//! - `database_path` defaults to `<database_dir>/app.db`.
//! - Unparseable values are rejected, never silently defaulted.

use crate::extract::llm::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};
use crate::extract::OllamaBackend;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_APP_NAME: &str = "Action Item Extractor";
const DEFAULT_APP_VERSION: &str = "1.0.0";
const DEFAULT_DATABASE_DIR: &str = "data";
const DEFAULT_DATABASE_FILE: &str = "app.db";
const DEFAULT_FRONTEND_DIR: &str = "frontend";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const ENV_FILE_NAME: &str = ".env";

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    WorkingDirectory(String),
    EnvFile {
        path: PathBuf,
        details: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(f, "invalid value `{value}` for {key}; expected {expected}"),
            Self::WorkingDirectory(details) => {
                write!(f, "cannot resolve working directory: {details}")
            }
            Self::EnvFile { path, details } => {
                write!(f, "cannot read env file `{}`: {details}", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    /// Exposes internal error details in HTTP error bodies.
    pub debug: bool,
    pub database_dir: PathBuf,
    pub database_path: PathBuf,
    pub ollama_model: String,
    pub ollama_base_url: String,
    pub frontend_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Settings {
    /// Loads settings from the process environment, falling back to
    /// `./.env` for keys the environment does not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|err| ConfigError::WorkingDirectory(err.to_string()))?;
        let file_vars = read_env_file(&cwd.join(ENV_FILE_NAME))?;
        Self::from_lookup(&cwd, |key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    /// Loads settings through `lookup`, resolving relative paths against
    /// `base_dir`.
    ///
    /// Keys: `APP_NAME`, `APP_VERSION`, `DEBUG`, `DATABASE_DIR`,
    /// `DATABASE_PATH`, `OLLAMA_MODEL`, `OLLAMA_BASE_URL`, `FRONTEND_DIR`,
    /// `BIND_ADDR`, `LOG_LEVEL`, `LOG_DIR`. Blank values count as unset.
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let path = |key: &str, default: &str| {
            let raw = get(key).unwrap_or_else(|| default.to_string());
            resolve_path(base_dir, &raw)
        };

        let debug = match get("DEBUG") {
            Some(raw) => parse_bool("DEBUG", &raw)?,
            None => false,
        };

        let database_dir = path("DATABASE_DIR", DEFAULT_DATABASE_DIR);
        let database_path = match get("DATABASE_PATH") {
            Some(raw) => resolve_path(base_dir, &raw),
            None => database_dir.join(DEFAULT_DATABASE_FILE),
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                value: bind_raw.clone(),
                expected: "host:port socket address",
            })?;

        let log_level = get("LOG_LEVEL").unwrap_or_else(|| crate::default_log_level().to_string());

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_version: get("APP_VERSION").unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
            debug,
            database_dir,
            database_path,
            ollama_model: get("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            ollama_base_url: get("OLLAMA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            frontend_dir: path("FRONTEND_DIR", DEFAULT_FRONTEND_DIR),
            bind_addr,
            log_level,
            log_dir: path("LOG_DIR", DEFAULT_LOG_DIR),
        })
    }

    /// Builds the Ollama backend described by these settings.
    pub fn ollama_backend(&self) -> OllamaBackend {
        OllamaBackend::new(self.ollama_base_url.as_str(), self.ollama_model.as_str())
    }
}

/// Parses a dotenv file into key/value pairs. A missing file yields an
/// empty map.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let to_error = |err: dotenvy::Error| ConfigError::EnvFile {
        path: path.to_path_buf(),
        details: err.to_string(),
    };
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(err) if err.not_found() => return Ok(HashMap::new()),
        Err(err) => return Err(to_error(err)),
    };
    entries.map(|entry| entry.map_err(to_error)).collect()
}

fn resolve_path(base_dir: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            expected: "true|false",
        }),
    }
}
