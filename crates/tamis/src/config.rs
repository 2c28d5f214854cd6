//! Environment-backed configuration.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable naming the SQLite database file.
pub const DB_ENV_VAR: &str = "TAMIS_DB";

const DEFAULT_DB_PATH: &str = "tamis.db";

/// Pipeline configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database holding both tables.
    pub db_path: PathBuf,
}

impl Config {
    /// Read configuration from the environment, honoring a `.env` file.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        match env::var(DB_ENV_VAR) {
            Ok(value) if value.trim().is_empty() => Err(Error::Config(format!(
                "{DB_ENV_VAR} is set but empty"
            ))),
            Ok(value) => Ok(Self {
                db_path: PathBuf::from(value),
            }),
            Err(_) => Ok(Self {
                db_path: PathBuf::from(DEFAULT_DB_PATH),
            }),
        }
    }

    /// Environment configuration, with an explicit path taking precedence.
    pub fn resolve(db_path: Option<PathBuf>) -> Result<Self> {
        match db_path {
            Some(db_path) => Ok(Self { db_path }),
            None => Self::from_env(),
        }
    }
}
