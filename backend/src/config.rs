//! Runtime configuration read from `SKILLBOARD_*` environment variables.
//!
//! Every setting has a default so the server starts with no environment at all.
//! A value that fails to parse is logged and replaced by its default.

use common::college::CollegeDirectory;
use log::warn;
use rusqlite::Connection;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB: &str = "skillboard.sqlite";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file holding the trend records.
    pub db_path: PathBuf,
    /// Optional JSON array of college names replacing the built-in list.
    pub colleges_file: Option<PathBuf>,
    pub open_browser: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB),
            colleges_file: None,
            open_browser: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("SKILLBOARD_HOST").unwrap_or(defaults.host),
            port: parsed_var("SKILLBOARD_PORT", defaults.port),
            db_path: env::var("SKILLBOARD_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            colleges_file: env::var("SKILLBOARD_COLLEGES_FILE").ok().map(PathBuf::from),
            open_browser: parsed_var("SKILLBOARD_OPEN_BROWSER", defaults.open_browser),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn open_db(&self) -> rusqlite::Result<Connection> {
        Connection::open(&self.db_path)
    }

    /// Loads the college directory, falling back to the built-in list when the
    /// configured file is missing or unreadable.
    pub fn load_colleges(&self) -> CollegeDirectory {
        let Some(path) = &self.colleges_file else {
            return CollegeDirectory::default();
        };
        let names = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).map_err(|e| e.to_string()));
        match names {
            Ok(names) => CollegeDirectory::new(names),
            Err(e) => {
                warn!("Could not load colleges from {}: {}; using built-in list", path.display(), e);
                CollegeDirectory::default()
            }
        }
    }
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}
