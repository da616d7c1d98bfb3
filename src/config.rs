// src/config.rs

use std::{env, path::PathBuf};

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://pncp.gov.br/api/consulta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    // .env first, then the process environment
    pub fn new() -> Self {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("PNCP_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_secs = match lookup("PNCP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "PNCP_TIMEOUT_SECS is not a number, using default");
                defaults.timeout_secs
            }),
            None => defaults.timeout_secs,
        };

        let export_dir = lookup("PNCP_EXPORT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        Self {
            base_url,
            timeout_secs,
            export_dir,
        }
    }
}
