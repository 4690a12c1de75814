use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout: Duration,
    pub token_file: PathBuf,
    pub download_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("DDDB_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match lookup("DDDB_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("DDDB_REQUEST_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let token_file = lookup("DDDB_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_token_file);

        let download_dir = lookup("DDDB_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_download_dir);

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs.max(1)),
            token_file,
            download_dir,
        })
    }
}

fn default_token_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("dddb")
        .join("session.json")
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
