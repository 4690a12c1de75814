//! The bearer token, shared by every request and persisted between runs.
//!
//! Only login writes it and only logout or a 401 clears it.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Default)]
pub struct TokenStore {
    path: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl TokenStore {
    /// Opens the store backed by `path`, picking up a token saved by a
    /// previous run.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = read_token(&path);
        debug!(path = %path.display(), found = token.is_some(), "opened token store");
        Self {
            path: Some(path),
            token: RwLock::new(token),
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }

    pub fn set(&self, token: &str) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        if let Some(path) = &self.path {
            if let Err(err) = write_token(path, token) {
                warn!(path = %path.display(), error = %err, "could not persist token");
            }
        }
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => warn!(path = %path.display(), error = %err, "could not remove token file"),
            }
        }
    }
}

fn read_token(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => value
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable token file");
            None
        }
    }
}

fn write_token(path: &Path, token: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json!({ TOKEN_KEY: token }).to_string())
}
