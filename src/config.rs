//! Optional on-disk configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::{CONFIG_PATH, DEFAULT_PORT};

/// Settings loaded once at startup and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServiceConfig {
    /// Reads `config.json` from the working directory. A missing or
    /// unusable file is the normal first-run path, not an error.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("no config at {}, using defaults: {err}", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                debug!(
                    "ignoring malformed config at {}, using defaults: {err}",
                    path.display()
                );
                Self::default()
            }
        }
    }
}
