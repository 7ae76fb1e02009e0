//! Configuration loading from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Runtime configuration for the inference server.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub model_path: PathBuf,
    /// Largest batch accepted by one request. 0 disables the cap.
    pub max_batch_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            model_path: PathBuf::from("data/model/billet_artifact.json"),
            max_batch_rows: 10_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {}", raw))?,
            Err(_) => defaults.port,
        };

        let max_batch_rows = match env::var("MAX_BATCH_ROWS") {
            Ok(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("Invalid MAX_BATCH_ROWS: {}", raw))?,
            Err(_) => defaults.max_batch_rows,
        };

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port,
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            max_batch_rows,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
