//! Configuration for the courier server.
//!
//! Endpoints are fixed and deliberately absent from this file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use courier_core::codec::frame::DEFAULT_MAX_FILE_SIZE;
use courier_core::network::DEFAULT_MAX_LINE_LENGTH;
use courier_core::storage::DEFAULT_DATE_FORMAT;
use courier_core::{Framing, ServerOptions};

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Where received files go.
    pub storage: StorageConfig,
    /// Wire settings.
    pub transfer: TransferConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root under which one directory per day is created.
    pub root: PathBuf,
    /// strftime pattern for the per-day directory name.
    pub date_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// "length-prefixed" or "legacy". Clients must use the same value.
    pub framing: Framing,
    /// Largest accepted file in bytes.
    pub max_file_size: u64,
    /// Longest accepted message line in bytes.
    pub max_line_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            date_format: DEFAULT_DATE_FORMAT.into(),
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            framing: Framing::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

impl ServerConfig {
    /// Load configuration from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("invalid config {}: {e}; using defaults", path.display());
                Self::default()
            }),
            Err(_) => {
                tracing::info!("no config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn to_server_options(&self) -> ServerOptions {
        ServerOptions {
            storage_root: self.storage.root.clone(),
            date_format: self.storage.date_format.clone(),
            framing: self.transfer.framing,
            max_file_size: self.transfer.max_file_size,
            max_line_length: self.transfer.max_line_length.max(1),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
