//! Configuration for the courier client.

use std::path::Path;

use serde::{Deserialize, Serialize};

use courier_core::codec::frame::DEFAULT_MAX_FILE_SIZE;
use courier_core::network::DEFAULT_MAX_LINE_LENGTH;
use courier_core::{ClientOptions, Framing};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub transfer: TransferConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Must match the server: "length-prefixed" or "legacy".
    pub framing: Framing,
    /// Refuse to send files larger than this many bytes.
    pub max_file_size: u64,
    /// Longest accepted reply line in bytes.
    pub max_line_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
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
            level: "warn".into(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("invalid config {}: {e}; using defaults", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn to_client_options(&self) -> ClientOptions {
        ClientOptions {
            framing: self.transfer.framing,
            max_file_size: self.transfer.max_file_size,
            max_line_length: self.transfer.max_line_length.max(1),
        }
    }
}
