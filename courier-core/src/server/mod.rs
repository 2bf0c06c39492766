//! The listener pair: one loop for text messages, one for files.
//!
//! Both loops run as independent tokio tasks sharing only the shutdown
//! token. Within a loop connections are served strictly in acceptance
//! order; across the two loops there is no ordering at all.

pub mod file;
pub mod listener;
pub mod message;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::codec::Framing;
use crate::codec::frame::DEFAULT_MAX_FILE_SIZE;
use crate::error::CourierError;
use crate::network::{DEFAULT_MAX_LINE_LENGTH, Endpoint};
use crate::state::ListenerPhase;
use crate::storage::{DEFAULT_DATE_FORMAT, StorageNamer};

pub use file::FileService;
pub use listener::{Listener, Service};
pub use message::MessageService;

/// Tunables for the listener pair. Endpoints are passed separately.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Directory under which the dated folders are created.
    pub storage_root: PathBuf,
    /// strftime pattern for the dated folder names.
    pub date_format: String,
    pub framing: Framing,
    pub max_file_size: u64,
    pub max_line_length: usize,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("."),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            framing: Framing::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

// ── Server ───────────────────────────────────────────────────────

pub struct Server {
    message: Listener,
    file: Listener,
    namer: Arc<StorageNamer>,
    options: ServerOptions,
    shutdown: CancellationToken,
}

impl Server {
    /// Bind both endpoints. Fails if either cannot be bound.
    pub async fn bind(
        message_endpoint: Endpoint,
        file_endpoint: Endpoint,
        options: ServerOptions,
    ) -> Result<Self, CourierError> {
        let message = Listener::bind("message", message_endpoint).await?;
        let file = Listener::bind("file", file_endpoint).await?;
        let namer = Arc::new(
            StorageNamer::new(options.storage_root.clone()).with_date_format(options.date_format.clone()),
        );

        Ok(Self {
            message,
            file,
            namer,
            options,
            shutdown: CancellationToken::new(),
        })
    }

    /// Bind the fixed loopback endpoints (`127.0.0.1:8080` and `127.0.0.1:8081`).
    pub async fn bind_local(options: ServerOptions) -> Result<Self, CourierError> {
        Self::bind(Endpoint::message(), Endpoint::file(), options).await
    }

    pub fn message_addr(&self) -> SocketAddr {
        self.message.local_addr()
    }

    pub fn file_addr(&self) -> SocketAddr {
        self.file.local_addr()
    }

    pub fn message_phase(&self) -> watch::Receiver<ListenerPhase> {
        self.message.phase()
    }

    pub fn file_phase(&self) -> watch::Receiver<ListenerPhase> {
        self.file.phase()
    }

    pub fn namer(&self) -> Arc<StorageNamer> {
        Arc::clone(&self.namer)
    }

    /// Obtain a token that stops both loops when cancelled.
    pub fn stop_handle(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Request both loops to stop.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    /// Run both loops until the shutdown token is cancelled.
    pub async fn run(self) -> Result<(), CourierError> {
        info!(
            "serving messages on {} and files on {} ({} framing)",
            self.message.local_addr(),
            self.file.local_addr(),
            self.options.framing
        );

        let message_service = MessageService::new(self.options.max_line_length);
        let file_service = FileService::new(self.namer, self.options.framing, self.options.max_file_size);

        let message = tokio::spawn(self.message.run(message_service, self.shutdown.clone()));
        let file = tokio::spawn(self.file.run(file_service, self.shutdown.clone()));

        let (message, file) = tokio::join!(message, file);
        message.map_err(|e| CourierError::Other(format!("message listener task failed: {e}")))?;
        file.map_err(|e| CourierError::Other(format!("file listener task failed: {e}")))?;

        info!("server stopped");
        Ok(())
    }
}
