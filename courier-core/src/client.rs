//! Client connector: one connection, one request, one reply.
//!
//! Every public operation returns an [`Outcome`]; transport faults are
//! captured here and never escape as errors. Each call makes a single
//! attempt with the operating system's default connect behaviour.

use std::path::Path;

use futures::SinkExt;
use tokio::net::TcpStream;
use tokio_util::codec::FramedWrite;
use tracing::debug;

use crate::codec::extension::{encode_extension, extension_of};
use crate::codec::frame::DEFAULT_MAX_FILE_SIZE;
use crate::codec::payload::write_legacy_frame;
use crate::codec::{FileFrame, FileFrameCodec, Framing};
use crate::error::CourierError;
use crate::network::{DEFAULT_MAX_LINE_LENGTH, Endpoint, read_line, write_line};
use crate::outcome::Outcome;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Must match the server's framing.
    pub framing: Framing,
    pub max_file_size: u64,
    pub max_line_length: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            framing: Framing::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// Lightweight connectivity probe: connect, then drop the connection.
///
/// Not transactional; the server may change state before the next send.
pub async fn can_connect(endpoint: Endpoint) -> bool {
    match TcpStream::connect(endpoint.socket_addr()).await {
        Ok(_) => true,
        Err(e) => {
            debug!("probe of {endpoint} failed: {e}");
            false
        }
    }
}

// ── Client ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Client {
    message_endpoint: Endpoint,
    file_endpoint: Endpoint,
    options: ClientOptions,
}

impl Client {
    pub fn new(message_endpoint: Endpoint, file_endpoint: Endpoint) -> Self {
        Self {
            message_endpoint,
            file_endpoint,
            options: ClientOptions::default(),
        }
    }

    /// Client for the fixed loopback endpoints.
    pub fn local() -> Self {
        Self::new(Endpoint::message(), Endpoint::file())
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn message_endpoint(&self) -> Endpoint {
        self.message_endpoint
    }

    pub fn file_endpoint(&self) -> Endpoint {
        self.file_endpoint
    }

    /// Probe the message endpoint.
    pub async fn can_connect_to_server(&self) -> bool {
        can_connect(self.message_endpoint).await
    }

    /// Send one line of text and return the server's reply line.
    pub async fn send_message(&self, text: &str) -> Outcome {
        Outcome::from_result(self.try_send_message(text).await)
    }

    /// Send the file at `path` and return the server's reply line.
    ///
    /// The whole file is read into memory before connecting.
    pub async fn send_file(&self, path: impl AsRef<Path>) -> Outcome {
        Outcome::from_result(self.try_send_file(path.as_ref()).await)
    }

    // ── Internal ─────────────────────────────────────────────────

    async fn try_send_message(&self, text: &str) -> Result<String, CourierError> {
        if text.contains(['\n', '\r']) {
            return Err(CourierError::MultiLineMessage);
        }

        let mut stream = TcpStream::connect(self.message_endpoint.socket_addr()).await?;
        write_line(&mut stream, text).await?;
        read_line(&mut stream, self.options.max_line_length, "a reply").await
    }

    async fn try_send_file(&self, path: &Path) -> Result<String, CourierError> {
        let extension = extension_of(path);
        encode_extension(&extension)?;

        let payload = tokio::fs::read(path).await?;
        let size = payload.len() as u64;
        if size > self.options.max_file_size {
            return Err(CourierError::PayloadTooLarge {
                size,
                max: self.options.max_file_size,
            });
        }
        let frame = FileFrame::new(extension, payload);

        let mut stream = TcpStream::connect(self.file_endpoint.socket_addr()).await?;
        debug!(
            "sending {size} bytes ({}) to {} with {} framing",
            frame.extension, self.file_endpoint, self.options.framing
        );

        let (reader, mut writer) = stream.split();
        let reply = read_line(reader, self.options.max_line_length, "a reply");
        tokio::pin!(reply);

        let upload = async {
            match self.options.framing {
                Framing::LengthPrefixed => {
                    let mut frames = FramedWrite::new(&mut writer, FileFrameCodec::new(self.options.max_file_size));
                    frames.send(frame).await
                }
                Framing::Legacy => write_legacy_frame(&mut writer, &frame).await,
            }
        };

        // The server may refuse the header and hang up mid-upload; its
        // reply line is the result even when our write then fails.
        tokio::select! {
            line = &mut reply => line,
            sent = upload => match sent {
                Ok(()) => reply.await,
                Err(e) => {
                    debug!("upload to {} interrupted: {e}", self.file_endpoint);
                    reply.await.map_err(|_| e)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// An endpoint nothing listens on.
    async fn dead_endpoint() -> Endpoint {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Endpoint::from(addr)
    }

    #[tokio::test]
    async fn probe_fails_without_server() {
        assert!(!can_connect(dead_endpoint().await).await);
    }

    #[tokio::test]
    async fn probe_succeeds_with_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = Endpoint::from(listener.local_addr().unwrap());
        assert!(can_connect(endpoint).await);
    }

    #[tokio::test]
    async fn send_without_server_is_a_fail_outcome() {
        let dead = dead_endpoint().await;
        let client = Client::new(dead, dead);
        let outcome = client.send_message("hello").await;
        assert!(outcome.is_fail());
        assert!(!outcome.message().is_empty());
    }

    #[tokio::test]
    async fn multi_line_message_is_rejected_before_connecting() {
        let dead = dead_endpoint().await;
        let outcome = Client::new(dead, dead).send_message("one\ntwo").await;
        assert!(outcome.is_fail());
        assert_eq!(outcome.message(), CourierError::MultiLineMessage.to_string());
    }

    #[tokio::test]
    async fn missing_file_is_a_fail_outcome() {
        let dead = dead_endpoint().await;
        let dir = tempfile::tempdir().unwrap();
        let outcome = Client::new(dead, dead)
            .send_file(dir.path().join("absent.txt"))
            .await;
        assert!(outcome.is_fail());
    }

    #[tokio::test]
    async fn over_long_extension_is_rejected() {
        let dead = dead_endpoint().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.abcdefghijklmnopqrs");
        tokio::fs::write(&path, b"x").await.unwrap();

        let outcome = Client::new(dead, dead).send_file(&path).await;
        assert!(outcome.is_fail());
        assert!(outcome.message().contains("extension too long"));
    }
}
