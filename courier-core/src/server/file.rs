//! The file endpoint: one frame in, stored under a dated name, one line out.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_util::codec::FramedRead;
use tracing::debug;

use crate::codec::payload::read_legacy_frame;
use crate::codec::{FileFrame, FileFrameCodec, Framing};
use crate::error::CourierError;
use crate::protocol::FILE_RECEIVED;
use crate::server::listener::Service;
use crate::storage::StorageNamer;

#[derive(Debug, Clone)]
pub struct FileService {
    namer: Arc<StorageNamer>,
    framing: Framing,
    max_file_size: u64,
}

impl FileService {
    pub fn new(namer: Arc<StorageNamer>, framing: Framing, max_file_size: u64) -> Self {
        Self {
            namer,
            framing,
            max_file_size,
        }
    }

    async fn receive(&self, stream: &mut TcpStream) -> Result<FileFrame, CourierError> {
        match self.framing {
            Framing::LengthPrefixed => {
                let mut frames = FramedRead::new(stream, FileFrameCodec::new(self.max_file_size));
                match frames.next().await {
                    Some(frame) => frame,
                    None => Err(CourierError::ConnectionClosed("a file header")),
                }
            }
            Framing::Legacy => read_legacy_frame(stream, self.max_file_size).await,
        }
    }
}

#[async_trait]
impl Service for FileService {
    async fn handle(&self, stream: &mut TcpStream) -> Result<String, CourierError> {
        let frame = self.receive(stream).await?;
        let stored = self.namer.store(&frame.extension, &frame.payload).await?;
        debug!(
            "stored {} bytes as {}",
            frame.payload.len(),
            stored.relative_path().display()
        );
        Ok(FILE_RECEIVED.to_string())
    }
}
