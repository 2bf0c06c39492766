//! The text message endpoint: one line in, one line out.

use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::error::CourierError;
use crate::network::{DEFAULT_MAX_LINE_LENGTH, read_line};
use crate::protocol::message_reply;
use crate::server::listener::Service;

#[derive(Debug, Clone)]
pub struct MessageService {
    max_line_length: usize,
}

impl MessageService {
    pub fn new(max_line_length: usize) -> Self {
        Self { max_line_length }
    }
}

impl Default for MessageService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_LENGTH)
    }
}

#[async_trait]
impl Service for MessageService {
    async fn handle(&self, stream: &mut TcpStream) -> Result<String, CourierError> {
        let message = read_line(stream, self.max_line_length, "a message").await?;
        Ok(message_reply(&message))
    }
}
