//! Reply texts written back by the listeners.
//!
//! ```text
//! message endpoint   client ──"{text}\n"──────────────► server
//!                    client ◄─"New message from client: {text}\n"
//!
//! file endpoint      client ──[header][payload]──────► server
//!                    client ◄─"File recieved!\n"
//!
//! any fault          client ◄─"Unexpected error: {description}\n"
//! ```

/// Confirmation sent after a file has been stored.
pub const FILE_RECEIVED: &str = "File recieved!";

/// Echo sent back for a text message.
pub fn message_reply(message: &str) -> String {
    format!("New message from client: {message}")
}

/// Reply describing a server-side fault.
pub fn failure_reply(description: &str) -> String {
    format!("Unexpected error: {description}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates() {
        assert_eq!(message_reply("hi"), "New message from client: hi");
        assert_eq!(failure_reply("boom"), "Unexpected error: boom");
        assert_eq!(FILE_RECEIVED, "File recieved!");
    }
}
