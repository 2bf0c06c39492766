//! Checks on what the user typed before anything touches the network.

/// The text to send, or `None` when there is nothing worth sending.
///
/// Empty input is ignored without probing the server.
pub fn message_text(text: &str) -> Option<&str> {
    if text.is_empty() { None } else { Some(text) }
}
