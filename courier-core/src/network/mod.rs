pub mod endpoint;
pub mod lines;

pub use endpoint::{Endpoint, FILE_PORT, MESSAGE_PORT};
pub use lines::{DEFAULT_MAX_LINE_LENGTH, read_line, write_line};
