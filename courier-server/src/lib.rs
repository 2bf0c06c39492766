//! # courier-server
//!
//! Runs the message listener (`127.0.0.1:8080`) and the file listener
//! (`127.0.0.1:8081`) side by side until Ctrl-C. Received files are
//! written to one directory per day under the configured storage root.

pub mod config;
