//! # courier-client
//!
//! Command-line sender for the courier server: probes the server, then
//! sends one line of text or one file and prints the reply.

pub mod config;
pub mod input;
