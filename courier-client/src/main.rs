//! Courier client entry point.
//!
//! ```text
//! courier-client message <TEXT>   Send one line, print the server's echo
//! courier-client file <PATH>      Send one file, print the confirmation
//! courier-client probe            Report whether the server accepts connections
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use courier_client::config::ClientConfig;
use courier_client::input::message_text;
use courier_core::{Client, Outcome};

const BUSY: &str = "Server is busy! Try again later.";

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "courier-client", about = "Send a text message or a file to the courier server")]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "courier-client.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a single line of text.
    Message { text: String },
    /// Send a file.
    File { path: PathBuf },
    /// Check whether the server accepts connections.
    Probe,
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = ClientConfig::load(&cli.config);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Command::Message { text } = &cli.command
        && message_text(text).is_none()
    {
        eprintln!("Nothing to send: the message is empty.");
        return ExitCode::FAILURE;
    }

    let client = Client::local().with_options(config.to_client_options());

    if !client.can_connect_to_server().await {
        eprintln!("{BUSY}");
        return ExitCode::FAILURE;
    }

    let outcome = match cli.command {
        Command::Probe => {
            println!("Server is reachable at {}", client.message_endpoint());
            return ExitCode::SUCCESS;
        }
        Command::Message { text } => client.send_message(&text).await,
        Command::File { path } => client.send_file(&path).await,
    };

    report(&outcome)
}

fn report(outcome: &Outcome) -> ExitCode {
    if outcome.is_ok() {
        println!("{}", outcome.message());
        ExitCode::SUCCESS
    } else {
        eprintln!("Cannot reach the server: {}", outcome.message());
        ExitCode::FAILURE
    }
}
