//! Courier server entry point.
//!
//! ```text
//! courier-server                  Run with courier-server.toml (or defaults)
//! courier-server --config <path>  Load a custom config TOML
//! courier-server --gen-config     Write default config to stdout
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use courier_core::Server;
use courier_server::config::ServerConfig;

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "courier-server", about = "Receive text messages and files over TCP")]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "courier-server.toml")]
    config: PathBuf,

    /// Print the default configuration to stdout and exit.
    #[arg(long)]
    gen_config: bool,
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        let text = toml::to_string_pretty(&ServerConfig::default())?;
        println!("{text}");
        return Ok(());
    }

    let config = ServerConfig::load(&cli.config);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("courier-server v{}", env!("CARGO_PKG_VERSION"));
    info!("storage root: {}", config.storage.root.display());
    info!("framing: {}", config.transfer.framing);

    // Bind failures are reported once; no retry.
    let server = match Server::bind_local(config.to_server_options()).await {
        Ok(server) => server,
        Err(e) => {
            error!("cannot start listeners: {e}");
            return Ok(());
        }
    };

    let stop = server.stop_handle();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Ctrl-C received, shutting down");
        stop.cancel();
    });

    if let Err(e) = server.run().await {
        error!("{e}");
    }

    Ok(())
}
