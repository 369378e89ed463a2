//! Demo server for the simple JSON data source protocol.
//!
//! Serves a fixed set of handlers (`A`, `B`, `C`, `Crash`) so a dashboard
//! can be pointed at it without writing a data source first.

mod demo;

use std::path::PathBuf;

use clap::Parser;
use simplejson_server::config::{load_config, ServerConfig};
use simplejson_server::lifecycle;

#[derive(Parser)]
#[command(name = "simplejson")]
#[command(about = "Serve demo data over the simple JSON protocol", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    lifecycle::serve(config, demo::registry()).await?;
    Ok(())
}
