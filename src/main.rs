//! diceroll - dice roller web server

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use diceroll::{init_tracing, Config, Server};
use tracing::info;

/// Tabletop dice notation roller
#[derive(Parser, Debug)]
#[command(name = "diceroll", version, about = "Serve the dice roller over HTTP")]
struct Args {
    /// Address to listen on (overrides config)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Directory served under /static (overrides config)
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Config file (default: diceroll.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = args.static_dir {
        config.static_dir = dir;
    }

    init_tracing(config.log_format, "diceroll=info,tower_http=debug");

    let server = Arc::new(Server::new(config));

    let signal_server = server.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            signal_server.shutdown();
        }
    });

    server.run().await?;

    Ok(())
}
