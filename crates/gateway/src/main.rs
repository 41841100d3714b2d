use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use content_gateway::config::Config;
use content_gateway::server;
use tokio::runtime;
use tracing_subscriber::filter::EnvFilter;

const THREAD_NAME: &str = "content-gateway";

#[derive(Debug, Parser)]
#[command(name = "content-gateway", version)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the listen address from the configuration.
    #[arg(short, long)]
    listen_address: Option<SocketAddr>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(listen_address) = args.listen_address {
        config.network.listen_address = listen_address;
    }

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name(THREAD_NAME)
        .build()?;

    runtime.block_on(server::serve(config))?;

    Ok(())
}
