use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use blocksafari::config::{Cli, Settings};
use blocksafari::render::HtmlRenderer;
use blocksafari::server::{self, AppContext};
use blocksafari::Client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let settings = Settings::load(&cli)?;
    let client = Client::new(settings.rpc_url(), settings.client_options()?)?;
    tracing::info!(
        "Using RPC server {} (timeout {}s)",
        client.node_url(),
        settings.timeout_secs
    );

    let ctx = AppContext::new(
        Arc::new(client.chain.clone()),
        Arc::new(HtmlRenderer),
        settings,
    );
    server::run(ctx).await
}
