use anyhow::Context;
use clap::Parser;
use mediascan::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "mediascan=debug"
    } else {
        "mediascan=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let host = cli.host.clone();
    cli.execute()
        .await
        .with_context(|| format!("scan of {} failed", host))
}
