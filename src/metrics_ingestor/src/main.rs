use chrono::Local;
use clap::Parser;
use metrics_ingestor::{
    Error,
    cli::commands::Cli,
    fetch::fetch_all,
    providers::build_provider,
    registry,
};
use shared_utils::{
    config::Credentials,
    env::resolve_config_path,
    layout::{DEFAULT_OUTPUT_DIR, DataLayout, run_stamp},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref());
    info!(path = %config_path, "loading credentials");
    let credentials = Credentials::load(&config_path)?;

    let layout = DataLayout::new(&cli.data_dir, DEFAULT_OUTPUT_DIR);
    let indices = registry::select(&cli.only)?;
    let stamp = run_stamp(&Local::now());

    let summary = fetch_all(
        |index| build_provider(index.source, &credentials),
        &layout,
        &indices,
        &stamp,
    )
    .await?;

    info!(
        updated = summary.updated,
        no_data = summary.no_data,
        failed = summary.failed.len(),
        "fetch finished"
    );
    if !summary.failed.is_empty() {
        warn!(codes = ?summary.failed, "failed indices");
    }
    Ok(())
}
