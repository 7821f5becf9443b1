use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use feedpost::config::Config;
use feedpost::feed::build_client;
use feedpost::ingest::{Ingestor, TracingSink};
use feedpost::publish::{publish_all, SiteWriter};

#[derive(Parser, Debug)]
#[command(name = "feedpost", about = "Import posts from external RSS/Atom feeds")]
struct Args {
    /// Configuration file listing the external sources
    #[arg(long, value_name = "FILE", default_value = "_config.toml")]
    config: PathBuf,

    /// Site root; posts are written to <DIR>/posts/
    #[arg(long, value_name = "DIR", default_value = ".")]
    site_dir: PathBuf,

    /// Print records as JSON lines instead of writing posts
    #[arg(long)]
    dry_run: bool,

    /// Override the per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if config.external_sources.is_empty() {
        tracing::info!(path = %args.config.display(), "No external sources configured");
        return Ok(());
    }

    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.timeout());
    let client = build_client(&config.user_agent).context("Failed to build HTTP client")?;

    let ingestor = Ingestor::new(client, Arc::new(TracingSink))
        .with_timeout(timeout)
        .with_concurrency(config.concurrency);
    let report = ingestor.run(&config.external_sources).await;

    if args.dry_run {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for record in &report.records {
            serde_json::to_writer(&mut out, record).context("Failed to serialize record")?;
            writeln!(out)?;
        }
    } else {
        let mut writer = SiteWriter::new(&args.site_dir);
        let written = publish_all(&mut writer, &report.records, &config.post_extension)
            .with_context(|| {
                format!("Failed to write posts under {}", writer.root().display())
            })?;
        tracing::info!(posts = written, "Posts written");
    }

    tracing::info!(
        records = report.records.len(),
        skipped = report.skips.len(),
        "External posts imported"
    );
    Ok(())
}
