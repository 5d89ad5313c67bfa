mod cli;
mod config;
mod run;

use chanscan_core::{lower_bound, ScanError};
use chrono::Utc;
use clap::Parser;
use report_writer::ReportWriter;
use telegram_client::HttpChannelApi;

#[tokio::main]
async fn main() -> Result<(), ScanError> {
    tracing_subscriber::fmt()
        .with_env_filter("chanscan=info,telegram_client=info,report_writer=info")
        .init();

    let args = cli::Args::parse();

    // All configuration problems are fatal and surface before any fetching.
    let keywords = config::load_keywords(&args.keywords)?;
    let channels = config::load_channels(&args.channels)?;
    let gateway = config::load_gateway_config(&args.config)?;
    let bound = lower_bound(args.window_mode(), Utc::now())?;

    tracing::info!(
        "Scanning {} channel(s) for {} keyword(s), window since {}",
        channels.len(),
        keywords.len(),
        bound.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let api = HttpChannelApi::new(gateway.api_base, gateway.access_token);
    let mut posts_out = ReportWriter::open_append(&args.posts_out)?;
    let mut replies_out = ReportWriter::open_append(&args.comments_out)?;

    let report = run::run_scan(
        &api,
        &channels,
        &keywords,
        bound,
        &mut posts_out,
        &mut replies_out,
    )
    .await?;

    tracing::info!(
        "Saved {} post(s) to {} and {} repl(ies) to {}",
        report.posts_matched,
        args.posts_out,
        report.replies_matched,
        args.comments_out
    );

    // Per-channel failures do not fail the run; they are summarized for the
    // operator and the process still exits 0.
    if !report.completed_cleanly() {
        tracing::warn!("{} channel(s) could not be scanned:", report.failures.len());
        for failure in &report.failures {
            tracing::warn!("  {}: {}", failure.channel, failure.error);
        }
    }

    Ok(())
}
