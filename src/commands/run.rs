use anyhow::{Context, Result};
use std::sync::Arc;

use tts_batch::config::Config;
use tts_batch::dispatch::{BatchReport, ConsoleReporter, Dispatcher};
use tts_batch::input::load_items;
use tts_batch::storage::AudioSink;
use tts_batch::synthesis::{playback, SynthesisClient};

/// Synthesize every record of the input file, returning the process exit code
pub async fn run(config: Config) -> Result<i32> {
    let items = load_items(&config.io.input_path, &config.io.marker)
        .await
        .context("Failed to load input records")?;

    let dispatcher = build_dispatcher(&config)?;

    let report = dispatcher.run(&items).await;
    print_summary(&report, &config);

    Ok(report.exit_code())
}

fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let sink = AudioSink::new(&config.io.output_dir, &config.synthesis.format).with_context(
        || format!("Failed to create output directory {}", config.io.output_dir.display()),
    )?;

    let client = SynthesisClient::new(&config.synthesis, sink)
        .context("Failed to create HTTP client")?
        .with_playback(playback::from_config(&config.playback));

    let pool = config.server_pool()?;
    tracing::info!(
        servers = pool.len(),
        retry_target = %pool.primary(),
        timeout_secs = config.synthesis.timeout_secs,
        "Server pool ready"
    );

    Ok(Dispatcher::new(Arc::new(client), pool, Arc::new(ConsoleReporter)))
}

fn print_summary(report: &BatchReport, config: &Config) {
    println!("\nSynthesis Summary");
    println!("=================");
    println!("Total items: {}", report.total);
    println!("Succeeded first pass: {}", report.initial_successes());
    println!("Failed first pass: {}", report.initial_failures());
    println!("Recovered on retry: {}", report.recovered());

    let terminal: Vec<_> = report.terminal_failures().collect();
    println!("Failed permanently: {}", terminal.len());
    for outcome in &terminal {
        println!("  {} :: {}", outcome.item_id, outcome.detail);
    }

    println!("Output directory: {}", config.io.output_dir.display());

    tracing::info!(
        total = report.total,
        succeeded = report.succeeded(),
        failed = terminal.len(),
        "Batch finished"
    );
}
