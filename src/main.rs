mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tts_batch::config::{split_addresses, Config};
use tts_batch::error::Error;

/// Exit code for failures before any item was dispatched
const EXIT_SETUP_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "tts-batch",
    version,
    about = "Batch text-to-speech across a pool of synthesis servers",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize every record of an input file
    Run(RunArgs),

    /// Validate configuration and show the server pool
    Check,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// JSON file holding the record array
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for audio files
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comma separated server addresses (host:port)
    #[arg(short, long)]
    servers: Option<String>,

    /// Bearer token for the synthesis servers
    #[arg(long, env = "TTS_BATCH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Audio format (wav, mp3, ...)
    #[arg(short, long)]
    format: Option<String>,

    /// Prefix of the line holding the text to synthesize
    #[arg(long)]
    marker: Option<String>,

    /// Play each file after it is written
    #[arg(long, default_value = "false")]
    play: bool,

    /// Player program for playback; implies --play
    #[arg(long)]
    play_command: Option<String>,
}

impl RunArgs {
    /// Apply command-line overrides on top of file and environment config
    fn apply(self, config: &mut Config) {
        if let Some(input) = self.input {
            config.io.input_path = input;
        }
        if let Some(output) = self.output {
            config.io.output_dir = output;
        }
        if let Some(servers) = self.servers {
            config.servers.addresses = split_addresses(&servers);
        }
        if let Some(api_key) = self.api_key {
            config.synthesis.api_key = api_key;
        }
        if let Some(format) = self.format {
            config.synthesis.format = format;
        }
        if let Some(marker) = self.marker {
            config.io.marker = marker;
        }
        if let Some(command) = self.play_command {
            config.playback.command = command;
            config.playback.enabled = true;
        }
        if self.play {
            config.playback.enabled = true;
        }
    }
}

#[tokio::main]
async fn main() {
    let code = match try_main().await {
        Ok(code) => code,
        Err(e) => {
            let category = Error::category_of(&e).label();
            tracing::error!(category, error = %e, "tts-batch failed");
            eprintln!("Error ({category}): {e:#}");
            EXIT_SETUP_FAILURE
        }
    };

    std::process::exit(code);
}

async fn try_main() -> Result<i32> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Initialize tracing/logging
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Run(args) => {
            args.apply(&mut config);
            config.validate()?;

            tracing::info!(
                input = %config.io.input_path.display(),
                output = %config.io.output_dir.display(),
                format = %config.synthesis.format,
                playback = config.playback.enabled,
                "Starting run command"
            );

            commands::run(config).await
        }

        Commands::Check => {
            commands::check(&config)?;
            Ok(0)
        }
    }
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("tts_batch=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("tts_batch={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
