//! tts-batch - batch text-to-speech across a pool of synthesis servers
//!
//! Converts a list of text records into audio files by spreading requests over
//! a fixed pool of identical servers, reporting progress as results arrive and
//! retrying failures once on the first server.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Work items, addresses and outcomes
//! - [`input`] - Loading records from JSON
//! - [`synthesis`] - Request encoding, the HTTP executor and playback hook
//! - [`storage`] - Writing audio files
//! - [`dispatch`] - Server pool, parallel phase, retry phase and reporting
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tts_batch::config::Config;
//! use tts_batch::dispatch::{ConsoleReporter, Dispatcher};
//! use tts_batch::storage::AudioSink;
//! use tts_batch::synthesis::SynthesisClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let items = tts_batch::input::load_items(&config.io.input_path, &config.io.marker).await?;
//!
//!     let sink = AudioSink::new(&config.io.output_dir, &config.synthesis.format)?;
//!     let client = SynthesisClient::new(&config.synthesis, sink)?;
//!     let dispatcher = Dispatcher::new(Arc::new(client), config.server_pool()?, Arc::new(ConsoleReporter));
//!
//!     let report = dispatcher.run(&items).await;
//!     std::process::exit(report.exit_code());
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod models;
pub mod storage;
pub mod synthesis;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::dispatch::{BatchReport, Dispatcher, Reporter, ServerPool};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Address, Outcome, WorkItem};
    pub use crate::synthesis::{Executor, SynthesisClient};
}

// Direct re-exports for convenience
pub use models::{Address, Outcome, WorkItem};
