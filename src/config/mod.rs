//! Configuration management for tts-batch
//!
//! This module handles loading and validating configuration from environment variables,
//! TOML files, and command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dispatch::pool::ServerPool;
use crate::error::{Error, Result};
use crate::models::{Address, DEFAULT_MARKER};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Synthesis server pool
    pub servers: ServersConfig,

    /// Request parameters sent to every server
    pub synthesis: SynthesisConfig,

    /// Input and output locations
    pub io: IoConfig,

    /// Optional playback after each successful write
    pub playback: PlaybackConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server pool configuration
///
/// Explicit `addresses` take precedence; otherwise `count` consecutive ports
/// starting at `port_start` on `host` are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServersConfig {
    pub addresses: Vec<String>,
    pub host: String,
    pub port_start: u16,
    pub count: u16,
}

impl Default for ServersConfig {
    fn default() -> Self {
        Self {
            addresses: Vec::new(),
            host: String::from("127.0.0.1"),
            port_start: 8080,
            count: 40,
        }
    }
}

/// Synthesis request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Path of the synthesis endpoint on every server
    pub endpoint_path: String,

    /// Bearer token sent in the authorization header
    pub api_key: String,

    /// Audio format requested and used as the output extension
    pub format: String,

    pub max_new_tokens: u32,
    pub chunk_length: u32,
    pub top_p: f64,
    pub repetition_penalty: f64,
    pub temperature: f64,
    pub use_memory_cache: String,

    /// Request timeout in seconds; synthesis of long text can be slow
    pub timeout_secs: u64,
}

impl SynthesisConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint_path: String::from("/v1/tts"),
            api_key: String::from("YOUR_API_KEY"),
            format: String::from("wav"),
            max_new_tokens: 1024,
            chunk_length: 300,
            top_p: 0.8,
            repetition_penalty: 1.1,
            temperature: 0.8,
            use_memory_cache: String::from("off"),
            timeout_secs: 3600,
        }
    }
}

/// Input/output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// JSON file holding the record array
    pub input_path: PathBuf,

    /// Directory receiving `<id>.<format>` files
    pub output_dir: PathBuf,

    /// Prefix of the line carrying the text to synthesize
    pub marker: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input.json"),
            output_dir: PathBuf::from("audio"),
            marker: String::from(DEFAULT_MARKER),
        }
    }
}

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub enabled: bool,

    /// Player program; the audio path is appended to `args`
    pub command: String,
    pub args: Vec<String>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: String::from("ffplay"),
            args: vec![
                String::from("-nodisp"),
                String::from("-autoexit"),
                String::from("-loglevel"),
                String::from("quiet"),
            ],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from defaults plus environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let mut config: Self = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(servers) = std::env::var("TTS_BATCH_SERVERS") {
            self.servers.addresses = split_addresses(&servers);
        }

        if let Ok(key) = std::env::var("TTS_BATCH_API_KEY") {
            self.synthesis.api_key = key;
        }

        if let Some(timeout) = std::env::var("TTS_BATCH_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.synthesis.timeout_secs = timeout;
        }

        if let Ok(dir) = std::env::var("TTS_BATCH_OUTPUT_DIR") {
            self.io.output_dir = PathBuf::from(dir);
        }

        if let Ok(level) = std::env::var("TTS_BATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.server_pool()?;

        if self.synthesis.format.trim().is_empty() {
            return Err(Error::config("audio format must not be empty"));
        }

        if !self.synthesis.endpoint_path.starts_with('/') {
            return Err(Error::config("endpoint_path must start with '/'"));
        }

        if self.synthesis.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than 0"));
        }

        if !(self.synthesis.top_p > 0.0 && self.synthesis.top_p <= 1.0) {
            return Err(Error::config("top_p must be in (0, 1]"));
        }

        if self.synthesis.temperature <= 0.0 {
            return Err(Error::config("temperature must be positive"));
        }

        if self.io.marker.is_empty() {
            return Err(Error::config("marker must not be empty"));
        }

        Ok(())
    }

    /// Build the server pool described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the pool would be empty or the port range
    /// runs past 65535
    pub fn server_pool(&self) -> Result<ServerPool> {
        if self.servers.addresses.is_empty() {
            return ServerPool::from_port_range(
                &self.servers.host,
                self.servers.port_start,
                self.servers.count,
            );
        }

        ServerPool::new(self.servers.addresses.iter().map(Address::new).collect())
    }
}

/// Split a comma separated address list, dropping blanks
pub fn split_addresses(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
