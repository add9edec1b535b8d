//! Unified error handling for the tts-batch crate
//!
//! Per-item synthesis failures are not errors at this level: they are captured
//! as [`Outcome`](crate::models::Outcome) records and reported. The [`Error`]
//! type here covers the setup paths that can abort a run before dispatch
//! starts (configuration, input loading, output directory creation).
//!
//! # Usage
//!
//! ```rust,ignore
//! use tts_batch::error::{Error, ErrorCategory};
//!
//! fn handle_error(err: Error) {
//!     if err.category() == ErrorCategory::Config {
//!         eprintln!("Fix your configuration: {err}");
//!     }
//! }
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::utils::error::SynthesisError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, connection)
    Network,
    /// Input parsing errors
    Parsing,
    /// Storage and I/O errors
    Storage,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Short human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Parsing => "parse error",
            Self::Storage => "storage error",
            Self::Config => "configuration error",
            Self::Other => "other error",
        }
    }
}

/// Unified error type for the tts-batch crate
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP client construction failed
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Input file could not be interpreted as a record list
    #[error("Invalid input {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    /// Output directory could not be created
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML configuration parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an input error for the given file
    pub fn input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Synthesis(SynthesisError::Write(_)) => ErrorCategory::Storage,
            Self::Synthesis(_) => ErrorCategory::Network,
            Self::Input { .. } => ErrorCategory::Parsing,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Toml(_) | Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Category of the first crate error found in an `anyhow` chain
    ///
    /// Errors raised outside this crate map to `ErrorCategory::Other`.
    pub fn category_of(err: &anyhow::Error) -> ErrorCategory {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<Self>())
            .map_or(ErrorCategory::Other, Self::category)
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
