//! Error types for a single synthesis attempt
//!
//! These never cross the executor boundary as errors: the executor renders
//! them into the `detail` of a failed [`Outcome`](crate::models::Outcome).

use std::error::Error as StdError;
use thiserror::Error;

/// Everything that can go wrong while synthesizing one item on one server
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// The record carried no speaker line, so there is nothing to send
    #[error("No usable text found")]
    NoUsableText,

    /// Server answered with something other than 200
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// Connection refused, timeout, DNS failure and friends
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Request body could not be encoded as MessagePack
    #[error("Failed to encode request: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Audio bytes could not be written to the output directory
    #[error("Failed to write audio: {0}")]
    Write(#[from] std::io::Error),
}

impl SynthesisError {
    /// Whether a second attempt could plausibly succeed
    ///
    /// Missing text is a property of the input and will fail the same way
    /// every time; everything else depends on the server or the network.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::NoUsableText | Self::Encode(_))
    }

    /// Text recorded as the detail of a failed outcome
    ///
    /// Transport errors include their full source chain.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();

        if let Self::Transport(e) = self {
            let mut source = StdError::source(e);
            while let Some(cause) = source {
                detail.push_str(": ");
                detail.push_str(&cause.to_string());
                source = StdError::source(cause);
            }
        }

        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_outcome_detail() {
        assert_eq!(SynthesisError::NoUsableText.to_string(), "No usable text found");
        assert_eq!(SynthesisError::HttpStatus(500).to_string(), "HTTP 500");
        assert_eq!(SynthesisError::HttpStatus(429).to_string(), "HTTP 429");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(!SynthesisError::NoUsableText.is_recoverable());
        assert!(SynthesisError::HttpStatus(503).is_recoverable());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(SynthesisError::Write(io).is_recoverable());
    }
}
