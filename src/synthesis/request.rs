//! Synthesis request body
//!
//! Sent as a MessagePack map keyed by field name.

use serde::Serialize;

use crate::config::SynthesisConfig;

/// MIME type of the encoded request body
pub const CONTENT_TYPE_MSGPACK: &str = "application/msgpack";

/// Per-run constant decoding parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParams {
    pub format: String,
    pub max_new_tokens: u32,
    pub chunk_length: u32,
    pub top_p: f64,
    pub repetition_penalty: f64,
    pub temperature: f64,
    pub use_memory_cache: String,
}

impl From<&SynthesisConfig> for SynthesisParams {
    fn from(config: &SynthesisConfig) -> Self {
        Self {
            format: config.format.clone(),
            max_new_tokens: config.max_new_tokens,
            chunk_length: config.chunk_length,
            top_p: config.top_p,
            repetition_penalty: config.repetition_penalty,
            temperature: config.temperature,
            use_memory_cache: config.use_memory_cache.clone(),
        }
    }
}

/// Body of one `POST /v1/tts`
#[derive(Debug, Serialize)]
pub struct SynthesisRequest<'a> {
    pub text: &'a str,
    /// Reference voices; never sent by this client
    pub references: Vec<serde_json::Value>,
    pub reference_id: Option<String>,
    pub format: &'a str,
    pub max_new_tokens: u32,
    pub chunk_length: u32,
    pub top_p: f64,
    pub repetition_penalty: f64,
    pub temperature: f64,
    pub streaming: bool,
    pub use_memory_cache: &'a str,
    pub seed: Option<u64>,
}

impl<'a> SynthesisRequest<'a> {
    pub fn new(text: &'a str, params: &'a SynthesisParams) -> Self {
        Self {
            text,
            references: Vec::new(),
            reference_id: None,
            format: &params.format,
            max_new_tokens: params.max_new_tokens,
            chunk_length: params.chunk_length,
            top_p: params.top_p,
            repetition_penalty: params.repetition_penalty,
            temperature: params.temperature,
            streaming: false,
            use_memory_cache: &params.use_memory_cache,
            seed: None,
        }
    }

    /// Encode as a MessagePack map
    pub fn encode(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec_named(self)
    }
}
