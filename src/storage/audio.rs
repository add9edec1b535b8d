//! Audio file storage
//!
//! Each successful synthesis lands in `<output_dir>/<id>.<format>`. Ids are
//! content hashes, so repeating an item overwrites the same file.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Writes synthesized audio into the output directory
#[derive(Debug, Clone)]
pub struct AudioSink {
    /// Output directory
    output_dir: PathBuf,

    /// File extension, also the requested audio format
    format: String,
}

impl AudioSink {
    /// Create a sink, creating the output directory if it doesn't exist
    ///
    /// # Arguments
    /// * `output_dir` - Directory to save audio files
    /// * `format` - Audio format, used as the file extension
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the directory cannot be created
    pub fn new(output_dir: &Path, format: &str) -> Result<Self> {
        std::fs::create_dir_all(output_dir)?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            format: format.trim_start_matches('.').to_string(),
        })
    }

    /// Destination path for an item id
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.output_dir.join(format!("{id}.{}", self.format))
    }

    /// Write audio bytes for `id`, replacing any previous file
    ///
    /// # Returns
    /// Path to the written file
    pub async fn write(&self, id: &str, audio: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.path_for(id);
        tokio::fs::write(&path, audio).await?;

        tracing::debug!(path = %path.display(), bytes = audio.len(), "Saved audio");
        Ok(path)
    }

    /// Get output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}
