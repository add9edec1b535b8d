//! Optional playback of synthesized audio
//!
//! Playback runs after a successful write and can never change the outcome
//! of an attempt: failures are logged and swallowed by the caller.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::process::Command;

use crate::config::PlaybackConfig;

/// Something that can play an audio file to completion
#[async_trait]
pub trait Playback: Send + Sync {
    /// Play the file, returning once playback has finished
    async fn play(&self, path: &Path) -> Result<()>;
}

/// Playback disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlayback;

#[async_trait]
impl Playback for NoPlayback {
    async fn play(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Plays files by running an external player program
#[derive(Debug, Clone)]
pub struct CommandPlayback {
    program: String,
    args: Vec<String>,
}

impl CommandPlayback {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl Playback for CommandPlayback {
    async fn play(&self, path: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .await
            .with_context(|| format!("Failed to start player {}", self.program))?;

        if !status.success() {
            anyhow::bail!("Player {} exited with {status}", self.program);
        }

        Ok(())
    }
}

/// Build the playback hook described by the configuration
pub fn from_config(config: &PlaybackConfig) -> Arc<dyn Playback> {
    if config.enabled {
        Arc::new(CommandPlayback::new(&config.command, config.args.clone()))
    } else {
        Arc::new(NoPlayback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_playback_is_noop() {
        assert!(NoPlayback.play(Path::new("/nope.wav")).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_player_errors() {
        let player = CommandPlayback::new("definitely-not-a-real-player-binary", Vec::new());
        assert!(player.play(Path::new("/tmp/x.wav")).await.is_err());
    }
}
