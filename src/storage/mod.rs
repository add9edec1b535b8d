//! Output storage
//!
//! Synthesized audio is written to the filesystem, one file per item id.

pub mod audio;

pub use audio::AudioSink;
