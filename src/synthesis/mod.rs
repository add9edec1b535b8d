//! Speech synthesis requests
//!
//! - [`request`] - MessagePack request body
//! - [`executor`] - one attempt of one item on one server
//! - [`playback`] - optional post-write playback hook

pub mod executor;
pub mod playback;
pub mod request;

pub use executor::{Executor, SynthesisClient};
pub use playback::{CommandPlayback, NoPlayback, Playback};
pub use request::{SynthesisParams, SynthesisRequest};
