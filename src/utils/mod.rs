//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use std::time::Duration;

/// Format a duration as `HH:MM:SS`, truncating fractional seconds
///
/// Hours are not wrapped, so a 100 hour batch renders as `100:00:00`.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Lowercase hex MD5 digest of a string
pub fn md5_hex(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}
