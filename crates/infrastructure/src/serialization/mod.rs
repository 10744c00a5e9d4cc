//! Stable JSON serialization for settings, credentials and CLI output.
//!
//! Output uses 2-space indentation and a trailing newline, so files written
//! by the client diff cleanly.

mod json;

pub use json::*;
