//! Deterministic JSON for settings files.
//!
//! Output uses 2-space indentation and a trailing newline so checked-in
//! settings diff cleanly.

mod json;

pub use json::*;
