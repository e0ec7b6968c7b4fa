//! Output rendering.
//!
//! # Submodules
//!
//! - [`console`]: writes fetched articles to standard output
//!
//! Results are written to stdout and logs to stderr, so the output can be
//! piped without log noise.

pub mod console;
