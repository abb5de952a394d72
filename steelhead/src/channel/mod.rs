//! Channel layer for prompt matching over the PTY shell.
//!
//! Accumulates shell output, strips terminal escapes and detects the CLI
//! prompt that ends each command's response.

mod buffer;
mod pty;

pub use buffer::PatternBuffer;
pub use pty::{PtyChannel, PtyConfig};
