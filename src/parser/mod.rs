//! Reasoning-region stream parser
//!
//! A stateful parser that splits chunked model output into main content
//! and reasoning content delimited by a fixed marker pair.

mod markers;
mod result;
mod state;

pub use markers::{MarkerError, MarkerPair, PRESETS, THINK_CLOSE, THINK_OPEN};
pub use result::ParseResult;
pub use state::{split_reasoning, StreamTagParser};
