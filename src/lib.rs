//! Think Stream
//!
//! Incremental separation of reasoning content from main output in a
//! streamed model response. This crate provides:
//!
//! - `parser`: the marker-delimited stream parser and its marker vocabulary
//! - `headless`: a transcript runner that feeds a text stream through a parser
//! - `app`: configuration for the headless runner
//!
//! The parser is:
//! - Streaming: markers may be split across arbitrary chunk boundaries
//! - Total: every input produces a result, malformed markup included
//! - Deterministic: the same text gives the same totals however it is chunked

pub mod app;
pub mod headless;
pub mod parser;

pub use parser::{MarkerPair, ParseResult, StreamTagParser};
