//! Parser State Machine
//!
//! Splits a chunked text stream into main content and reasoning content.
//! The parser handles arbitrary chunk boundaries: a marker may arrive in
//! pieces, and any trailing text that could still grow into a marker is
//! carried into the next call instead of being classified.
//!
//! # State Machine
//!
//! | State            | Open marker              | Close marker             | Text            |
//! |------------------|--------------------------|--------------------------|-----------------|
//! | Outside (depth 0)| enter, depth = 1         | literal main text        | main            |
//! | Inside (depth n) | depth += 1               | depth -= 1, leave at 0   | reasoning       |
//!
//! Matched markers are consumed. Nothing else is ever dropped.

use super::markers::{MarkerPair, THINK_CLOSE, THINK_OPEN};
use super::result::ParseResult;

/// Which marker a scan hit first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Open,
    Close,
}

/// Incremental reasoning-region parser for one stream
#[derive(Debug, Clone)]
pub struct StreamTagParser {
    markers: MarkerPair,
    /// Unclassified tail that may be the start of a marker
    carry: String,
    /// Unmatched open markers; inside a region iff non-zero
    depth: usize,
    /// Main content classified so far
    main: String,
    /// Reasoning content classified so far
    reasoning: String,
    /// Whether an open marker has ever matched
    seen_marker: bool,
}

impl Default for StreamTagParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamTagParser {
    /// Create a parser for the `<think>` / `</think>` pair
    pub fn new() -> Self {
        Self::with_markers(MarkerPair::think())
    }

    /// Create a parser for a custom marker pair
    pub fn with_markers(markers: MarkerPair) -> Self {
        Self {
            markers,
            carry: String::new(),
            depth: 0,
            main: String::new(),
            reasoning: String::new(),
            seen_marker: false,
        }
    }

    /// Check whether `text` contains either default marker literal
    pub fn contains_marker(text: &str) -> bool {
        text.contains(THINK_OPEN) || text.contains(THINK_CLOSE)
    }

    /// Reset the parser to its initial state, keeping the marker pair
    pub fn reset(&mut self) {
        self.carry.clear();
        self.depth = 0;
        self.main.clear();
        self.reasoning.clear();
        self.seen_marker = false;
    }

    /// Classify a chunk, returning only the content it produced
    pub fn process_chunk(&mut self, chunk: &str) -> ParseResult {
        let mut buffer = std::mem::take(&mut self.carry);
        buffer.push_str(chunk);

        let mut main = String::new();
        let mut reasoning = String::new();
        let mut rest = buffer.as_str();

        loop {
            if self.depth == 0 {
                let open = self.markers.open();
                match rest.find(open) {
                    Some(idx) => {
                        main.push_str(&rest[..idx]);
                        rest = &rest[idx + open.len()..];
                        self.depth = 1;
                        self.seen_marker = true;
                        tracing::trace!("entered reasoning region");
                    }
                    None => {
                        let split = self.hold_partial(rest, false);
                        main.push_str(&rest[..split]);
                        break;
                    }
                }
            } else {
                match self.next_marker(rest) {
                    Some((idx, Hit::Open)) => {
                        reasoning.push_str(&rest[..idx]);
                        rest = &rest[idx + self.markers.open().len()..];
                        self.depth += 1;
                        self.seen_marker = true;
                        tracing::trace!(depth = self.depth, "nested open marker");
                    }
                    Some((idx, Hit::Close)) => {
                        reasoning.push_str(&rest[..idx]);
                        rest = &rest[idx + self.markers.close().len()..];
                        self.depth -= 1;
                        if self.depth == 0 {
                            tracing::trace!("left reasoning region");
                        }
                    }
                    None => {
                        let split = self.hold_partial(rest, true);
                        reasoning.push_str(&rest[..split]);
                        break;
                    }
                }
            }
        }

        self.main.push_str(&main);
        self.reasoning.push_str(&reasoning);

        ParseResult {
            main_content: main,
            reasoning_content: reasoning,
            is_complete: self.is_complete(),
        }
    }

    /// Flush a carried partial marker at end of stream.
    ///
    /// The carried text is classified into the region that is currently
    /// active. An unterminated region stays open.
    pub fn finish(&mut self) -> ParseResult {
        let pending = std::mem::take(&mut self.carry);
        let mut result = ParseResult::default();

        if !pending.is_empty() {
            tracing::debug!(pending = %pending, "flushing partial marker at end of stream");
        }
        if self.depth > 0 {
            self.reasoning.push_str(&pending);
            result.reasoning_content = pending;
        } else {
            self.main.push_str(&pending);
            result.main_content = pending;
        }
        result.is_complete = self.is_complete();
        result
    }

    /// Move the undecidable tail of `text` into the carry buffer.
    /// Returns the length of the part that can be classified now.
    fn hold_partial(&mut self, text: &str, inside: bool) -> usize {
        match self.markers.partial_suffix_start(text, inside) {
            Some(start) => {
                self.carry.push_str(&text[start..]);
                tracing::trace!(carry = %self.carry, "holding partial marker");
                start
            }
            None => text.len(),
        }
    }

    /// Earliest open or close marker in `text`
    fn next_marker(&self, text: &str) -> Option<(usize, Hit)> {
        let open = text.find(self.markers.open()).map(|idx| (idx, Hit::Open));
        let close = text.find(self.markers.close()).map(|idx| (idx, Hit::Close));
        // Validated pairs never match at the same index
        match (open, close) {
            (Some(open), Some(close)) => Some(if open.0 < close.0 { open } else { close }),
            (open, close) => open.or(close),
        }
    }

    /// Marker pair this parser matches
    pub fn markers(&self) -> &MarkerPair {
        &self.markers
    }

    /// All main content classified so far
    pub fn main_content(&self) -> &str {
        &self.main
    }

    /// All reasoning content classified so far
    pub fn reasoning_content(&self) -> &str {
        &self.reasoning
    }

    pub fn is_inside_reasoning(&self) -> bool {
        self.depth > 0
    }

    /// Number of unmatched open markers
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Text carried over as a possible partial marker
    pub fn pending(&self) -> &str {
        &self.carry
    }

    /// Check if any non-whitespace reasoning has been classified
    pub fn has_reasoning(&self) -> bool {
        !self.reasoning.trim().is_empty()
    }

    pub fn has_ever_seen_marker(&self) -> bool {
        self.seen_marker
    }

    /// Outside any region with nothing carried
    pub fn is_complete(&self) -> bool {
        self.depth == 0 && self.carry.is_empty()
    }
}

/// Split a complete text into `(main, reasoning)` in one call
pub fn split_reasoning(markers: &MarkerPair, text: &str) -> (String, String) {
    let mut parser = StreamTagParser::with_markers(markers.clone());
    parser.process_chunk(text);
    parser.finish();
    (parser.main, parser.reasoning)
}
