//! Headless transcript runner
//!
//! Feeds a complete text through a parser in fixed-size chunks, the way a
//! network stream would deliver it, and records what each chunk produced.
//! Useful for testing marker handling against captured model output and
//! for generating deterministic transcripts.

use serde::{Deserialize, Serialize};

use crate::app::ConfigError;
use crate::parser::{MarkerError, MarkerPair, StreamTagParser};

/// Error type for the headless runner
#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid markers: {0}")]
    Markers(#[from] MarkerError),

    #[error("Failed to serialize transcript: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a single chunk produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Chunk text as fed to the parser
    pub input: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub main: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reasoning: String,
    pub is_complete: bool,
}

/// A full run over one stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub open_marker: String,
    pub close_marker: String,
    pub chunk_size: usize,
    pub chunks: Vec<ChunkRecord>,
    /// Partial marker flushed at end of stream
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flushed: String,
    pub main_content: String,
    pub reasoning_content: String,
    /// Unmatched open markers at end of stream
    pub depth: usize,
    /// Completeness at end of stream, before the final flush
    pub is_complete: bool,
}

impl Transcript {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render as a plain-text report
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Chunks: {} (size {})\n",
            self.chunks.len(),
            self.chunk_size
        ));
        out.push_str(&format!(
            "Complete: {}{}\n",
            self.is_complete,
            if self.depth > 0 {
                format!(" (unterminated, depth {})", self.depth)
            } else {
                String::new()
            }
        ));
        out.push_str(&format!(
            "--- reasoning {}{} ---\n",
            self.open_marker, self.close_marker
        ));
        out.push_str(&self.reasoning_content);
        out.push_str("\n--- main ---\n");
        out.push_str(&self.main_content);
        out.push('\n');
        out
    }
}

/// Split `text` into chunks of at most `chunk_size` characters.
///
/// A size of zero yields the whole text as one chunk.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<&str> {
    if chunk_size == 0 || text.is_empty() {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    for (count, (idx, _)) in text.char_indices().enumerate() {
        if count > 0 && count % chunk_size == 0 {
            chunks.push(&text[start..idx]);
            start = idx;
        }
    }
    chunks.push(&text[start..]);
    chunks
}

/// Feed `text` through a fresh parser in chunks and record the run
pub fn run(markers: &MarkerPair, text: &str, chunk_size: usize) -> Transcript {
    let mut parser = StreamTagParser::with_markers(markers.clone());
    let chunks: Vec<ChunkRecord> = chunk_text(text, chunk_size)
        .into_iter()
        .map(|chunk| {
            let result = parser.process_chunk(chunk);
            ChunkRecord {
                input: chunk.to_string(),
                main: result.main_content,
                reasoning: result.reasoning_content,
                is_complete: result.is_complete,
            }
        })
        .collect();

    let is_complete = parser.is_complete();
    let tail = parser.finish();
    let flushed = tail.main_content + &tail.reasoning_content;

    if !is_complete {
        tracing::warn!(
            depth = parser.depth(),
            "stream ended inside an unterminated reasoning region or partial marker"
        );
    }

    Transcript {
        open_marker: markers.open().to_string(),
        close_marker: markers.close().to_string(),
        chunk_size,
        chunks,
        flushed,
        main_content: parser.main_content().to_string(),
        reasoning_content: parser.reasoning_content().to_string(),
        depth: parser.depth(),
        is_complete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_text_sizes() {
        assert_eq!(chunk_text("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(chunk_text("abc", 0), vec!["abc"]);
        assert_eq!(chunk_text("", 4), vec![""]);
        assert_eq!(chunk_text("ab", 5), vec!["ab"]);
    }

    #[test]
    fn test_chunk_text_char_boundaries() {
        assert_eq!(chunk_text("日本語🎉", 1), vec!["日", "本", "語", "🎉"]);
        assert_eq!(chunk_text("日本語🎉", 3), vec!["日本語", "🎉"]);
    }

    #[test]
    fn test_headless_basic() {
        let transcript = run(
            &MarkerPair::think(),
            "Before <think>reasoning content</think> After",
            4,
        );

        assert_eq!(transcript.main_content, "Before  After");
        assert_eq!(transcript.reasoning_content, "reasoning content");
        assert!(transcript.is_complete);
        assert_eq!(transcript.depth, 0);
        assert_eq!(transcript.chunks.len(), 12);
        assert!(transcript.flushed.is_empty());

        let text = transcript.to_text();
        assert!(text.contains("reasoning content"));
        assert!(text.contains("Complete: true"));
    }

    #[test]
    fn test_headless_unterminated() {
        let transcript = run(&MarkerPair::think(), "<think>still going", 5);

        assert!(!transcript.is_complete);
        assert_eq!(transcript.depth, 1);
        assert!(transcript.to_text().contains("unterminated, depth 1"));
    }

    #[test]
    fn test_headless_flushes_trailing_partial() {
        let transcript = run(&MarkerPair::think(), "done <thi", 0);

        assert!(!transcript.is_complete);
        assert_eq!(transcript.flushed, "<thi");
        assert_eq!(transcript.main_content, "done <thi");
    }

    #[test]
    fn test_headless_json_roundtrip() {
        let transcript = run(&MarkerPair::think(), "a<think>b</think>c", 2);
        let json = transcript.to_json().unwrap();
        assert!(json.contains("\"open_marker\": \"<think>\""));

        let restored = Transcript::from_json(&json).unwrap();
        assert_eq!(transcript, restored);
    }
}
