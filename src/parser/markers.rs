//! Marker vocabulary
//!
//! A reasoning region is bounded by a fixed pair of literal markers.
//! Matching is exact: no case folding, no patterns.

/// Default open marker
pub const THINK_OPEN: &str = "<think>";
/// Default close marker
pub const THINK_CLOSE: &str = "</think>";

/// Reasoning delimiters emitted by common model families: (name, open, close)
pub const PRESETS: &[(&str, &str, &str)] = &[
    ("think", "<think>", "</think>"),
    ("pipe-think", "<|think|>", "<|/think|>"),
    ("bracket-think", "[THINK]", "[/THINK]"),
    ("thought", "<thought>", "</thought>"),
];

/// Error type for invalid marker vocabularies
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("{0} marker must not be empty")]
    Empty(&'static str),

    #[error("open and close markers are identical: {0:?}")]
    Identical(String),

    #[error("marker {shorter:?} is a prefix of {longer:?}")]
    Overlapping { shorter: String, longer: String },

    #[error("unknown marker preset: {0}")]
    UnknownPreset(String),
}

/// The open/close marker pair a parser matches against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    open: String,
    close: String,
}

impl MarkerPair {
    /// Create a validated marker pair
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, MarkerError> {
        let open = open.into();
        let close = close.into();

        if open.is_empty() {
            return Err(MarkerError::Empty("open"));
        }
        if close.is_empty() {
            return Err(MarkerError::Empty("close"));
        }
        if open == close {
            return Err(MarkerError::Identical(open));
        }
        if close.starts_with(open.as_str()) {
            return Err(MarkerError::Overlapping {
                shorter: open,
                longer: close,
            });
        }
        if open.starts_with(close.as_str()) {
            return Err(MarkerError::Overlapping {
                shorter: close,
                longer: open,
            });
        }

        Ok(Self { open, close })
    }

    /// The `<think>` / `</think>` pair
    pub fn think() -> Self {
        Self {
            open: THINK_OPEN.to_string(),
            close: THINK_CLOSE.to_string(),
        }
    }

    /// Look up one of the [`PRESETS`] by name
    pub fn preset(name: &str) -> Result<Self, MarkerError> {
        PRESETS
            .iter()
            .find(|(preset, _, _)| *preset == name)
            .map(|(_, open, close)| Self {
                open: (*open).to_string(),
                close: (*close).to_string(),
            })
            .ok_or_else(|| MarkerError::UnknownPreset(name.to_string()))
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// Check whether either marker literal occurs anywhere in `text`
    pub fn appears_in(&self, text: &str) -> bool {
        text.contains(self.open.as_str()) || text.contains(self.close.as_str())
    }

    /// Find where a trailing partial marker begins.
    ///
    /// Returns the byte index of the longest suffix of `text` that is a
    /// strict prefix of a candidate marker. Outside a region only the open
    /// marker is a candidate, since a stray close marker there is literal
    /// text. Inside a region both markers are candidates.
    pub fn partial_suffix_start(&self, text: &str, inside: bool) -> Option<usize> {
        let longest = if inside {
            self.open.len().max(self.close.len())
        } else {
            self.open.len()
        };
        let bytes = text.as_bytes();
        let first = bytes.len().saturating_sub(longest - 1);

        (first..bytes.len()).find(|&start| {
            if !text.is_char_boundary(start) {
                return false;
            }
            let tail = &bytes[start..];
            is_strict_prefix(tail, &self.open) || (inside && is_strict_prefix(tail, &self.close))
        })
    }
}

impl Default for MarkerPair {
    fn default() -> Self {
        Self::think()
    }
}

fn is_strict_prefix(tail: &[u8], marker: &str) -> bool {
    tail.len() < marker.len() && marker.as_bytes().starts_with(tail)
}
