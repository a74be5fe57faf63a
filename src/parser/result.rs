//! Per-chunk classification result

use serde::{Deserialize, Serialize};

/// Content classified by a single `process_chunk` call.
///
/// Both fields hold only what this call produced, never the running total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Newly classified main content
    pub main_content: String,
    /// Newly classified reasoning content
    pub reasoning_content: String,
    /// No open region and no carried partial marker remain
    pub is_complete: bool,
}

impl ParseResult {
    /// Check if this call produced no content at all
    pub fn is_empty(&self) -> bool {
        self.main_content.is_empty() && self.reasoning_content.is_empty()
    }

    /// Check if this call produced main content
    pub fn has_main(&self) -> bool {
        !self.main_content.is_empty()
    }

    /// Check if this call produced reasoning content
    pub fn has_reasoning(&self) -> bool {
        !self.reasoning_content.is_empty()
    }
}
