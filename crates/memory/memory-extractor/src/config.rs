//! Extractor thresholds.
//!
//! The defaults are the tuned constants of the classifier. They are heuristics rather than
//! principled limits, so they are exposed here instead of being hard-coded.

/// Upper bound for [`ExtractorConfig::title_max_chars`]. Larger bounds blow the title regex
/// past the compiled-size limit.
pub const MAX_TITLE_CHARS: usize = 200;

/// Length and substantiality thresholds used by the user-message analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Trimmed messages shorter than this (in characters) are ignored.
    pub min_message_chars: usize,
    /// The `general` fallback only applies to messages longer than this.
    pub general_min_chars: usize,
    /// "More than N words" substantiality indicator.
    pub substantial_word_count: usize,
    /// How many substantiality indicators must hold (out of 3).
    pub substantial_min_indicators: usize,
    /// Maximum captured title length and truncation length, in characters. Clamped to
    /// `1..=MAX_TITLE_CHARS` by the extractor.
    pub title_max_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_message_chars: 10,
            general_min_chars: 50,
            substantial_word_count: 10,
            substantial_min_indicators: 2,
            title_max_chars: 50,
        }
    }
}

impl ExtractorConfig {
    /// `title_max_chars` clamped to `1..=MAX_TITLE_CHARS`.
    pub fn bounded_title_chars(&self) -> usize {
        self.title_max_chars.clamp(1, MAX_TITLE_CHARS)
    }
}
