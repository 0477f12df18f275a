//! Runtime configuration for the lookup pipeline and cache.
//!
//! All tunables live in one struct resolved at construction time. The score
//! threshold, keyword lists, and name vocabulary are hand-tuned values carried
//! over from production use; they are configuration, not fixed logic, and
//! callers may override any of them.

use crate::pipeline::score::DEFAULT_SCORE_KEYWORDS;
use crate::pipeline::token_repair::DEFAULT_NAME_VOCABULARY;

/// Configuration consumed by the recognition pipeline and the query cache.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Recognition engine configuration strings, most to least specific.
    /// The multiplexer tries them in order and stops at the first candidate
    /// reaching [`good_enough_score`](Self::good_enough_score).
    pub ocr_configs: Vec<String>,
    /// Quality score (0–100) at which a recognition candidate is accepted
    /// without trying further (config, variant) pairs.
    pub good_enough_score: u8,
    /// Hard cap on (config × variant) recognition attempts per image.
    pub max_recognition_attempts: usize,
    /// Cache entry lifetime in hours. 0 = entries never expire.
    pub cache_expiry_hours: i64,
    /// How many times a full extraction round may be redone when the result
    /// fails the post-hoc plausibility check or the upstream collaborator
    /// faults.
    pub max_extraction_retries: u32,
    /// Domain keywords rewarded by the candidate scorer (case-insensitive,
    /// each counted once).
    pub score_keywords: Vec<String>,
    /// Reference first names and surnames used to re-insert whitespace into
    /// concatenated name tokens.
    pub name_vocabulary: Vec<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            ocr_configs: vec![
                "--oem 3 --psm 6 -l por".to_string(),
                "--oem 3 --psm 4".to_string(),
                "--oem 3 --psm 11".to_string(),
                "--oem 3 --psm 12".to_string(),
                "--psm 6".to_string(),
                String::new(), // engine default
            ],
            good_enough_score: 80,
            max_recognition_attempts: 36,
            cache_expiry_hours: 24,
            max_extraction_retries: 3,
            score_keywords: DEFAULT_SCORE_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            name_vocabulary: DEFAULT_NAME_VOCABULARY
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LookupConfig {
    /// Override the cache expiry (hours, 0 = never expires).
    pub fn with_cache_expiry_hours(mut self, hours: i64) -> Self {
        self.cache_expiry_hours = hours;
        self
    }

    /// Override the short-circuit quality threshold.
    pub fn with_good_enough_score(mut self, score: u8) -> Self {
        self.good_enough_score = score.min(100);
        self
    }

    /// Override the attempt cap for the recognition multiplexer.
    pub fn with_max_recognition_attempts(mut self, attempts: usize) -> Self {
        self.max_recognition_attempts = attempts;
        self
    }
}
