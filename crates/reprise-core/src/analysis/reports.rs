//! Report structs for repetition analysis.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! use in both CLI JSON output and MCP tool responses. Field names are
//! camelCase on the wire.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of one analysis run.
///
/// Every list is always present; analyses that were disabled leave their
/// list empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// The normalized input text.
    pub text: String,
    /// Document-wide totals.
    pub totals: Totals,
    /// Most frequent words.
    pub repeated_words: Vec<WordEntry>,
    /// Repeated 3-grams followed by repeated 4-grams.
    pub repeated_phrases: Vec<PhraseEntry>,
    /// Near-duplicate sentence pairs.
    pub similar_sentences: Vec<SimilarPair>,
    /// Repeated sentence openings.
    pub repeated_starters: Vec<WordEntry>,
    /// Statistically long sentences.
    pub long_sentences: Vec<LongSentence>,
    /// Counts for user-supplied focus terms, in input order.
    pub custom_counts: Vec<WordEntry>,
}

// -- Totals -----------------------------------------------------------------

/// Document-wide word and sentence totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Number of word tokens.
    pub total_words: usize,
    /// Number of distinct word tokens.
    pub unique_words: usize,
    /// `unique_words / total_words`, rounded to 3 decimals (0 for no words).
    pub lexical_diversity: f64,
    /// Number of sentences.
    pub total_sentences: usize,
}

// -- Rows -------------------------------------------------------------------

/// A word, starter, or focus term with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordEntry {
    /// The word or phrase.
    pub value: String,
    /// Number of occurrences.
    pub count: usize,
}

/// A repeated n-gram phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PhraseEntry {
    /// Space-joined phrase.
    pub value: String,
    /// Number of occurrences.
    pub count: usize,
    /// Phrase length in words.
    pub n: usize,
}

/// A sentence flagged as long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LongSentence {
    /// The sentence text.
    pub sentence: String,
    /// Word count.
    pub words: usize,
}

/// Two sentences with highly overlapping vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimilarPair {
    /// The earlier sentence.
    pub sentence_a: String,
    /// The later sentence.
    pub sentence_b: String,
    /// Jaccard similarity, rounded to 2 decimals.
    pub score: f64,
}
