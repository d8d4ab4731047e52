//! Near-duplicate sentence detection.
//!
//! Sentences are compared pairwise by the Jaccard similarity of their
//! content-word sets. The comparison is quadratic, so only the first
//! [`MAX_COMPARED_SENTENCES`] sentences are considered.

use std::collections::HashSet;

use crate::text;
use crate::word_lists::is_stopword;

use super::reports::SimilarPair;

/// Hard ceiling on sentences entering the pairwise comparison
/// (at most 19,900 pairs).
pub const MAX_COMPARED_SENTENCES: usize = 200;

/// Sentences must be longer than this many characters to be compared.
pub const MIN_SENTENCE_CHARS: usize = 40;

/// Minimum unrounded similarity for a pair to be reported.
pub const SIMILARITY_THRESHOLD: f64 = 0.75;

/// Maximum pairs reported.
pub const SIMILAR_PAIR_LIMIT: usize = 10;

/// Distinct non-stopword tokens of a sentence.
pub fn content_words(sentence: &str) -> HashSet<String> {
    text::tokenize_words(sentence)
        .into_iter()
        .filter(|w| !is_stopword(w))
        .collect()
}

/// Intersection size over union size; 0 when either set is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Find pairs of sentences whose content words overlap heavily.
///
/// Both sentences of a pair must be longer than [`MIN_SENTENCE_CHARS`]
/// characters. Scores are rounded to 2 decimals after thresholding; pairs
/// are ordered by rounded score, highest first, with ties in pair order.
#[tracing::instrument(skip_all, fields(sentences = sentences.len()))]
pub fn analyze_similar_sentences(sentences: &[String]) -> Vec<SimilarPair> {
    let capped = &sentences[..sentences.len().min(MAX_COMPARED_SENTENCES)];
    let sets: Vec<HashSet<String>> = capped.iter().map(|s| content_words(s)).collect();
    let long_enough: Vec<bool> = capped
        .iter()
        .map(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect();

    let mut pairs = Vec::new();
    for i in 0..capped.len() {
        if !long_enough[i] {
            continue;
        }
        for j in (i + 1)..capped.len() {
            if !long_enough[j] {
                continue;
            }
            let score = jaccard(&sets[i], &sets[j]);
            if score >= SIMILARITY_THRESHOLD {
                pairs.push(SimilarPair {
                    sentence_a: capped[i].clone(),
                    sentence_b: capped[j].clone(),
                    score: round2(score),
                });
            }
        }
    }

    pairs.sort_by(|a, b| b.score.total_cmp(&a.score));
    pairs.truncate(SIMILAR_PAIR_LIMIT);

    tracing::debug!(pairs = pairs.len(), "similar sentence scan complete");
    pairs
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
