//! Long sentence detection.

use crate::text;

use super::reports::LongSentence;

/// Absolute floor: shorter sentences are never flagged, however they
/// compare to the document average.
pub const LONG_SENTENCE_MIN_WORDS: usize = 20;

/// Maximum long sentences reported.
pub const LONG_SENTENCE_LIMIT: usize = 10;

/// Flag sentences at least one standard deviation above the mean length.
///
/// Uses the population standard deviation of per-sentence word counts. A
/// sentence is flagged when its word count reaches `mean + std` and also
/// reaches [`LONG_SENTENCE_MIN_WORDS`]. Returns the first
/// [`LONG_SENTENCE_LIMIT`] flagged sentences in document order.
#[tracing::instrument(skip_all, fields(sentences = sentences.len()))]
pub fn analyze_long_sentences(sentences: &[String]) -> Vec<LongSentence> {
    if sentences.is_empty() {
        return Vec::new();
    }

    let lengths: Vec<usize> = sentences
        .iter()
        .map(|s| text::tokenize_words(s).len())
        .collect();

    let count = lengths.len() as f64;
    let avg = lengths.iter().sum::<usize>() as f64 / count;
    let variance: f64 = lengths
        .iter()
        .map(|&l| (l as f64 - avg).powi(2))
        .sum::<f64>()
        / count;
    let threshold = avg + variance.sqrt();

    sentences
        .iter()
        .zip(lengths)
        .filter(|&(_, words)| words as f64 >= threshold && words >= LONG_SENTENCE_MIN_WORDS)
        .take(LONG_SENTENCE_LIMIT)
        .map(|(sentence, words)| LongSentence {
            sentence: sentence.clone(),
            words,
        })
        .collect()
}
