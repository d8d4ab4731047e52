//! Repetition and structure analysis.
//!
//! Decomposes the analysis into independent features, orchestrated by
//! [`analyze`]. Each feature is a pure function in its own module; callers
//! can also invoke features individually.

pub mod focus;
pub mod options;
pub mod repeated;
pub mod reports;
pub mod sentence_length;
pub mod similarity;

use std::collections::HashSet;

pub use options::AnalysisOptions;
pub use reports::{
    AnalysisReport, LongSentence, PhraseEntry, SimilarPair, Totals, WordEntry,
};

use crate::error::{AnalysisError, AnalysisResult};
use crate::frequency;
use crate::text;

/// Run every analysis enabled in `options` over `input`.
///
/// The input is normalized once, tokenized once, and split into sentences
/// once; every sub-analysis reuses those. Disabled analyses leave their
/// list empty.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] if the text is empty after
/// normalization.
#[tracing::instrument(skip_all, fields(text_len = input.len()))]
pub fn analyze(input: &str, options: &AnalysisOptions) -> AnalysisResult<AnalysisReport> {
    let normalized = text::normalize(input);
    if normalized.is_empty() {
        return Err(AnalysisError::InvalidInput);
    }

    let words = text::tokenize_words(&normalized);
    let sentences = text::split_sentences(&normalized);
    let totals = compute_totals(&words, sentences.len());

    tracing::debug!(
        words = totals.total_words,
        sentences = totals.total_sentences,
        "text segmented"
    );

    let all_words = frequency::build_frequency(&words, false);

    let repeated_words = if options.repeated_words {
        let table = if options.exclude_common {
            frequency::build_frequency(&words, true)
        } else {
            all_words.clone()
        };
        repeated::analyze_repeated_words(&table, options.max_results)
    } else {
        Vec::new()
    };

    let repeated_phrases = if options.repeated_phrases {
        repeated::analyze_repeated_phrases(&words, options.exclude_common)
    } else {
        Vec::new()
    };

    let similar_sentences = if options.similar_sentences {
        similarity::analyze_similar_sentences(&sentences)
    } else {
        Vec::new()
    };

    let repeated_starters = if options.repeated_starters {
        repeated::analyze_repeated_starters(&sentences)
    } else {
        Vec::new()
    };

    let long_sentences = if options.long_sentences {
        sentence_length::analyze_long_sentences(&sentences)
    } else {
        Vec::new()
    };

    let custom_counts = focus::count_focus_terms(&all_words, &options.custom_words);

    Ok(AnalysisReport {
        text: normalized,
        totals,
        repeated_words,
        repeated_phrases,
        similar_sentences,
        repeated_starters,
        long_sentences,
        custom_counts,
    })
}

fn compute_totals(words: &[String], total_sentences: usize) -> Totals {
    let total_words = words.len();
    let unique_words = words.iter().map(String::as_str).collect::<HashSet<_>>().len();
    let lexical_diversity = if total_words == 0 {
        0.0
    } else {
        round3(unique_words as f64 / total_words as f64)
    };

    Totals {
        total_words,
        unique_words,
        lexical_diversity,
        total_sentences,
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
