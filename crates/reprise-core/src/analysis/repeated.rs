//! Repeated word, phrase, and sentence-starter detection.

use crate::frequency::{FrequencyTable, ngram_frequency, top_entries};
use crate::text;
use crate::word_lists::is_stopword;

use super::reports::{PhraseEntry, WordEntry};

/// Minimum occurrences for any entry to count as repeated.
pub const MIN_REPEAT_COUNT: usize = 2;

/// Phrase lengths checked for repetition, reported in this order.
pub const PHRASE_SIZES: [usize; 2] = [3, 4];

/// Maximum phrases reported per phrase length.
pub const PHRASE_LIMIT: usize = 10;

/// Number of leading words that make up a sentence starter.
pub const STARTER_WORDS: usize = 3;

/// Maximum starters reported.
pub const STARTER_LIMIT: usize = 10;

/// Most frequent words in an already-built frequency table.
#[tracing::instrument(skip_all, fields(distinct = table.len(), limit = limit))]
pub fn analyze_repeated_words(table: &FrequencyTable, limit: usize) -> Vec<WordEntry> {
    top_entries(table, MIN_REPEAT_COUNT, limit)
}

/// Find 3- and 4-word phrases that appear more than once.
///
/// With `exclude_stopwords`, stopwords are removed from the token sequence
/// before windows are formed, so phrases can bridge removed words.
#[tracing::instrument(skip_all, fields(words = words.len(), exclude_stopwords = exclude_stopwords))]
pub fn analyze_repeated_phrases(words: &[String], exclude_stopwords: bool) -> Vec<PhraseEntry> {
    let filtered: Vec<String>;
    let phrase_words: &[String] = if exclude_stopwords {
        filtered = words.iter().filter(|w| !is_stopword(w)).cloned().collect();
        &filtered
    } else {
        words
    };

    PHRASE_SIZES
        .iter()
        .flat_map(|&n| {
            top_entries(&ngram_frequency(phrase_words, n), MIN_REPEAT_COUNT, PHRASE_LIMIT)
                .into_iter()
                .map(move |entry| PhraseEntry {
                    value: entry.value,
                    count: entry.count,
                    n,
                })
        })
        .collect()
}

/// Find sentence openings (first three words) used more than once.
///
/// Starters always use the raw tokens; stopwords are never removed here.
#[tracing::instrument(skip_all, fields(sentences = sentences.len()))]
pub fn analyze_repeated_starters(sentences: &[String]) -> Vec<WordEntry> {
    let mut starters = FrequencyTable::new();

    for sentence in sentences {
        let words = text::tokenize_words(sentence);
        if words.is_empty() {
            continue;
        }
        let end = words.len().min(STARTER_WORDS);
        starters.increment(&words[..end].join(" "));
    }

    top_entries(&starters, MIN_REPEAT_COUNT, STARTER_LIMIT)
}
