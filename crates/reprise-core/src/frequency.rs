//! Frequency tables and top-K extraction.
//!
//! A [`FrequencyTable`] remembers the order in which keys were first seen.
//! [`top_entries`] sorts stably by count, so entries with equal counts come
//! out in first-seen order and results are reproducible across runs and
//! platforms.

use std::collections::HashMap;

use crate::analysis::reports::WordEntry;
use crate::word_lists::is_stopword;

/// Occurrence counts keyed by word, phrase, or sentence starter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`.
    pub fn increment(&mut self, key: &str) {
        if let Some(&slot) = self.index.get(key) {
            self.entries[slot].1 += 1;
        } else {
            self.index.insert(key.to_string(), self.entries.len());
            self.entries.push((key.to_string(), 1));
        }
    }

    /// Occurrences of `key`, or 0 if it was never counted.
    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.increment(key.as_ref());
        }
        table
    }
}

/// Count tokens, optionally skipping stopwords entirely.
pub fn build_frequency(tokens: &[String], exclude_stopwords: bool) -> FrequencyTable {
    tokens
        .iter()
        .filter(|t| !(exclude_stopwords && is_stopword(t)))
        .collect()
}

/// Count every window of `n` consecutive tokens, joined by single spaces.
///
/// Produces an empty table when `tokens.len() < n` or `n == 0`.
pub fn ngram_frequency(tokens: &[String], n: usize) -> FrequencyTable {
    if n == 0 {
        return FrequencyTable::new();
    }
    tokens.windows(n).map(|window| window.join(" ")).collect()
}

/// Entries with at least `min_count` occurrences, most frequent first.
///
/// Ties keep first-seen order. The result holds at most `limit` entries.
pub fn top_entries(table: &FrequencyTable, min_count: usize, limit: usize) -> Vec<WordEntry> {
    let mut entries: Vec<WordEntry> = table
        .iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(value, count)| WordEntry {
            value: value.to_string(),
            count,
        })
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}
