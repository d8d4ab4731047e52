//! Focus-term counts.

use crate::frequency::FrequencyTable;

use super::reports::WordEntry;

/// Look up each focus term in the unfiltered word table.
///
/// Terms keep their input order, duplicates included. Terms never seen
/// report a count of 0.
pub fn count_focus_terms(all_words: &FrequencyTable, terms: &[String]) -> Vec<WordEntry> {
    terms
        .iter()
        .map(|term| WordEntry {
            value: term.clone(),
            count: all_words.count(term),
        })
        .collect()
}
