//! Options selecting which analyses run.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Default cap on the repeated-words list.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Which analyses to run and how.
///
/// Front ends normalize their raw input into this struct once; the core
/// never sees unvalidated values. Also used as the `[analysis]` table of
/// the config file, so every field is optional there and falls back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Report the most frequent words.
    pub repeated_words: bool,
    /// Report repeated 3- and 4-word phrases.
    pub repeated_phrases: bool,
    /// Report repeated sentence openings.
    pub repeated_starters: bool,
    /// Report near-duplicate sentence pairs.
    pub similar_sentences: bool,
    /// Report statistically long sentences.
    pub long_sentences: bool,
    /// Drop stopwords from word and phrase frequency tables.
    pub exclude_common: bool,
    /// Maximum number of repeated words reported.
    pub max_results: usize,
    /// Lowercase focus terms whose raw counts are reported.
    ///
    /// Accepts a list or a comma-separated string; entries are trimmed and
    /// lowercased on the way in.
    #[serde(deserialize_with = "deserialize_terms")]
    #[schemars(with = "Vec<String>")]
    pub custom_words: Vec<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            repeated_words: true,
            repeated_phrases: true,
            repeated_starters: true,
            similar_sentences: true,
            long_sentences: true,
            exclude_common: true,
            max_results: DEFAULT_MAX_RESULTS,
            custom_words: Vec::new(),
        }
    }
}

impl AnalysisOptions {
    /// Split a comma-separated focus-term list into normalized terms.
    ///
    /// Terms are trimmed and lowercased; empty entries are dropped.
    /// Duplicates are kept.
    pub fn parse_custom_words(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// Replace the focus terms, normalizing each one.
    pub fn with_custom_words<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.custom_words = normalize_terms(terms);
        self
    }
}

fn normalize_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Focus terms as written in a config file or environment variable.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTerms {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_terms<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawTerms::deserialize(deserializer)? {
        RawTerms::List(terms) => normalize_terms(terms),
        RawTerms::Joined(raw) => AnalysisOptions::parse_custom_words(&raw),
    })
}
