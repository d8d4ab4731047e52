//! Text processing utilities.
//!
//! Provides input normalization, word tokenization, and sentence splitting
//! for use by analysis modules. Every function here is pure.

use regex::Regex;
use std::sync::LazyLock;

/// Letters accepted inside a word: basic Latin, the Latin-1 Supplement
/// letters (skipping `×` and `÷`), and Latin Extended-A.
const LETTER_CLASS: &str = r"[A-Za-z\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{017F}]";

/// Regex for a word: letters, optionally joined to more letters by one
/// ASCII apostrophe ("don't", "o'clock").
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{LETTER_CLASS}+(?:'{LETTER_CLASS}+)?")).expect("valid regex")
});

/// Normalize raw input once before analysis.
///
/// Unifies `\r\n` and lone `\r` line endings to `\n` and trims surrounding
/// whitespace, including a leading byte-order mark.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

/// Extract lowercase word tokens in order of appearance.
///
/// Digits, underscores, and letters outside the Latin ranges act as
/// separators. Text without letters yields an empty vector.
pub fn tokenize_words(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Split text into sentences with a single left-to-right scan.
///
/// Characters accumulate in a buffer; each `.`, `!` or `?` flushes the
/// trimmed buffer as a sentence. Buffers holding nothing but a terminator
/// are dropped, so runs like `...` never produce blank sentences. A
/// trailing fragment without a terminator becomes the final sentence.
///
/// Dropping terminator-only buffers means the sentence count is not the
/// number of terminators: `"Wait... What?!"` yields `["Wait.", "What?"]`,
/// two sentences from six terminators.
///
/// ```
/// use reprise_core::text::split_sentences;
///
/// assert_eq!(split_sentences("Wait... What?!"), vec!["Wait.", "What?"]);
/// ```
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);

        if is_sentence_terminator(ch) {
            flush(&mut current, &mut sentences);
        }
    }

    // Remaining text
    flush(&mut current, &mut sentences);

    sentences
}

fn flush(buffer: &mut String, sentences: &mut Vec<String>) {
    let sentence = buffer.trim();
    // A lone terminator (the tail of "..." or "?!") is not a sentence.
    if sentence.chars().any(|c| !is_sentence_terminator(c)) {
        sentences.push(sentence.to_string());
    }
    buffer.clear();
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}
