//! Core library for reprise.
//!
//! Finds overused words, recurring phrases, repetitive sentence openings,
//! near-duplicate sentences, and unusually long sentences in a piece of
//! prose. The `reprise` CLI and its MCP server are thin front ends over
//! this crate.
//!
//! # Modules
//!
//! - [`analysis`] - The analysis orchestrator and its features
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`export`] - JSON and CSV renderings of a report
//! - [`frequency`] - Ordered frequency tables
//! - [`ingest`] - Reading documents from disk with a size guard
//! - [`markdown`] - Markdown-to-prose stripping
//! - [`text`] - Normalization, tokenization, sentence splitting
//! - [`word_lists`] - The stopword set
//!
//! # Quick Start
//!
//! ```
//! use reprise_core::{AnalysisOptions, analyze};
//!
//! let report = analyze(
//!     "The cat sat. The cat ran. The cat slept.",
//!     &AnalysisOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(report.totals.total_sentences, 3);
//! assert_eq!(report.repeated_words[0].value, "cat");
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod frequency;
pub mod ingest;
pub mod markdown;
pub mod text;
pub mod word_lists;

pub use analysis::{
    AnalysisOptions, AnalysisReport, LongSentence, PhraseEntry, SimilarPair, Totals, WordEntry,
    analyze,
};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, ExportError, IngestError,
    IngestResult,
};
pub use export::ExportFormat;
pub use ingest::DEFAULT_MAX_INPUT_BYTES;
