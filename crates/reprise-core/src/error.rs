//! Error types for reprise-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Loading or merging configuration failed.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A file failed to parse, or a value has the wrong type.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// `load_or_error` found no file in any searched location.
    #[error("no configuration file found")]
    NotFound,
}

/// Shorthand for config results.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Analysis could not run on the given input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input is empty or whitespace-only after normalization.
    #[error("no text provided")]
    InvalidInput,
}

/// Shorthand for analysis results.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised while turning a document into analyzable text.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The document format cannot be converted to text.
    #[error("unsupported file type: {extension}. Use .txt, .md, or .docx")]
    UnsupportedFormat {
        /// The extension that was rejected (empty when the path has none).
        extension: String,
    },

    /// The input exceeds the configured byte ceiling.
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: u64,
        /// The configured limit in bytes.
        limit: u64,
    },

    /// The document could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path of the document.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A `.docx` file is not a valid archive or lacks a document body.
    #[error("failed to open word document {path}")]
    Archive {
        /// Path of the document.
        path: Utf8PathBuf,
        /// Underlying archive error.
        #[source]
        source: zip::result::ZipError,
    },

    /// The document body of a `.docx` file is malformed XML.
    #[error("failed to parse word document {path}")]
    Xml {
        /// Path of the document.
        path: Utf8PathBuf,
        /// Underlying XML error.
        #[source]
        source: quick_xml::Error,
    },
}

/// Result type alias using [`IngestError`].
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised while rendering a report for export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV writer could not be flushed into a string.
    #[error("csv export produced invalid output: {0}")]
    Buffer(String),
}
