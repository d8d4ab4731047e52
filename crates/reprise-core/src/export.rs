//! Export renderings of an [`AnalysisReport`].

use crate::analysis::AnalysisReport;
use crate::error::ExportError;

/// Output rendering for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ExportFormat {
    /// Human-readable sections (rendered by the front end).
    #[default]
    Text,
    /// Pretty-printed JSON of the full report.
    Json,
    /// Flat `Category,Item,Count/Score` rows.
    Csv,
}

/// Header row of the CSV export.
pub const CSV_HEADER: [&str; 3] = ["Category", "Item", "Count/Score"];

/// Render the report as pretty-printed JSON.
pub fn to_json(report: &AnalysisReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Flatten the report's lists into `Category,Item,Count/Score` rows.
///
/// Similar pairs are rendered as `"A <-> B"` with their score. Quoting
/// follows RFC 4180.
#[tracing::instrument(skip_all)]
pub fn to_csv(report: &AnalysisReport) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for w in &report.repeated_words {
        writer.write_record(["Repeated Word", &w.value, &w.count.to_string()])?;
    }
    for p in &report.repeated_phrases {
        writer.write_record(["Repeated Phrase", &p.value, &p.count.to_string()])?;
    }
    for s in &report.repeated_starters {
        writer.write_record(["Repeated Starter", &s.value, &s.count.to_string()])?;
    }
    for l in &report.long_sentences {
        writer.write_record(["Long Sentence", &l.sentence, &l.words.to_string()])?;
    }
    for pair in &report.similar_sentences {
        let item = format!("{} <-> {}", pair.sentence_a, pair.sentence_b);
        writer.write_record(["Similar Pair", &item, &pair.score.to_string()])?;
    }
    for c in &report.custom_counts {
        writer.write_record(["Focus Term", &c.value, &c.count.to_string()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}
