//! Analyze command: repetition and sentence-structure feedback.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use reprise_core::{AnalysisOptions, AnalysisReport, ExportFormat, analyze, export, ingest, markdown};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// File to analyze (.txt or .md). Reads stdin when omitted.
    #[arg(conflicts_with = "text")]
    pub file: Option<Utf8PathBuf>,

    /// Analyze this text instead of a file.
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Skip the repeated-words list.
    #[arg(long)]
    pub no_words: bool,

    /// Skip repeated 3- and 4-word phrases.
    #[arg(long)]
    pub no_phrases: bool,

    /// Skip repeated sentence openings.
    #[arg(long)]
    pub no_starters: bool,

    /// Skip near-duplicate sentence detection.
    #[arg(long)]
    pub no_similar: bool,

    /// Skip long-sentence detection.
    #[arg(long)]
    pub no_long: bool,

    /// Keep common English words in word and phrase counts.
    #[arg(long)]
    pub include_common: bool,

    /// Maximum number of repeated words to list.
    #[arg(long, value_name = "N")]
    pub max_results: Option<usize>,

    /// Focus words to count (comma-separated).
    #[arg(long, value_name = "WORDS")]
    pub custom: Option<String>,

    /// Strip Markdown syntax before analysis.
    #[arg(long)]
    pub strip_markdown: bool,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,
}

impl AnalyzeArgs {
    /// Apply the command-line flags on top of the configured defaults.
    ///
    /// `--no-*` and `--include-common` can only turn an analysis off or
    /// widen counting; they never re-enable what the config disabled.
    pub fn options(&self, defaults: &AnalysisOptions) -> AnalysisOptions {
        let mut options = defaults.clone();
        options.repeated_words &= !self.no_words;
        options.repeated_phrases &= !self.no_phrases;
        options.repeated_starters &= !self.no_starters;
        options.similar_sentences &= !self.no_similar;
        options.long_sentences &= !self.no_long;
        options.exclude_common &= !self.include_common;
        if let Some(max) = self.max_results {
            options.max_results = max;
        }
        if let Some(ref raw) = self.custom {
            options.custom_words = AnalysisOptions::parse_custom_words(raw);
        }
        options
    }

    fn export_format(&self, global_json: bool) -> ExportFormat {
        match self.format {
            Some(format) => format,
            None if global_json => ExportFormat::Json,
            None => ExportFormat::Text,
        }
    }
}

/// Analyze a file, inline text, or stdin and print the report.
#[instrument(name = "cmd_analyze", skip_all, fields(file = ?args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    defaults: &AnalysisOptions,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let options = args.options(defaults);
    let format = args.export_format(global_json);
    debug!(?options, ?format, "executing analyze command");

    let raw = if let Some(ref text) = args.text {
        ingest::check_input_size(text.len(), max_input)?;
        text.clone()
    } else if let Some(ref path) = args.file {
        super::read_input_file(path, max_input)?
    } else {
        super::read_input_stream(std::io::stdin().lock(), max_input)?
    };

    let text = if args.strip_markdown {
        markdown::strip_to_prose(&raw)
    } else {
        raw
    };

    let source = args.file.as_ref().map_or("input", |p| p.as_str());
    let report = analyze(&text, &options).with_context(|| format!("failed to analyze {source}"))?;

    match format {
        ExportFormat::Json => println!("{}", export::to_json(&report)?),
        ExportFormat::Csv => print!("{}", export::to_csv(&report)?),
        ExportFormat::Text => print_report(source, &report, &options),
    }

    Ok(())
}

fn print_report(source: &str, report: &AnalysisReport, options: &AnalysisOptions) {
    let t = &report.totals;
    println!("{}", source.bold());
    println!(
        "\n  {} {} words, {} unique, {} sentences, lexical diversity {:.3}",
        "Totals:".cyan(),
        t.total_words,
        t.unique_words,
        t.total_sentences,
        t.lexical_diversity,
    );

    if options.repeated_words {
        section("Repeated words", report.repeated_words.is_empty());
        for w in &report.repeated_words {
            println!("    {} ({})", w.value, w.count);
        }
    }

    if options.repeated_phrases {
        section("Repeated phrases", report.repeated_phrases.is_empty());
        for p in &report.repeated_phrases {
            println!("    \"{}\" ({}, {}-word)", p.value, p.count, p.n);
        }
    }

    if options.repeated_starters {
        section("Repeated starters", report.repeated_starters.is_empty());
        for s in &report.repeated_starters {
            println!("    \"{}...\" ({})", s.value, s.count);
        }
    }

    if options.similar_sentences {
        section("Similar sentences", report.similar_sentences.is_empty());
        for pair in &report.similar_sentences {
            println!("    {}", format!("{:.2}", pair.score).yellow());
            println!("      {}", pair.sentence_a);
            println!("      {}", pair.sentence_b);
        }
    }

    if options.long_sentences {
        section("Long sentences", report.long_sentences.is_empty());
        for l in &report.long_sentences {
            println!("    {} words: {}", l.words.yellow(), l.sentence);
        }
    }

    if !report.custom_counts.is_empty() {
        section("Focus terms", false);
        for c in &report.custom_counts {
            println!("    {} ({})", c.value, c.count);
        }
    }
}

fn section(title: &str, empty: bool) {
    println!("\n  {}", format!("{title}:").cyan());
    if empty {
        println!("    {}", "none found".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = AnalyzeArgs {
            no_phrases: true,
            include_common: true,
            max_results: Some(3),
            custom: Some("Very, really ,".to_string()),
            ..Default::default()
        };
        let options = args.options(&AnalysisOptions::default());
        assert!(options.repeated_words);
        assert!(!options.repeated_phrases);
        assert!(!options.exclude_common);
        assert_eq!(options.max_results, 3);
        assert_eq!(options.custom_words, vec!["very", "really"]);
    }

    #[test]
    fn config_defaults_survive_without_flags() {
        let defaults = AnalysisOptions {
            similar_sentences: false,
            max_results: 7,
            ..AnalysisOptions::default()
        }
        .with_custom_words(["just"]);
        let options = AnalyzeArgs::default().options(&defaults);
        assert_eq!(options, defaults);
    }

    #[test]
    fn json_flag_implies_json_format() {
        let args = AnalyzeArgs::default();
        assert_eq!(args.export_format(true), ExportFormat::Json);
        assert_eq!(args.export_format(false), ExportFormat::Text);

        let args = AnalyzeArgs {
            format: Some(ExportFormat::Csv),
            ..Default::default()
        };
        assert_eq!(args.export_format(true), ExportFormat::Csv);
    }

    #[test]
    fn inline_text_over_limit_fails() {
        let args = AnalyzeArgs {
            text: Some("A sentence that is far too long.".to_string()),
            ..Default::default()
        };
        assert!(cmd_analyze(args, true, &AnalysisOptions::default(), Some(8)).is_err());
    }

    #[test]
    fn inline_text_succeeds() {
        let args = AnalyzeArgs {
            text: Some("The cat sat. The cat ran.".to_string()),
            format: Some(ExportFormat::Csv),
            ..Default::default()
        };
        assert!(cmd_analyze(args, false, &AnalysisOptions::default(), None).is_ok());
    }
}
