//! Info command: package metadata and the effective configuration.

use clap::Args;
use owo_colors::OwoColorize;
use reprise_core::AnalysisOptions;
use reprise_core::config::{Config, ConfigSources};
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand (uses the global `--json`).
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

/// Everything `info` reports; serialized as-is for `--json`.
#[derive(Serialize)]
struct InfoReport {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    config: EffectiveConfig,
}

#[derive(Serialize)]
struct EffectiveConfig {
    config_file: Option<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    /// `null` when the limit is disabled.
    max_input_bytes: Option<usize>,
    analysis: AnalysisOptions,
}

impl EffectiveConfig {
    fn new(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(ToString::to_string),
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_ref().map(ToString::to_string),
            max_input_bytes: config.input_limit(),
            analysis: config.analysis.clone(),
        }
    }
}

impl InfoReport {
    fn new(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            config: EffectiveConfig::new(config, sources),
        }
    }
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");
    let report = InfoReport::new(config, sources);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &InfoReport) {
    println!("{} {}", report.name.bold(), report.version.green());
    println!("{}", report.description);
    for (label, value) in [("License", report.license), ("Repository", report.repository)] {
        if !value.is_empty() {
            field(label, value.cyan());
        }
    }

    let c = &report.config;
    heading("Configuration");
    match c.config_file {
        Some(ref path) => field("Config file", path.cyan()),
        None => field("Config file", "none loaded".yellow()),
    }
    field("Log level", c.log_level);
    if let Some(ref dir) = c.log_dir {
        field("Log directory", dir);
    }
    match c.max_input_bytes {
        Some(limit) => field("Input limit", format!("{limit} bytes")),
        None => field("Input limit", "disabled".yellow()),
    }

    let a = &c.analysis;
    heading("Analysis defaults");
    for (label, on) in [
        ("Repeated words", a.repeated_words),
        ("Repeated phrases", a.repeated_phrases),
        ("Repeated starters", a.repeated_starters),
        ("Similar sentences", a.similar_sentences),
        ("Long sentences", a.long_sentences),
        ("Exclude common words", a.exclude_common),
    ] {
        if on {
            field(label, "on".green());
        } else {
            field(label, "off".yellow());
        }
    }
    field("Max results", a.max_results);
    if a.custom_words.is_empty() {
        field("Focus terms", "(none)".dimmed());
    } else {
        field("Focus terms", a.custom_words.join(", "));
    }
}

fn heading(title: &str) {
    println!("\n{}", title.bold().underline());
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("{}: {value}", label.dimmed());
}
