//! The `reprise` command line and MCP front ends.
//!
//! `main.rs` owns process setup (config, logging, dispatch). This library
//! holds the argument definitions so `xtask` can render man pages and shell
//! completions from [`command()`], and so tests can parse arguments without
//! spawning the binary.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// When to colorize terminal output.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout supports it.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    /// Set the process-wide owo-colors override. Call once, before output.
    pub fn apply(self) {
        let enabled = match self {
            Self::Auto => return,
            Self::Always => true,
            Self::Never => false,
        };
        owo_colors::set_override(enabled);
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                  Log filter (e.g., debug, reprise_core=trace)
    REPRISE_LOG_PATH          Explicit JSONL log file path
    REPRISE_LOG_DIR           JSONL log directory
    REPRISE_<KEY>             Override a config key (e.g., REPRISE_LOG_LEVEL=debug)
    REPRISE_ANALYSIS__<KEY>   Override an analysis default (e.g., REPRISE_ANALYSIS__MAX_RESULTS=5)
";

/// Top-level arguments.
#[derive(Parser)]
#[command(name = "reprise")]
#[command(about = "Find repeated words, phrases, and sentence patterns in prose", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Extra configuration file, merged over discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before loading config or reading files
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// When to use terminal colors
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Report repeated words, phrases, openings, and similar or long sentences
    Analyze(commands::analyze::AnalyzeArgs),

    /// Show version, metadata, and the effective configuration
    Info(commands::info::InfoArgs),

    /// Serve analyze_text over MCP on stdin/stdout
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// The clap command tree, for man pages and completions.
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn analyze_flags_parse() {
        let cli = Cli::try_parse_from([
            "reprise",
            "analyze",
            "draft.md",
            "--no-similar",
            "--custom",
            "very,just",
            "--format",
            "csv",
        ])
        .unwrap();
        let Some(Commands::Analyze(args)) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.file.as_deref().map(|p| p.as_str()), Some("draft.md"));
        assert!(args.no_similar);
        assert_eq!(args.custom.as_deref(), Some("very,just"));
        assert_eq!(args.format, Some(reprise_core::ExportFormat::Csv));
    }

    #[test]
    fn file_and_text_conflict() {
        assert!(Cli::try_parse_from(["reprise", "analyze", "a.txt", "--text", "hi"]).is_err());
    }
}
