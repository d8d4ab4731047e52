//! reprise CLI
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use reprise::{Cli, Commands, commands};
use reprise_core::config::{Config, ConfigLoader, ConfigSources};

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    // clap prints help and exits when neither a subcommand nor --version-only is given
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let (config, sources) = load_config(cli.config.as_deref())?;

    let log_target = observability::ObservabilityConfig::from_env_with_overrides(
        config.log_dir.clone().map(PathBuf::from),
    );
    let filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _log_guard = observability::init_observability(&log_target, filter)
        .context("failed to initialize logging")?;

    tracing::debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        file_logging = log_target.writes_file(),
        "CLI initialized"
    );

    let result = run(command, cli.json, config, &sources);
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = utf8(std::env::current_dir().context("failed to determine current directory")?)
        .context("current directory is not valid UTF-8")?;

    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(path) = explicit {
        let path = utf8(path.to_path_buf()).context("config path is not valid UTF-8")?;
        loader = loader.with_file(path);
    }
    loader.load().context("failed to load configuration")
}

fn utf8(path: PathBuf) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|e| anyhow!("{}", e.into_path_buf().display()))
}

fn run(
    command: Commands,
    json: bool,
    config: Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let max_input = config.input_limit();
    match command {
        Commands::Analyze(args) => {
            commands::analyze::cmd_analyze(args, json, &config.analysis, max_input)
        }
        Commands::Info(args) => commands::info::cmd_info(args, json, &config, sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .context("failed to create async runtime for MCP server")?
            .block_on(commands::serve::cmd_serve(args, max_input, config)),
    }
}
