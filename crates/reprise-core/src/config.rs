//! Layered configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. the user file, `config.<ext>` under the platform config directory
//!    (`~/.config/reprise/` on Linux)
//! 3. project files in the nearest directory, walking up from the search
//!    root, that holds `.reprise.<ext>` or `reprise.<ext>`; the walk stops
//!    at a directory containing `.git`
//! 4. files added with [`ConfigLoader::with_file`] (`--config`)
//! 5. `REPRISE_*` environment variables, with `__` separating nested keys
//!    (`REPRISE_ANALYSIS__MAX_RESULTS=5`)
//!
//! `<ext>` is one of `toml`, `yaml`, `yml`, `json`. Within one directory
//! dotfiles merge before plain names, and extensions merge in that order.
//!
//! ```toml
//! log_level = "info"
//! max_input_bytes = 2097152
//!
//! [analysis]
//! exclude_common = true
//! max_results = 20
//! custom_words = ["very", "really"]
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::error::{ConfigError, ConfigResult};
use crate::ingest::DEFAULT_MAX_INPUT_BYTES;

const APP_NAME: &str = "reprise";
const ENV_PREFIX: &str = "REPRISE_";
const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];
const DEFAULT_BOUNDARY: &str = ".git";

/// Effective settings after all sources are merged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Minimum level for stderr logs when neither `RUST_LOG` nor `-q`/`-v`
    /// is given.
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Input ceiling in bytes; [`DEFAULT_MAX_INPUT_BYTES`] when unset.
    pub max_input_bytes: Option<usize>,
    /// Skip the input size check entirely.
    pub disable_input_limit: bool,
    /// Analysis defaults. Command-line flags and MCP tool parameters
    /// override individual fields.
    pub analysis: AnalysisOptions,
}

impl Config {
    /// The input ceiling to enforce, or `None` when the check is disabled.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit)
            .then(|| self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-stage analysis detail.
    Debug,
    /// Lifecycle messages.
    #[default]
    Info,
    /// Problems that did not stop the run.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// The files that contributed to a loaded [`Config`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// File from the user config directory, if one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Project files from the nearest matching directory, in merge order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// Explicitly requested files, in merge order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file that won the merge: last explicit, else last project, else
    /// the user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or_else(|| self.project_files.last())
            .or(self.user_file.as_ref())
            .map(Utf8PathBuf::as_path)
    }

    fn is_empty(&self) -> bool {
        self.primary_file().is_none()
    }
}

/// Collects configuration sources and merges them into a [`Config`].
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    read_user_file: bool,
    boundary: Option<String>,
    explicit: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user file, stops project search at `.git`,
    /// and has no search root yet.
    pub fn new() -> Self {
        Self {
            search_root: None,
            read_user_file: true,
            boundary: Some(DEFAULT_BOUNDARY.to_string()),
            explicit: Vec::new(),
        }
    }

    /// Look for project files starting at `dir`.
    pub fn with_project_search(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.search_root = Some(dir.as_ref().to_owned());
        self
    }

    /// Whether to read the user config file.
    pub const fn with_user_config(mut self, enabled: bool) -> Self {
        self.read_user_file = enabled;
        self
    }

    /// Stop the upward walk at a directory containing `marker`.
    pub fn with_boundary_marker(mut self, marker: impl Into<String>) -> Self {
        self.boundary = Some(marker.into());
        self
    }

    /// Walk all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary = None;
        self
    }

    /// Merge `path` after every discovered file.
    pub fn with_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.explicit.push(path.as_ref().to_owned());
        self
    }

    /// Merge all sources.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Deserialize`] when a file cannot be parsed or a value
    /// has the wrong type.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.discover();
        let config = Self::merge(&sources)?;
        tracing::info!(
            config_file = ?sources.primary_file(),
            log_level = config.log_level.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fails with [`ConfigError::NotFound`]
    /// when no file exists in any location.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.discover();
        if sources.is_empty() {
            return Err(ConfigError::NotFound);
        }
        let config = Self::merge(&sources)?;
        Ok((config, sources))
    }

    fn discover(self) -> ConfigSources {
        let user_file = if self.read_user_file {
            user_config_file()
        } else {
            None
        };
        let project_files = self
            .search_root
            .as_deref()
            .map(|root| project_config_files(root, self.boundary.as_deref()))
            .unwrap_or_default();

        ConfigSources {
            user_file,
            project_files,
            explicit_files: self.explicit,
        }
    }

    fn merge(sources: &ConfigSources) -> ConfigResult<Config> {
        let files = sources
            .user_file
            .iter()
            .chain(&sources.project_files)
            .chain(&sources.explicit_files);

        let figment = files
            .fold(
                Figment::from(Serialized::defaults(Config::default())),
                |figment, path| merge_file(figment, path),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))
    }
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    tracing::debug!(%path, "merging config file");
    match path.extension() {
        Some("json") => figment.merge(Json::file_exact(path.as_std_path())),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_std_path())),
        _ => figment.merge(Toml::file_exact(path.as_std_path())),
    }
}

/// Config files in the nearest directory at or above `start` that has any.
fn project_config_files(start: &Utf8Path, boundary: Option<&str>) -> Vec<Utf8PathBuf> {
    let stems = [format!(".{APP_NAME}"), APP_NAME.to_string()];

    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = stems
            .iter()
            .flat_map(|stem| {
                EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{stem}.{ext}")))
            })
            .filter(|candidate| candidate.is_file())
            .collect();
        if !found.is_empty() {
            return found;
        }

        // A config beside the marker still counts; nothing above it does.
        if dir != start && boundary.is_some_and(|marker| dir.join(marker).exists()) {
            break;
        }
    }
    Vec::new()
}

fn user_config_file() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Platform config directory for reprise, if the home directory is known.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}
