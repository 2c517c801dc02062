use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration for a single search run.
///
/// # Configuration Locations
///
/// Defaults can be loaded from several locations, later ones taking
/// precedence:
/// 1. Global `$HOME/.config/searchtool/config.yaml`
/// 2. Local `.searchtool.yaml` in the current directory
/// 3. A file passed with `--config`
///
/// The term, the file to search and case-insensitive mode always come from
/// the command line and are never read from a configuration file. A default
/// location that fails to parse is skipped with a warning; an explicit
/// `--config` file that fails to parse is an error.
///
/// # Configuration Format
///
/// ```yaml
/// # Pre-fault the mapped pages before scanning
/// populate: true
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// The literal bytes to search for
    #[serde(skip)]
    pub term: Vec<u8>,

    /// File to search
    #[serde(skip)]
    pub path: PathBuf,

    /// Match ASCII letters regardless of case; set only by `-i`
    #[serde(skip)]
    pub case_insensitive: bool,

    /// Ask the kernel to read the whole file in when mapping it
    pub populate: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            term: Vec::new(),
            path: PathBuf::new(),
            case_insensitive: false,
            populate: true,
            log_level: default_log_level(),
        }
    }
}

pub fn default_log_level() -> String {
    "warn".to_string()
}

impl SearchConfig {
    pub fn new(term: impl Into<Vec<u8>>, path: impl Into<PathBuf>) -> Self {
        Self {
            term: term.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Loads configuration, layering `config_path` over the default locations.
    ///
    /// Default locations are optional; an explicit `config_path` must exist.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let default_files: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("searchtool/config.yaml")),
            Some(PathBuf::from(".searchtool.yaml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_layers(&default_files, config_path)
    }

    fn load_layers(
        default_files: &[PathBuf],
        config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        for path in default_files.iter().filter(|p| p.exists()) {
            let parsed = ConfigBuilder::builder()
                .add_source(File::from(path.as_path()))
                .build()
                .and_then(|c| c.try_deserialize::<SearchConfig>());
            match parsed {
                Ok(_) => builder = builder.add_source(File::from(path.as_path())),
                Err(e) => warn!("Ignoring malformed config file {}: {}", path.display(), e),
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        self.term = cli_config.term;
        self.path = cli_config.path;
        self.case_insensitive = cli_config.case_insensitive;
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }
}
