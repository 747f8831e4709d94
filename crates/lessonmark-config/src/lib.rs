use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding the config file, before tilde expansion.
const CONFIG_DIR: &str = "~/.config/lessonmark";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "lessonmark.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where the viewer finds lessons when no folder is given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub lessons_path: PathBuf,
}

impl Config {
    pub fn new(lessons_path: impl Into<PathBuf>) -> Self {
        Self {
            lessons_path: lessons_path.into(),
        }
    }

    /// Loads the config at `config_path`; `Ok(None)` when there is no file.
    ///
    /// `~` and `$VARS` in `lessons_path` are expanded. A path that cannot be
    /// expanded is kept as written.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        Self::parse(&content, config_path).map(Some)
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    /// `~/.config/lessonmark/config.toml`, tilde expanded.
    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde(CONFIG_DIR);
        PathBuf::from(config_dir.as_ref()).join(CONFIG_FILE)
    }

    /// `~/.config/lessonmark/lessonmark.log`, next to the config file.
    pub fn log_path() -> PathBuf {
        Self::config_path().with_file_name(LOG_FILE)
    }

    fn parse(content: &str, config_path: &Path) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let lessons_path = Self::expand_path(&config.lessons_path).unwrap_or(config.lessons_path);
        Ok(Self { lessons_path })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}
