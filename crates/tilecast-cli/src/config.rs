//! User configuration for the `tilecast` binary.
//!
//! Loaded from `~/.config/tilecast/config.toml` unless `--config` names a
//! file. Every key is optional:
//!
//! ```toml
//! board_size = 15
//! title = "Untitled Game"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tilecast_types::{DEFAULT_BOARD_SIZE, DEFAULT_TITLE, MAX_BOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board edge length for `tilecast new`.
    pub board_size: usize,
    /// Title for `tilecast new`.
    pub title: String,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            title: DEFAULT_TITLE.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Get the config file path (~/.config/tilecast/config.toml).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tilecast").join("config.toml"))
}

impl Config {
    /// Load from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. A missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
        if !(1..=MAX_BOARD_SIZE).contains(&config.board_size) {
            anyhow::bail!(
                "{}: board_size must be between 1 and {MAX_BOARD_SIZE}",
                path.display()
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let file = write_config("board_size = 11\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.board_size, 11);
        assert_eq!(config.title, "Untitled Game");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"
board_size = 21
title = "Finals, game 3"
log_level = "debug"
"#,
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(
            config,
            Config {
                board_size: 21,
                title: "Finals, game 3".to_string(),
                log_level: "debug".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_config_names_path() {
        let file = write_config("board_size = \"big\"\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{err}").contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_board_size_range() {
        let file = write_config("board_size = 0\n");
        assert!(Config::load_from(file.path()).is_err());

        let file = write_config(&format!("board_size = {}\n", MAX_BOARD_SIZE + 1));
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(format!("{err}").contains("between 1 and"));

        let file = write_config(&format!("board_size = {MAX_BOARD_SIZE}\n"));
        assert_eq!(Config::load_from(file.path()).unwrap().board_size, MAX_BOARD_SIZE);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
