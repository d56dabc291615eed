//! Game configuration.

use crate::cli::PlayArgs;
use crate::preferences::Theme;
use derive_getters::Getters;
use derive_more::{Display, Error};
use perfect_play::Mark;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings for an interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Mark the human starts with.
    #[serde(default = "default_human_mark")]
    human_mark: Mark,

    /// Pause before the computer's move, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Fixed tie-break seed; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Theme used when no preference is stored.
    #[serde(default)]
    theme: Theme,

    /// Ring the terminal bell at the end of a round.
    #[serde(default = "default_sound")]
    sound: bool,

    /// Where the theme preference is kept.
    #[serde(default = "default_preferences_path")]
    preferences_path: PathBuf,
}

fn default_human_mark() -> Mark {
    Mark::X
}

fn default_computer_delay_ms() -> u64 {
    500
}

fn default_sound() -> bool {
    true
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("perfect_play_prefs.toml")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_mark: default_human_mark(),
            computer_delay_ms: default_computer_delay_ms(),
            seed: None,
            theme: Theme::default(),
            sound: default_sound(),
            preferences_path: default_preferences_path(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(human = %config.human_mark, delay_ms = config.computer_delay_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise the defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, args: &PlayArgs) -> Self {
        if let Some(mark) = args.human {
            self.human_mark = mark;
        }
        if let Some(delay) = args.delay_ms {
            self.computer_delay_ms = delay;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if let Some(theme) = args.theme {
            self.theme = theme;
        }
        if args.mute {
            self.sound = false;
        }
        debug!(config = ?self, "Overrides applied");
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfect_play.toml");
        std::fs::write(&path, "").unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(*config.computer_delay_ms(), 500);
        assert_eq!(*config.human_mark(), Mark::X);
        assert!(*config.sound());
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfect_play.toml");
        std::fs::write(
            &path,
            "human_mark = \"O\"\ncomputer_delay_ms = 0\nseed = 7\ntheme = \"light\"\nsound = false\n",
        )
        .unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(*config.human_mark(), Mark::O);
        assert_eq!(*config.computer_delay_ms(), 0);
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(*config.theme(), Theme::Light);
        assert!(!*config.sound());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfect_play.toml");
        std::fs::write(&path, "computer_delay_ms = \"soon\"").unwrap();

        let err = GameConfig::load_or_default(&path).unwrap_err();
        assert!(err.message.contains("Failed to parse config"), "{err}");
    }

    #[test]
    fn test_flags_override_file() {
        let args = PlayArgs {
            human: Some(Mark::O),
            delay_ms: Some(50),
            mute: true,
            ..PlayArgs::default()
        };
        let config = GameConfig::default().with_overrides(&args);
        assert_eq!(*config.human_mark(), Mark::O);
        assert_eq!(*config.computer_delay_ms(), 50);
        assert_eq!(*config.theme(), Theme::Dark);
        assert!(!*config.sound());
    }
}
