//! Theme preference, the only state kept between sessions.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Color palette for the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Light marks on the terminal background.
    #[default]
    Dark,
    /// Dark marks for light terminals.
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Contents of the preferences file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Last theme the player chose.
    pub theme: Theme,
}

impl Preferences {
    /// Reads preferences from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PreferencesError::new(format!("Failed to read preferences: {}", e)))?;
        let prefs: Self = toml::from_str(&content)
            .map_err(|e| PreferencesError::new(format!("Failed to parse preferences: {}", e)))?;
        debug!(theme = %prefs.theme, "Preferences loaded");
        Ok(prefs)
    }

    /// Writes preferences to a TOML file, replacing it.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display(), theme = %self.theme))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PreferencesError> {
        let content = toml::to_string(self)
            .map_err(|e| PreferencesError::new(format!("Failed to encode preferences: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| PreferencesError::new(format!("Failed to write preferences: {}", e)))?;
        info!("Preferences saved");
        Ok(())
    }

    /// Stored theme, if the file exists and parses.
    ///
    /// A missing file is normal on first launch; anything else is logged.
    pub fn stored_theme(path: &Path) -> Option<Theme> {
        if !path.exists() {
            debug!(path = %path.display(), "No preferences file");
            return None;
        }
        match Self::load(path) {
            Ok(prefs) => Some(prefs.theme),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable preferences");
                None
            }
        }
    }

    /// Saves `theme`, logging instead of failing.
    pub fn remember_theme(path: &Path, theme: Theme) {
        if let Err(e) = Self::from(theme).save(path) {
            warn!(error = %e, "Could not persist theme");
        }
    }
}

impl From<Theme> for Preferences {
    fn from(theme: Theme) -> Self {
        Self { theme }
    }
}

/// Preferences file error.
#[derive(Debug, Clone, Display, Error)]
#[display("Preferences error: {} at {}:{}", message, file, line)]
pub struct PreferencesError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PreferencesError {
    /// Creates a new preferences error.
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
    fn test_theme_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        Preferences::remember_theme(&path, Theme::Light);
        assert_eq!(Preferences::stored_theme(&path), Some(Theme::Light));

        Preferences::remember_theme(&path, Theme::Dark);
        assert_eq!(Preferences::stored_theme(&path), Some(Theme::Dark));
    }

    #[test]
    fn test_missing_file_has_no_theme() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Preferences::stored_theme(&dir.path().join("absent.toml")), None);
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "theme = \"purple\"").unwrap();
        assert_eq!(Preferences::stored_theme(&path), None);
        assert!(Preferences::load(&path).is_err());
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("prefs.toml");
        Preferences::remember_theme(&path, Theme::Light);
        assert!(!path.exists());
    }

    #[test]
    fn test_theme_parses_case_insensitively() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
