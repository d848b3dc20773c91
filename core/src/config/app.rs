use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use synergy_types::AnnouncementConfig;

use super::ConfigError;
use super::definitions::default_custom_dir;

/// Name used for the confy config file and the config directory
pub const APP_NAME: &str = "synergy";

/// User settings, persisted in the platform config directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Custom definitions directory (platform default when unset)
    pub definitions_dir: Option<PathBuf>,
    pub announcement: AnnouncementConfig,
}

impl AppConfig {
    /// Load from disk, creating the file with defaults on first run
    pub fn load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, self)?;
        Ok(())
    }

    /// Load from an explicit file instead of the platform config directory
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(confy::load_path(path)?)
    }

    pub fn save_path(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        confy::store_path(path, self)?;
        Ok(())
    }

    pub fn custom_definitions_dir(&self) -> Option<PathBuf> {
        self.definitions_dir.clone().or_else(default_custom_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let config: AppConfig = toml::from_str(
            r#"
definitions_dir = "/tmp/synergies"

[announcement]
first_delay_secs = 2.0
"#,
        )
        .unwrap();
        assert_eq!(config.definitions_dir, Some(PathBuf::from("/tmp/synergies")));
        assert_eq!(config.custom_definitions_dir(), Some(PathBuf::from("/tmp/synergies")));
        assert_eq!(config.announcement.first_delay_secs, 2.0);
        assert_eq!(config.announcement.headline, "SYNERGY!");
    }

    #[test]
    fn test_load_path_reports_bad_file_as_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synergy.toml");
        std::fs::write(&path, "announcement = 3").unwrap();

        let err = AppConfig::load_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)), "got {err}");
    }

    #[test]
    fn test_save_path_then_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synergy.toml");
        let mut config = AppConfig::default();
        config.announcement.second_delay_secs = 3.0;

        config.save_path(&path).unwrap();
        assert_eq!(AppConfig::load_path(&path).unwrap(), config);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
