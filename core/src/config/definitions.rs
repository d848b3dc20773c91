//! Synergy definition files
//!
//! Definitions are loaded from TOML files in two locations:
//! - **Builtin**: shipped with the application (read-only)
//! - **Custom**: user-created definitions (editable)
//!
//! Custom definitions override builtins with the same name. Files only
//! carry data; the host binds gameplay effects to names at registration.
//!
//! ```toml
//! [[synergy]]
//! name = "Lumberjack"
//! description = "Chopping speed doubled"
//! requires = ["Axe", "Shield"]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::synergies::{Effect, SynergyRegistry};

fn default_true() -> bool {
    true
}

/// One `[[synergy]]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyConfig {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Upgrade display names, in announcement order
    pub requires: Vec<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Contents of a single definition file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionConfig {
    #[serde(default, rename = "synergy")]
    pub synergies: Vec<SynergyConfig>,
}

/// Supplies the gameplay effect for a synergy loaded from a file
pub trait EffectBinder {
    /// Effect for `name`, or `None` for an announcement-only synergy
    fn bind(&mut self, name: &str) -> Option<Effect>;
}

impl<F> EffectBinder for F
where
    F: FnMut(&str) -> Option<Effect>,
{
    fn bind(&mut self, name: &str) -> Option<Effect> {
        self(name)
    }
}

/// Merged definitions from every loaded file, in load order
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    entries: Vec<SynergyConfig>,
    /// Lowercase name -> position in `entries`
    by_name: HashMap<String, usize>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add definitions from a config. If `overwrite` is true, replaces existing
    /// definitions with the same name in place.
    /// Returns names of duplicates that were encountered (skipped if !overwrite).
    pub fn add_config(&mut self, config: DefinitionConfig, overwrite: bool) -> Vec<String> {
        let mut duplicates = Vec::new();
        for synergy in config.synergies {
            let key = synergy.name.trim().to_lowercase();
            match self.by_name.get(&key) {
                Some(&idx) => {
                    duplicates.push(synergy.name.clone());
                    if overwrite {
                        self.entries[idx] = synergy;
                    }
                }
                None => {
                    self.by_name.insert(key, self.entries.len());
                    self.entries.push(synergy);
                }
            }
        }
        duplicates
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&SynergyConfig> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    pub fn enabled(&self) -> impl Iterator<Item = &SynergyConfig> {
        self.entries.iter().filter(|def| def.enabled)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register every enabled definition, asking `binder` for its effect.
    ///
    /// Invalid definitions are logged and skipped. Returns how many were
    /// registered.
    pub fn register_into(
        &self,
        registry: &mut SynergyRegistry,
        binder: &mut impl EffectBinder,
    ) -> usize {
        let mut registered = 0;
        for def in self.enabled() {
            let effect = binder.bind(&def.name).unwrap_or_else(|| {
                tracing::debug!("[CONFIG] No effect bound for '{}', announcing only", def.name);
                Effect::noop()
            });
            match registry.register(&def.name, &def.description, effect, &def.requires) {
                Ok(_) => registered += 1,
                Err(e) => tracing::warn!("[CONFIG] Skipping definition: {}", e),
            }
        }
        registered
    }
}

/// Load definitions from builtin and custom config directories
///
/// Builtin definitions are loaded first, then custom definitions.
/// Custom definitions with the same name override builtins. Missing
/// directories are skipped.
pub fn load_definitions(
    builtin_dir: Option<&Path>,
    custom_dir: Option<&Path>,
) -> Result<DefinitionSet, ConfigError> {
    let mut set = DefinitionSet::new();

    if let Some(dir) = builtin_dir
        && dir.exists()
    {
        load_directory(&mut set, dir, "builtin", false)?;
    }

    if let Some(dir) = custom_dir
        && dir.exists()
    {
        load_directory(&mut set, dir, "custom", true)?;
    }

    tracing::info!("[CONFIG] Loaded {} synergy definitions", set.len());
    Ok(set)
}

/// Load all TOML files from a directory, in file name order
fn load_directory(
    set: &mut DefinitionSet,
    dir: &Path,
    source: &str,
    overwrite: bool,
) -> Result<(), ConfigError> {
    let entries = fs::read_dir(dir).map_err(|e| ConfigError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    for path in paths {
        match load_file(&path) {
            Ok(config) => {
                let duplicates = set.add_config(config, overwrite);
                if !duplicates.is_empty() {
                    tracing::warn!(
                        "[CONFIG] [{}] Duplicate synergy names in {:?}: {:?}",
                        source,
                        path.file_name(),
                        duplicates
                    );
                }
            }
            Err(e) => {
                // Log error but continue loading other files
                tracing::error!(
                    "[CONFIG] [{}] Failed to load {:?}: {}",
                    source,
                    path.file_name(),
                    e
                );
            }
        }
    }

    Ok(())
}

/// Load a single TOML definition file
pub fn load_file(path: &Path) -> Result<DefinitionConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a config to a TOML file
pub fn save_file(path: &Path, config: &DefinitionConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Get the default builtin definitions directory
pub fn default_builtin_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("definitions").join("builtin")))
}

/// Get the default custom definitions directory
pub fn default_custom_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(super::APP_NAME).join("definitions"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml: &str) -> DefinitionConfig {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_parse_synergy_toml() {
        let config = config(
            r#"
[[synergy]]
name = "Lumberjack"
description = "Chopping speed doubled"
requires = ["Axe", "Shield"]

[[synergy]]
name = "Disabled"
requires = ["a"]
enabled = false
"#,
        );
        assert_eq!(config.synergies.len(), 2);
        assert_eq!(config.synergies[0].requires, vec!["Axe", "Shield"]);
        assert!(config.synergies[0].enabled);
        assert!(!config.synergies[1].enabled);
        assert_eq!(config.synergies[1].description, "");
    }

    #[test]
    fn test_missing_requires_is_parse_error() {
        let result: Result<DefinitionConfig, _> = toml::from_str(
            r#"
[[synergy]]
name = "No requirements"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_add_config_overwrite_and_skip() {
        let mut set = DefinitionSet::new();
        set.add_config(
            config(
                r#"
[[synergy]]
name = "Lumberjack"
requires = ["Axe"]
"#,
            ),
            false,
        );

        let dupes = set.add_config(
            config(
                r#"
[[synergy]]
name = "LUMBERJACK"
requires = ["Saw"]
"#,
            ),
            false,
        );
        assert_eq!(dupes, vec!["LUMBERJACK"]);
        assert_eq!(set.get("lumberjack").unwrap().requires, vec!["Axe"]);

        set.add_config(
            config(
                r#"
[[synergy]]
name = "lumberjack"
requires = ["Chainsaw"]
"#,
            ),
            true,
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Lumberjack").unwrap().requires, vec!["Chainsaw"]);
    }

    #[test]
    fn test_custom_overrides_builtin() {
        let builtin = tempfile::tempdir().unwrap();
        let custom = tempfile::tempdir().unwrap();

        fs::write(
            builtin.path().join("base.toml"),
            r#"
[[synergy]]
name = "Lumberjack"
requires = ["Axe", "Shield"]

[[synergy]]
name = "Farmer"
requires = ["Hoe", "Seeds"]
"#,
        )
        .unwrap();
        fs::write(
            custom.path().join("mine.toml"),
            r#"
[[synergy]]
name = "Farmer"
description = "Custom farmer"
requires = ["Hoe", "Watering Can"]
"#,
        )
        .unwrap();
        fs::write(custom.path().join("broken.toml"), "[[synergy]]\nname = ").unwrap();
        fs::write(custom.path().join("notes.txt"), "ignored").unwrap();

        let set = load_definitions(Some(builtin.path()), Some(custom.path())).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("farmer").unwrap().description, "Custom farmer");
        assert_eq!(set.get("Lumberjack").unwrap().requires, vec!["Axe", "Shield"]);
    }

    #[test]
    fn test_missing_directories_give_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let set = load_definitions(Some(&missing), None).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let original = config(
            r#"
[[synergy]]
name = "Lumberjack"
description = "Chop"
requires = ["Axe", "Shield"]
"#,
        );

        save_file(&path, &original).unwrap();
        assert_eq!(load_file(&path).unwrap(), original);
    }

    #[test]
    fn test_register_into_binds_effects_and_skips_invalid() {
        let set = {
            let mut set = DefinitionSet::new();
            set.add_config(
                config(
                    r#"
[[synergy]]
name = "Lumberjack"
requires = ["Axe", "Shield"]

[[synergy]]
name = "Empty"
requires = []

[[synergy]]
name = "Off"
requires = ["x"]
enabled = false
"#,
                ),
                false,
            );
            set
        };

        let mut registry = SynergyRegistry::new();
        let mut bound = Vec::new();
        let registered = set.register_into(&mut registry, &mut |name: &str| {
            bound.push(name.to_string());
            Some(Effect::noop().with_cleanup(|| Ok(())))
        });

        assert_eq!(registered, 1);
        assert_eq!(bound, vec!["Lumberjack", "Empty"]);
        assert!(registry.find_by_name("Lumberjack").unwrap().effect().has_cleanup());
        assert!(registry.find_by_name("Off").is_none());
    }
}
