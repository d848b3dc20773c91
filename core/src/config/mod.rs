//! Configuration loading
//!
//! - **Definitions**: `[[synergy]]` tables in TOML files (builtin + custom)
//! - **App config**: user settings persisted with `confy`

mod app;
mod definitions;

use std::path::PathBuf;

pub use app::{APP_NAME, AppConfig};
pub use definitions::{
    DefinitionConfig, DefinitionSet, EffectBinder, SynergyConfig, default_builtin_dir,
    default_custom_dir, load_definitions, load_file, save_file,
};

/// Errors that can occur during config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },

    #[error("App config error: {0}")]
    Load(#[from] confy::ConfyError),
}
