//! Data directory management
//!
//! Resolves where the registry file and config live: the `RECOMATCH_HOME`
//! environment variable when set, the working directory otherwise.

use std::path::PathBuf;

use super::config::Config;

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "RECOMATCH_HOME";

pub fn data_root() -> PathBuf {
    std::env::var(HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolved data directory: root, loaded config and registry path.
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
    pub registry: PathBuf,
}

impl Workspace {
    /// Resolve from environment variable or current directory.
    pub fn new() -> Self {
        Self::from_root(data_root())
    }

    /// Resolve from a specific root directory. Loads config from it.
    pub fn from_root(root: PathBuf) -> Self {
        let config = Config::load(&root);
        let registry = root.join(&config.registry.file);
        Self {
            root,
            config,
            registry,
        }
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
