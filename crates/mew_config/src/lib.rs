//! mew_config: mew.json project configuration.
//!
//! A project file names the compilation, lists its source files relative to
//! the directory holding `mew.json`, and tunes the few knobs the compiler
//! exposes. Every field is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name searched for by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "mew.json";

fn default_library() -> String {
    "mewstd".to_string()
}

fn default_max_sync_errors() -> usize {
    100
}

/// The mew.json file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Compilation name. Defaults to the stem of the first file.
    #[serde(default)]
    pub name: Option<String>,
    /// Source files, relative to the config file's directory.
    #[serde(default)]
    pub files: Vec<String>,
    /// Library name stamped onto external functions.
    #[serde(default = "default_library")]
    pub library: String,
    /// How many times the parser may resynchronize in one file.
    #[serde(default = "default_max_sync_errors")]
    pub max_sync_errors: usize,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            files: Vec::new(),
            library: default_library(),
            max_sync_errors: default_max_sync_errors(),
        }
    }
}

impl ProjectConfig {
    /// The configured name, or the stem of the first file, or `"main"`.
    pub fn compilation_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.files
            .first()
            .and_then(|file| Path::new(file).file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "main".to_string())
    }

    /// Source paths resolved against `base`, the config file's directory.
    pub fn source_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.files.iter().map(|file| base.join(file)).collect()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid project file{}: {source}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" '{}'", path.display()),
        None => String::new(),
    }
}

/// Parse a mew.json document.
pub fn parse_config(content: &str) -> Result<ProjectConfig, ConfigError> {
    serde_json::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })
}

/// Read and parse the mew.json file at `path`.
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: Some(path.to_path_buf()),
        source,
    })?;
    debug!(path = %path.display(), "loaded project config");
    Ok(config)
}

/// Walk up from `start` looking for a mew.json file.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
