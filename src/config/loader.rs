use std::fs;
use std::path::{Path, PathBuf};

use super::LinestatConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".linestat.toml";

/// Maximum number of directories searched for a config file
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse a config from TOML source
pub fn parse_config(contents: &str) -> Result<LinestatConfig> {
    toml::from_str::<LinestatConfig>(contents)
        .map_err(|e| Error::Configuration(format!("failed to parse {}: {}", CONFIG_FILE_NAME, e)))
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration.
///
/// With an explicit path, any read or parse failure is an error. Without
/// one, `.linestat.toml` is looked up from the current directory upward,
/// and a broken file is reported and ignored.
pub fn load_config(explicit: Option<&Path>) -> Result<LinestatConfig> {
    if let Some(path) = explicit {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        return parse_config(&contents);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Failed to get current directory: {}. Using default config.", e);
            return Ok(LinestatConfig::default());
        }
    };

    Ok(discover_config(current))
}

fn discover_config(start: PathBuf) -> LinestatConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!("No {} found. Using default config.", CONFIG_FILE_NAME);
            LinestatConfig::default()
        })
}

fn try_load_config_from_path(config_path: &Path) -> Option<LinestatConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", config_path.display(), e);
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}
