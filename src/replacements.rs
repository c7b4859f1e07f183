//! Custom replacement table used by `{{#customreplace: ...}}`
//!
//! The table is a flat JSON object of strings, e.g.
//! `{"Allosaurus": "Allo", "Snow Owl": "Owl"}`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Contents written when seeding a missing replacement file
const EXAMPLE_FILE: &str = "{\n  \"Allosaurus\": \"Allo\",\n  \"Snow Owl\": \"Owl\"\n}\n";

/// Errors that can occur when loading replacement files
#[derive(Error, Debug)]
pub enum ReplacementsError {
    #[error("Failed to read replacements file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse replacements JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("No replacements file to reload")]
    NoFile,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomReplacements {
    path: Option<PathBuf>,
    map: HashMap<String, String>,
}

impl CustomReplacements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self { path: None, map }
    }

    /// Load replacements from a JSON file and remember the path for reloads
    pub fn from_file(path: &Path) -> Result<Self, ReplacementsError> {
        let map = read_map(path)?;
        log::debug!(
            "loaded {} replacements from {}",
            map.len(),
            path.display()
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            map,
        })
    }

    /// Load replacements from a JSON string
    pub fn from_str(content: &str) -> Result<Self, ReplacementsError> {
        Ok(Self::from_map(serde_json::from_str(content)?))
    }

    /// Re-read the file this table was loaded from
    ///
    /// On error the current table stays in effect.
    pub fn reload(&mut self) -> Result<(), ReplacementsError> {
        let path = self.path.as_deref().ok_or(ReplacementsError::NoFile)?;
        match read_map(path) {
            Ok(map) => {
                self.map = map;
                Ok(())
            }
            Err(err) => {
                log::warn!(
                    "keeping previous replacements, reloading {} failed: {}",
                    path.display(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Create the file with example entries if it does not exist
    ///
    /// Returns whether a file was written.
    pub fn seed_example(path: &Path) -> Result<bool, ReplacementsError> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, EXAMPLE_FILE)?;
        Ok(true)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn read_map(path: &Path) -> Result<HashMap<String, String>, ReplacementsError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
