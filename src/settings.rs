use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render::TreeConfig;

const SETTINGS_DIR: &str = "outline-tree";
const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_INPUT: &str = "src\n  file.txt";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub tree: TreeConfig,
    /// Outline shown when the editor starts without a file.
    pub default_input: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree: TreeConfig {
                root_element: false,
                align_comments: true,
            },
            default_input: DEFAULT_INPUT.to_string(),
        }
    }
}

impl Settings {
    /// Load from the user's config directory, falling back to defaults.
    pub fn load() -> Self {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %err, "could not read settings");
                }
                return Self::default();
            }
        };
        serde_json::from_str(&data).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed settings");
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(xdg));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
        assert!(settings.tree.align_comments);
        assert_eq!(settings.default_input, "src\n  file.txt");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "tree": { "rootElement": true } }"#).unwrap();

        let settings = Settings::load_from(&path);
        assert!(settings.tree.root_element);
        assert!(!settings.tree.align_comments);
        assert_eq!(settings.default_input, DEFAULT_INPUT);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_DIR).join(SETTINGS_FILE);
        let settings = Settings {
            tree: TreeConfig {
                root_element: true,
                align_comments: false,
            },
            default_input: "docs\n  index.md".to_string(),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }
}
