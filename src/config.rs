use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Conversion settings, read from `settings.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// jj executable name or path
    #[serde(default = "default_jj_program")]
    pub jj_program: String,
    /// Config table holding the color scheme
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Repository to run jj in, so repo-level overrides apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<PathBuf>,
    /// Output directory, relative to the working directory unless absolute
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_colors_file")]
    pub colors_file: String,
    #[serde(default = "default_rules_file")]
    pub rules_file: String,
}

fn default_jj_program() -> String {
    "jj".to_string()
}

fn default_namespace() -> String {
    "colors".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_colors_file() -> String {
    "colors.json".to_string()
}

fn default_rules_file() -> String {
    "semantic_token_rules.json".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jj_program: default_jj_program(),
            namespace: default_namespace(),
            repo: None,
            output_dir: default_output_dir(),
            colors_file: default_colors_file(),
            rules_file: default_rules_file(),
        }
    }
}

/// Values given on the command line; each one wins over the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub jj_program: Option<String>,
    pub namespace: Option<String>,
    pub repo: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Returns the config directory path (~/.config/jjcolors on Linux)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("jjcolors"))
    }

    /// Returns the default settings file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    /// Loads settings from an explicit file, which must exist and parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&content).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Loads `explicit` if given, else the default settings file if it exists,
    /// else built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(program) = overrides.jj_program {
            self.jj_program = program;
        }
        if let Some(namespace) = overrides.namespace {
            self.namespace = namespace;
        }
        if let Some(repo) = overrides.repo {
            self.repo = Some(repo);
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.jj_program, "jj");
        assert_eq!(settings.namespace, "colors");
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.colors_file, "colors.json");
        assert_eq!(settings.rules_file, "semantic_token_rules.json");
        assert_eq!(settings.repo, None);
    }

    #[test]
    fn test_parse_partial_json() {
        let json = r#"{"output_dir":"/tmp/theme"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/theme"));
        assert_eq!(settings.jj_program, "jj");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"jj_program":"/opt/jj","rules_file":"rules.json"}"#).unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.jj_program, "/opt/jj");
        assert_eq!(settings.rules_file, "rules.json");
        assert_eq!(settings.colors_file, "colors.json");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(dir.path().join("nope.json").as_path())).unwrap_err();
        assert!(matches!(err, Error::SettingsRead { .. }));
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::SettingsParse { .. }));
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default().apply(Overrides {
            jj_program: Some("jj-dev".to_string()),
            namespace: None,
            repo: Some(PathBuf::from("/src/repo")),
            output_dir: Some(PathBuf::from("theme")),
        });
        assert_eq!(settings.jj_program, "jj-dev");
        assert_eq!(settings.namespace, "colors");
        assert_eq!(settings.repo, Some(PathBuf::from("/src/repo")));
        assert_eq!(settings.output_dir, PathBuf::from("theme"));
    }
}
