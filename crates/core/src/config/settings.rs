use super::TestConfig;
use crate::{
    error::{Error, Result},
    report::ReportFormat,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Looked up in this order in each directory while walking upwards.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".testrun.json", "testrun.json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Relative paths are taken relative to the config file's directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub propagate_exit_code: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<TestConfig>,
}

/// A config together with the file it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// The config's `working_dir`, made absolute against the file's directory.
    pub fn working_dir(&self) -> Option<PathBuf> {
        let dir = self.config.working_dir.as_ref()?;
        if dir.is_absolute() {
            return Some(dir.clone());
        }
        let base = self.path.as_ref().and_then(|p| p.parent())?;
        Some(base.join(dir))
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Loads the explicit file if given, otherwise the nearest config found
    /// from `start_path` upwards. No file at all is an empty config.
    /// A relative explicit path is taken relative to `start_path`.
    pub fn discover(explicit: Option<&Path>, start_path: &Path) -> Result<LoadedConfig> {
        let path = match explicit {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    start_path.join(path)
                };
                if !path.is_file() {
                    return Err(Error::ConfigError(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path)
            }
            None => Self::find_config_file(start_path),
        };

        match path {
            Some(path) => {
                debug!("Loading config from: {}", path.display());
                Ok(LoadedConfig {
                    config: Self::load_from_file(&path)?,
                    path: Some(path),
                })
            }
            None => {
                debug!("No config file found from: {}", start_path.display());
                Ok(LoadedConfig::default())
            }
        }
    }

    /// Starter config written by `testrun init`.
    pub fn starter() -> Self {
        Self {
            working_dir: Some(PathBuf::from(".")),
            propagate_exit_code: Some(false),
            format: Some(ReportFormat::Text),
            test: Some(TestConfig {
                command: Some("cargo".to_string()),
                subcommand: Some("test".to_string()),
                extra_test_binary_args: Some(vec!["--nocapture".to_string()]),
                ..Default::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_round_trip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".testrun.json");

        let config = Config::starter();
        config.save_to_file(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_parse_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("testrun.json");
        fs::write(
            &path,
            r#"{ "format": "json", "test": { "package": "engine" } }"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.format, Some(ReportFormat::Json));
        assert_eq!(config.working_dir, None);
        assert_eq!(
            config.test.and_then(|t| t.package),
            Some("engine".to_string())
        );
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".testrun.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_find_config_walks_upwards() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join(".testrun.json"), "{}").unwrap();

        assert_eq!(
            Config::find_config_file(&nested),
            Some(temp_dir.path().join(".testrun.json"))
        );
    }

    #[test]
    fn test_dotfile_wins_in_same_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("testrun.json"), "{}").unwrap();
        fs::write(temp_dir.path().join(".testrun.json"), "{}").unwrap();

        assert_eq!(
            Config::find_config_file(temp_dir.path()),
            Some(temp_dir.path().join(".testrun.json"))
        );
    }

    #[test]
    fn test_discover_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.json");
        let err = Config::discover(Some(&missing), temp_dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_relative_explicit_path_is_anchored_at_start_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("custom.json"),
            r#"{ "working_dir": "." }"#,
        )
        .unwrap();

        let loaded = Config::discover(Some(Path::new("custom.json")), temp_dir.path()).unwrap();
        assert_eq!(loaded.path, Some(temp_dir.path().join("custom.json")));

        let working_dir = loaded.working_dir().unwrap();
        assert!(working_dir.is_absolute());
        assert_eq!(working_dir, temp_dir.path().join("."));
    }

    #[test]
    fn test_relative_working_dir_is_anchored_at_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".testrun.json");
        fs::write(&path, r#"{ "working_dir": "project" }"#).unwrap();

        let loaded = Config::discover(None, temp_dir.path()).unwrap();
        assert_eq!(loaded.path, Some(path));
        assert_eq!(loaded.working_dir(), Some(temp_dir.path().join("project")));
    }
}
