//! Working directory resolution across flag, environment and config file

use super::LoadedConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the directory tests run in.
pub const ROOT_ENV_VAR: &str = "TESTRUN_ROOT";

/// Precedence: explicit flag, then [`ROOT_ENV_VAR`], then the config file,
/// then `current_dir`. Anything still relative is joined onto `current_dir`
/// so the result is always absolute.
pub fn resolve_working_dir(
    flag: Option<&Path>,
    env_root: Option<&str>,
    config: &LoadedConfig,
    current_dir: &Path,
) -> PathBuf {
    let absolutize = |p: &Path| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            current_dir.join(p)
        }
    };

    if let Some(dir) = flag {
        debug!("Working directory from flag: {}", dir.display());
        return absolutize(dir);
    }

    if let Some(root) = env_root.filter(|r| !r.is_empty()) {
        debug!("Working directory from {}: {}", ROOT_ENV_VAR, root);
        return absolutize(Path::new(root));
    }

    if let Some(dir) = config.working_dir() {
        debug!("Working directory from config: {}", dir.display());
        return absolutize(&dir);
    }

    current_dir.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn loaded(working_dir: &str) -> LoadedConfig {
        LoadedConfig {
            config: Config {
                working_dir: Some(PathBuf::from(working_dir)),
                ..Default::default()
            },
            path: Some(PathBuf::from("/repo/.testrun.json")),
        }
    }

    #[test]
    fn test_flag_wins() {
        let dir = resolve_working_dir(
            Some(Path::new("/from/flag")),
            Some("/from/env"),
            &loaded("/from/config"),
            Path::new("/cwd"),
        );
        assert_eq!(dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_env_beats_config() {
        let dir = resolve_working_dir(
            None,
            Some("/from/env"),
            &loaded("/from/config"),
            Path::new("/cwd"),
        );
        assert_eq!(dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let dir = resolve_working_dir(None, Some(""), &loaded("sub"), Path::new("/cwd"));
        assert_eq!(dir, PathBuf::from("/repo/sub"));
    }

    #[test]
    fn test_config_without_file_parent_is_absolutized() {
        let config = LoadedConfig {
            config: Config {
                working_dir: Some(PathBuf::from(".")),
                ..Default::default()
            },
            path: Some(PathBuf::from(".testrun.json")),
        };

        let dir = resolve_working_dir(None, None, &config, Path::new("/cwd"));
        assert_eq!(dir, PathBuf::from("/cwd/."));
        assert!(dir.is_absolute());
    }

    #[test]
    fn test_falls_back_to_current_dir() {
        let dir = resolve_working_dir(None, None, &LoadedConfig::default(), Path::new("/cwd"));
        assert_eq!(dir, PathBuf::from("/cwd"));
    }

    #[test]
    fn test_relative_flag_is_absolutized() {
        let dir = resolve_working_dir(
            Some(Path::new("nested/project")),
            None,
            &LoadedConfig::default(),
            Path::new("/cwd"),
        );
        assert_eq!(dir, PathBuf::from("/cwd/nested/project"));
    }
}
