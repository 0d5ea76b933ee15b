use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Files that mark the current directory as a portable config location
const LOCAL_CONFIG_FILES: [&str; 2] = ["nestview.json", "nestview.log"];

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI args → ENV var (NESTVIEW_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| {
            std::env::var("NESTVIEW_CONFIG_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        });

        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. NESTVIEW_CONFIG_DIR environment variable
/// 3. Local folder IF nestview.json or nestview.log exist there
/// 4. Platform config directory from dirs-next (~/.config/nestview on Linux)
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::config_dir()).join(name)
}

/// Get path to a data file (logs). Same priority as `config_file`, but
/// falls back to the platform data directory.
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::data_dir()).join(name)
}

/// Create the config and data directories if missing.
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = resolve_dir(config, dirs_next::config_dir());
    let data_dir = resolve_dir(config, dirs_next::data_dir());

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
    }

    if data_dir != config_dir && !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }

    Ok(())
}

fn has_local_config_files(dir: &Path) -> bool {
    LOCAL_CONFIG_FILES.iter().any(|f| dir.join(f).exists())
}

fn resolve_dir(config: &PathConfig, platform: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    if let Ok(current_dir) = std::env::current_dir()
        && has_local_config_files(&current_dir)
    {
        return current_dir;
    }

    match platform {
        Some(dir) => dir.join("nestview"),
        None => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_dir_wins() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };
        assert_eq!(config_file("nestview.json", &config), PathBuf::from("/custom/nestview.json"));
        assert_eq!(data_file("nestview.log", &config), PathBuf::from("/custom/nestview.log"));
    }

    #[test]
    fn test_cli_dir_overrides_env() {
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/from/cli")));
        assert_eq!(config.config_dir, Some(PathBuf::from("/from/cli")));
    }

    #[test]
    fn test_platform_dir_is_namespaced() {
        let config = PathConfig::default();
        let dir = resolve_dir(&config, Some(PathBuf::from("/platform")));
        // Either the platform dir or a local portable dir, never the bare platform root
        assert_ne!(dir, PathBuf::from("/platform"));
        assert!(config_file("x.json", &config).ends_with("x.json"));
    }

    #[test]
    fn test_local_config_detection() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!has_local_config_files(dir.path()));

        std::fs::write(dir.path().join("nestview.json"), "{}").unwrap();
        assert!(has_local_config_files(dir.path()));
    }

    #[test]
    fn test_ensure_dirs_creates_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("cfg");
        let config = PathConfig {
            config_dir: Some(target.clone()),
        };

        ensure_dirs(&config).unwrap();
        assert!(target.is_dir());
    }
}
