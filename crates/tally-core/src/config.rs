use crate::errors::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "tally.json";
pub const DEFAULT_DB_PATH: &str = "tally.db";
pub const DB_PATH_ENV: &str = "TALLY_DB";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse config {}: {}", path.display(), e)))
}

/// Store path resolution: explicit flag, then the environment, then the
/// config file (an explicit one must parse; the default one is consulted
/// only if present), then the default path in the working directory.
pub fn resolve_db_path(
    flag: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    match config {
        Some(path) => load_config(path).map(|c| c.database.path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                load_config(default).map(|c| c.database.path)
            } else {
                Ok(PathBuf::from(DEFAULT_DB_PATH))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_database_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.json");
        std::fs::write(&path, r#"{"database": {"path": "/var/lib/tally/results.db"}}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config.database.path,
            PathBuf::from("/var/lib/tally/results.db")
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.json");
        std::fs::write(&path, r#"{"database": {}}"#).unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn flag_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("tally.json");
        std::fs::write(&config, r#"{"database": {"path": "from-config.db"}}"#).unwrap();

        let resolved =
            resolve_db_path(Some(PathBuf::from("from-flag.db")), Some(&config)).unwrap();
        assert_eq!(resolved, PathBuf::from("from-flag.db"));

        let resolved = resolve_db_path(None, Some(&config)).unwrap();
        assert_eq!(resolved, PathBuf::from("from-config.db"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        assert!(resolve_db_path(None, Some(Path::new("/nonexistent/tally.json"))).is_err());
    }
}
