use crate::errors::{LoggyError, LoggyResult};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub error_descriptions: BTreeMap<String, String>,
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let mut error_descriptions = BTreeMap::new();
        error_descriptions.insert(
            "bad-request".to_string(),
            "### Bad Request\nThe server could not understand the request due to invalid syntax."
                .to_string(),
        );
        error_descriptions.insert(
            "internal-server-error".to_string(),
            "### Internal Server Error\nThe server encountered an internal error and was unable to complete your request."
                .to_string(),
        );

        Self {
            error_descriptions,
            database_path: std::env::temp_dir().join("loggy").join("logs.db"),
        }
    }
}

impl Config {
    /// Markdown served by `GET /errors`.
    pub fn error_markdown(&self) -> String {
        self.error_descriptions
            .values()
            .map(|desc| format!("{}\n", desc))
            .collect()
    }
}

/// Loads the config at `config_path`, writing the defaults there first if the
/// file does not exist yet.
pub fn ensure_config(config_path: &Path) -> LoggyResult<Config> {
    if !config_path.exists() {
        let config = Config::default();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LoggyError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| LoggyError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, config_str)
            .map_err(|e| LoggyError::config_error(format!("Failed to write config file: {}", e)))?;

        log::info!("wrote default config to {}", config_path.display());
        return Ok(config);
    }

    let config_str = fs::read_to_string(config_path)
        .map_err(|e| LoggyError::config_error(format!("Failed to read config file: {}", e)))?;

    let config: Config = serde_json::from_str(&config_str)
        .map_err(|e| LoggyError::config_error(format!("Failed to parse config: {}", e)))?;

    validate_config(&config)?;
    Ok(config)
}

pub fn get_config_path() -> LoggyResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| LoggyError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("loggy").join("config.json"))
}

fn validate_config(config: &Config) -> LoggyResult<()> {
    if config.database_path.as_os_str().is_empty() {
        return Err(LoggyError::config_error("database_path is required"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_empty_database_path() {
        let mut config = Config::default();
        config.database_path = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_ensure_config_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = ensure_config(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());

        let on_disk: Config =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, config);
    }

    #[test]
    fn test_ensure_config_reads_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let contents = serde_json::json!({
            "error_descriptions": {"teapot": "### Teapot"},
            "database_path": "/var/lib/loggy/logs.db"
        });
        fs::write(&path, contents.to_string()).unwrap();

        let config = ensure_config(&path).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/var/lib/loggy/logs.db"));
        assert_eq!(config.error_markdown(), "### Teapot\n");
    }

    #[test]
    fn test_ensure_config_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(ensure_config(&path), Err(LoggyError::Config(_))));
    }

    #[test]
    fn test_error_markdown_is_ordered_by_key() {
        let md = Config::default().error_markdown();
        let bad = md.find("Bad Request").unwrap();
        let internal = md.find("Internal Server Error").unwrap();
        assert!(bad < internal);
    }
}
