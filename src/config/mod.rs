//! Stored user configuration: the Trello credential pair and the default
//! board. Environment variables win over the stored values, and an explicit
//! board argument wins over both. The aggregation engine never reads this
//! module; it only sees resolved values.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the stored application key.
pub const APP_KEY_ENV: &str = "TRELLO_APPKEY";
/// Environment variable overriding the stored API token.
pub const TOKEN_ENV: &str = "TRELLO_TOKEN";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no Trello application key configured; set {} or run `boardtally config --key <key>`", APP_KEY_ENV)]
    MissingAppKey,
    #[error("no Trello API token configured; set {} or run `boardtally config --token <token>`", TOKEN_ENV)]
    MissingToken,
    #[error("no board id given; pass one to `activity` or run `boardtally config --board <id>`")]
    MissingBoard,
    #[error("could not read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file {} is not valid JSON", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not write config file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolved credential pair handed to the API client.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_key: String,
    pub token: String,
}

/// The on-disk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
}

impl StoredConfig {
    /// Loads the config file. A missing file is an empty config, not an
    /// error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let body =
            serde_json::to_string_pretty(self).expect("a struct of plain strings serializes");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, body).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolved credentials, environment first.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let app_key =
            env_or(APP_KEY_ENV, self.app_key.as_deref()).ok_or(ConfigError::MissingAppKey)?;
        let token = env_or(TOKEN_ENV, self.token.as_deref()).ok_or(ConfigError::MissingToken)?;
        Ok(Credentials { app_key, token })
    }

    /// The board to aggregate. An explicit id wins over the configured
    /// default.
    pub fn board_or(&self, explicit: Option<String>) -> Result<String, ConfigError> {
        explicit
            .filter(|id| !id.is_empty())
            .or_else(|| self.board.clone())
            .ok_or(ConfigError::MissingBoard)
    }
}

fn env_or(var: &str, stored: Option<&str>) -> Option<String> {
    env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .or_else(|| stored.map(str::to_string))
}

/// Default location of the config file.
pub fn default_path() -> anyhow::Result<PathBuf> {
    Ok(crate::utils::dir::config_dir()?.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_missing_file_loads_as_an_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoredConfig::load(&dir.path().join("config.json")).unwrap();
        assert!(config.app_key.is_none());
        assert!(config.token.is_none());
        assert!(config.board.is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = StoredConfig {
            app_key: Some("key-1".to_string()),
            token: Some("token-1".to_string()),
            board: Some("b1".to_string()),
        };
        config.save(&path).unwrap();

        let loaded = StoredConfig::load(&path).unwrap();
        assert_eq!(loaded.app_key.as_deref(), Some("key-1"));
        assert_eq!(loaded.token.as_deref(), Some("token-1"));
        assert_eq!(loaded.board.as_deref(), Some("b1"));
    }

    #[test]
    fn a_mangled_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            StoredConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn an_explicit_board_wins_over_the_stored_default() {
        let config = StoredConfig {
            board: Some("stored".to_string()),
            ..StoredConfig::default()
        };
        assert_eq!(config.board_or(Some("explicit".to_string())).unwrap(), "explicit");
        assert_eq!(config.board_or(None).unwrap(), "stored");
        assert_eq!(config.board_or(Some(String::new())).unwrap(), "stored");
    }

    #[test]
    fn a_board_must_come_from_somewhere() {
        let config = StoredConfig::default();
        assert!(matches!(
            config.board_or(None),
            Err(ConfigError::MissingBoard)
        ));
    }

    #[test]
    fn credentials_require_both_key_and_token() {
        // Covers every credentials() case in one test; nothing else may
        // touch the real credential variables in parallel.
        env::remove_var(APP_KEY_ENV);
        env::remove_var(TOKEN_ENV);

        let empty = StoredConfig::default();
        assert!(matches!(
            empty.credentials(),
            Err(ConfigError::MissingAppKey)
        ));

        let key_only = StoredConfig {
            app_key: Some("key-1".to_string()),
            ..StoredConfig::default()
        };
        assert!(matches!(
            key_only.credentials(),
            Err(ConfigError::MissingToken)
        ));

        let complete = StoredConfig {
            app_key: Some("key-1".to_string()),
            token: Some("token-1".to_string()),
            ..StoredConfig::default()
        };
        let credentials = complete.credentials().unwrap();
        assert_eq!(credentials.app_key, "key-1");
        assert_eq!(credentials.token, "token-1");
    }

    #[test]
    fn environment_values_win_over_stored_ones() {
        // One test covers every env_or case so no parallel test races over
        // the same process environment.
        env::set_var("BOARDTALLY_TEST_ENV_OR", "from-env");
        assert_eq!(
            env_or("BOARDTALLY_TEST_ENV_OR", Some("from-file")),
            Some("from-env".to_string())
        );

        env::set_var("BOARDTALLY_TEST_ENV_OR", "");
        assert_eq!(
            env_or("BOARDTALLY_TEST_ENV_OR", Some("from-file")),
            Some("from-file".to_string())
        );

        env::remove_var("BOARDTALLY_TEST_ENV_OR");
        assert_eq!(
            env_or("BOARDTALLY_TEST_ENV_OR", Some("from-file")),
            Some("from-file".to_string())
        );
        assert_eq!(env_or("BOARDTALLY_TEST_ENV_OR", None), None);
    }
}
