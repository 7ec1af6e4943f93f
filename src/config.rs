//! Application configuration
//!
//! Settings come from a TOML file chosen by the `ENV` profile variable
//! (`ENV=test` reads `test.toml`, no profile reads `config.toml`), followed
//! by environment variable overrides. The database connection string is
//! mandatory; everything else has a default.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infrastructure::crypto::password::MAX_PASSWORD_BYTES;

/// Profile selector variable.
pub const PROFILE_ENV: &str = "ENV";

/// Upper bound for `security.access_token_expire_minutes` (one year).
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    /// Account created on start-up when the users table is empty.
    pub seed: Option<SeedUserConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight cleanup after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            shutdown_timeout: 10,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Connection string, e.g. `sqlite://./items.db?mode=rwc`
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// HMAC signing secret. Generated at start-up when absent.
    pub jwt_secret: Option<String>,
    pub access_token_expire_minutes: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            access_token_expire_minutes: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUserConfig {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// File name for a profile: `test` → `test.toml`, none → `config.toml`.
pub fn profile_config_path(profile: Option<&str>) -> PathBuf {
    match profile.map(str::trim).filter(|p| !p.is_empty()) {
        Some(profile) => PathBuf::from(format!("{}.toml", profile)),
        None => PathBuf::from("config.toml"),
    }
}

impl AppConfig {
    /// Parse a TOML document. No overrides, no validation.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path` if it exists, apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with variables read through `lookup`.
    pub fn load_with<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&content, path)?
        } else {
            Self::default()
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file selected by the `ENV` profile variable.
    pub fn load_for_profile() -> Result<(Self, PathBuf), ConfigError> {
        Self::load_profile_from(Path::new(""), |key| std::env::var(key).ok())
    }

    /// Profile file looked up in `dir`, variables read through `lookup`.
    pub fn load_profile_from<F>(dir: &Path, lookup: F) -> Result<(Self, PathBuf), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = dir.join(profile_config_path(lookup(PROFILE_ENV).as_deref()));
        let config = Self::load_with(&path, lookup)?;
        Ok((config, path))
    }

    /// Apply environment overrides. `lookup` returns the value of a variable.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = Some(secret);
        }
        if let Some(minutes) = lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            self.security.access_token_expire_minutes =
                minutes.parse().map_err(|_| ConfigError::Invalid {
                    key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                    value: minutes.clone(),
                })?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Missing("database.url / DATABASE_URL"));
        }
        let minutes = self.security.access_token_expire_minutes;
        if !(1..=MAX_ACCESS_TOKEN_EXPIRE_MINUTES).contains(&minutes) {
            return Err(ConfigError::Invalid {
                key: "security.access_token_expire_minutes",
                value: minutes.to_string(),
            });
        }
        if !(crate::infrastructure::crypto::password::MIN_COST..=crate::infrastructure::crypto::password::MAX_COST).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "security.bcrypt_cost",
                value: self.security.bcrypt_cost.to_string(),
            });
        }
        if matches!(&self.security.jwt_secret, Some(s) if s.is_empty()) {
            return Err(ConfigError::Invalid {
                key: "security.jwt_secret",
                value: String::new(),
            });
        }
        if let Some(seed) = &self.seed {
            if seed.username.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: "seed.username",
                    value: seed.username.clone(),
                });
            }
            if seed.password.is_empty() || seed.password.len() > MAX_PASSWORD_BYTES {
                return Err(ConfigError::Invalid {
                    key: "seed.password",
                    value: format!("<{} bytes>", seed.password.len()),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(content: &str) -> AppConfig {
        AppConfig::from_toml_str(content, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn profile_selects_file_name() {
        assert_eq!(profile_config_path(None), PathBuf::from("config.toml"));
        assert_eq!(profile_config_path(Some("")), PathBuf::from("config.toml"));
        assert_eq!(profile_config_path(Some("test")), PathBuf::from("test.toml"));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = parse("");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.security.access_token_expire_minutes, 30);
        assert_eq!(config.cors.allowed_origins.len(), 2);
        assert!(config.seed.is_none());
    }

    #[test]
    fn database_url_is_required() {
        let config = parse("");
        assert!(matches!(config.validate(), Err(ConfigError::Missing(_))));

        let config = parse("[database]\nurl = \"sqlite::memory:\"\n");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sections_are_parsed() {
        let config = parse(
            r#"
            [server]
            port = 9100

            [database]
            url = "sqlite://./items.db?mode=rwc"

            [security]
            jwt_secret = "abc"
            access_token_expire_minutes = 5

            [seed]
            username = "johndoe"
            password = "secret-password"
            "#,
        );
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.security.jwt_secret.as_deref(), Some("abc"));
        assert_eq!(config.security.access_token_expire_minutes, 5);
        assert_eq!(config.seed.unwrap().username, "johndoe");
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = parse("[database]\nurl = \"sqlite://file.db\"\n");
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "from-env"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "45"),
        ]
        .into_iter()
        .collect();

        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.security.jwt_secret.as_deref(), Some("from-env"));
        assert_eq!(config.security.access_token_expire_minutes, 45);
    }

    #[test]
    fn malformed_override_is_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "ACCESS_TOKEN_EXPIRE_MINUTES").then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn token_lifetime_is_bounded() {
        let mut config = parse("[database]\nurl = \"sqlite::memory:\"\n");
        config.security.access_token_expire_minutes = MAX_ACCESS_TOKEN_EXPIRE_MINUTES;
        assert!(config.validate().is_ok());

        config.security.access_token_expire_minutes = 10_000_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                key: "security.access_token_expire_minutes",
                ..
            })
        ));

        config.security.access_token_expire_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn seed_password_must_fit_bcrypt() {
        let config = parse(&format!(
            "[database]\nurl = \"sqlite::memory:\"\n[seed]\nusername = \"admin\"\npassword = \"{}\"\n",
            "x".repeat(MAX_PASSWORD_BYTES + 1)
        ));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "seed.password", .. })
        ));
    }

    #[test]
    fn missing_file_uses_defaults_but_needs_database_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = AppConfig::load_with(&path, |_| None);
        assert!(matches!(result, Err(ConfigError::Missing(_))));

        let config = AppConfig::load_with(&path, |key| {
            (key == "DATABASE_URL").then(|| "sqlite::memory:".to_string())
        })
        .unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn profile_selects_the_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("test.toml"),
            "[server]\nport = 9200\n[database]\nurl = \"sqlite://test.db\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[server]\nport = 9300\n[database]\nurl = \"sqlite://default.db\"\n",
        )
        .unwrap();

        let (config, path) = AppConfig::load_profile_from(dir.path(), |key| {
            (key == PROFILE_ENV).then(|| "test".to_string())
        })
        .unwrap();
        assert_eq!(path, dir.path().join("test.toml"));
        assert_eq!(config.server.port, 9200);
        assert_eq!(config.database.url, "sqlite://test.db");

        let (config, path) = AppConfig::load_profile_from(dir.path(), |_| None).unwrap();
        assert_eq!(path, dir.path().join("config.toml"));
        assert_eq!(config.server.port, 9300);
    }

    #[test]
    fn environment_wins_over_loaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database]\nurl = \"sqlite://file.db\"\n").unwrap();

        let config = AppConfig::load_with(&path, |key| {
            (key == "DATABASE_URL").then(|| "sqlite::memory:".to_string())
        })
        .unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn invalid_toml_is_reported() {
        let result = AppConfig::from_toml_str("[server\nport = ", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
