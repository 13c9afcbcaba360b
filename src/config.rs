use crate::auth::TokenKeys;
use anyhow::{bail, Context, Result};
use chrono::Duration;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_TTL_HOURS: u32 = 24;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawConfig {
    host: Option<String>,
    port: Option<u16>,
    database: Option<PathBuf>,
    secret_key: Option<String>,
    token_ttl_hours: Option<u32>,
}

/// Settings supplied on the command line or through the environment
/// These take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub secret_key: Option<String>,
}

#[derive(Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: PathBuf,
    pub token_ttl: Duration,
    secret_key: Option<String>,
}

impl Config {
    fn from_raw(
        raw: RawConfig,
        overrides: Overrides,
        default_database: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        let token_ttl_hours = raw.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS);
        if token_ttl_hours == 0 {
            bail!("tokenTtlHours must be greater than zero");
        }

        let database = match overrides.database.or(raw.database) {
            Some(database) => database,
            None => default_database()?,
        };

        Ok(Self {
            host: overrides
                .host
                .or(raw.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: overrides.port.or(raw.port).unwrap_or(DEFAULT_PORT),
            database,
            token_ttl: Duration::hours(i64::from(token_ttl_hours)),
            secret_key: overrides.secret_key.or(raw.secret_key),
        })
    }

    /// Load the config file, if any, and apply the overrides on top of it
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let raw = match path {
            Some(path) => {
                let toml_str = read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&toml_str).with_context(|| {
                    format!("Failed to deserialize TOML config file {}", path.display())
                })?
            }
            None => RawConfig::default(),
        };
        Self::from_raw(raw, overrides, default_database)
    }

    /// Build the token keys from the configured secret
    pub fn token_keys(&self) -> Result<TokenKeys> {
        let secret_key = self
            .secret_key
            .as_deref()
            .filter(|secret_key| !secret_key.is_empty())
            .context("No secret key configured")?;
        Ok(TokenKeys::new(secret_key, self.token_ttl))
    }
}

/// Return the database path used when none is configured
fn default_database() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "messagely", "messagely")
        .context("Failed to determine application directories")?;
    Ok(project_dirs.data_local_dir().join("messagely.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_config(toml: &str, overrides: Overrides) -> Result<Config> {
        Config::from_raw(toml::from_str(toml)?, overrides, || {
            Ok(PathBuf::from("/data/messagely.db"))
        })
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = load_config("", Overrides::default())?;
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.database, PathBuf::from("/data/messagely.db"));
        assert_eq!(config.token_ttl, Duration::hours(24));
        Ok(())
    }

    #[test]
    fn test_file_values() -> Result<()> {
        let config = load_config(
            "host = '0.0.0.0'
port = 8080
database = '/var/lib/messagely.db'
secretKey = 'hunter2'
tokenTtlHours = 2",
            Overrides::default(),
        )?;
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database, PathBuf::from("/var/lib/messagely.db"));
        assert_eq!(config.token_ttl, Duration::hours(2));
        assert!(config.token_keys().is_ok());
        Ok(())
    }

    #[test]
    fn test_overrides_win() -> Result<()> {
        let config = load_config(
            "port = 8080
database = '/var/lib/messagely.db'",
            Overrides {
                host: Some("localhost".to_owned()),
                port: Some(9000),
                database: Some(PathBuf::from("/tmp/test.db")),
                secret_key: None,
            },
        )?;
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9000);
        assert_eq!(config.database, PathBuf::from("/tmp/test.db"));
        Ok(())
    }

    #[test]
    fn test_missing_secret_key() -> Result<()> {
        let config = load_config("", Overrides::default())?;
        assert_eq!(
            config.token_keys().err().unwrap().to_string(),
            "No secret key configured"
        );

        let config = load_config("secretKey = ''", Overrides::default())?;
        assert!(config.token_keys().is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_token_ttl() {
        let error = load_config("tokenTtlHours = 0", Overrides::default()).unwrap_err();
        assert_eq!(error.to_string(), "tokenTtlHours must be greater than zero");
    }

    #[test]
    fn test_extra_fields() {
        assert!(load_config("foo = 'bar'", Overrides::default()).is_err());
        assert!(load_config("secret_key = 'snake'", Overrides::default()).is_err());
    }
}
