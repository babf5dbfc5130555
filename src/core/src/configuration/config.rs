use super::types::*;
use crate::error_handling::types::ConfigError;
use clap::Args;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Application configuration structure that defines all runtime parameters.
///
/// The configuration is read from an optional TOML file and then overridden by
/// command-line flags (see [`CliOverrides`]). Every field has a default, so an
/// empty file, or no file at all, is a valid starting point.
///
/// ```toml
/// [web]
/// bind_address = "0.0.0.0"
/// port = 8080
/// public_url = "https://dashboard.example"
///
/// [storage]
/// backend = "blob"          # or "directory"
/// prefix = "sessions/"
///
/// [storage.blob]
/// endpoint = "https://blob.vercel-storage.com"
/// limit = 1000
/// request_timeout_secs = 30
///
/// [storage.directory]
/// path = "/var/lib/bugdash/objects"
/// ```
///
/// # Fields Overview
/// - `web`: address and port of the dashboard server
/// - `storage`: which listing backend to use and how to reach it
#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub storage: StorageConfig,
}

/// Command-line overrides applied on top of the file configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct CliOverrides {
    /// Address the dashboard server binds to
    #[arg(long)]
    pub bind_address: Option<String>,

    /// Port the dashboard server listens on
    #[arg(long)]
    pub port: Option<u16>,

    /// Base URL the dashboard is reached at; directory object URLs are built from it
    #[arg(long)]
    pub public_url: Option<String>,

    /// List objects from a local directory instead of the blob store
    #[arg(long, conflicts_with = "blob_endpoint")]
    pub directory: Option<PathBuf>,

    /// Blob store list endpoint
    #[arg(long)]
    pub blob_endpoint: Option<String>,

    /// Blob store read token
    #[arg(long, env = "BLOB_READ_WRITE_TOKEN", hide_env_values = true)]
    pub blob_token: Option<String>,

    /// Only list objects whose pathname starts with this prefix
    #[arg(long)]
    pub prefix: Option<String>,
}

impl Config {
    /// Loads the configuration file if one is given, applies the overrides and validates the
    /// result.
    pub fn load(path: Option<&Path>, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                info!("No configuration file given, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(ref addr) = overrides.bind_address {
            self.web.bind_address = addr.clone();
        }
        if let Some(port) = overrides.port {
            self.web.port = port;
        }
        if let Some(ref url) = overrides.public_url {
            self.web.public_url = Some(url.clone());
        }
        if let Some(ref dir) = overrides.directory {
            self.storage.backend = StorageBackend::Directory;
            self.storage.directory = Some(DirectoryConfig { path: dir.clone() });
        }
        if let Some(ref endpoint) = overrides.blob_endpoint {
            self.storage.backend = StorageBackend::Blob;
            self.storage.blob.endpoint = endpoint.clone();
        }
        if let Some(ref token) = overrides.blob_token {
            self.storage.blob.token = Some(token.clone());
        }
        if let Some(ref prefix) = overrides.prefix {
            self.storage.prefix = Some(prefix.clone());
        }
    }

    /// Absolute base URL of the dashboard, without trailing slash. An unspecified bind address
    /// (`0.0.0.0`, `::`) is replaced by the loopback address.
    pub fn public_url(&self) -> String {
        if let Some(ref url) = self.web.public_url {
            return url.trim_end_matches('/').to_string();
        }
        let ip = match self.web.bind_address.parse::<IpAddr>() {
            Ok(ip) if !ip.is_unspecified() => ip,
            _ => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        format!("http://{}", SocketAddr::new(ip, self.web.port))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.web.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::InvalidValue(format!(
                "bind_address '{}' is not an IP address",
                self.web.bind_address
            )));
        }
        match self.storage.backend {
            StorageBackend::Blob => {
                let blob = &self.storage.blob;
                if blob.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
                    return Err(ConfigError::MissingValue(
                        "storage.blob.token (or BLOB_READ_WRITE_TOKEN)".to_string(),
                    ));
                }
                if blob.endpoint.is_empty() {
                    return Err(ConfigError::MissingValue("storage.blob.endpoint".to_string()));
                }
                if !(1..=1000).contains(&blob.limit) {
                    return Err(ConfigError::InvalidValue(format!(
                        "storage.blob.limit must be within 1..=1000, got {}",
                        blob.limit
                    )));
                }
                if blob.request_timeout_secs == 0 {
                    return Err(ConfigError::InvalidValue(
                        "storage.blob.request_timeout_secs must be positive".to_string(),
                    ));
                }
            }
            StorageBackend::Directory => {
                let dir = self
                    .storage
                    .directory
                    .as_ref()
                    .ok_or_else(|| ConfigError::MissingValue("storage.directory.path".to_string()))?;
                if !dir.path.is_dir() {
                    return Err(ConfigError::DirectoryDoesNotExist(dir.path.display().to_string()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;
    use tempfile::TempDir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        overrides: CliOverrides,
    }

    fn blob_config(token: &str) -> Config {
        let mut config = Config::default();
        config.storage.blob.token = Some(token.to_string());
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Blob);
        assert_eq!(config.storage.blob.limit, 1000);
    }

    #[test]
    fn test_parse_full_file() {
        let config = Config::from_toml_str(
            r#"
            [web]
            bind_address = "0.0.0.0"
            port = 9000

            [storage]
            backend = "directory"
            prefix = "qa/"

            [storage.blob]
            token = "abc"
            limit = 50

            [storage.directory]
            path = "/srv/objects"
            "#,
        )
        .unwrap();

        assert_eq!(config.web.bind_address, "0.0.0.0");
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.storage.backend, StorageBackend::Directory);
        assert_eq!(config.storage.prefix.as_deref(), Some("qa/"));
        assert_eq!(config.storage.blob.token.as_deref(), Some("abc"));
        assert_eq!(config.storage.blob.limit, 50);
        assert_eq!(config.storage.blob.request_timeout_secs, 30);
        assert_eq!(config.storage.directory, Some(DirectoryConfig { path: PathBuf::from("/srv/objects") }));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = Config::from_toml_str("[storage]\nbackend = \"s3\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlError(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bugdash.toml");
        fs::write(&path, "[web]\nport = 1234\n").unwrap();
        assert_eq!(Config::from_file(&path).unwrap().web.port, 1234);

        let missing = Config::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let dir = TempDir::new().unwrap();
        let mut config = blob_config("from-file");
        config.apply_overrides(&CliOverrides {
            bind_address: Some("0.0.0.0".into()),
            port: Some(3000),
            directory: Some(dir.path().to_path_buf()),
            prefix: Some("sessions/".into()),
            ..Default::default()
        });

        assert_eq!(config.web.bind_address, "0.0.0.0");
        assert_eq!(config.web.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::Directory);
        assert_eq!(config.storage.prefix.as_deref(), Some("sessions/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_public_url() {
        let mut config = Config::default();
        assert_eq!(config.public_url(), "http://127.0.0.1:8080");

        config.web.bind_address = "0.0.0.0".into();
        config.web.port = 9000;
        assert_eq!(config.public_url(), "http://127.0.0.1:9000");

        config.web.bind_address = "::1".into();
        assert_eq!(config.public_url(), "http://[::1]:9000");

        config.apply_overrides(&CliOverrides {
            public_url: Some("https://dash.example/".into()),
            ..Default::default()
        });
        assert_eq!(config.public_url(), "https://dash.example");
    }

    #[test]
    fn test_blob_backend_requires_token() {
        let err = Config::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue(_)));
        assert!(matches!(blob_config("   ").validate(), Err(ConfigError::MissingValue(_))));
        assert!(blob_config("tok").validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = blob_config("tok");
        config.storage.blob.limit = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = blob_config("tok");
        config.storage.blob.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = blob_config("tok");
        config.web.bind_address = "localhost".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_directory_backend_requires_existing_dir() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Directory;
        assert!(matches!(config.validate(), Err(ConfigError::MissingValue(_))));

        config.storage.directory = Some(DirectoryConfig { path: PathBuf::from("/definitely/not/here") });
        assert!(matches!(config.validate(), Err(ConfigError::DirectoryDoesNotExist(_))));
    }

    #[test]
    #[serial]
    fn test_token_from_environment() {
        std::env::set_var("BLOB_READ_WRITE_TOKEN", "env-token");
        let cli = TestCli::try_parse_from(["bugdash", "--port", "8081"]).unwrap();
        std::env::remove_var("BLOB_READ_WRITE_TOKEN");

        let config = Config::load(None, &cli.overrides).unwrap();
        assert_eq!(config.storage.blob.token.as_deref(), Some("env-token"));
        assert_eq!(config.web.port, 8081);
    }

    #[test]
    #[serial]
    fn test_load_without_token_fails() {
        std::env::remove_var("BLOB_READ_WRITE_TOKEN");
        let cli = TestCli::try_parse_from(["bugdash"]).unwrap();
        assert!(matches!(Config::load(None, &cli.overrides), Err(ConfigError::MissingValue(_))));
    }

    #[test]
    fn test_directory_conflicts_with_blob_endpoint() {
        let parsed = TestCli::try_parse_from(["bugdash", "--directory", "/tmp", "--blob-endpoint", "http://x"]);
        assert!(parsed.is_err());
    }
}
