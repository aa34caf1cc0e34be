//! # Configuration Module
//!
//! Settings of the generated project: where it goes, which database it talks
//! to and how the application is exposed.
//!
//! ## Sources
//!
//! Configuration is layered:
//!
//! 1. A [`DumperConfig`] built in code, or loaded from a TOML file with
//!    [`load_config`] (a missing file is not an error)
//! 2. Environment overrides applied by [`DumperConfig::apply_env_overrides`]
//!
//! ## Example File
//!
//! ```toml
//! appName = "my-backend"
//! dbDialect = "postgres"
//! dbConnectionUrl = "postgres://localhost:5432/shop"
//! dbSchema = "public"
//! ssl = false
//! appHostname = "localhost"
//! appPort = 3310
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Overrides |
//! |---|---|
//! | `ORMFORGE_DATABASE_URL` | `dbConnectionUrl` |
//! | `ORMFORGE_DB_SCHEMA` | `dbSchema` |
//! | `ORMFORGE_APP_HOSTNAME` | `appHostname` |
//! | `ORMFORGE_APP_PORT` | `appPort` |
//! | `ORMFORGE_TARGET_OS` | `targetOs` (`linux`, `darwin`, `windows`, `other`) |
//!
//! ## Target OS
//!
//! The generated `.env` and `docker-compose.yml` differ between Linux and the
//! other systems: Docker on Linux can use the host network, elsewhere the
//! container reaches the database through `host.docker.internal`. The OS is
//! detected from the build target unless `targetOs` pins it.

use crate::error::ConfigError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;

/// SQL dialect of the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    Mysql,
    Mariadb,
    Mssql,
    Sqlite,
}

/// How a dialect enables TLS in Sequelize's `dialectOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslStyle {
    /// `dialectOptions.ssl`, optionally with `rejectUnauthorized: false`
    Standard,
    /// `dialectOptions.options.encrypt` (tedious)
    Encrypt,
    /// No TLS (file databases)
    Unsupported,
}

impl Dialect {
    /// npm package and version range of the driver Sequelize loads for this dialect
    pub fn driver_package(self) -> (&'static str, &'static str) {
        match self {
            Dialect::Postgres => ("pg", "~8.11.5"),
            Dialect::Mysql => ("mysql2", "~3.9.7"),
            Dialect::Mariadb => ("mariadb", "~3.3.0"),
            Dialect::Mssql => ("tedious", "~16.7.1"),
            Dialect::Sqlite => ("sqlite3", "~5.1.7"),
        }
    }

    /// URL schemes accepted for a connection string of this dialect
    pub fn url_schemes(self) -> &'static [&'static str] {
        match self {
            Dialect::Postgres => &["postgres", "postgresql"],
            Dialect::Mysql => &["mysql"],
            Dialect::Mariadb => &["mariadb", "mysql"],
            Dialect::Mssql => &["mssql"],
            Dialect::Sqlite => &["sqlite"],
        }
    }

    pub fn ssl_style(self) -> SslStyle {
        match self {
            Dialect::Mssql => SslStyle::Encrypt,
            Dialect::Sqlite => SslStyle::Unsupported,
            _ => SslStyle::Standard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Mysql => "mysql",
            Dialect::Mariadb => "mariadb",
            Dialect::Mssql => "mssql",
            Dialect::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operating system the generated project is prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    #[serde(alias = "darwin")]
    Macos,
    Windows,
    Other,
}

impl TargetOs {
    /// The OS this crate was built for.
    pub fn current() -> Self {
        match env::consts::OS {
            "linux" => TargetOs::Linux,
            "macos" => TargetOs::Macos,
            "windows" => TargetOs::Windows,
            _ => TargetOs::Other,
        }
    }

    /// Parse an OS name as reported by Node (`darwin`) or Rust (`macos`).
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "linux" => Ok(TargetOs::Linux),
            "darwin" | "macos" => Ok(TargetOs::Macos),
            "windows" | "win32" => Ok(TargetOs::Windows),
            "other" => Ok(TargetOs::Other),
            _ => Err(ConfigError::UnknownTargetOs {
                value: value.to_string(),
            }),
        }
    }

    pub fn is_linux(self) -> bool {
        self == TargetOs::Linux
    }
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3310
}

fn default_true() -> bool {
    true
}

/// Settings of the project being generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumperConfig {
    /// Output directory of the project; its last component names the package
    pub app_name: String,
    #[serde(default)]
    pub db_dialect: Dialect,
    #[serde(default)]
    pub db_connection_url: Option<String>,
    #[serde(default)]
    pub ssl: bool,
    /// Database schema (namespace) the models live in
    #[serde(default)]
    pub db_schema: Option<String>,
    #[serde(default = "default_hostname")]
    pub app_hostname: String,
    #[serde(default = "default_port")]
    pub app_port: u16,
    /// Public URL of the application; derived from hostname and port when absent
    #[serde(default)]
    pub application_url: Option<String>,
    /// Whether the project is backed by a database (models, routes, index)
    #[serde(default = "default_true")]
    pub db: bool,
    #[serde(default)]
    pub application_secret: Option<String>,
    /// Pins the OS instead of detecting it
    #[serde(default)]
    pub target_os: Option<TargetOs>,
}

impl DumperConfig {
    /// Minimal configuration with defaults for everything but the app name.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            db_dialect: Dialect::default(),
            db_connection_url: None,
            ssl: false,
            db_schema: None,
            app_hostname: default_hostname(),
            app_port: default_port(),
            application_url: None,
            db: true,
            application_secret: None,
            target_os: None,
        }
    }

    /// Override settings from `ORMFORGE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `ORMFORGE_APP_PORT` is not a port number or
    /// `ORMFORGE_TARGET_OS` is not a known OS.
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(url) = env::var("ORMFORGE_DATABASE_URL") {
            self.db_connection_url = Some(url);
        }
        if let Ok(schema) = env::var("ORMFORGE_DB_SCHEMA") {
            self.db_schema = Some(schema);
        }
        if let Ok(hostname) = env::var("ORMFORGE_APP_HOSTNAME") {
            self.app_hostname = hostname;
        }
        if let Ok(port) = env::var("ORMFORGE_APP_PORT") {
            self.app_port = port
                .parse()
                .with_context(|| format!("Invalid ORMFORGE_APP_PORT: {port}"))?;
        }
        if let Ok(os) = env::var("ORMFORGE_TARGET_OS") {
            self.target_os = Some(TargetOs::parse(&os)?);
        }
        Ok(())
    }

    /// Check the configuration before generating anything.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::EmptyAppName);
        }
        if self.app_port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if !self.db {
            return Ok(());
        }
        let raw = self
            .db_connection_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ConfigError::MissingConnectionUrl)?;
        let parsed = url::Url::parse(raw).map_err(|e| ConfigError::InvalidConnectionUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if !self.db_dialect.url_schemes().contains(&parsed.scheme()) {
            return Err(ConfigError::DialectMismatch {
                dialect: self.db_dialect.to_string(),
                scheme: parsed.scheme().to_string(),
            });
        }
        Ok(())
    }

    /// The configured OS, or the one this crate runs on.
    pub fn target_os(&self) -> TargetOs {
        self.target_os.unwrap_or_else(TargetOs::current)
    }

    pub fn application_url(&self) -> String {
        self.application_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.app_hostname, self.app_port))
    }

    pub fn database_url(&self) -> &str {
        self.db_connection_url.as_deref().unwrap_or_default()
    }

    /// Database URL as seen from inside a container on a non-Linux host.
    pub fn docker_database_url(&self) -> String {
        self.database_url()
            .replacen("localhost", "host.docker.internal", 1)
    }
}

/// Load a generator configuration from a TOML file
///
/// # Returns
///
/// `Ok(Some(config))` if the file exists and parses, `Ok(None)` if it does not
/// exist, `Err` if it exists but cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<DumperConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read generator config: {}", config_path.display()))?;

    let config: DumperConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", config_path.display()))?;

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn postgres_config() -> DumperConfig {
        let mut config = DumperConfig::new("out/app");
        config.db_connection_url = Some("postgres://localhost:5432/shop".to_string());
        config
    }

    #[test]
    fn test_valid_postgres_config() {
        assert_eq!(postgres_config().validate(), Ok(()));
    }

    #[test]
    fn test_empty_app_name_is_rejected() {
        let mut config = postgres_config();
        config.app_name = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyAppName));
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let mut config = postgres_config();
        config.app_port = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPort));
    }

    #[test]
    fn test_missing_url_only_matters_with_database() {
        let mut config = postgres_config();
        config.db_connection_url = None;
        assert_eq!(config.validate(), Err(ConfigError::MissingConnectionUrl));

        config.db = false;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_dialect_mismatch() {
        let mut config = postgres_config();
        config.db_dialect = Dialect::Mysql;
        assert_eq!(
            config.validate(),
            Err(ConfigError::DialectMismatch {
                dialect: "mysql".to_string(),
                scheme: "postgres".to_string(),
            })
        );
    }

    #[test]
    fn test_unparseable_url() {
        let mut config = postgres_config();
        config.db_connection_url = Some("not a url".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConnectionUrl { .. })
        ));
    }

    #[test]
    fn test_sqlite_memory_url() {
        let mut config = DumperConfig::new("out/app");
        config.db_dialect = Dialect::Sqlite;
        config.db_connection_url = Some("sqlite::memory:".to_string());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_derived_urls() {
        let mut config = postgres_config();
        config.app_port = 1654;
        assert_eq!(config.application_url(), "http://localhost:1654");
        assert_eq!(
            config.docker_database_url(),
            "postgres://host.docker.internal:5432/shop"
        );

        config.application_url = Some("https://api.example.com".to_string());
        assert_eq!(config.application_url(), "https://api.example.com");
    }

    #[test]
    fn test_target_os_parse() {
        assert_eq!(TargetOs::parse("darwin"), Ok(TargetOs::Macos));
        assert_eq!(TargetOs::parse("Linux"), Ok(TargetOs::Linux));
        assert_eq!(TargetOs::parse("win32"), Ok(TargetOs::Windows));
        assert!(TargetOs::parse("beos").is_err());
    }

    #[test]
    fn test_target_os_override_wins() {
        let mut config = postgres_config();
        config.target_os = Some(TargetOs::Macos);
        assert_eq!(config.target_os(), TargetOs::Macos);
    }

    #[test]
    fn test_env_overrides() {
        const VARS: [&str; 5] = [
            "ORMFORGE_DATABASE_URL",
            "ORMFORGE_DB_SCHEMA",
            "ORMFORGE_APP_HOSTNAME",
            "ORMFORGE_APP_PORT",
            "ORMFORGE_TARGET_OS",
        ];
        env::set_var("ORMFORGE_DATABASE_URL", "postgres://db.internal:5432/shop");
        env::set_var("ORMFORGE_DB_SCHEMA", "sales");
        env::set_var("ORMFORGE_APP_HOSTNAME", "0.0.0.0");
        env::set_var("ORMFORGE_APP_PORT", "8080");
        env::set_var("ORMFORGE_TARGET_OS", "darwin");

        let mut config = postgres_config();
        config.apply_env_overrides().unwrap();
        assert_eq!(
            config.db_connection_url.as_deref(),
            Some("postgres://db.internal:5432/shop")
        );
        assert_eq!(config.db_schema.as_deref(), Some("sales"));
        assert_eq!(config.app_hostname, "0.0.0.0");
        assert_eq!(config.app_port, 8080);
        assert_eq!(config.target_os, Some(TargetOs::Macos));

        env::set_var("ORMFORGE_APP_PORT", "abc");
        let err = postgres_config().apply_env_overrides().unwrap_err();
        assert!(err.to_string().contains("Invalid ORMFORGE_APP_PORT: abc"), "{err}");

        env::set_var("ORMFORGE_APP_PORT", "8080");
        env::set_var("ORMFORGE_TARGET_OS", "beos");
        let err = postgres_config().apply_env_overrides().unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::UnknownTargetOs {
                value: "beos".to_string(),
            })
        );

        for var in VARS {
            env::remove_var(var);
        }
        let mut config = postgres_config();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.app_port, postgres_config().app_port);
        assert_eq!(config.target_os, None);
    }

    #[test]
    fn test_load_config_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ormforge.toml");
        std::fs::write(
            &path,
            r#"
appName = "test-output/sequelize"
dbDialect = "postgres"
dbConnectionUrl = "postgres://localhost:27017"
dbSchema = "public"
appPort = 1654
targetOs = "darwin"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.app_name, "test-output/sequelize");
        assert_eq!(config.db_schema.as_deref(), Some("public"));
        assert_eq!(config.app_port, 1654);
        assert_eq!(config.app_hostname, "localhost");
        assert!(config.db);
        assert!(!config.ssl);
        assert_eq!(config.target_os, Some(TargetOs::Macos));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).unwrap().is_none());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "appName = ").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse generator config"));
    }
}
