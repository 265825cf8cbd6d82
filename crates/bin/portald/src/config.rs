//! Daemon settings: `portal.toml` (optional), then `PORTAL_*` / `RUST_LOG`
//! environment overrides, then validation.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! url = "sqlite:portal.db?mode=rwc"
//! max_connections = 5
//! busy_timeout_ms = 5000
//!
//! [logging]
//! filter = "portald=info,portal=info,tower_http=debug"
//! ```

use std::path::Path;

use serde::Deserialize;

use portal_adapter_storage_sqlite_sqlx::Config as DatabaseSettings;

pub const CONFIG_FILE: &str = "portal.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    /// Passed straight to the storage adapter.
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "portald=info,portal=info,tower_http=debug".to_string(),
        }
    }
}

/// Environment overrides, applied in this order; later entries win.
const OVERRIDES: &[&str] = &[
    "PORTAL_HOST",
    "PORTAL_PORT",
    "PORTAL_BIND",
    "PORTAL_DATABASE_URL",
    "PORTAL_DATABASE_MAX_CONNECTIONS",
    "PORTAL_LOG",
    "RUST_LOG",
];

fn parse_port(value: &str) -> Result<u16, String> {
    value
        .parse()
        .map_err(|_| format!("`{value}` is not a port number"))
}

impl Settings {
    /// Read [`CONFIG_FILE`] from the working directory and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
    }

    /// Like [`Settings::load`], with the file path and environment injected.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn load_from(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut settings = match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err.into()),
        };
        settings.apply_env(env)?;
        settings.validate()?;
        Ok(settings)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        for &key in OVERRIDES {
            if let Some(value) = env(key) {
                self.apply_override(key, &value)
                    .map_err(|reason| ConfigError::Env { key, reason })?;
            }
        }
        Ok(())
    }

    fn apply_override(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "PORTAL_HOST" => self.server.host = value.to_string(),
            "PORTAL_PORT" => self.server.port = parse_port(value)?,
            "PORTAL_BIND" => {
                let (host, port) = value.rsplit_once(':').ok_or("expected host:port")?;
                self.server.port = parse_port(port)?;
                self.server.host = host.to_string();
            }
            "PORTAL_DATABASE_URL" => self.database.url = value.to_string(),
            "PORTAL_DATABASE_MAX_CONNECTIONS" => {
                self.database.max_connections =
                    value.parse().map_err(|_| "expected a positive integer")?;
            }
            "PORTAL_LOG" | "RUST_LOG" => self.logging.filter = value.to_string(),
            _ => {}
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let problem = if self.server.port == 0 {
            "server.port must be non-zero"
        } else if self.database.url.trim().is_empty() {
            "database.url must not be empty"
        } else if self.database.max_connections == 0 {
            "database.max_connections must be at least 1"
        } else {
            return Ok(());
        };
        Err(ConfigError::Validation(problem))
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse portal.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read portal.toml: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid value in {key}: {reason}")]
    Env { key: &'static str, reason: String },
    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}
