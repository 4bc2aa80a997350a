//! Runtime configuration loaded from the environment

use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,

    /// Prefix the cart routes are nested under; `/` mounts them at the root
    pub mount_path: String,

    pub log_format: LogFormat,

    /// Allow any origin, method and header
    pub cors_permissive: bool,

    /// PostgreSQL connection string; carts are kept in memory when unset
    pub database_url: Option<String>,

    pub database_max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            mount_path: "/".to_string(),
            log_format: LogFormat::Compact,
            cors_permissive: true,
            database_url: None,
            database_max_connections: 5,
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup, falling back to
    /// defaults for unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "SERVER_PORT",
                message: e.to_string(),
            })?,
            None => defaults.server_port,
        };
        let mount_path = match lookup("MOUNT_PATH") {
            Some(raw) => normalize_mount_path(&raw)?,
            None => defaults.mount_path,
        };
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("compact") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    message: format!("expected `compact` or `json`, got `{}`", other),
                })
            }
        };
        let cors_permissive = match lookup("CORS_PERMISSIVE") {
            Some(raw) => raw.parse::<bool>().map_err(|e| ConfigError::Invalid {
                var: "CORS_PERMISSIVE",
                message: e.to_string(),
            })?,
            None => defaults.cors_permissive,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: "DATABASE_MAX_CONNECTIONS",
                        message: "must be at least 1".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "DATABASE_MAX_CONNECTIONS",
                        message: e.to_string(),
                    })
                }
            },
            None => defaults.database_max_connections,
        };

        Ok(Self {
            server_host,
            server_port,
            mount_path,
            log_format,
            cors_permissive,
            database_url,
            database_max_connections,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server_host, self.server_port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "SERVER_HOST",
                message: e.to_string(),
            })
    }
}

/// `/api/` becomes `/api`; empty or `/` stays at the root.
fn normalize_mount_path(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok("/".to_string());
    }
    if !trimmed.starts_with('/') {
        return Err(ConfigError::Invalid {
            var: "MOUNT_PATH",
            message: format!("`{}` must start with `/`", raw),
        });
    }
    Ok(trimmed.to_string())
}
