//! Configuration management for the todo server.
//!
//! Loads configuration from environment variables. Database credentials are
//! all-or-nothing: without them the server keeps todos in memory.

use std::fmt;

/// Server configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    /// `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Address for `TcpListener::bind`. Kept as a pair so IPv6 hosts need
    /// no brackets.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// MongoDB credentials. `Debug` hides the password.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    /// Appended verbatim after the password, e.g. `@cluster0.example.net/todos`.
    pub cluster: String,
}

impl DatabaseConfig {
    pub fn connection_string(&self) -> String {
        format!("mongodb+srv://{}:{}{}", self.user, self.password, self.cluster)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("cluster", &self.cluster)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),

    #[error("DB_USER, DB_PASS and DB_CLUSTER must be set together (missing {0})")]
    PartialDatabase(&'static str),
}

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let database = match (lookup("DB_USER"), lookup("DB_PASS"), lookup("DB_CLUSTER")) {
            (None, None, None) => None,
            (Some(user), Some(password), Some(cluster)) => Some(DatabaseConfig {
                user,
                password,
                cluster,
            }),
            (user, password, _) => {
                let missing = if user.is_none() {
                    "DB_USER"
                } else if password.is_none() {
                    "DB_PASS"
                } else {
                    "DB_CLUSTER"
                };
                return Err(ConfigError::PartialDatabase(missing));
            }
        };

        Ok(Self {
            server: ServerConfig { host, port },
            database,
        })
    }
}
