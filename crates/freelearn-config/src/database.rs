use std::time::Duration;

use crate::parse_or;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub connection_string: String,
    /// Database selected on top of the connection string.
    pub name: String,
    pub max_connections: u32,
    /// Deadline applied to pool acquisition and to every store call.
    pub timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_vars(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            connection_string: var("DB_CONNECTION_STRING")
                .unwrap_or_else(|| "postgres://localhost:5432".to_string()),
            name: var("DBNAME").unwrap_or_else(|| "freelearn".to_string()),
            max_connections: parse_or(var, "DB_MAX_CONNECTIONS", 5),
            timeout_secs: parse_or(var, "DB_TIMEOUT_SECS", 5),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
