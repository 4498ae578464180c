//! # Free Learn Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`database`]: Postgres connection string, database name and deadlines
//! - [`server`]: listen address
//! - [`cors`]: allowed origins
//!
//! Everything is read once at startup into an [`AppConfig`] that is handed to
//! the application state; nothing here is global.
//!
//! # Example
//!
//! ```ignore
//! use freelearn_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.server.bind_address());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    /// Directory for the rolling JSON log file; console only when unset.
    pub log_dir: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key: &str| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            jwt: JwtConfig::from_vars(&var),
            database: DatabaseConfig::from_vars(&var),
            server: ServerConfig::from_vars(&var),
            cors: CorsConfig::from_vars(&var),
            log_dir: var("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
        }
    }
}

pub(crate) fn parse_or<T, F>(var: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
