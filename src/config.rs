use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::collections::HashMap;
use std::env;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,

    pub api_prefix: String,

    // Logging
    pub log_dir: String,
    pub log_level: Level,

    /// `None` allows any origin
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_env_map(env::vars().collect())
    }

    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self> {
        let get = |key: &str, default: &str| -> String {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let db_max_connections: u32 = get("DB_MAX_CONNECTIONS", "5")
            .parse()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;
        if db_max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        let log_level: Level = get("LOG_LEVEL", "info")
            .parse()
            .map_err(|_| anyhow::anyhow!("LOG_LEVEL must be one of trace, debug, info, warn, error"))?;

        let api_prefix = get("API_PREFIX", "/api");
        if !api_prefix.starts_with('/') {
            bail!("API_PREFIX must start with '/', got {api_prefix}");
        }

        let cors_allowed_origin = match get("CORS_ALLOWED_ORIGIN", "*").as_str() {
            "*" => None,
            origin => Some(origin.to_string()),
        };

        Ok(Self {
            server_addr: get("SERVER_ADDR", "0.0.0.0:8000"),
            database_url: get("DATABASE_URL", "sqlite://hrms.db"),
            db_max_connections,
            api_prefix: api_prefix.trim_end_matches('/').to_string(),
            log_dir: get("LOG_DIR", "logs"),
            log_level,
            cors_allowed_origin,
        })
    }
}
