use anyhow::{Result, anyhow};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub listen_addr: String,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env early so process env reads pick it up.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparsable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL is required"))?;
        let max_connections: u32 = parse_or(lookup("DB_MAX_CONNECTIONS"), 10);
        let min_connections: u32 = parse_or(lookup("DB_MIN_CONNECTIONS"), 1);
        if min_connections > max_connections {
            return Err(anyhow!(
                "DB_MIN_CONNECTIONS {} exceeds DB_MAX_CONNECTIONS {}",
                min_connections,
                max_connections
            ));
        }
        let database = DatabaseConfig {
            url,
            max_connections,
            min_connections,
            connect_timeout: Duration::from_secs(parse_or(lookup("DB_CONNECT_TIMEOUT_SECS"), 10)),
            idle_timeout: Duration::from_secs(parse_or(lookup("DB_IDLE_TIMEOUT_SECS"), 300)),
        };

        let listen_addr = lookup("PORTAL_ADDR").unwrap_or_else(|| "0.0.0.0:5000".to_string());
        let body_limit_bytes = parse_or(lookup("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT_BYTES);

        Ok(Self {
            database,
            listen_addr,
            body_limit_bytes,
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = config_from(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.database.idle_timeout, Duration::from_secs(300));
        assert_eq!(config.listen_addr, "0.0.0.0:5000");
        assert_eq!(config.body_limit_bytes, 10_485_760);
    }

    #[test]
    fn database_url_is_required() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn portal_addr_overrides_listen_address() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/portal"),
            ("PORTAL_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
    }

    #[test]
    fn min_connections_above_max_is_rejected() {
        let err = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("DB_MIN_CONNECTIONS", "5"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("exceeds DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn out_of_range_pool_size_falls_back_to_default() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "4294967296"),
            ("DB_MIN_CONNECTIONS", "ten"),
        ])
        .unwrap();
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 1);
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or::<u64>(Some("25".to_string()), 10), 25);
        assert_eq!(parse_or::<u64>(Some(" 7 ".to_string()), 10), 7);
        assert_eq!(parse_or::<u64>(Some("-1".to_string()), 10), 10);
        assert_eq!(parse_or::<u64>(None, 10), 10);
    }
}
