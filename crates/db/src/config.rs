//! Database configuration loaded from environment variables.

/// Connection settings for the favorites database.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL connection string (`DATABASE_URL`, required).
    pub database_url: String,
    /// Upper bound on pooled connections (default: `20`).
    pub max_connections: u32,
    /// Seconds to wait for a free connection before failing (default: `5`).
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} must be a valid {expected}, got '{value}'")]
    Malformed {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl DbConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                   | Default  |
    /// |---------------------------|----------|
    /// | `DATABASE_URL`            | required |
    /// | `DB_MAX_CONNECTIONS`      | `20`     |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", "u32", 20)?;
        let acquire_timeout_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", "u64", 5)?;

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout_secs,
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Malformed {
            key,
            expected,
            value,
        }),
    }
}
