use std::str::FromStr;
use std::time::Duration;

/// Database configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full connection string.
    pub database_url: String,
    /// Upper bound on open connections in the pool.
    pub max_open_conn: u32,
    /// Connections kept open while idle.
    pub max_idle_conn: u32,
    /// Per-operation deadline applied by every repository. `None` disables it.
    pub query_timeout: Option<Duration>,
}

impl DbConfig {
    /// Build a config for an explicit URL with default pool bounds and no
    /// query timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        let default_conn = default_connection_count();
        Self {
            database_url: database_url.into(),
            max_open_conn: default_conn,
            max_idle_conn: default_conn,
            query_timeout: None,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                              |
    /// |-------------------------|--------------------------------------|
    /// | `DATABASE_URL`          | assembled from the `DB_*` vars below |
    /// | `DB_HOST`               | `localhost:5432`                     |
    /// | `DB_NAME`               | `storefront`                         |
    /// | `DB_USER`               | `dbadmin`                            |
    /// | `DB_PASSWORD`           | `dbadmin`                            |
    /// | `DB_MAX_OPEN_CONN`      | CPU count + 1                        |
    /// | `DB_MAX_IDLE_CONN`      | CPU count + 1                        |
    /// | `DB_QUERY_TIMEOUT_SECS` | unset (no timeout)                   |
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let host = env_or("DB_HOST", "localhost:5432");
            let name = env_or("DB_NAME", "storefront");
            let user = env_or("DB_USER", "dbadmin");
            let password = env_or("DB_PASSWORD", "dbadmin");
            format!("postgresql://{user}:{password}@{host}/{name}?sslmode=disable")
        });

        let default_conn = default_connection_count();
        let max_open_conn = env_parse("DB_MAX_OPEN_CONN", default_conn);
        let max_idle_conn = env_parse("DB_MAX_IDLE_CONN", default_conn);

        let query_timeout = match env_parse::<u64>("DB_QUERY_TIMEOUT_SECS", 0) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Self {
            database_url,
            max_open_conn,
            max_idle_conn,
            query_timeout,
        }
    }
}

fn default_connection_count() -> u32 {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    u32::try_from(cpus).unwrap_or(u32::MAX).saturating_add(1)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an env var, falling back to `default` (with a warning) when the
/// value is present but malformed.
fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!(key, value = %raw, error = %e, %default, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
