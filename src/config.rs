use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which record store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(StoreBackend::MySql),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("expected 'mysql' or 'memory', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub enable_ssl: bool,
    pub ca_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
    pub store_backend: StoreBackend,
    /// Only read when the MySQL backend is selected.
    pub database: Option<DatabaseConfig>,
    pub workers: usize,
}

fn required(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn parsed<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(DatabaseConfig {
            host: required("DB_HOST")?,
            port: parsed("DB_PORT", 4000u16)?,
            user: required("DB_USER")?,
            password: env::var("DB_PASSWORD").unwrap_or_default(),
            database: required("DB_DATABASE")?,
            enable_ssl: env::var("DB_ENABLE_SSL").map(|v| v == "true").unwrap_or(false),
            ca_path: env::var("DB_CA_PATH").ok().filter(|p| !p.is_empty()).map(PathBuf::from),
        })
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        let token_ttl_minutes = parsed("TOKEN_TTL_MINUTES", 60i64)?;
        if token_ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue(
                "TOKEN_TTL_MINUTES".to_string(),
                "must be positive".to_string(),
            ));
        }

        let bcrypt_cost = parsed("BCRYPT_COST", 10u32)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "BCRYPT_COST".to_string(),
                "must be between 4 and 31".to_string(),
            ));
        }

        let workers = parsed("WORKERS", num_cpus::get())?;
        if workers == 0 {
            return Err(ConfigError::InvalidValue(
                "WORKERS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let store_backend = parsed("STORE_BACKEND", StoreBackend::MySql)?;
        let database = match store_backend {
            StoreBackend::MySql => Some(DatabaseConfig::from_env()?),
            StoreBackend::Memory => None,
        };

        Ok(Config {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:5000".to_string()),
            jwt_secret,
            token_ttl_minutes,
            bcrypt_cost,
            store_backend,
            database,
            workers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_case_insensitively() {
        assert_eq!("MySQL".parse::<StoreBackend>(), Ok(StoreBackend::MySql));
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    // Environment is process-wide, so everything touching it lives in one test.
    #[test]
    fn from_env_reads_memory_backend() {
        env::set_var("JWT_SECRET", "test-secret");
        env::set_var("STORE_BACKEND", "memory");
        env::set_var("TOKEN_TTL_MINUTES", "15");
        env::set_var("WORKERS", "2");

        let config = Config::from_env().unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.database.is_none());
        assert_eq!(config.token_ttl_minutes, 15);
        assert_eq!(config.workers, 2);
        assert_eq!(config.bcrypt_cost, 10);

        env::set_var("TOKEN_TTL_MINUTES", "soon");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue(name, _)) if name == "TOKEN_TTL_MINUTES"
        ));

        env::set_var("TOKEN_TTL_MINUTES", "15");
        env::set_var("WORKERS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue(name, _)) if name == "WORKERS"
        ));

        env::set_var("WORKERS", "2");
        env::set_var("JWT_SECRET", "");
        assert!(Config::from_env().is_err());

        for name in ["JWT_SECRET", "STORE_BACKEND", "TOKEN_TTL_MINUTES", "WORKERS"] {
            env::remove_var(name);
        }
    }
}
