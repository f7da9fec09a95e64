use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

/// Runtime settings read from `.env` and the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_host: String,
    pub database_path: PathBuf,
    pub http_workers: usize,
    pub seed_sections_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Self {
        if let Err(e) = dotenv::dotenv() {
            info!("no .env file loaded: {e}");
        }
        Self {
            port: try_load("PORT", 3001),
            bind_host: try_load("BIND_HOST", "127.0.0.1".to_string()),
            database_path: PathBuf::from(try_load("DATABASE_PATH", "data/coursemap.db".to_string())),
            http_workers: try_load("HTTP_WORKERS", num_cpus::get()).max(1),
            seed_sections_path: env::var("SEED_SECTIONS_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}; using default: {default}");
        default
    })
}
