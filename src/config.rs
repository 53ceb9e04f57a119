//! Stub server configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// When set, every `/api` request must carry `Authorization: Bearer {token}`.
    pub api_token: Option<String>,
    /// Built client bundle to serve for non-API paths.
    pub static_dir: Option<PathBuf>,
    /// JSON file of `{ route_key: [records] }` replacing the built-in seed.
    pub seed_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Read config from the environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `TRIPDESK_API_TOKEN`
    /// - `TRIPDESK_STATIC_DIR`
    /// - `TRIPDESK_SEED_FILE`
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            api_token: env_non_empty("TRIPDESK_API_TOKEN"),
            static_dir: env_non_empty("TRIPDESK_STATIC_DIR").map(PathBuf::from),
            seed_file: env_non_empty("TRIPDESK_SEED_FILE").map(PathBuf::from),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
