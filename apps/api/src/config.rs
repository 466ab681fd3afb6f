use anyhow::{Context, Result};

use crate::resume::loader::{
    ExtractionConfig, DEFAULT_RAW_SCAN_LIMIT_BYTES, DEFAULT_STREAM_SCAN_LIMIT_BYTES,
};
use crate::resume::sanitize::DEFAULT_DISPLAY_MAX_CHARS;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; a value that does not parse fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub display_max_chars: usize,
    pub extraction: ExtractionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            display_max_chars: DEFAULT_DISPLAY_MAX_CHARS,
            extraction: ExtractionConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            display_max_chars: env_or("DISPLAY_MAX_CHARS", DEFAULT_DISPLAY_MAX_CHARS)?,
            extraction: ExtractionConfig {
                raw_scan_limit_bytes: env_or("RAW_SCAN_LIMIT_BYTES", DEFAULT_RAW_SCAN_LIMIT_BYTES)?,
                stream_scan_limit_bytes: env_or(
                    "STREAM_SCAN_LIMIT_BYTES",
                    DEFAULT_STREAM_SCAN_LIMIT_BYTES,
                )?,
            },
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}
