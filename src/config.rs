#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::error::{AppError, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = ".confirm/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub directory_path: PathBuf,
    pub directory_key: String,
    pub outbox_dir: PathBuf,
    pub max_payload_bytes: usize,
    pub adapter_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory_path: PathBuf::from(".confirm/directory.json"),
            directory_key: String::new(),
            outbox_dir: PathBuf::from(".confirm/outbox"),
            max_payload_bytes: 64 * 1024,
            adapter_timeout_ms: 5_000,
        }
    }
}

impl Config {
    #[must_use]
    pub const fn adapter_timeout(&self) -> Duration {
        Duration::from_millis(self.adapter_timeout_ms)
    }
}

/// Load the config file, falling back to defaults when it does not exist.
///
/// # Errors
///
/// Returns `AppError::IoError` when the file exists but cannot be read, and
/// `AppError::ConfigError` when a numeric key does not parse.
pub async fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = tokio::fs::read_to_string(&config_path).await?;

    parse_config_content(&content)
}

/// Parse `key = "value"` lines. Blank lines and `#` comments are skipped,
/// unknown keys ignored, `${VAR}` / `${VAR:-default}` expanded.
///
/// # Errors
///
/// Returns `AppError::ConfigError` for a numeric key with a non-numeric value.
pub fn parse_config_content(content: &str) -> Result<Config> {
    let mut config = Config::default();

    for line in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
    {
        if let Some(value) = parse_key_value(line, "directory_path") {
            config.directory_path = PathBuf::from(expand_env_vars(value));
        }
        if let Some(value) = parse_key_value(line, "directory_key") {
            config.directory_key = expand_env_vars(value);
        }
        if let Some(value) = parse_key_value(line, "outbox_dir") {
            config.outbox_dir = PathBuf::from(expand_env_vars(value));
        }
        if let Some(value) = parse_key_value(line, "max_payload_bytes") {
            config.max_payload_bytes = parse_number("max_payload_bytes", value)?;
        }
        if let Some(value) = parse_key_value(line, "adapter_timeout_ms") {
            config.adapter_timeout_ms = parse_number("adapter_timeout_ms", value)?;
        }
    }

    Ok(config)
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N> {
    expand_env_vars(value)
        .parse()
        .map_err(|_| AppError::ConfigError(format!("{key} must be a number, got '{value}'")))
}

/// Substituted values are never expanded again, so a variable that refers to
/// itself is inserted literally.
fn expand_env_vars(input: &str) -> String {
    let mut result = input.to_string();
    let mut cursor = 0;
    while let Some(offset) = result[cursor..].find("${") {
        let start = cursor + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_part = &result[start + 2..start + end];
        let (var_name, default) = var_part.split_once(":-").unwrap_or((var_part, ""));
        let value = std::env::var(var_name).unwrap_or_else(|_| default.to_string());
        result.replace_range(start..=(start + end), &value);
        cursor = start + value.len();
    }
    result
}

#[must_use]
pub fn parse_key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.split_once('=')
        .and_then(|(lhs, rhs)| (lhs.trim() == key).then_some(rhs.trim().trim_matches('"')))
}
