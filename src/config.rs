//! Server configuration parsed from environment variables.
//!
//! Values are read through a lookup function so the CLI can layer its flags
//! over the process environment (clap's `env` attribute does the merge) and
//! tests can supply a plain map.

use std::path::PathBuf;

use crate::catalog::CatalogSource;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_TITLE: &str = "AI Tool Directory";

pub const ENV_SOURCE: &str = "TOOLSHELF_SOURCE";
pub const ENV_PORT: &str = "PORT";
pub const ENV_FETCH_TIMEOUT: &str = "TOOLSHELF_FETCH_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT: &str = "TOOLSHELF_CONNECT_TIMEOUT_SECS";
pub const ENV_DATA_SOURCE_LINK: &str = "DATA_SOURCE_LINK";
pub const ENV_TITLE: &str = "TOOLSHELF_TITLE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("catalog source not configured; set TOOLSHELF_SOURCE or pass --source")]
    MissingSource,
    #[error("unsupported catalog source scheme: {0}")]
    UnsupportedScheme(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for FetchTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_FETCH_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub source: CatalogSource,
    pub port: u16,
    pub timeouts: FetchTimeouts,
    /// Human-editable origin of the catalog, linked from the page controls.
    pub data_source_link: Option<String>,
    pub title: String,
}

impl ServerConfig {
    /// Build typed config from a key lookup, normally the CLI flags layered
    /// over the process environment.
    ///
    /// Required:
    /// - `TOOLSHELF_SOURCE`: file path or `http(s)://` URL
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `TOOLSHELF_FETCH_TIMEOUT_SECS`: default 15
    /// - `TOOLSHELF_CONNECT_TIMEOUT_SECS`: default 5
    /// - `DATA_SOURCE_LINK`: no link when absent
    /// - `TOOLSHELF_TITLE`: default "AI Tool Directory"
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing or has an unknown scheme, if
    /// `PORT` is not a valid port number, or if a timeout is not a positive
    /// whole number of seconds.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = parse_source(lookup(ENV_SOURCE).as_deref())?;

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: ENV_PORT, value: raw })?,
            None => DEFAULT_PORT,
        };

        let timeouts = FetchTimeouts {
            request_secs: parse_timeout(ENV_FETCH_TIMEOUT, lookup(ENV_FETCH_TIMEOUT), DEFAULT_FETCH_TIMEOUT_SECS)?,
            connect_secs: parse_timeout(ENV_CONNECT_TIMEOUT, lookup(ENV_CONNECT_TIMEOUT), DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        let data_source_link = lookup(ENV_DATA_SOURCE_LINK)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        let title = lookup(ENV_TITLE)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned());

        Ok(Self { source, port, timeouts, data_source_link, title })
    }
}

/// Whole seconds, at least one. A zero timeout would fail every fetch.
fn parse_timeout(key: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue { key, value: raw }),
    }
}

/// Classify a raw source string as a remote URL or a local path.
///
/// # Errors
///
/// Returns `MissingSource` for an absent or blank value and
/// `UnsupportedScheme` for URLs other than `http`/`https`.
pub fn parse_source(raw: Option<&str>) -> Result<CatalogSource, ConfigError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ConfigError::MissingSource);
    }
    if let Some((scheme, _)) = raw.split_once("://") {
        return match scheme.to_ascii_lowercase().as_str() {
            "http" | "https" => Ok(CatalogSource::Remote(raw.to_owned())),
            "file" => Ok(CatalogSource::File(PathBuf::from(&raw["file://".len()..]))),
            other => Err(ConfigError::UnsupportedScheme(other.to_owned())),
        };
    }
    Ok(CatalogSource::File(PathBuf::from(raw)))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
