//! Server configuration from environment variables.
//!
//! Every key has a default; a key that is set but unparsable is an error
//! rather than silently falling back.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SITE_DIR: &str = "site";
const DEFAULT_UPDATE_INTERVAL_MS: u64 = 2000;
const DEFAULT_WINDOW_WIDTH: u32 = 1200;
const DEFAULT_WINDOW_HEIGHT: u32 = 800;
const DEFAULT_WINDOW_TITLE: &str = "webwindow";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Geometry and title advertised to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowGeometry {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `PORT`
    pub port: u16,
    /// `SITE_DIR`: static page assets served as the fallback route.
    pub site_dir: PathBuf,
    /// `UPDATE_INTERVAL_MS`: canvas refresh period, must be non-zero.
    pub update_interval: Duration,
    /// `WINDOW_WIDTH`, `WINDOW_HEIGHT`, `WINDOW_TITLE`
    pub window: WindowGeometry,
}

impl Config {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for any set but malformed key.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for any present but malformed key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let update_ms: u64 = parse_or(&lookup, "UPDATE_INTERVAL_MS", DEFAULT_UPDATE_INTERVAL_MS)?;
        if update_ms == 0 {
            return Err(ConfigError::Invalid { key: "UPDATE_INTERVAL_MS", value: "0".to_owned() });
        }

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            site_dir: lookup("SITE_DIR").map_or_else(|| PathBuf::from(DEFAULT_SITE_DIR), PathBuf::from),
            update_interval: Duration::from_millis(update_ms),
            window: WindowGeometry {
                title: lookup("WINDOW_TITLE").unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_owned()),
                width: parse_or(&lookup, "WINDOW_WIDTH", DEFAULT_WINDOW_WIDTH)?,
                height: parse_or(&lookup, "WINDOW_HEIGHT", DEFAULT_WINDOW_HEIGHT)?,
            },
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
