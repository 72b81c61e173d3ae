//! Server configuration from the environment.
//!
//! `HOST` (default 0.0.0.0), `PORT` (default 8080), `CLOCK_PERIODS` (default 4) and
//! `CLOCK_PERIOD_SECS` (default 600). Unparseable or out-of-range values fall back
//! to the defaults with a warning.

use crate::models::{ClockSettings, DEFAULT_NUMBER_OF_PERIODS, DEFAULT_PERIOD_SECS};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Clock settings for games created without explicit settings.
    pub default_clock: ClockSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            default_clock: ClockSettings::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_or("PORT", &lookup, defaults.port);
        let default_clock = ClockSettings {
            number_of_periods: parse_or("CLOCK_PERIODS", &lookup, DEFAULT_NUMBER_OF_PERIODS),
            period_secs: parse_or("CLOCK_PERIOD_SECS", &lookup, DEFAULT_PERIOD_SECS),
            overtime: None,
        };
        let default_clock = match default_clock.validate() {
            Ok(()) => default_clock,
            Err(e) => {
                log::warn!("{}; using default clock settings", e);
                ClockSettings::default()
            }
        };
        Self {
            host,
            port,
            default_clock,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring invalid {}={:?}", key, raw);
            default
        }),
    }
}
