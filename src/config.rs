//! Runtime settings read from `ATLANTIS_*` environment variables.

use std::env;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_SEEN_TTL_SECS: i64 = 3600;
/// Best times under this many seconds are worth announcing.
pub const DEFAULT_NOTABLE_SECONDS: f64 = 130.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    /// Custom catalog file; the built-in catalog is used when unset.
    pub catalog_path: Option<String>,
    pub seen_ttl_secs: i64,
    pub notable_seconds: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            catalog_path: None,
            seen_ttl_secs: DEFAULT_SEEN_TTL_SECS,
            notable_seconds: DEFAULT_NOTABLE_SECONDS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or invalid values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("ATLANTIS_BIND").unwrap_or(defaults.bind_addr),
            catalog_path: lookup("ATLANTIS_CATALOG").filter(|path| !path.trim().is_empty()),
            seen_ttl_secs: non_negative_or(
                parse_or(
                    lookup("ATLANTIS_SEEN_TTL_SECS"),
                    "ATLANTIS_SEEN_TTL_SECS",
                    defaults.seen_ttl_secs,
                ),
                "ATLANTIS_SEEN_TTL_SECS",
                defaults.seen_ttl_secs,
            ),
            notable_seconds: parse_or(
                lookup("ATLANTIS_NOTABLE_SECONDS"),
                "ATLANTIS_NOTABLE_SECONDS",
                defaults.notable_seconds,
            ),
        }
    }
}

fn parse_or<T: FromStr + std::fmt::Display + Copy>(raw: Option<String>, name: &str, default: T) -> T {
    let Some(value) = raw else {
        return default;
    };
    value.trim().parse::<T>().unwrap_or_else(|_| {
        log::warn!("invalid {name} '{value}', defaulting to {default}");
        default
    })
}

fn non_negative_or(value: i64, name: &str, default: i64) -> i64 {
    if value < 0 {
        log::warn!("negative {name} '{value}', defaulting to {default}");
        return default;
    }
    value
}
