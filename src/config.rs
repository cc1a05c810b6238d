//! Configuration module for dbpulse.
//!
//! Loads probe targets and runtime settings from environment variables.

use std::env;

use thiserror::Error;

/// Default number of probes in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not valid unicode")]
    Unreadable(String),
}

/// One database endpoint to keep awake.
///
/// Immutable after construction; built once at startup from the
/// `DB{n}_URL` / `DB{n}_ANON_KEY` / `DB{n}_NAME` variables. Not
/// serializable: the api key must never end up in a report.
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub base_url: String,
    pub api_key: String,
}

impl Target {
    /// Create a target, normalizing the base URL (trailing slashes stripped).
    pub fn new(name: impl Into<String>, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Runtime settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Maximum probes in flight at once (default: 5, minimum: 1)
    pub concurrency: usize,
    /// Emit the final summary as a JSON object on stdout (default: false)
    pub json_summary: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            json_summary: false,
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Environment variables:
    /// - `DBPULSE_CONCURRENCY`: probes in flight at once (default: 5;
    ///   `0` is clamped to 1, unparseable values keep the default)
    /// - `DBPULSE_JSON`: `1` or `true` switches the summary to JSON
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key))
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let mut cfg = Self::default();

        if let Ok(raw) = lookup("DBPULSE_CONCURRENCY") {
            if let Ok(n) = raw.parse::<usize>() {
                cfg.concurrency = n.max(1);
            }
        }

        if let Ok(raw) = lookup("DBPULSE_JSON") {
            cfg.json_summary = raw == "1" || raw.eq_ignore_ascii_case("true");
        }

        cfg
    }
}

/// Load the target list from environment variables.
///
/// Targets are numbered from 1 (`DB1_URL`, `DB2_URL`, ...) and the scan
/// stops at the first missing index; gaps are not reconnected. An index
/// whose URL or key is missing or empty is skipped with a warning and is
/// not probed. Fails only if a present variable cannot be read.
pub fn load_targets() -> Result<Vec<Target>, ConfigError> {
    load_targets_from(|key| env::var(key))
}

fn load_targets_from<F>(lookup: F) -> Result<Vec<Target>, ConfigError>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    let mut targets = Vec::new();

    for n in 1usize.. {
        let url = match lookup(&format!("DB{}_URL", n)) {
            Ok(v) => v,
            Err(env::VarError::NotPresent) => break,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::Unreadable(format!("DB{}_URL", n)));
            }
        };

        let api_key = match lookup(&format!("DB{}_ANON_KEY", n)) {
            Ok(v) => v,
            Err(env::VarError::NotPresent) => String::new(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::Unreadable(format!("DB{}_ANON_KEY", n)));
            }
        };

        let name = match lookup(&format!("DB{}_NAME", n)) {
            Ok(v) if !v.trim().is_empty() => v,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::Unreadable(format!("DB{}_NAME", n)));
            }
            _ => format!("DB{}", n),
        };

        if url.trim().is_empty() || api_key.trim().is_empty() {
            tracing::warn!("Skipping {}: DB{}_URL or DB{}_ANON_KEY is missing", name, n, n);
            continue;
        }

        targets.push(Target::new(name, &url, api_key));
    }

    Ok(targets)
}
