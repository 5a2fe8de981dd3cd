//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`MydaySettings::default()`]
//! 2. If the settings file exists, deep-merge its values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::{myday_dir, MydaySettings};

/// Env var naming an explicit settings file.
pub const CONFIG_ENV: &str = "MYDAY_CONFIG";

/// Resolve the settings file: `$MYDAY_CONFIG`, else `~/.myday/settings.json`.
pub fn settings_path() -> PathBuf {
    read_env_string(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| myday_dir().join("settings.json"))
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<MydaySettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<MydaySettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    validate(&settings)?;
    Ok(settings)
}

/// Defaults merged with the settings file, without env overrides.
pub fn load_file_layer(path: &Path) -> Result<MydaySettings> {
    let defaults = serde_json::to_value(MydaySettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply process environment overrides to loaded settings.
pub fn apply_env_overrides(settings: &mut MydaySettings) {
    apply_overrides(settings, |name| std::env::var(name).ok());
}

/// Apply overrides from an arbitrary variable lookup.
///
/// Recognized: `PORT`, `HOST`, `DATABASE_URL`, `MYDAY_LOG_LEVEL`,
/// `MYDAY_LOG_JSON`. Empty values are ignored; unparseable values are
/// logged and ignored.
pub fn apply_overrides<F>(settings: &mut MydaySettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(val) = read("PORT") {
        match parse_u16_range(&val, 1, 65535) {
            Some(port) => settings.server.port = port,
            None => warn!(key = "PORT", value = %val, "invalid port env var, ignoring"),
        }
    }
    if let Some(val) = read("HOST") {
        settings.server.host = val;
    }
    if let Some(val) = read("DATABASE_URL") {
        settings.database.url = val;
    }
    if let Some(val) = read("MYDAY_LOG_LEVEL") {
        settings.logging.level = val;
    }
    if let Some(val) = read("MYDAY_LOG_JSON") {
        match parse_bool(&val) {
            Some(json) => settings.logging.json = json,
            None => warn!(key = "MYDAY_LOG_JSON", value = %val, "invalid boolean env var, ignoring"),
        }
    }
}

/// Reject settings that cannot produce a running service.
pub fn validate(settings: &MydaySettings) -> Result<()> {
    if settings.server.host.trim().is_empty() {
        return Err(SettingsError::InvalidValue("server host is empty".into()));
    }
    if settings.database.url.trim().is_empty() {
        return Err(SettingsError::InvalidValue("database url is empty".into()));
    }
    Ok(())
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
