//! # myday-settings
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`MydaySettings::default()`]
//! 2. **Settings file** — `$MYDAY_CONFIG` or `~/.myday/settings.json`
//! 3. **Environment variables** — `PORT`, `HOST`, `DATABASE_URL`, `MYDAY_LOG_*`

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;
