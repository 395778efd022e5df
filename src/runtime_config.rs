//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for routeswitch's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `ROUTESWITCH_HANDLERS_DIR`
//!
//! Directory of handler manifests the route table is built from.
//!
//! Default: `handlers`
//!
//! ### `ROUTESWITCH_HOT_RELOAD`
//!
//! When `true`, the handler directory is watched and the route table is
//! rebuilt whenever a manifest changes.
//!
//! Default: `false`
//!
//! ### `ROUTESWITCH_REGEX_SIZE_LIMIT`
//!
//! Upper bound, in bytes, on the compiled size of each route regex and of the
//! combined switch. Accepts values in:
//! - Decimal: `10485760` (10 MB)
//! - Hexadecimal: `0xa00000` (10 MB)
//!
//! Default: `0xa00000` (10 MB, the regex crate default)
//!
//! ## Usage
//!
//! ```rust
//! use routeswitch::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Handlers: {}", config.handlers_dir.display());
//! ```

use std::env;
use std::path::PathBuf;

use crate::router::DEFAULT_SIZE_LIMIT;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory of handler manifests (default: `handlers`)
    pub handlers_dir: PathBuf,
    /// Watch the handler directory and reload on change (default: false)
    pub hot_reload: bool,
    /// Compiled-size limit for route regexes in bytes (default: 10 MB)
    pub regex_size_limit: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            handlers_dir: PathBuf::from("handlers"),
            hot_reload: false,
            regex_size_limit: DEFAULT_SIZE_LIMIT,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            handlers_dir: env::var_os("ROUTESWITCH_HANDLERS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.handlers_dir),
            hot_reload: env::var("ROUTESWITCH_HOT_RELOAD")
                .ok()
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.hot_reload),
            regex_size_limit: env::var("ROUTESWITCH_REGEX_SIZE_LIMIT")
                .ok()
                .and_then(|s| parse_size(&s))
                .unwrap_or(defaults.regex_size_limit),
        }
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}
