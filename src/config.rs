//! Configuration constants and utilities for httpreq
//!
//! httpreq has no configuration file. Everything a request needs comes from
//! the command line; this module only holds the fixed defaults and the
//! environment lookup for the log level.

use std::time::Duration;

/// Timeout applied to the whole exchange, from connect to the last body byte
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Method used when `-method` is not given
pub const DEFAULT_METHOD: &str = "GET";

/// Environment variable name for overriding the log level
pub const LOG_LEVEL_ENV_VAR: &str = "HTTPREQ_LOG_LEVEL";

/// Log level used when the environment variable is not set
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log level forced by `-verbose`
pub const VERBOSE_LOG_LEVEL: &str = "debug";

/// Get the log level, checking environment variable first, then falling back to default
pub fn get_log_level() -> String {
    std::env::var_os(LOG_LEVEL_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .map(|val| val.trim().to_lowercase())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_is_thirty_seconds() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(30));
    }

    #[test]
    fn test_default_method() {
        assert_eq!(DEFAULT_METHOD, "GET");
    }

    // Both env cases live in one test so they cannot race each other.
    #[test]
    fn test_get_log_level_default_and_env_override() {
        // Save current env var state
        let original = std::env::var_os(LOG_LEVEL_ENV_VAR);

        std::env::remove_var(LOG_LEVEL_ENV_VAR);
        assert_eq!(get_log_level(), DEFAULT_LOG_LEVEL);

        std::env::set_var(LOG_LEVEL_ENV_VAR, " TRACE ");
        assert_eq!(get_log_level(), "trace");

        std::env::set_var(LOG_LEVEL_ENV_VAR, "");
        assert_eq!(get_log_level(), DEFAULT_LOG_LEVEL);

        // Restore original state
        match original {
            Some(val) => std::env::set_var(LOG_LEVEL_ENV_VAR, val),
            None => std::env::remove_var(LOG_LEVEL_ENV_VAR),
        }
    }
}
