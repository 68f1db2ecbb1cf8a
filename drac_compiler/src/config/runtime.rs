// RUNTIME PREFERENCES (User Experience)

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to reject files without the .drac extension
    pub require_drac_extension: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_drac_extension: env::var(env_vars::REQUIRE_DRAC_EXTENSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Whether illegal characters are reported as warnings while tokenizing
    pub warn_on_illegal_chars: bool,

    /// Whether to keep a per-category token histogram
    pub track_category_counts: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            warn_on_illegal_chars: env::var(env_vars::LEXICAL_WARN_ILLEGAL_CHARS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            track_category_counts: env::var(env_vars::LEXICAL_TRACK_CATEGORIES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the configured logger
    pub min_log_level: LogLevel,

    /// Whether to attach the current file to every event
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_DRAC_EXTENSION: &str = "DRAC_REQUIRE_DRAC_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "DRAC_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_WARN_ILLEGAL_CHARS: &str = "DRAC_LEXICAL_WARN_ILLEGAL_CHARS";
    pub const LEXICAL_TRACK_CATEGORIES: &str = "DRAC_LEXICAL_TRACK_CATEGORIES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "DRAC_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "DRAC_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "DRAC_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "DRAC_LOGGING_INCLUDE_FILE_CONTEXT";
}
