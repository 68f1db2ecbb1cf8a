//! Configuration module for the Drac compiler
//!
//! Compile-time limits are generated by build.rs from `config/<profile>.toml`;
//! user preferences are read from `DRAC_*` environment variables at runtime.

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    FileProcessorPreferences, LexicalPreferences, LoggingPreferences, RuntimeConfig,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("DRAC_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("DRAC_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
