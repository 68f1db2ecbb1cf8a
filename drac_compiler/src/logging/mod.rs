//! Global logging module for the Drac compiler
//!
//! Provides thread-safe global logging with per-thread file context
//! and a small macro interface. Logging is silent until initialized.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::tokens::Position;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, MultiLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = const { RefCell::new(None) };
}

/// File currently being processed on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_path: PathBuf,
    pub file_id: usize,
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    codes::validate_codes(&[
        codes::system::INTERNAL_ERROR,
        codes::file_processing::FILE_NOT_FOUND,
        codes::lexical::ILLEGAL_CHARACTER,
        codes::syntax::UNEXPECTED_TOKEN,
    ])?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// FILE CONTEXT MANAGEMENT
// ============================================================================

pub fn set_file_context(file_path: PathBuf, file_id: usize) {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(FileContext { file_path, file_id });
    });
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with file context
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_file_context(file_path, file_id);
    let result = f();
    clear_file_context();
    result
}

pub fn get_current_file_context() -> Option<FileContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Attach context pairs and the thread's file, then hand the event to the global logger
pub fn dispatch_event(mut event: LogEvent, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if config::include_file_context() {
        if let Some(file_ctx) = get_current_file_context() {
            event = event.with_context("file", &file_ctx.file_path.display().to_string());
            event = event.with_context("file_id", &file_ctx.file_id.to_string());
        }
    }

    logger.log_event(event);
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    position: Option<Position>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(p) = position {
        event = event.with_position(p);
    }
    dispatch_event(event, context);
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(
    code: Option<Code>,
    message: &str,
    position: Option<Position>,
    context: Vec<(&str, &str)>,
) {
    let mut event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    if let Some(p) = position {
        event = event.with_position(p);
    }
    dispatch_event(event, context);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(LogEvent::success(code, message), context);
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(LogEvent::info(message), context);
}

/// Log debug with context (used by log_debug! macro)
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(LogEvent::debug(message), context);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_management() {
        let file_path = PathBuf::from("test.drac");

        assert!(get_current_file_context().is_none());

        set_file_context(file_path.clone(), 1);
        let context = get_current_file_context().unwrap();
        assert_eq!(context.file_path, file_path);
        assert_eq!(context.file_id, 1);

        clear_file_context();
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_with_file_context() {
        let file_path = PathBuf::from("test.drac");

        let result = with_file_context(file_path.clone(), 2, || {
            assert_eq!(get_current_file_context().unwrap().file_path, file_path);
            42
        });

        assert_eq!(result, 42);
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_logging_without_initialization_does_not_panic() {
        log_error_with_context(codes::system::INTERNAL_ERROR, "error", None, vec![]);
        log_warning_with_context(None, "warning", Some(Position::new(1, 1)), vec![("k", "v")]);
    }
}
