//! Consolidated error codes and classification system
//!
//! Single source of truth for all diagnostic codes and their metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis codes
pub mod lexical {
    use super::Code;

    pub const ILLEGAL_CHARACTER: Code = Code::new("E020");
    pub const ILLEGAL_CHARACTER_LIMIT: Code = Code::new("E021");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E040");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const MAX_NESTING_DEPTH: Code = Code::new("E087");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const SYNTAX_VALIDATION_PASSED: Code = Code::new("I041");
    pub const PIPELINE_COMPLETE: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the input that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration and environment variables",
            ),
            // File processing errors
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File not found at specified path",
                "Check file path and ensure file exists",
            ),
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File does not have .drac extension",
                "Rename file with .drac extension or disable the extension check",
            ),
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Reduce file size or rebuild with a larger profile limit",
            ),
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied accessing file",
                "Check file permissions and user access rights",
            ),
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File is not valid UTF-8",
                "Re-encode the source file as UTF-8",
            ),
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "I/O error while reading file",
                "Check disk health and file system state",
            ),
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid file path",
                "Provide a path to a regular file",
            ),
            // Lexical
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Character does not start any token",
                "Remove or replace the character",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Too many illegal characters to report individually",
                "Check that the file is Drac source",
            ),
            // Syntax
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::High,
                true,
                true,
                "Input ended before the program was complete",
                "Close all open blocks, parentheses and statements",
            ),
            ErrorMetadata::new(
                "E050",
                "Syntax",
                Severity::High,
                true,
                true,
                "Token does not fit the grammar at this point",
                "Check the token against the expected categories",
            ),
            ErrorMetadata::new(
                "E087",
                "Syntax",
                Severity::High,
                false,
                true,
                "Maximum nesting depth exceeded",
                "Reduce nesting of blocks and parenthesized expressions",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Check that every listed code has registry metadata
pub fn validate_codes(codes: &[Code]) -> Result<(), String> {
    for code in codes {
        if get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }
    Ok(())
}
