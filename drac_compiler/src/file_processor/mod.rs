//! File processor module with compile-time limits and global logging integration

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
use crate::logging::codes;

pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, DRAC_EXTENSION,
};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Validate file processor error codes (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    codes::validate_codes(&[
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
    ])?;

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.drac");
        fs::write(&file_path, "var x;\n").unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_preferences_processor() {
        let prefs = FileProcessorPreferences {
            require_drac_extension: true,
            enable_performance_logging: true,
        };
        assert!(create_processor_from_preferences(&prefs).require_drac_extension);
    }

    #[test]
    fn test_init() {
        assert!(init_file_processor_logging().is_ok());
    }
}
