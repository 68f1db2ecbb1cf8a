//! Reads Drac source files under compile-time size limits

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::{codes, Code};
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

pub const DRAC_EXTENSION: &str = "drac";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .drac, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 in {path} at byte {valid_up_to}")]
    InvalidEncoding { path: String, valid_up_to: usize },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            Self::InvalidExtension { .. } => codes::file_processing::INVALID_EXTENSION,
            Self::FileTooLarge { .. } | Self::TooManyLines { .. } => {
                codes::file_processing::FILE_TOO_LARGE
            }
            Self::PermissionDenied { .. } => codes::file_processing::PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            Self::IoError { .. } => codes::file_processing::IO_ERROR,
            Self::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(error: &io::Error, path: &Path, action: &str) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => Self::IoError {
                message: format!("Failed to {} '{}': {}", action, path.display(), error),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    pub is_drac_file: bool,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

fn human_readable(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// Source text plus what was learned while reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Characters per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.char_count() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

/// File processor: size and line limits are compile-time, the rest are preferences
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub require_drac_extension: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_drac_extension: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_drac_extension: prefs.require_drac_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_drac_extension_required(mut self, required: bool) -> Self {
        self.require_drac_extension = required;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a file and return its contents with metadata.
    ///
    /// Empty files are accepted; an empty program is valid Drac.
    pub fn process_file(&self, file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        log_debug!("Starting file processing", "file" => file_path);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, file_path)?;
        let source = self.read_file(&path, file_path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS
            );
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };
        self.log_processing_success(&result, file_path);

        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms,
                "chars_per_ms" => format!("{:.2}", result.processing_rate()),
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "lines" => result.metadata.line_count,
                "duration_ms" => duration_ms
            );
        }
    }

    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: String::new(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);
        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = FileProcessorError::from_io(&e, path, "resolve path");
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path,
                "io_error" => e
            );
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path, "read metadata for");
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e
            );
            error
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());
        let is_drac_file = extension.as_deref() == Some(DRAC_EXTENSION);

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension,
            line_count: 0,
            is_drac_file,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_drac" => is_drac_file,
            "is_large_file" => file_metadata.is_large_file()
        );

        Ok(file_metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata, file_path: &str) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_readable(MAX_FILE_SIZE)
            );
            return Err(error);
        }

        if self.require_drac_extension && !metadata.is_drac_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have required .drac extension",
                "file" => file_path,
                "extension" => metadata.extension.as_deref().unwrap_or("none")
            );
            return Err(error);
        }

        Ok(())
    }

    fn read_file(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        let bytes = fs::read(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path, "read file");
            log_error!(error.error_code(), "I/O error reading file",
                "file" => file_path,
                "io_error" => e
            );
            error
        })?;

        String::from_utf8(bytes).map_err(|e| {
            let error = FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
                valid_up_to: e.utf8_error().valid_up_to(),
            };
            log_error!(error.error_code(), "Invalid UTF-8 encoding in file",
                "file" => file_path,
                "valid_up_to" => e.utf8_error().valid_up_to()
            );
            error
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("hello.drac");
        let content = "main() {\n  print(\"ñ\");\n}\n";
        fs::write(&file_path, content).unwrap();

        let result = FileProcessor::new()
            .process_file(file_path.to_str().unwrap())
            .unwrap();

        assert_eq!(result.source, content);
        assert_eq!(result.metadata.line_count, 3);
        assert!(result.metadata.is_drac_file);
        assert_eq!(result.char_count(), content.chars().count());
        assert!(!result.metadata.is_large_file());
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.drac");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new()
            .process_file(file_path.to_str().unwrap())
            .unwrap();
        assert!(result.source.is_empty());
        assert_eq!(result.metadata.line_count, 0);
    }

    #[test]
    fn test_file_not_found() {
        let result = FileProcessor::new().process_file("does/not/exist.drac");
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path().to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));

        assert_matches!(
            FileProcessor::new().process_file(""),
            Err(FileProcessorError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("program.txt");
        fs::write(&file_path, "main() { }").unwrap();
        let path = file_path.to_str().unwrap();

        assert!(FileProcessor::new().process_file(path).is_ok());

        let strict = FileProcessor::new().with_drac_extension_required(true);
        assert_matches!(
            strict.process_file(path),
            Err(FileProcessorError::InvalidExtension { extension: Some(ext) }) if ext == "txt"
        );
    }

    #[test]
    fn test_uppercase_extension_counts_as_drac() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("LOUD.DRAC");
        fs::write(&file_path, "var x;").unwrap();

        let result = FileProcessor::new()
            .with_drac_extension_required(true)
            .process_file(file_path.to_str().unwrap())
            .unwrap();
        assert!(result.metadata.is_drac_file);
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("binary.drac");
        fs::write(&file_path, [b'v', b'a', b'r', 0xff, 0xfe]).unwrap();

        let result = FileProcessor::new().process_file(file_path.to_str().unwrap());
        assert_matches!(
            result,
            Err(FileProcessorError::InvalidEncoding { valid_up_to: 3, .. })
        );
    }

    #[test]
    fn test_compile_time_file_size_limit() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("large.drac");
        fs::write(&file_path, "a".repeat((MAX_FILE_SIZE + 1) as usize)).unwrap();

        let result = FileProcessor::new().process_file(file_path.to_str().unwrap());
        assert_matches!(
            result,
            Err(FileProcessorError::FileTooLarge { size, max_size })
                if size == MAX_FILE_SIZE + 1 && max_size == MAX_FILE_SIZE
        );
    }

    #[test]
    fn test_too_many_lines() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("many_lines.drac");
        fs::write(&file_path, ";\n".repeat(MAX_LINE_COUNT_FOR_ANALYSIS + 1)).unwrap();

        let result = FileProcessor::new().process_file(file_path.to_str().unwrap());
        assert_matches!(
            result,
            Err(FileProcessorError::TooManyLines { max_lines, .. })
                if max_lines == MAX_LINE_COUNT_FOR_ANALYSIS
        );
    }

    #[test]
    fn test_error_methods() {
        let error = FileProcessorError::FileNotFound {
            path: "test.drac".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert_eq!(error.severity(), "Medium");
        assert!(!error.is_recoverable());
        assert!(error.requires_halt());

        let error = FileProcessorError::InvalidExtension { extension: None };
        assert!(error.is_recoverable());
        assert!(!error.requires_halt());
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable(512), "512 B");
        assert_eq!(human_readable(2048), "2.00 KB");
        assert_eq!(human_readable(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_drac_extension: true,
            enable_performance_logging: false,
        };

        let processor = FileProcessor::from_preferences(&prefs);
        assert!(processor.require_drac_extension);
        assert!(!processor.enable_performance_logging);
        assert_eq!(FileProcessor::max_file_size(), MAX_FILE_SIZE);
    }
}
