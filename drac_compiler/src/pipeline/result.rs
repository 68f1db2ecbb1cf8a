use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::logging::codes;
use crate::syntax::{Expected, SyntaxError};
use crate::tokens::{Position, TokenCategory};
use serde::Serialize;
use std::time::Duration;

/// Outcome of recognizing one accepted source text
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub lexical_metrics: LexicalMetrics,
    /// Tokens consumed, not counting EOF
    pub token_count: usize,
    pub duration: Duration,
}

/// Complete pipeline result for one file
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub file_metadata: FileMetadata,
    pub analysis: AnalysisReport,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        file_metadata: FileMetadata,
        analysis: AnalysisReport,
        processing_duration: Duration,
    ) -> Self {
        Self {
            file_metadata,
            analysis,
            processing_duration,
        }
    }

    pub fn token_count(&self) -> usize {
        self.analysis.token_count
    }

    pub fn log_success(&self, file_path: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        let tokens_per_sec = if seconds > 0.0 {
            self.analysis.token_count as f64 / seconds
        } else {
            0.0
        };

        crate::log_performance!(
            codes::success::PIPELINE_COMPLETE,
            "Drac syntax check pipeline succeeded",
            duration = self.processing_duration,
            "file" => file_path,
            "tokens" => self.analysis.token_count,
            "lines" => self.analysis.lexical_metrics.line_count,
            "tokens_per_sec" => format!("{:.0}", tokens_per_sec)
        );
    }
}

/// Serializable summary of a syntax error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub expected: Vec<TokenCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<TokenCategory>,
}

impl ErrorReport {
    pub fn from_syntax_error(error: &SyntaxError) -> Self {
        let expected = match error.expected() {
            Some(Expected::Category(category)) => vec![category],
            Some(Expected::OneOf(set)) => set.iter().collect(),
            None => Vec::new(),
        };

        Self {
            code: error.error_code().as_str(),
            message: error.to_string(),
            position: Some(error.position()),
            expected,
            found: Some(error.found().category()),
        }
    }

    pub fn from_pipeline_error(error: &super::PipelineError) -> Self {
        match error.as_syntax_error() {
            Some(syntax_error) => Self::from_syntax_error(syntax_error),
            None => Self {
                code: error.error_code().as_str(),
                message: error.to_string(),
                position: None,
                expected: Vec::new(),
                found: None,
            },
        }
    }
}

/// JSON-facing pipeline output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub file: String,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexical_metrics: Option<LexicalMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
    pub duration_ms: f64,
}

impl PipelineOutput {
    pub fn from_result(file: &str, result: &Result<PipelineResult, super::PipelineError>) -> Self {
        match result {
            Ok(result) => Self {
                file: file.to_string(),
                accepted: true,
                token_count: Some(result.analysis.token_count),
                lexical_metrics: Some(result.analysis.lexical_metrics.clone()),
                error: None,
                duration_ms: result.processing_duration.as_secs_f64() * 1000.0,
            },
            Err(error) => Self {
                file: file.to_string(),
                accepted: false,
                token_count: None,
                lexical_metrics: None,
                error: Some(ErrorReport::from_pipeline_error(error)),
                duration_ms: 0.0,
            },
        }
    }
}
