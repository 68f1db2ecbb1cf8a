use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use crate::syntax::SyntaxError;

/// Pipeline processing errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(error) => error.error_code(),
            Self::SyntaxAnalysis(error) => error.error_code(),
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// The syntax error, when the source was read but rejected
    pub fn as_syntax_error(&self) -> Option<&SyntaxError> {
        match self {
            Self::SyntaxAnalysis(error) => Some(error),
            _ => None,
        }
    }
}
