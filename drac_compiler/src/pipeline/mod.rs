//! File -> tokens -> recognition pipeline

mod error;
mod result;
mod validation;

pub use error::PipelineError;
pub use result::{AnalysisReport, ErrorReport, PipelineOutput, PipelineResult};
pub use validation::validate_pipeline;

use crate::config::runtime::{FileProcessorPreferences, LexicalPreferences};
use crate::file_processor::FileProcessor;
use crate::lexical;
use crate::logging;
use crate::syntax::{self, Parser, SyntaxError};
use crate::tokens::Token;
use std::path::PathBuf;
use std::time::Instant;

/// Tokenize and recognize `source` in a single lazy pass
pub fn analyze_source(source: &str) -> Result<AnalysisReport, SyntaxError> {
    analyze_source_with_preferences(source, LexicalPreferences::default())
}

pub fn analyze_source_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<AnalysisReport, SyntaxError> {
    let start_time = Instant::now();

    let mut parser = Parser::new(lexical::tokenize_with_preferences(source, preferences));
    let outcome = parser.program();
    syntax::log_outcome(&outcome, parser.consumed());
    outcome?;

    let token_count = parser.consumed();
    let lexical_metrics = parser.into_inner().into_metrics();

    Ok(AnalysisReport {
        lexical_metrics,
        token_count,
        duration: start_time.elapsed(),
    })
}

/// Process a single file through the pipeline (file -> tokens -> recognition)
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_preferences(
        file_path,
        &FileProcessorPreferences::default(),
        LexicalPreferences::default(),
    )
}

pub fn process_file_with_preferences(
    file_path: &str,
    file_preferences: &FileProcessorPreferences,
    lexical_preferences: LexicalPreferences,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting Drac syntax check pipeline", "file" => file_path);

        let file_result = FileProcessor::from_preferences(file_preferences).process_file(file_path)?;
        let analysis = analyze_source_with_preferences(&file_result.source, lexical_preferences)?;

        let result = PipelineResult::new(file_result.metadata, analysis, start_time.elapsed());
        result.log_success(file_path);

        Ok(result)
    })
}

/// Read a file and return its complete token sequence, EOF included
pub fn dump_tokens(file_path: &str) -> Result<Vec<Token>, PipelineError> {
    logging::with_file_context(PathBuf::from(file_path), 0, || {
        let file_result = crate::file_processor::process_file(file_path)?;
        let tokens = lexical::collect_tokens(&file_result.source);

        crate::log_success!(
            logging::codes::success::TOKENIZATION_COMPLETE,
            "Token dump completed",
            "file" => file_path,
            "tokens" => tokens.len()
        );

        Ok(tokens)
    })
}
