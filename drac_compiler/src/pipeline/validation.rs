use crate::logging::codes;

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;
    crate::syntax::init_syntax_logging()?;

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 3,
        "config_source" => crate::config::build_info::source_info()
    );

    Ok(())
}
