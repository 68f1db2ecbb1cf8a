// Internal modules
pub mod config;
#[macro_use]
pub mod logging;
pub mod file_processor;
pub mod lexical;
pub mod pipeline;
pub mod syntax;
pub mod tokens;

// Re-export key types for library consumers
pub use lexical::{tokenize, LexicalMetrics, Tokenizer};
pub use pipeline::{analyze_source, AnalysisReport, PipelineError, PipelineOutput, PipelineResult};
pub use syntax::{check_source, recognize, SyntaxError};
pub use tokens::{CategorySet, Position, Token, TokenCategory};
