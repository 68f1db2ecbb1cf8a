//! Syntax analysis - LL(1) recognition of Drac token streams
//!
//! The recognizer builds no tree. It either consumes the whole stream up to
//! and including EOF, or stops at the first token that does not fit the
//! grammar and reports it as a [`SyntaxError`].

mod error;
pub mod first_sets;
mod parser;

pub use error::{Expected, SyntaxError, SyntaxResult};
pub use parser::Parser;

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::lexical;
use crate::logging::codes;
use crate::tokens::Token;
use crate::{log_debug, log_error, log_success};

/// Recognize a token stream, logging the outcome
pub fn recognize<T>(tokens: T) -> SyntaxResult<()>
where
    T: IntoIterator<Item = Token>,
{
    let mut parser = Parser::new(tokens);
    let result = parser.program();
    log_outcome(&result, parser.consumed());
    result
}

/// Tokenize and recognize `source` in one pass
pub fn check_source(source: &str) -> SyntaxResult<()> {
    recognize(lexical::tokenize(source))
}

pub(crate) fn log_outcome(result: &SyntaxResult<()>, consumed: usize) {
    match result {
        Ok(()) => {
            log_success!(
                codes::success::SYNTAX_VALIDATION_PASSED,
                "Syntax analysis completed successfully",
                "tokens" => consumed
            );
        }
        Err(error) => match error {
            SyntaxError::UnexpectedToken { expected, found } => {
                log_error!(error.error_code(), "Syntax analysis failed",
                    position = found.position(),
                    "expected" => expected,
                    "found" => found.category(),
                    "tokens_before_error" => consumed
                );
            }
            SyntaxError::MaxNestingDepth { max_depth, found } => {
                log_error!(error.error_code(), "Maximum nesting depth exceeded",
                    position = found.position(),
                    "max_depth" => max_depth,
                    "tokens_before_error" => consumed
                );
            }
        },
    }
}

/// Validate that syntax error codes are registered (for system startup)
pub fn init_syntax_logging() -> Result<(), String> {
    codes::validate_codes(&[
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::UNEXPECTED_END_OF_INPUT,
        codes::syntax::MAX_NESTING_DEPTH,
    ])?;

    log_debug!("Syntax analysis initialized",
        "statement_first_set" => first_sets::STMT,
        "max_parse_depth" => MAX_PARSE_DEPTH
    );

    Ok(())
}
