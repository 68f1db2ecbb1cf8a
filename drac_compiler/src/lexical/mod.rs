//! Lexical analysis for Drac source text
//!
//! Tokenization is lazy: [`tokenize`] returns an iterator that matches the
//! next lexeme only when asked for the next token.

pub mod analyzer;
pub mod rules;

use crate::config::compile_time::lexical::MAX_REPORTED_ILLEGAL_CHARS;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::Token;

pub use analyzer::{LexicalMetrics, Tokenizer};
pub use rules::{validate_rule_table, LexRule, RuleKind, RULES};

/// Lazily tokenize `source` with default preferences
pub fn tokenize(source: &str) -> Tokenizer<'_> {
    Tokenizer::new(source)
}

pub fn tokenize_with_preferences(source: &str, preferences: LexicalPreferences) -> Tokenizer<'_> {
    Tokenizer::with_preferences(source, preferences)
}

/// Tokenize everything up front, EOF included
pub fn collect_tokens(source: &str) -> Vec<Token> {
    tokenize(source).collect()
}

/// Startup validation of the lexical rule table and its error codes
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    validate_rule_table()?;

    for code in [
        codes::lexical::ILLEGAL_CHARACTER,
        codes::lexical::ILLEGAL_CHARACTER_LIMIT,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Lexical analysis initialized",
        "rules" => RULES.len(),
        "max_reported_illegal_chars" => MAX_REPORTED_ILLEGAL_CHARS
    );

    Ok(())
}
