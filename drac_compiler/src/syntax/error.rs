//! Syntax errors raised by the recognizer

use crate::logging::{codes, Code};
use crate::tokens::{CategorySet, Position, Token, TokenCategory};
use std::fmt;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// What the recognizer would have accepted at the failure point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Category(TokenCategory),
    OneOf(CategorySet),
}

impl Expected {
    pub fn contains(&self, category: TokenCategory) -> bool {
        match self {
            Self::Category(expected) => *expected == category,
            Self::OneOf(set) => set.contains(category),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => write!(f, "{}", category),
            Self::OneOf(set) => write!(f, "one of {}", set),
        }
    }
}

/// Why recognition stopped.
///
/// Recognition stops at the first problem; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// The first token that does not fit the grammar
    #[error("Expecting {expected} but found {}", describe_found(.found))]
    UnexpectedToken { expected: Expected, found: Token },

    /// Blocks or parenthesized expressions nested past the configured limit
    #[error("Maximum nesting depth of {max_depth} exceeded by {}", describe_found(.found))]
    MaxNestingDepth { max_depth: usize, found: Token },
}

fn describe_found(token: &Token) -> String {
    format!(
        "{}, \"{}\" at {}.",
        token.category(),
        token.text(),
        token.position()
    )
}

impl SyntaxError {
    pub fn expected_category(category: TokenCategory, found: Token) -> Self {
        Self::UnexpectedToken {
            expected: Expected::Category(category),
            found,
        }
    }

    pub fn expected_one_of(set: CategorySet, found: Token) -> Self {
        Self::UnexpectedToken {
            expected: Expected::OneOf(set),
            found,
        }
    }

    pub fn max_nesting_depth(max_depth: usize, found: Token) -> Self {
        Self::MaxNestingDepth { max_depth, found }
    }

    /// What would have been accepted; `None` when the nesting limit stopped recognition
    pub fn expected(&self) -> Option<Expected> {
        match self {
            Self::UnexpectedToken { expected, .. } => Some(*expected),
            Self::MaxNestingDepth { .. } => None,
        }
    }

    /// The offending token
    pub fn found(&self) -> &Token {
        match self {
            Self::UnexpectedToken { found, .. } | Self::MaxNestingDepth { found, .. } => found,
        }
    }

    pub fn position(&self) -> Position {
        self.found().position()
    }

    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::UnexpectedToken { found, .. } if found.is_eof())
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::MaxNestingDepth { .. } => codes::syntax::MAX_NESTING_DEPTH,
            _ if self.is_end_of_input() => codes::syntax::UNEXPECTED_END_OF_INPUT,
            _ => codes::syntax::UNEXPECTED_TOKEN,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category_message() {
        let found = Token::new("{", TokenCategory::OpenBrace, Position::new(1, 3));
        let error = SyntaxError::expected_category(TokenCategory::CloseParen, found);

        assert_eq!(
            error.to_string(),
            "Expecting CLOSE_PAREN but found OPEN_BRACE, \"{\" at line 1, column 3."
        );
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_TOKEN);
        assert_eq!(error.position(), Position::new(1, 3));
    }

    #[test]
    fn test_set_message() {
        let found = Token::new(";", TokenCategory::Semicolon, Position::new(2, 1));
        let set = CategorySet::of(&[TokenCategory::Identifier, TokenCategory::Var]);
        let error = SyntaxError::expected_one_of(set, found);

        assert_eq!(
            error.to_string(),
            "Expecting one of {VAR, IDENTIFIER} but found SEMICOLON, \";\" at line 2, column 1."
        );
        let expected = error.expected().unwrap();
        assert!(expected.contains(TokenCategory::Var));
        assert!(!expected.contains(TokenCategory::Semicolon));
    }

    #[test]
    fn test_end_of_input_code() {
        let error = SyntaxError::expected_category(
            TokenCategory::CloseBrace,
            Token::eof(Position::new(4, 1)),
        );

        assert!(error.is_end_of_input());
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_END_OF_INPUT);
        assert!(error.requires_halt());
        assert_eq!(error.severity(), codes::Severity::High);
        assert!(error.to_string().ends_with("found EOF, \"\" at line 4, column 1."));
    }

    #[test]
    fn test_nesting_depth_error() {
        let found = Token::new("(", TokenCategory::OpenParen, Position::new(1, 12));
        let error = SyntaxError::max_nesting_depth(3, found);

        assert_eq!(
            error.to_string(),
            "Maximum nesting depth of 3 exceeded by OPEN_PAREN, \"(\" at line 1, column 12."
        );
        assert_eq!(error.expected(), None);
        assert!(!error.is_end_of_input());
        assert_eq!(error.error_code(), codes::syntax::MAX_NESTING_DEPTH);
        assert!(error.requires_halt());
        assert_eq!(error.position(), Position::new(1, 12));
    }
}
