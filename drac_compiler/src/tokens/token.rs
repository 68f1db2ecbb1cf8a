//! Position-tagged tokens

use super::category::TokenCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based line and column, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A categorized lexeme and where it starts.
///
/// Only the end-of-input token carries no lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    lexeme: Option<String>,
    category: TokenCategory,
    line: usize,
    column: usize,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, category: TokenCategory, position: Position) -> Self {
        Self {
            lexeme: Some(lexeme.into()),
            category,
            line: position.line,
            column: position.column,
        }
    }

    /// The end-of-input sentinel
    pub fn eof(position: Position) -> Self {
        Self {
            lexeme: None,
            category: TokenCategory::Eof,
            line: position.line,
            column: position.column,
        }
    }

    pub fn lexeme(&self) -> Option<&str> {
        self.lexeme.as_deref()
    }

    /// Lexeme text, empty for the sentinel
    pub fn text(&self) -> &str {
        self.lexeme.as_deref().unwrap_or("")
    }

    pub fn category(&self) -> TokenCategory {
        self.category
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Position of the character right after this token's lexeme
    pub(crate) fn end_position(&self) -> Position {
        Position::new(self.line, self.column + self.text().chars().count())
    }

    pub fn is_eof(&self) -> bool {
        self.category == TokenCategory::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, \"{}\", @({}, {})}}",
            self.category,
            self.text(),
            self.line,
            self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        let token = Token::new("x", TokenCategory::Identifier, Position::new(2, 5));
        assert_eq!(token.to_string(), "{IDENTIFIER, \"x\", @(2, 5)}");

        let eof = Token::eof(Position::new(3, 1));
        assert_eq!(eof.to_string(), "{EOF, \"\", @(3, 1)}");
    }

    #[test]
    fn test_eof_has_no_lexeme() {
        let eof = Token::eof(Position::default());
        assert!(eof.is_eof());
        assert_eq!(eof.lexeme(), None);
        assert_eq!(eof.text(), "");
    }

    #[test]
    fn test_end_position_counts_characters() {
        let token = Token::new("\"ñu\"", TokenCategory::StringLiteral, Position::new(1, 4));
        assert_eq!(token.end_position(), Position::new(1, 8));
    }

    #[test]
    fn test_token_serializes_flat() {
        let token = Token::new("while", TokenCategory::While, Position::new(1, 1));
        let value: serde_json::Value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["category"], "WHILE");
        assert_eq!(value["lexeme"], "while");
        assert_eq!(value["line"], 1);

        let eof = serde_json::to_value(Token::eof(Position::new(1, 6))).unwrap();
        assert!(eof["lexeme"].is_null());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(1, 3).to_string(), "line 1, column 3");
    }
}
