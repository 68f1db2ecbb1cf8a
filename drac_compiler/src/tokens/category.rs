//! Token categories and constant category sets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of token categories shared by the tokenizer and the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TokenCategory {
    // Reserved words
    And,
    Break,
    Dec,
    Do,
    Elif,
    Else,
    False,
    If,
    Inc,
    Not,
    Or,
    Return,
    True,
    Var,
    While,

    // Operators
    Assign,       // =
    Equal,        // ==
    NotEqual,     // <>
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=
    Plus,         // +
    Minus,        // -
    Mul,          // *
    Div,          // /
    Mod,          // %

    // Punctuation
    Comma,
    Semicolon,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,

    // Literals and names
    CharLiteral,
    StringLiteral,
    IntLiteral,
    Identifier,

    IllegalChar,
    Eof,
}

impl TokenCategory {
    /// Every category in declaration order
    pub const ALL: [TokenCategory; 41] = [
        Self::And,
        Self::Break,
        Self::Dec,
        Self::Do,
        Self::Elif,
        Self::Else,
        Self::False,
        Self::If,
        Self::Inc,
        Self::Not,
        Self::Or,
        Self::Return,
        Self::True,
        Self::Var,
        Self::While,
        Self::Assign,
        Self::Equal,
        Self::NotEqual,
        Self::Less,
        Self::LessEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Plus,
        Self::Minus,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Comma,
        Self::Semicolon,
        Self::OpenParen,
        Self::CloseParen,
        Self::OpenBracket,
        Self::CloseBracket,
        Self::OpenBrace,
        Self::CloseBrace,
        Self::CharLiteral,
        Self::StringLiteral,
        Self::IntLiteral,
        Self::Identifier,
        Self::IllegalChar,
        Self::Eof,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Break => "BREAK",
            Self::Dec => "DEC",
            Self::Do => "DO",
            Self::Elif => "ELIF",
            Self::Else => "ELSE",
            Self::False => "FALSE",
            Self::If => "IF",
            Self::Inc => "INC",
            Self::Not => "NOT",
            Self::Or => "OR",
            Self::Return => "RETURN",
            Self::True => "TRUE",
            Self::Var => "VAR",
            Self::While => "WHILE",
            Self::Assign => "ASSIGN",
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQUAL",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Comma => "COMMA",
            Self::Semicolon => "SEMICOLON",
            Self::OpenParen => "OPEN_PAREN",
            Self::CloseParen => "CLOSE_PAREN",
            Self::OpenBracket => "OPEN_BRACKET",
            Self::CloseBracket => "CLOSE_BRACKET",
            Self::OpenBrace => "OPEN_BRACE",
            Self::CloseBrace => "CLOSE_BRACE",
            Self::CharLiteral => "CHAR_LITERAL",
            Self::StringLiteral => "STRING_LITERAL",
            Self::IntLiteral => "INT_LITERAL",
            Self::Identifier => "IDENTIFIER",
            Self::IllegalChar => "ILLEGAL_CHAR",
            Self::Eof => "EOF",
        }
    }

    /// Reserved word, excluding the boolean literals
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::And
                | Self::Break
                | Self::Dec
                | Self::Do
                | Self::Elif
                | Self::Else
                | Self::If
                | Self::Inc
                | Self::Not
                | Self::Or
                | Self::Return
                | Self::Var
                | Self::While
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::True | Self::False | Self::IntLiteral | Self::CharLiteral | Self::StringLiteral
        )
    }

    pub fn is_operator(&self) -> bool {
        (Self::Assign as u8..=Self::Mod as u8).contains(&(*self as u8))
    }

    pub fn is_punctuation(&self) -> bool {
        (Self::Comma as u8..=Self::CloseBrace as u8).contains(&(*self as u8))
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reserved-word lookup applied to every identifier-shaped lexeme
pub fn keyword_category(word: &str) -> Option<TokenCategory> {
    let category = match word {
        "and" => TokenCategory::And,
        "break" => TokenCategory::Break,
        "dec" => TokenCategory::Dec,
        "do" => TokenCategory::Do,
        "elif" => TokenCategory::Elif,
        "else" => TokenCategory::Else,
        "false" => TokenCategory::False,
        "if" => TokenCategory::If,
        "inc" => TokenCategory::Inc,
        "not" => TokenCategory::Not,
        "or" => TokenCategory::Or,
        "return" => TokenCategory::Return,
        "true" => TokenCategory::True,
        "var" => TokenCategory::Var,
        "while" => TokenCategory::While,
        _ => return None,
    };
    Some(category)
}

/// The reserved words in alphabetical order
pub const RESERVED_WORDS: [&str; 15] = [
    "and", "break", "dec", "do", "elif", "else", "false", "if", "inc", "not", "or", "return",
    "true", "var", "while",
];

/// Bit set over [`TokenCategory`], buildable in const context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategorySet(u64);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);

    pub const fn of(categories: &[TokenCategory]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < categories.len() {
            bits |= 1u64 << (categories[i] as u8);
            i += 1;
        }
        Self(bits)
    }

    pub const fn union(self, other: CategorySet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn with(self, category: TokenCategory) -> Self {
        Self(self.0 | 1u64 << (category as u8))
    }

    pub const fn contains(self, category: TokenCategory) -> bool {
        self.0 & (1u64 << (category as u8)) != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in declaration order
    pub fn iter(self) -> impl Iterator<Item = TokenCategory> {
        TokenCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

impl FromIterator<TokenCategory> for CategorySet {
    fn from_iter<T: IntoIterator<Item = TokenCategory>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, category| set.with(category))
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
