//! Ordered lexical rule table
//!
//! All rules are joined into a single alternation, one capture group per
//! rule, so the regex engine's leftmost-first preference picks the first
//! rule in table order that matches at the current position. Order is
//! significant: two-character operators precede their prefixes, comment
//! openers precede `(`, `-` and `*`, and the catch-all comes last.

use crate::tokens::{keyword_category, TokenCategory, RESERVED_WORDS};
use regex::Regex;
use std::sync::OnceLock;

/// What a rule's match turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// `(* ... *)`, may span lines
    BlockComment,
    /// `--` up to the end of the line
    LineComment,
    Newline,
    Whitespace,
    /// Identifier shape, resolved against the reserved words
    Word,
    /// Anything no other rule accepts
    Illegal,
    Token(TokenCategory),
}

#[derive(Debug, Clone, Copy)]
pub struct LexRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub kind: RuleKind,
}

const fn rule(name: &'static str, pattern: &'static str, kind: RuleKind) -> LexRule {
    LexRule {
        name,
        pattern,
        kind,
    }
}

const fn symbol(pattern: &'static str, category: TokenCategory) -> LexRule {
    LexRule {
        name: "symbol",
        pattern,
        kind: RuleKind::Token(category),
    }
}

pub const RULES: &[LexRule] = &[
    rule("block_comment", r"\(\*(?s:.)*?\*\)", RuleKind::BlockComment),
    rule("line_comment", r"--[^\n]*", RuleKind::LineComment),
    symbol(r"==", TokenCategory::Equal),
    symbol(r"=", TokenCategory::Assign),
    symbol(r"<=", TokenCategory::LessEqual),
    symbol(r">=", TokenCategory::GreaterEqual),
    symbol(r"<>", TokenCategory::NotEqual),
    symbol(r"<", TokenCategory::Less),
    symbol(r">", TokenCategory::Greater),
    symbol(r"\+", TokenCategory::Plus),
    symbol(r"-", TokenCategory::Minus),
    symbol(r"\*", TokenCategory::Mul),
    symbol(r"/", TokenCategory::Div),
    symbol(r"%", TokenCategory::Mod),
    symbol(r",", TokenCategory::Comma),
    symbol(r";", TokenCategory::Semicolon),
    symbol(r"\(", TokenCategory::OpenParen),
    symbol(r"\)", TokenCategory::CloseParen),
    symbol(r"\[", TokenCategory::OpenBracket),
    symbol(r"\]", TokenCategory::CloseBracket),
    symbol(r"\{", TokenCategory::OpenBrace),
    symbol(r"\}", TokenCategory::CloseBrace),
    rule(
        "char_literal",
        r#"'(?:\\(?:[nrt'"\\]|u[0-9A-Fa-f]{6})|[^\\])'"#,
        RuleKind::Token(TokenCategory::CharLiteral),
    ),
    rule(
        "string_literal",
        r#""(?:[^\\"]|\\.)*""#,
        RuleKind::Token(TokenCategory::StringLiteral),
    ),
    rule("newline", r"\n", RuleKind::Newline),
    rule("whitespace", r"\s", RuleKind::Whitespace),
    rule(
        "int_literal",
        r"[0-9]+",
        RuleKind::Token(TokenCategory::IntLiteral),
    ),
    rule("word", r"[A-Za-z_][A-Za-z0-9_]*", RuleKind::Word),
    rule("other", r".", RuleKind::Illegal),
];

static RULE_REGEX: OnceLock<Regex> = OnceLock::new();

/// The table joined into one alternation; group `i + 1` belongs to `RULES[i]`
pub fn pattern_source() -> String {
    RULES
        .iter()
        .map(|rule| format!("({})", rule.pattern))
        .collect::<Vec<_>>()
        .join("|")
}

/// Compiled rule alternation.
///
/// The table is a fixed set of literals, so a compile failure is a bug in
/// this file and not a runtime condition; [`validate_rule_table`] surfaces it
/// as an error during startup before any tokenizer runs.
pub fn rule_regex() -> &'static Regex {
    RULE_REGEX.get_or_init(|| match Regex::new(&pattern_source()) {
        Ok(regex) => regex,
        Err(e) => panic!("lexical rule table failed to compile: {}", e),
    })
}

/// Startup check of the rule table and the reserved-word table
pub fn validate_rule_table() -> Result<(), String> {
    let regex = Regex::new(&pattern_source())
        .map_err(|e| format!("Lexical rule table does not compile: {}", e))?;

    // Group 0 is the whole match
    if regex.captures_len() != RULES.len() + 1 {
        return Err(format!(
            "Lexical rule table has {} rules but {} capture groups",
            RULES.len(),
            regex.captures_len() - 1
        ));
    }

    match RULES.last() {
        Some(last) if last.kind == RuleKind::Illegal => {}
        _ => return Err("Lexical rule table must end with the catch-all rule".to_string()),
    }

    for word in RESERVED_WORDS {
        match keyword_category(word) {
            Some(category) if category.is_keyword() || category.is_literal() => {}
            _ => return Err(format!("Reserved word '{}' has no keyword category", word)),
        }
    }

    Ok(())
}
