//! Lazy tokenizer over Drac source text

use super::rules::{rule_regex, RuleKind, RULES};
use crate::config::compile_time::lexical::MAX_REPORTED_ILLEGAL_CHARS;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{keyword_category, Position, Token, TokenCategory};
use crate::{log_debug, log_warning};
use regex::CaptureMatches;
use serde::Serialize;
use std::collections::BTreeMap;
use std::iter::FusedIterator;

/// Counters collected while tokenizing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    /// Tokens produced, not counting end-of-input
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub literal_tokens: usize,
    pub operator_tokens: usize,
    pub punctuation_tokens: usize,
    pub illegal_chars: usize,
    pub comment_count: usize,
    /// Lines seen so far, including lines inside block comments
    pub line_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_counts: Option<BTreeMap<TokenCategory, usize>>,
}

impl LexicalMetrics {
    fn record_token(&mut self, category: TokenCategory) {
        self.total_tokens += 1;

        if category.is_literal() {
            self.literal_tokens += 1;
        } else if category.is_keyword() {
            self.keyword_tokens += 1;
        } else if category.is_operator() {
            self.operator_tokens += 1;
        } else if category.is_punctuation() {
            self.punctuation_tokens += 1;
        } else {
            match category {
                TokenCategory::Identifier => self.identifier_tokens += 1,
                TokenCategory::IllegalChar => self.illegal_chars += 1,
                _ => {}
            }
        }

        if let Some(counts) = self.category_counts.as_mut() {
            *counts.entry(category).or_insert(0) += 1;
        }
    }
}

/// Iterator producing tokens on demand, ending with exactly one EOF token.
///
/// Newlines, whitespace and both comment forms are consumed without
/// producing tokens. Characters no rule accepts become `ILLEGAL_CHAR`
/// tokens; tokenizing never fails.
pub struct Tokenizer<'a> {
    source: &'a str,
    matches: CaptureMatches<'static, 'a>,
    line: usize,
    /// Character index where the current line starts
    origin: usize,
    /// Character index of the next unread character
    char_index: usize,
    finished: bool,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_preferences(source, LexicalPreferences::default())
    }

    pub fn with_preferences(source: &'a str, preferences: LexicalPreferences) -> Self {
        let metrics = LexicalMetrics {
            line_count: 1,
            category_counts: preferences.track_category_counts.then(BTreeMap::new),
            ..LexicalMetrics::default()
        };

        Self {
            source,
            matches: rule_regex().captures_iter(source),
            line: 1,
            origin: 0,
            char_index: 0,
            finished: false,
            metrics,
            preferences,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn into_metrics(self) -> LexicalMetrics {
        self.metrics
    }

    fn position_of(&self, char_index: usize) -> Position {
        Position::new(self.line, char_index - self.origin + 1)
    }

    fn start_new_line(&mut self, lines: usize, origin: usize) {
        self.line += lines;
        self.origin = origin;
        self.metrics.line_count = self.line;
    }

    /// Account for line breaks embedded in a lexeme that started at `start`
    fn cross_embedded_lines(&mut self, lexeme: &str, start: usize, width: usize) {
        let newlines = lexeme.chars().filter(|c| *c == '\n').count();
        if let Some(last) = lexeme.chars().rev().position(|c| c == '\n') {
            // `last` counts from the end of the lexeme
            self.start_new_line(newlines, start + width - last);
        }
    }

    fn report_illegal(&self, lexeme: &str, position: Position) {
        if !self.preferences.warn_on_illegal_chars {
            return;
        }

        let seen = self.metrics.illegal_chars;
        if seen <= MAX_REPORTED_ILLEGAL_CHARS {
            log_warning!(code = codes::lexical::ILLEGAL_CHARACTER,
                "Illegal character in source",
                position = position,
                "char" => lexeme.escape_debug()
            );
        } else if seen == MAX_REPORTED_ILLEGAL_CHARS + 1 {
            log_warning!(code = codes::lexical::ILLEGAL_CHARACTER_LIMIT,
                "Further illegal characters will not be reported",
                position = position,
                "limit" => MAX_REPORTED_ILLEGAL_CHARS
            );
        }
    }

    fn finish(&mut self) -> Token {
        self.finished = true;
        let position = self.position_of(self.char_index);

        log_debug!("Tokenization reached end of input",
            "tokens" => self.metrics.total_tokens,
            "lines" => self.metrics.line_count,
            "illegal_chars" => self.metrics.illegal_chars
        );

        Token::eof(position)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        loop {
            let Some(caps) = self.matches.next() else {
                return Some(self.finish());
            };

            // Every rule has its own group and exactly one participates
            let Some((rule_index, matched)) = (1..=RULES.len())
                .find_map(|group| caps.get(group).map(|m| (group - 1, m)))
            else {
                continue;
            };

            let lexeme = matched.as_str();
            let start = self.char_index;
            let width = lexeme.chars().count();
            self.char_index += width;

            let category = match RULES[rule_index].kind {
                RuleKind::Newline => {
                    self.start_new_line(1, start + 1);
                    continue;
                }
                RuleKind::Whitespace => continue,
                RuleKind::LineComment => {
                    self.metrics.comment_count += 1;
                    continue;
                }
                RuleKind::BlockComment => {
                    self.metrics.comment_count += 1;
                    self.cross_embedded_lines(lexeme, start, width);
                    continue;
                }
                RuleKind::Word => keyword_category(lexeme).unwrap_or(TokenCategory::Identifier),
                RuleKind::Illegal => TokenCategory::IllegalChar,
                RuleKind::Token(category) => category,
            };

            let position = self.position_of(start);
            // String and char literals may hold raw line breaks
            self.cross_embedded_lines(lexeme, start, width);
            self.metrics.record_token(category);
            if category == TokenCategory::IllegalChar {
                self.report_illegal(lexeme, position);
            }

            return Some(Token::new(lexeme, category, position));
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(source: &str) -> Vec<TokenCategory> {
        Tokenizer::new(source).map(|t| t.category()).collect()
    }

    #[test]
    fn test_simple_declaration() {
        let tokens: Vec<Token> = Tokenizer::new("var x, y;").collect();
        let summary: Vec<(TokenCategory, &str)> =
            tokens.iter().map(|t| (t.category(), t.text())).collect();

        assert_eq!(
            summary,
            vec![
                (TokenCategory::Var, "var"),
                (TokenCategory::Identifier, "x"),
                (TokenCategory::Comma, ","),
                (TokenCategory::Identifier, "y"),
                (TokenCategory::Semicolon, ";"),
                (TokenCategory::Eof, ""),
            ]
        );
        assert_eq!(tokens[3].position(), Position::new(1, 8));
        assert_eq!(tokens[5].position(), Position::new(1, 10));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            categories("whileLoop"),
            vec![TokenCategory::Identifier, TokenCategory::Eof]
        );
        assert_eq!(
            categories("while Loop"),
            vec![TokenCategory::While, TokenCategory::Identifier, TokenCategory::Eof]
        );
    }

    #[test]
    fn test_trivia_only_input() {
        let tokens: Vec<Token> = Tokenizer::new("  -- note\n(* a\nb *)\n\t\n").collect();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!(tokens[0].line(), 5);
        assert_eq!(tokens[0].column(), 1);
    }

    #[test]
    fn test_empty_input() {
        let tokens: Vec<Token> = Tokenizer::new("").collect();
        assert_eq!(tokens, vec![Token::eof(Position::new(1, 1))]);
    }

    #[test]
    fn test_block_comment_advances_lines_and_resets_columns() {
        let source = "x (* one\ntwo\nthree\nfour *) y";
        let tokens: Vec<Token> = Tokenizer::new(source).collect();

        assert_eq!(tokens[0].position(), Position::new(1, 1));
        assert_eq!(tokens[1].text(), "y");
        assert_eq!(tokens[1].position(), Position::new(4, 9));
        assert_eq!(tokens[2].position(), Position::new(4, 10));
    }

    #[test]
    fn test_unterminated_block_comment_is_not_a_comment() {
        assert_eq!(
            categories("(* x"),
            vec![
                TokenCategory::OpenParen,
                TokenCategory::Mul,
                TokenCategory::Identifier,
                TokenCategory::Eof
            ]
        );
    }

    #[test]
    fn test_columns_count_characters() {
        let tokens: Vec<Token> = Tokenizer::new("\"ñ\" x").collect();
        assert_eq!(tokens[0].category(), TokenCategory::StringLiteral);
        assert_eq!(tokens[1].position(), Position::new(1, 5));
        assert_eq!(tokens[2].position(), Position::new(1, 6));
    }

    #[test]
    fn test_multi_line_string_literal() {
        let tokens: Vec<Token> = Tokenizer::new("f() { x = \"a\nbc\"; }").collect();
        let summary: Vec<(TokenCategory, &str)> =
            tokens.iter().map(|t| (t.category(), t.text())).collect();

        assert_eq!(summary[6], (TokenCategory::StringLiteral, "\"a\nbc\""));
        assert_eq!(tokens[6].position(), Position::new(1, 11));
        // Columns restart after the embedded newline
        assert_eq!(summary[7], (TokenCategory::Semicolon, ";"));
        assert_eq!(tokens[7].position(), Position::new(2, 4));
        assert_eq!(tokens[8].position(), Position::new(2, 6));
        assert_eq!(tokens[9].position(), Position::new(2, 7));
    }

    #[test]
    fn test_raw_newline_char_literal() {
        let tokens: Vec<Token> = Tokenizer::new("'\n' x").collect();
        assert_eq!(tokens[0].category(), TokenCategory::CharLiteral);
        assert_eq!(tokens[1].position(), Position::new(2, 3));
    }

    #[test]
    fn test_eof_after_trailing_newline() {
        let tokens: Vec<Token> = Tokenizer::new("x\n").collect();
        assert_eq!(tokens[1].position(), Position::new(2, 1));
    }

    #[test]
    fn test_illegal_characters_become_tokens() {
        let tokens: Vec<Token> = Tokenizer::new("x $ \\ y").collect();
        let illegal: Vec<&str> = tokens
            .iter()
            .filter(|t| t.category() == TokenCategory::IllegalChar)
            .map(|t| t.text())
            .collect();
        assert_eq!(illegal, vec!["$", "\\"]);
        assert_eq!(tokens[1].position(), Position::new(1, 3));
    }

    #[test]
    fn test_literals_and_escapes() {
        let tokens: Vec<Token> =
            Tokenizer::new(r#"'a' '\n' '\'' '\u00004A' "say \"hi\"\n" 007"#).collect();
        let summary: Vec<(TokenCategory, &str)> =
            tokens.iter().map(|t| (t.category(), t.text())).collect();

        assert_eq!(
            summary,
            vec![
                (TokenCategory::CharLiteral, "'a'"),
                (TokenCategory::CharLiteral, r"'\n'"),
                (TokenCategory::CharLiteral, r"'\''"),
                (TokenCategory::CharLiteral, r"'\u00004A'"),
                (TokenCategory::StringLiteral, r#""say \"hi\"\n""#),
                (TokenCategory::IntLiteral, "007"),
                (TokenCategory::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            categories("== = <= >= <> < > + - * / %"),
            vec![
                TokenCategory::Equal,
                TokenCategory::Assign,
                TokenCategory::LessEqual,
                TokenCategory::GreaterEqual,
                TokenCategory::NotEqual,
                TokenCategory::Less,
                TokenCategory::Greater,
                TokenCategory::Plus,
                TokenCategory::Minus,
                TokenCategory::Mul,
                TokenCategory::Div,
                TokenCategory::Mod,
                TokenCategory::Eof,
            ]
        );
    }

    #[test]
    fn test_is_fused_after_eof() {
        let mut tokenizer = Tokenizer::new("x");
        assert!(tokenizer.next().is_some());
        assert!(tokenizer.next().unwrap().is_eof());
        assert!(tokenizer.next().is_none());
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_metrics() {
        let preferences = LexicalPreferences {
            warn_on_illegal_chars: false,
            track_category_counts: true,
        };
        let mut tokenizer =
            Tokenizer::with_preferences("var x; -- c\nf(){ x = 1 + true; } $", preferences);
        tokenizer.by_ref().for_each(drop);
        let metrics = tokenizer.into_metrics();

        assert_eq!(metrics.total_tokens, 15);
        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 3);
        assert_eq!(metrics.literal_tokens, 2);
        assert_eq!(metrics.operator_tokens, 2);
        assert_eq!(metrics.punctuation_tokens, 6);
        assert_eq!(metrics.illegal_chars, 1);
        assert_eq!(metrics.comment_count, 1);
        assert_eq!(metrics.line_count, 2);

        let counts = metrics.category_counts.unwrap();
        assert_eq!(counts[&TokenCategory::Identifier], 3);
        assert_eq!(counts.get(&TokenCategory::Eof), None);
    }

    #[test]
    fn test_spans_reconstruct_input() {
        let source = "f(a) { (* c\n *) return a <> 'x'; } -- end";
        let joined: String = rule_regex()
            .find_iter(source)
            .map(|m| m.as_str())
            .collect();
        assert_eq!(joined, source);
    }
}
