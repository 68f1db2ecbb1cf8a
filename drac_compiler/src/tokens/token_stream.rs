//! One-token-lookahead cursor over a token iterator

use super::token::{Position, Token};
use crate::log_debug;

/// Forward-only cursor holding exactly one lookahead token.
///
/// The underlying iterator is pulled lazily, one token per `advance`.
/// When it runs dry without producing an end-of-input token, the cursor
/// synthesizes one right after the last token it saw; once the cursor
/// sits on end-of-input it stays there.
#[derive(Debug)]
pub struct TokenStream<I> {
    source: I,
    current: Token,
    consumed: usize,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = Token>,
{
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        let mut source = tokens.into_iter();
        let current = source
            .next()
            .unwrap_or_else(|| Token::eof(Position::default()));
        Self {
            source,
            current,
            consumed: 0,
        }
    }

    /// The lookahead token
    pub fn current(&self) -> &Token {
        &self.current
    }

    pub fn category(&self) -> super::TokenCategory {
        self.current.category()
    }

    /// Move past the lookahead and return it
    pub fn advance(&mut self) -> Token {
        if self.current.is_eof() {
            return self.current.clone();
        }

        let next = match self.source.next() {
            Some(token) => token,
            None => {
                let position = self.current.end_position();
                log_debug!("Token source ended without EOF, synthesizing one",
                    "line" => position.line,
                    "column" => position.column
                );
                Token::eof(position)
            }
        };

        self.consumed += 1;
        std::mem::replace(&mut self.current, next)
    }

    /// Number of tokens moved past so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Hand back the underlying iterator
    pub fn into_inner(self) -> I {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenCategory;

    fn token(text: &str, category: TokenCategory, column: usize) -> Token {
        Token::new(text, category, Position::new(1, column))
    }

    #[test]
    fn test_advance_returns_previous_lookahead() {
        let tokens = vec![
            token("x", TokenCategory::Identifier, 1),
            token(";", TokenCategory::Semicolon, 2),
            Token::eof(Position::new(1, 3)),
        ];
        let mut stream = TokenStream::new(tokens);

        assert_eq!(stream.category(), TokenCategory::Identifier);
        assert_eq!(stream.advance().text(), "x");
        assert_eq!(stream.category(), TokenCategory::Semicolon);
        stream.advance();
        assert!(stream.current().is_eof());
        assert_eq!(stream.consumed(), 2);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut stream = TokenStream::new(vec![Token::eof(Position::new(4, 2))]);
        assert!(stream.advance().is_eof());
        assert!(stream.advance().is_eof());
        assert_eq!(stream.consumed(), 0);
        assert_eq!(stream.current().position(), Position::new(4, 2));
    }

    #[test]
    fn test_missing_eof_is_synthesized() {
        let mut stream = TokenStream::new(vec![token("abc", TokenCategory::Identifier, 5)]);
        stream.advance();
        assert!(stream.current().is_eof());
        assert_eq!(stream.current().position(), Position::new(1, 8));
    }

    #[test]
    fn test_empty_source_starts_at_eof() {
        let stream = TokenStream::new(Vec::<Token>::new());
        assert!(stream.current().is_eof());
        assert_eq!(stream.current().position(), Position::new(1, 1));
    }
}
