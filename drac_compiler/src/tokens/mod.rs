//! Token system for Drac lexical analysis
//!
//! The tokenizer produces [`Token`] values tagged with a [`TokenCategory`]
//! and a 1-based line/column. The recognizer reads them through a
//! [`TokenStream`], which keeps a single token of lookahead.
//!
//! [`CategorySet`] is a constant bit set over the categories, used for the
//! recognizer's FIRST sets and for "expected one of" diagnostics.

pub mod category;
pub mod token;
pub mod token_stream;

pub use category::{keyword_category, CategorySet, TokenCategory, RESERVED_WORDS};
pub use token::{Position, Token};
pub use token_stream::TokenStream;
