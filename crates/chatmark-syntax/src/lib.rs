//! Lossless tokenizer for chat message markup.
//!
//! This crate turns a raw chat message into a flat token stream that the
//! engine crate's parser consumes. See [`lexer`] for the token design and
//! the lossless guarantee.

pub mod lexer;

pub use lexer::{Token, TokenKind, lex};
