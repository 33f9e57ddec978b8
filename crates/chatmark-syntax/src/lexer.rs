//! # Lexer - Tokenizing Chat Messages
//!
//! This module is the first stage of the message pipeline: breaking a raw
//! chat message into tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every code point of the input appears in exactly one token. Nothing is
//! skipped or discarded, which is what lets the parser hand out span offsets
//! that renderers can trust:
//!
//! ```
//! use chatmark_syntax::lex;
//!
//! let input = "PEPE:wide ||secret||";
//! let tokens = lex(input);
//!
//! // Concatenating all token texts gives back the original
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Code-Point Offsets
//!
//! Token positions are code-point indices, not byte indices. Chat messages
//! arrive over the wire in whatever encoding the transport uses, and clients
//! count characters, not UTF-8 bytes, so every offset the pipeline reports
//! must be a valid cut point independent of encoding.
//!
//! ## Token Design
//!
//! Tokens are minimal and context-free. The lexer does not know whether a
//! word is an emote, a nickname, or plain text - that classification needs
//! the live vocabularies and is the parser's job. Characters with syntactic
//! meaning get their own token kinds:
//!
//! - `||` → `SpoilerDelim` (greedy; a lone `|` is ordinary punctuation)
//! - `` ` `` → `Backtick` (code spans)
//! - `:` → `Colon` (emote modifier chains)
//! - `>` → `RAngle` (greentext marker)
//! - `@` → `At` (mentions)
//! - `/` → `Slash` (the `/me` command)
//! - `\` + any code point → `Escaped` (neutralizes the next character)
//!
//! Everything else is split by a Unicode "non-word" set: the union of the
//! Dash, Hyphen, Other_Math, Pattern_Syntax, Pattern_White_Space,
//! Quotation_Mark, Sentence_Terminal, Terminal_Punctuation and White_Space
//! properties. Code points in the set become single-character `Punct` tokens
//! (never merged into runs); whitespace groups into one `Whitespace` token
//! per run; anything left over groups into maximal `Word` runs. This keeps
//! word tokens script-agnostic: CJK text, emoji and combining sequences all
//! lex as words.

use logos::Logos;

/// Raw token rules for the Logos derive.
///
/// This enum exists separately from [`TokenKind`] because Logos needs to
/// derive on it and every variant must carry a pattern; `TokenKind` also has
/// an `Eof` variant that the lexer driver appends by hand.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    /// `||`, opening or closing a spoiler. Matched greedily, so a lone `|`
    /// falls through to the punctuation rule below.
    #[token("||")]
    SpoilerDelim,

    /// Single backtick, opening or closing a code span.
    #[token("`")]
    Backtick,

    /// `:` for emote modifier chains.
    #[token(":")]
    Colon,

    /// `>` for greentext.
    #[token(">")]
    RAngle,

    /// `@` for mentions.
    #[token("@")]
    At,

    /// `/` for the `/me` command.
    #[token("/")]
    Slash,

    /// Backslash plus the code point it escapes, as one token.
    #[regex(r"\\[\s\S]")]
    Escaped,

    /// Horizontal and vertical whitespace, one token per maximal run.
    #[regex(r"\s+")]
    Whitespace,

    /// A single non-word code point. Priority sits below the rules above so
    /// the dedicated kinds and whitespace runs win on their characters.
    #[regex(
        r"[\p{Dash}\p{Hyphen}\p{Other_Math}\p{Pattern_Syntax}\p{Pattern_White_Space}\p{Quotation_Mark}\p{Sentence_Terminal}\p{Terminal_Punctuation}\p{White_Space}]",
        priority = 1
    )]
    Punct,

    /// A maximal run of word code points: anything not whitespace and not in
    /// the non-word set.
    #[regex(
        r"[^\p{Dash}\p{Hyphen}\p{Other_Math}\p{Pattern_Syntax}\p{Pattern_White_Space}\p{Quotation_Mark}\p{Sentence_Terminal}\p{Terminal_Punctuation}\p{White_Space}]+"
    )]
    Word,
}

impl RawToken {
    fn to_token_kind(self) -> TokenKind {
        match self {
            RawToken::SpoilerDelim => TokenKind::SpoilerDelim,
            RawToken::Backtick => TokenKind::Backtick,
            RawToken::Colon => TokenKind::Colon,
            RawToken::RAngle => TokenKind::RAngle,
            RawToken::At => TokenKind::At,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Escaped => TokenKind::Escaped,
            RawToken::Whitespace => TokenKind::Whitespace,
            RawToken::Punct => TokenKind::Punct,
            RawToken::Word => TokenKind::Word,
        }
    }
}

/// Token kinds seen by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    SpoilerDelim,
    Backtick,
    Colon,
    RAngle,
    At,
    Slash,
    Escaped,
    Whitespace,
    Punct,
    Word,
    /// End of input. Exactly one per token stream, with `pos` equal to the
    /// code-point length of the input and empty text.
    Eof,
}

/// A lexed token: kind, code-point offset, and text slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Code-point offset of the token's first character in the input.
    pub pos: usize,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens ending in exactly one `Eof`.
///
/// Pure function of the input: two calls on the same string produce the same
/// stream, and the non-`Eof` token texts concatenate back to the input with
/// no gaps or overlaps.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(input);
    let mut pos = 0usize;

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(raw) => raw.to_token_kind(),
            // The word rule is the complement of the other classes, so every
            // code point matches some rule; treat a lexer error as text.
            Err(()) => TokenKind::Word,
        };
        tokens.push(Token { kind, pos, text });
        pos += text.chars().count();
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        pos,
        text: "",
    });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: TokenKind, pos: usize, text: &str) -> Token<'_> {
        Token { kind, pos, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![token(TokenKind::Eof, 0, "")]);
    }

    #[test]
    fn lex_plain_word() {
        assert_eq!(
            lex("hello"),
            vec![
                token(TokenKind::Word, 0, "hello"),
                token(TokenKind::Eof, 5, ""),
            ]
        );
    }

    #[test]
    fn lex_special_characters() {
        assert_eq!(
            lex("`:>@/"),
            vec![
                token(TokenKind::Backtick, 0, "`"),
                token(TokenKind::Colon, 1, ":"),
                token(TokenKind::RAngle, 2, ">"),
                token(TokenKind::At, 3, "@"),
                token(TokenKind::Slash, 4, "/"),
                token(TokenKind::Eof, 5, ""),
            ]
        );
    }

    #[test]
    fn lex_spoiler_delim_is_greedy() {
        assert_eq!(
            lex("||"),
            vec![
                token(TokenKind::SpoilerDelim, 0, "||"),
                token(TokenKind::Eof, 2, ""),
            ]
        );
        assert_eq!(
            lex("|||"),
            vec![
                token(TokenKind::SpoilerDelim, 0, "||"),
                token(TokenKind::Punct, 2, "|"),
                token(TokenKind::Eof, 3, ""),
            ]
        );
    }

    #[test]
    fn lex_lone_pipe_is_punctuation() {
        assert_eq!(
            lex("|"),
            vec![
                token(TokenKind::Punct, 0, "|"),
                token(TokenKind::Eof, 1, ""),
            ]
        );
    }

    #[test]
    fn lex_whitespace_run_is_one_token() {
        assert_eq!(
            lex("a \t\n b"),
            vec![
                token(TokenKind::Word, 0, "a"),
                token(TokenKind::Whitespace, 1, " \t\n "),
                token(TokenKind::Word, 5, "b"),
                token(TokenKind::Eof, 6, ""),
            ]
        );
    }

    #[test]
    fn lex_punctuation_is_not_merged_into_runs() {
        assert_eq!(
            lex("a--b"),
            vec![
                token(TokenKind::Word, 0, "a"),
                token(TokenKind::Punct, 1, "-"),
                token(TokenKind::Punct, 2, "-"),
                token(TokenKind::Word, 3, "b"),
                token(TokenKind::Eof, 4, ""),
            ]
        );
    }

    #[test]
    fn lex_sentence_punctuation_splits_words() {
        assert_eq!(
            lex("why even test this case?"),
            vec![
                token(TokenKind::Word, 0, "why"),
                token(TokenKind::Whitespace, 3, " "),
                token(TokenKind::Word, 4, "even"),
                token(TokenKind::Whitespace, 8, " "),
                token(TokenKind::Word, 9, "test"),
                token(TokenKind::Whitespace, 13, " "),
                token(TokenKind::Word, 14, "this"),
                token(TokenKind::Whitespace, 18, " "),
                token(TokenKind::Word, 19, "case"),
                token(TokenKind::Punct, 23, "?"),
                token(TokenKind::Eof, 24, ""),
            ]
        );
    }

    #[test]
    fn lex_quotation_marks_are_punctuation() {
        assert_eq!(
            lex("\"hi\""),
            vec![
                token(TokenKind::Punct, 0, "\""),
                token(TokenKind::Word, 1, "hi"),
                token(TokenKind::Punct, 3, "\""),
                token(TokenKind::Eof, 4, ""),
            ]
        );
    }

    #[test]
    fn lex_word_with_trailing_digits_is_one_word() {
        assert_eq!(
            lex("PEPE0"),
            vec![
                token(TokenKind::Word, 0, "PEPE0"),
                token(TokenKind::Eof, 5, ""),
            ]
        );
    }

    #[test]
    fn lex_cjk_as_word_run() {
        assert_eq!(
            lex("日本語のテキスト"),
            vec![
                token(TokenKind::Word, 0, "日本語のテキスト"),
                token(TokenKind::Eof, 8, ""),
            ]
        );
    }

    #[test]
    fn lex_emoji_as_word_run() {
        assert_eq!(
            lex("🙈🙉🙊"),
            vec![
                token(TokenKind::Word, 0, "🙈🙉🙊"),
                token(TokenKind::Eof, 3, ""),
            ]
        );
    }

    #[test]
    fn lex_offsets_are_code_points_not_bytes() {
        assert_eq!(
            lex("日 `x`"),
            vec![
                token(TokenKind::Word, 0, "日"),
                token(TokenKind::Whitespace, 1, " "),
                token(TokenKind::Backtick, 2, "`"),
                token(TokenKind::Word, 3, "x"),
                token(TokenKind::Backtick, 4, "`"),
                token(TokenKind::Eof, 5, ""),
            ]
        );
    }

    #[test]
    fn lex_escaped_backtick() {
        assert_eq!(
            lex("\\`x"),
            vec![
                token(TokenKind::Escaped, 0, "\\`"),
                token(TokenKind::Word, 2, "x"),
                token(TokenKind::Eof, 3, ""),
            ]
        );
    }

    #[test]
    fn lex_escaped_pipe_breaks_spoiler_delim() {
        assert_eq!(
            lex("\\||"),
            vec![
                token(TokenKind::Escaped, 0, "\\|"),
                token(TokenKind::Punct, 2, "|"),
                token(TokenKind::Eof, 3, ""),
            ]
        );
    }

    #[test]
    fn lex_trailing_backslash_is_punctuation() {
        assert_eq!(
            lex("\\"),
            vec![
                token(TokenKind::Punct, 0, "\\"),
                token(TokenKind::Eof, 1, ""),
            ]
        );
    }

    #[test]
    fn lex_emote_modifier_chain() {
        assert_eq!(
            lex("PEPE:wide"),
            vec![
                token(TokenKind::Word, 0, "PEPE"),
                token(TokenKind::Colon, 4, ":"),
                token(TokenKind::Word, 5, "wide"),
                token(TokenKind::Eof, 9, ""),
            ]
        );
    }

    #[test]
    fn all_code_points_preserved() {
        let input = "text >green ||sp|| `co\\`de` @name 日本語 🙈 a—b";
        let tokens = lex(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn positions_tile_the_input() {
        let input = "haha PEPE:wide test ||x|| `y` @z…";
        let tokens = lex(input);
        let mut expected_pos = 0;
        for t in &tokens {
            assert_eq!(t.pos, expected_pos);
            expected_pos += t.text.chars().count();
        }
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(tokens.last().unwrap().pos, input.chars().count());
    }

    #[test]
    fn lexing_is_restartable() {
        let input = "PEPE ||`x`|| @abeous";
        assert_eq!(lex(input), lex(input));
    }
}
