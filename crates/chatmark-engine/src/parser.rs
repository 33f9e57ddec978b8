//! Context-sensitive recursive-descent parser over the token stream.
//!
//! The grammar is tiny but cannot be expressed in the lexer because word
//! classification depends on the live vocabularies: `PEPE` is an emote only
//! if the context says so, and `wide` is a modifier only after a colon that
//! follows an emote. The parser walks the token stream once, dispatching on
//! token kind and consulting the [`ParserContext`] for every word.
//!
//! Malformed markup never fails a parse. Unterminated code and spoiler
//! regions run to end of input, unknown words contribute nothing, and the
//! result is always a root span covering the message.

use chatmark_syntax::{Token, TokenKind, lex};

use crate::ast::{Emote, Nick, Node, Span, SpanKind, Tag};
use crate::context::ParserContext;
use crate::vocab::NickEntry;

/// Spoiler nesting cut-off. Beyond this depth an opening `||` is treated as
/// literal text, keeping stack use bounded on adversarial input.
const MAX_SPOILER_DEPTH: usize = 32;

/// Parse one message against a context snapshot.
///
/// Total and pure: every input produces a span tree, the same input and
/// context always produce the same tree, and nothing is logged or retained.
pub fn parse_message(ctx: &ParserContext, input: &str) -> Span {
    let tokens = lex(input);
    Parser::new(ctx, &tokens).parse_root()
}

struct Parser<'c, 't, 'input> {
    ctx: &'c ParserContext,
    tokens: &'t [Token<'input>],
    pos: usize,
}

impl<'c, 't, 'input> Parser<'c, 't, 'input> {
    fn new(ctx: &'c ParserContext, tokens: &'t [Token<'input>]) -> Self {
        Parser {
            ctx,
            tokens,
            pos: 0,
        }
    }

    fn current(&self) -> TokenKind {
        self.tokens.get(self.pos).map_or(TokenKind::Eof, |t| t.kind)
    }

    fn current_pos(&self) -> usize {
        self.tokens.get(self.pos).map_or(0, |t| t.pos)
    }

    fn current_text(&self) -> &'input str {
        self.tokens.get(self.pos).map_or("", |t| t.text)
    }

    fn nth(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map_or("", |t| t.text)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    /// Advance one token. A no-op once the stream is at `Eof`, so runaway
    /// loops cannot walk past the end.
    fn bump(&mut self) {
        if !self.at(TokenKind::Eof) {
            self.pos += 1;
        }
    }

    fn parse_root(mut self) -> Span {
        let mut span = Span::new(SpanKind::Message, 0);
        self.detect_root_mode(&mut span);
        self.parse_into(&mut span, 0);
        span
    }

    /// Root-only mode markers: `>` switches the root to greentext, `/me`
    /// switches it to an action line. A slash not followed by the word `me`
    /// is left in place and parses as ordinary punctuation.
    fn detect_root_mode(&mut self, span: &mut Span) {
        match self.current() {
            TokenKind::RAngle => {
                span.kind = SpanKind::Greentext;
                self.bump();
            }
            TokenKind::Slash if self.nth(1) == TokenKind::Word && self.nth_text(1) == "me" => {
                self.bump();
                self.bump();
                if self.at(TokenKind::Whitespace) {
                    self.bump();
                }
                span.kind = SpanKind::Me;
                // The marker is not part of the action text.
                span.start = self.current_pos();
            }
            _ => {}
        }
    }

    /// Fill `span` with children until it closes or the input ends. `depth`
    /// counts enclosing spoilers.
    fn parse_into(&mut self, span: &mut Span, depth: usize) {
        loop {
            match self.current() {
                TokenKind::Eof => {
                    span.end = self.current_pos();
                    return;
                }
                TokenKind::SpoilerDelim => {
                    if span.kind == SpanKind::Spoiler {
                        self.bump();
                        span.end = self.current_pos();
                        return;
                    }
                    if depth < MAX_SPOILER_DEPTH {
                        let child = self.parse_spoiler(depth + 1);
                        span.insert(Node::Span(child));
                    } else {
                        self.bump();
                    }
                }
                TokenKind::Backtick => {
                    let child = self.parse_code();
                    span.insert(Node::Span(child));
                }
                TokenKind::At => {
                    if let Some(nick) = self.parse_at_mention() {
                        span.insert(Node::Nick(nick));
                    }
                }
                TokenKind::Word => {
                    if let Some(node) = self.classify_word() {
                        span.insert(node);
                    }
                }
                _ => self.bump(),
            }
        }
    }

    fn parse_spoiler(&mut self, depth: usize) -> Span {
        let mut span = Span::new(SpanKind::Spoiler, self.current_pos());
        self.bump();
        self.parse_into(&mut span, depth);
        span
    }

    /// Everything between backticks is verbatim: no token kind has meaning
    /// until the closing backtick or end of input.
    fn parse_code(&mut self) -> Span {
        let mut span = Span::new(SpanKind::Code, self.current_pos());
        while !self.at(TokenKind::Eof) {
            self.bump();
            if self.at(TokenKind::Backtick) {
                self.bump();
                break;
            }
        }
        span.end = self.current_pos();
        span
    }

    /// Classify the current word against the vocabularies. Tags win over
    /// emotes, emotes over nicknames; an unknown word is consumed silently.
    fn classify_word(&mut self) -> Option<Node> {
        let ctx = self.ctx;
        let text = self.current_text();
        if ctx.tags.contains(text) {
            Some(Node::Tag(self.parse_tag()))
        } else if ctx.emotes.contains(text) {
            Some(Node::Emote(self.parse_emote()))
        } else if let Some(entry) = ctx.nicks.get(text) {
            let start = self.current_pos();
            Some(Node::Nick(self.parse_nick(entry, start)))
        } else {
            self.bump();
            None
        }
    }

    /// The current word is a known emote. Consume it and any chain of
    /// `:modifier` suffixes whose modifier word is in the vocabulary. A
    /// colon whose follower is not a modifier ends the emote; the follower
    /// stays current and is classified on its own.
    fn parse_emote(&mut self) -> Emote {
        let start = self.current_pos();
        let name = self.current_text().to_owned();
        let mut modifiers = Vec::new();
        let end;
        loop {
            self.bump();
            let after = self.current_pos();
            if !self.at(TokenKind::Colon) {
                end = after;
                break;
            }
            self.bump();
            if !self.ctx.emote_modifiers.contains(self.current_text()) {
                end = after;
                break;
            }
            modifiers.push(self.current_text().to_owned());
        }
        Emote {
            name,
            modifiers,
            start,
            end,
        }
    }

    fn parse_tag(&mut self) -> Tag {
        let start = self.current_pos();
        let name = self.current_text().to_owned();
        self.bump();
        Tag {
            name,
            start,
            end: self.current_pos(),
        }
    }

    fn parse_nick(&mut self, entry: &NickEntry, start: usize) -> Nick {
        let nick = entry.name.clone();
        let meta = entry.meta.clone();
        self.bump();
        Nick {
            nick,
            meta,
            start,
            end: self.current_pos(),
        }
    }

    /// `@` plus a registered nickname becomes a mention spanning from the
    /// `@`. Otherwise the `@` and the token after it are both consumed
    /// without producing a node, so `@notauser` does not leak `notauser`
    /// back into word classification. End of input is never consumed.
    fn parse_at_mention(&mut self) -> Option<Nick> {
        let ctx = self.ctx;
        let at_pos = self.current_pos();
        self.bump();
        if let Some(entry) = ctx.nicks.get(self.current_text()) {
            return Some(self.parse_nick(entry, at_pos));
        }
        if !self.at(TokenKind::Eof) {
            self.bump();
        }
        None
    }
}
