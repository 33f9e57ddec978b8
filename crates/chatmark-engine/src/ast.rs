//! Span tree produced by the parser.
//!
//! A parsed message is a [`Span`] of kind [`SpanKind::Message`] (or
//! `Greentext` / `Me` when the message opens with those markers) whose
//! children are typed regions of the input. Offsets are code-point indices
//! into the original message; text between children is untyped and not
//! materialized as nodes, so renderers recover it from the gaps.

use serde::{Deserialize, Serialize};

/// The kind of a [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    /// Root of an ordinary message.
    Message,
    /// A run of plain text. Never produced by the parser (plain text lives
    /// in the gaps between nodes); available to renderers that materialize
    /// those gaps into the tree.
    Text,
    /// Verbatim region delimited by backticks. Always childless.
    Code,
    /// Root of a message starting with `>`.
    Greentext,
    /// Region delimited by `||`.
    Spoiler,
    /// Root of a message starting with `/me `.
    Me,
}

/// A contiguous typed region of the message, possibly containing child nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub kind: SpanKind,
    pub nodes: Vec<Node>,
    /// Code-point offset of the span's first character.
    pub start: usize,
    /// Code-point offset one past the span's last character.
    pub end: usize,
}

impl Span {
    pub fn new(kind: SpanKind, start: usize) -> Self {
        Span {
            kind,
            nodes: Vec::new(),
            start,
            end: start,
        }
    }

    /// Append a child node, merging it into the previous child when both are
    /// spans of the same kind. Merging keeps runs like ```` `a``b` ```` or
    /// `||a||||b||` as one span instead of a chain of adjacent siblings.
    pub fn insert(&mut self, node: Node) {
        if let Node::Span(new) = node {
            if let Some(Node::Span(last)) = self.nodes.last_mut() {
                if last.kind == new.kind {
                    last.nodes.extend(new.nodes);
                    last.end = new.end;
                    return;
                }
            }
            self.nodes.push(Node::Span(new));
        } else {
            self.nodes.push(node);
        }
    }
}

/// An emote, optionally with a chain of modifiers (`PEPE:wide:rustle`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emote {
    pub name: String,
    pub modifiers: Vec<String>,
    pub start: usize,
    pub end: usize,
}

/// A nickname mention, resolved against the nickname dictionary.
///
/// `nick` carries the dictionary's canonical casing, which may differ from
/// what was typed. `meta` is the opaque payload registered alongside the
/// nickname, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nick {
    pub nick: String,
    pub meta: Option<serde_json::Value>,
    pub start: usize,
    pub end: usize,
}

/// A recognized tag word (`nsfw`, `spoiler`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// A node in the span tree: either a nested span or a leaf entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Span(Span),
    Emote(Emote),
    Nick(Nick),
    Tag(Tag),
}

impl Node {
    pub fn start(&self) -> usize {
        match self {
            Node::Span(s) => s.start,
            Node::Emote(e) => e.start,
            Node::Nick(n) => n.start,
            Node::Tag(t) => t.start,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            Node::Span(s) => s.end,
            Node::Emote(e) => e.end,
            Node::Nick(n) => n.end,
            Node::Tag(t) => t.end,
        }
    }
}
