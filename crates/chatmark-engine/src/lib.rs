//! Markup engine for live chat messages.
//!
//! Chat markup is context-sensitive: whether a word renders as an emote, a
//! nickname, or plain text depends on dictionaries that change while the
//! service runs. This crate parses one message at a time against an
//! immutable [`ParserContext`] snapshot and produces a [`Span`] tree of
//! typed regions addressed by code-point offsets into the original text.
//!
//! ```
//! use chatmark_engine::{ContextValues, Node, ParserContext, parse_message};
//!
//! let ctx = ParserContext::new(ContextValues {
//!     emotes: vec!["PEPE".into()],
//!     emote_modifiers: vec!["wide".into()],
//!     nicks: vec!["abeous".into()],
//!     tags: vec!["nsfw".into()],
//! });
//!
//! let tree = parse_message(&ctx, "hi @abeous ||PEPE:wide||");
//! assert_eq!(tree.nodes.len(), 2);
//! assert!(matches!(tree.nodes[0], Node::Nick(_)));
//! assert!(matches!(tree.nodes[1], Node::Span(_)));
//! ```
//!
//! Services that update dictionaries while messages are in flight wrap the
//! context in a [`SharedContext`] and swap whole snapshots; see the
//! [`context`] module.

pub mod ast;
pub mod context;
pub mod parser;
pub mod vocab;

pub use ast::{Emote, Nick, Node, Span, SpanKind, Tag};
pub use context::{ContextValues, ParserContext, SharedContext};
pub use parser::parse_message;
pub use vocab::{NickEntry, NickIndex, TermIndex};
