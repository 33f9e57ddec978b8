//! Parser context: the immutable dictionary snapshot a parse runs against.
//!
//! A [`ParserContext`] bundles the four vocabularies and never changes after
//! construction, so any number of concurrent parses can share one through an
//! `Arc` with no locking on the lookup path. Live services that need to
//! update vocabularies while messages are in flight wrap the context in a
//! [`SharedContext`] and swap whole snapshots; in-flight parses keep the
//! snapshot they started with.

use std::sync::{Arc, PoisonError, RwLock};

use crate::vocab::{NickIndex, TermIndex};

/// Plain input for building a [`ParserContext`]. Order is irrelevant and
/// duplicates collapse.
#[derive(Debug, Clone, Default)]
pub struct ContextValues {
    pub emotes: Vec<String>,
    pub emote_modifiers: Vec<String>,
    pub nicks: Vec<String>,
    pub tags: Vec<String>,
}

/// Immutable dictionary snapshot: emotes, emote modifiers, nicknames, tags.
#[derive(Debug, Clone, Default)]
pub struct ParserContext {
    pub emotes: TermIndex,
    pub emote_modifiers: TermIndex,
    pub nicks: NickIndex,
    pub tags: TermIndex,
}

impl ParserContext {
    pub fn new(values: ContextValues) -> Self {
        ParserContext {
            emotes: TermIndex::new(values.emotes),
            emote_modifiers: TermIndex::new(values.emote_modifiers),
            nicks: NickIndex::new(values.nicks),
            tags: TermIndex::new(values.tags),
        }
    }

    /// Build directly from prepared indexes, for callers that populate
    /// nickname metadata via [`NickIndex::insert_with_meta`].
    pub fn from_indexes(
        emotes: TermIndex,
        emote_modifiers: TermIndex,
        nicks: NickIndex,
        tags: TermIndex,
    ) -> Self {
        ParserContext {
            emotes,
            emote_modifiers,
            nicks,
            tags,
        }
    }
}

/// Clonable handle to the current context snapshot.
///
/// `load` hands out an `Arc` to the snapshot in force at that moment;
/// `replace` swaps in a new snapshot for subsequent loads. The lock is held
/// only for the pointer copy, never across a parse, so an updater cannot
/// stall message processing.
#[derive(Debug, Clone, Default)]
pub struct SharedContext {
    inner: Arc<RwLock<Arc<ParserContext>>>,
}

impl SharedContext {
    pub fn new(ctx: ParserContext) -> Self {
        SharedContext {
            inner: Arc::new(RwLock::new(Arc::new(ctx))),
        }
    }

    /// Snapshot the current context. Cheap: one `Arc` clone under a read
    /// lock.
    pub fn load(&self) -> Arc<ParserContext> {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new snapshot. Parses already holding the old snapshot are
    /// unaffected; parses that `load` afterwards see the new dictionaries.
    pub fn replace(&self, ctx: ParserContext) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx_with_emote(emote: &str) -> ParserContext {
        ParserContext::new(ContextValues {
            emotes: vec![emote.to_owned()],
            ..ContextValues::default()
        })
    }

    #[test]
    fn context_indexes_its_values() {
        let ctx = ParserContext::new(ContextValues {
            emotes: vec!["PEPE".into()],
            emote_modifiers: vec!["wide".into()],
            nicks: vec!["Abeous".into()],
            tags: vec!["nsfw".into()],
        });
        assert!(ctx.emotes.contains("PEPE"));
        assert!(ctx.emote_modifiers.contains("wide"));
        assert!(ctx.nicks.contains("abeous"));
        assert!(ctx.tags.contains("nsfw"));
    }

    #[test]
    fn shared_context_replace_swaps_snapshot() {
        let shared = SharedContext::new(ctx_with_emote("OLD"));
        let before = shared.load();
        shared.replace(ctx_with_emote("NEW"));
        let after = shared.load();

        assert!(before.emotes.contains("OLD"));
        assert!(!before.emotes.contains("NEW"));
        assert!(after.emotes.contains("NEW"));
        assert!(!after.emotes.contains("OLD"));
    }

    #[test]
    fn shared_context_clones_observe_the_same_swap() {
        let shared = SharedContext::new(ctx_with_emote("OLD"));
        let other = shared.clone();
        shared.replace(ctx_with_emote("NEW"));
        assert!(other.load().emotes.contains("NEW"));
    }

    #[test]
    fn shared_context_load_is_a_snapshot() {
        let shared = SharedContext::new(ctx_with_emote("OLD"));
        let snapshot = shared.load();
        shared.replace(ctx_with_emote("NEW"));
        // The held snapshot is untouched by the swap.
        assert!(snapshot.emotes.contains("OLD"));
    }
}
