//! Vocabulary indexes the parser consults.
//!
//! Two shapes: [`TermIndex`] for exact-match word sets (emotes, emote
//! modifiers, tags) and [`NickIndex`] for case-insensitive nickname lookup
//! with canonical casing and opaque metadata. Both support in-place mutation
//! for callers that build contexts incrementally, but once a
//! [`crate::ParserContext`] is constructed the indexes inside it are frozen.

use std::collections::BTreeMap;

use serde_json::Value;

/// Sorted, deduplicated set of terms with binary-search lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermIndex {
    terms: Vec<String>,
}

impl TermIndex {
    /// Build an index from arbitrary terms. Input order is irrelevant and
    /// duplicates collapse.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        terms.sort_unstable();
        terms.dedup();
        TermIndex { terms }
    }

    /// Exact-match membership test. O(log n).
    pub fn contains(&self, term: &str) -> bool {
        self.terms
            .binary_search_by(|t| t.as_str().cmp(term))
            .is_ok()
    }

    /// Add a term. Inserting an existing term is a no-op.
    pub fn insert(&mut self, term: impl Into<String>) {
        let term = term.into();
        if let Err(idx) = self.terms.binary_search(&term) {
            self.terms.insert(idx, term);
        }
    }

    /// Remove a term. Removing an absent term is a no-op.
    pub fn remove(&mut self, term: &str) {
        if let Ok(idx) = self.terms.binary_search_by(|t| t.as_str().cmp(term)) {
            self.terms.remove(idx);
        }
    }

    /// Discard the current contents and replace them wholesale.
    pub fn replace<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = TermIndex::new(terms);
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// A registered nickname: canonical casing plus optional opaque metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct NickEntry {
    /// The nickname as registered, with its original casing.
    pub name: String,
    /// Opaque payload carried through to [`crate::ast::Nick`] nodes.
    pub meta: Option<Value>,
}

/// Case-insensitive nickname dictionary.
///
/// Keys are the lowercase fold of the nickname; lookups fold the query the
/// same way, so `@ABEOUS` resolves to the entry registered as `abeous` and
/// the produced node carries the registered casing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NickIndex {
    entries: BTreeMap<String, NickEntry>,
}

impl NickIndex {
    /// Build an index from nicknames with no metadata.
    pub fn new<I, S>(nicks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = NickIndex::default();
        for nick in nicks {
            index.insert(nick);
        }
        index
    }

    pub fn contains(&self, nick: &str) -> bool {
        self.entries.contains_key(&nick.to_lowercase())
    }

    /// Case-insensitive lookup. O(log n).
    pub fn get(&self, nick: &str) -> Option<&NickEntry> {
        self.entries.get(&nick.to_lowercase())
    }

    /// Register a nickname with no metadata. Re-inserting replaces the entry,
    /// updating the canonical casing and clearing any metadata.
    pub fn insert(&mut self, nick: impl Into<String>) {
        self.insert_with_meta(nick, None);
    }

    /// Register a nickname with an opaque metadata payload.
    pub fn insert_with_meta(&mut self, nick: impl Into<String>, meta: Option<Value>) {
        let name = nick.into();
        self.entries
            .insert(name.to_lowercase(), NickEntry { name, meta });
    }

    /// Remove a nickname, case-insensitively. Absent nicknames are a no-op.
    pub fn remove(&mut self, nick: &str) {
        self.entries.remove(&nick.to_lowercase());
    }

    /// Discard the current contents and replace them wholesale.
    pub fn replace<I, S>(&mut self, nicks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = NickIndex::new(nicks);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
