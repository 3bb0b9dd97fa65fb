//! Intern tables: one per value kind (strings, objects, arrays).
//!
//! Each distinct value gets a cheap `Identity` handle in discovery order.
//! Identities can later be redirected onto a canonical identity (structural
//! dedup) and are finally assigned dense on-wire indices by [`InternTable::finalize`].
//!
//! Strings are keyed by value. Objects and arrays are keyed by `NodeId`, which
//! gives reference-identity semantics without relying on pointers.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// A lightweight handle to one interned value.
///
/// Identities are ordered by insertion (discovery) order, not by value, and
/// are independent of the final serialized index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Identity(u32);

impl Identity {
    /// Discovery-order key.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create an Identity from a raw key. Use only for tests and debugging.
    #[inline]
    pub fn from_raw(key: u32) -> Self {
        Self(key)
    }
}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// Intern table bookkeeping failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("cannot redirect identity {0:?} onto itself")]
    SelfRedirect(Identity),
    #[error("identity {0:?} does not belong to this table")]
    UnknownIdentity(Identity),
}

#[derive(Debug, Clone)]
struct Entry<K> {
    value: K,
    /// Set when this entry was merged into another one.
    redirect: Option<Identity>,
    /// Dense index assigned by `finalize`.
    index: Option<u32>,
}

/// Table of distinct values of one kind.
#[derive(Debug, Clone)]
pub struct InternTable<K> {
    name: &'static str,
    lookup: HashMap<K, Identity>,
    entries: Vec<Entry<K>>,
    live_count: usize,
    finalized: bool,
}

impl<K: Hash + Eq + Clone> InternTable<K> {
    /// Create an empty table. `name` is only used in diagnostics.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            lookup: HashMap::new(),
            entries: Vec::new(),
            live_count: 0,
            finalized: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Intern a value, returning the existing identity if it was already added.
    pub fn add(&mut self, value: K) -> Identity {
        if let Some(&id) = self.lookup.get(&value) {
            return id;
        }

        let id = Identity(self.entries.len() as u32);
        self.entries.push(Entry {
            value: value.clone(),
            redirect: None,
            index: None,
        });
        self.lookup.insert(value, id);
        self.live_count += 1;
        self.finalized = false;
        id
    }

    pub fn get_id<Q>(&self, value: &Q) -> Option<Identity>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.get(value).copied()
    }

    /// The value an identity was created for.
    pub fn get_value(&self, id: Identity) -> Option<&K> {
        self.entries.get(id.0 as usize).map(|e| &e.value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.contains_key(value)
    }

    /// Follow redirects to the canonical identity.
    ///
    /// Returns `id` unchanged for live identities and for identities that do
    /// not belong to this table.
    pub fn resolve(&self, id: Identity) -> Identity {
        let mut current = id;
        while let Some(entry) = self.entries.get(current.0 as usize) {
            match entry.redirect {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Whether `id` is live (not redirected).
    pub fn is_live(&self, id: Identity) -> bool {
        self.entries
            .get(id.0 as usize)
            .is_some_and(|e| e.redirect.is_none())
    }

    /// Redirect `non_canonical` onto `canonical`.
    ///
    /// Merges are one-way and never split. Both identities are resolved first,
    /// so redirecting onto an already-merged identity lands on its canonical.
    pub fn dedupe(&mut self, non_canonical: Identity, canonical: Identity) -> Result<(), InternError> {
        self.check(non_canonical)?;
        self.check(canonical)?;

        let from = self.resolve(non_canonical);
        let to = self.resolve(canonical);
        if from == to {
            return Err(InternError::SelfRedirect(non_canonical));
        }

        self.entries[from.0 as usize].redirect = Some(to);
        self.entries[from.0 as usize].index = None;
        self.live_count -= 1;
        self.finalized = false;
        Ok(())
    }

    /// Assign dense indices `[0, count)` to all live identities.
    ///
    /// With `ordered`, indices follow discovery order, which makes output
    /// deterministic. Otherwise the order follows hash-map iteration: dense and
    /// stable for this table, but unspecified.
    pub fn finalize(&mut self, ordered: bool) -> Vec<Identity> {
        let mut live: Vec<Identity> = if ordered {
            (0..self.entries.len() as u32).map(Identity).collect()
        } else {
            self.lookup.values().copied().collect()
        };
        live.retain(|id| self.entries[id.0 as usize].redirect.is_none());

        for entry in &mut self.entries {
            entry.index = None;
        }
        for (index, id) in live.iter().enumerate() {
            self.entries[id.0 as usize].index = Some(index as u32);
        }

        self.finalized = true;
        live
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Final index of an identity, following redirects.
    ///
    /// `None` until the table is finalized.
    pub fn index_of(&self, id: Identity) -> Option<u32> {
        if !self.finalized {
            return None;
        }
        let canonical = self.resolve(id);
        self.entries.get(canonical.0 as usize)?.index
    }

    /// Final index of a value, following redirects.
    pub fn index_of_value<Q>(&self, value: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_id(value).and_then(|id| self.index_of(id))
    }

    /// Visit every live identity in discovery order.
    pub fn for_each(&self, mut f: impl FnMut(Identity, &K)) {
        for (id, value) in self.iter_live() {
            f(id, value);
        }
    }

    /// Live identities in discovery order.
    pub fn iter_live(&self) -> impl Iterator<Item = (Identity, &K)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.redirect.is_none())
            .map(|(i, e)| (Identity(i as u32), &e.value))
    }

    /// Number of live (non-redirected) identities.
    pub fn get_count(&self) -> usize {
        self.live_count
    }

    /// Number of identities ever created, including redirected ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self, id: Identity) -> Result<(), InternError> {
        if (id.0 as usize) < self.entries.len() {
            Ok(())
        } else {
            Err(InternError::UnknownIdentity(id))
        }
    }
}
