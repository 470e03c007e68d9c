//! Transient indexes used by the operations: correspondence worklists and predecessor lists.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use crate::location::LocId;

/// Set of locations of one automaton, ordered by id.
pub type LocSet = BTreeSet<LocId>;

/// Correspondence between keys (operand locations, pairs, subsets) and result locations,
/// together with the stack of correspondences still to expand.
///
/// Each key is pushed at most once, which bounds every on-the-fly construction.
#[derive(Debug)]
pub struct Worklist<K> {
    map: HashMap<K, LocId>,
    stack: Vec<(K, LocId)>,
}

impl<K> Default for Worklist<K> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            stack: Vec::new(),
        }
    }
}

impl<K> Worklist<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<LocId> {
        self.map.get(key).copied()
    }

    /// Record a correspondence and schedule it for expansion.
    pub fn insert(&mut self, key: K, loc: LocId) {
        self.map.insert(key.clone(), loc);
        self.stack.push((key, loc));
    }

    /// Record a correspondence without scheduling it.
    pub fn alias(&mut self, key: K, loc: LocId) {
        self.map.insert(key, loc);
    }

    /// Look `key` up, creating (and scheduling) its location when missing.
    ///
    /// Returns the location and whether it was just created.
    pub fn find_or_insert_with<F>(&mut self, key: K, create: F) -> (LocId, bool)
    where
        F: FnOnce(&K) -> LocId,
    {
        match self.map.entry(key) {
            Entry::Occupied(e) => (*e.get(), false),
            Entry::Vacant(e) => {
                let loc = create(e.key());
                self.stack.push((e.key().clone(), loc));
                e.insert(loc);
                (loc, true)
            }
        }
    }

    pub fn pop(&mut self) -> Option<(K, LocId)> {
        self.stack.pop()
    }

    /// Number of known correspondences.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Distinct predecessors of every location, indexed by `id - 1`.
#[derive(Debug, Clone)]
pub struct PredecessorList {
    preds: Vec<Vec<LocId>>,
}

impl PredecessorList {
    pub fn new(num_locations: usize) -> Self {
        Self {
            preds: vec![Vec::new(); num_locations],
        }
    }

    pub fn add(&mut self, from: LocId, to: LocId) {
        let list = &mut self.preds[to.index()];
        if !list.contains(&from) {
            list.push(from);
        }
    }

    pub fn of(&self, loc: LocId) -> &[LocId] {
        &self.preds[loc.index()]
    }
}
