//! Simulation relation with bisimilarity classes.
//!
//! `has(a, b)` means that `a` is known to simulate `b` (every word accepted from `b` is
//! accepted from `a`). Once both directions are known the two locations are merged into one
//! class, kept in a union-find whose roots are the minimum ids of their classes.

use std::collections::BTreeSet;

use crate::location::LocId;

#[derive(Debug, Clone)]
pub struct SimRel {
    rel: Vec<BTreeSet<LocId>>,
    parent: Vec<LocId>,
}

impl SimRel {
    pub fn new(num_locations: usize) -> Self {
        Self {
            rel: vec![BTreeSet::new(); num_locations],
            parent: (0..num_locations).map(LocId::from_index).collect(),
        }
    }

    /// Minimum-id member of the class of `loc`.
    pub fn representative(&self, loc: LocId) -> LocId {
        let mut current = loc;
        loop {
            let parent = self.parent[current.index()];
            if parent == current {
                return current;
            }
            current = parent;
        }
    }

    pub fn is_bisimilar(&self, a: LocId, b: LocId) -> bool {
        self.representative(a) == self.representative(b)
    }

    pub fn has(&self, a: LocId, b: LocId) -> bool {
        self.rel[a.index()].contains(&b) || self.is_bisimilar(a, b)
    }

    fn union(&mut self, a: LocId, b: LocId) {
        let ra = self.representative(a);
        let rb = self.representative(b);
        if ra < rb {
            self.parent[rb.index()] = ra;
        } else if rb < ra {
            self.parent[ra.index()] = rb;
        }
    }

    /// Record that `a` simulates `b`. Returns `false` if the pair was already known.
    pub fn insert(&mut self, a: LocId, b: LocId) -> bool {
        if self.has(a, b) {
            return false;
        }
        self.rel[a.index()].insert(b);
        if self.has(b, a) {
            self.union(a, b);
        }
        true
    }

    /// Merge all `members` into one class.
    pub fn insert_bisimilar_class(&mut self, members: &[LocId]) {
        if let Some((&first, rest)) = members.split_first() {
            for &m in rest {
                self.union(first, m);
            }
        }
    }

    /// Distinct class representatives, in id order.
    pub fn representatives(&self) -> Vec<LocId> {
        (0..self.parent.len())
            .map(LocId::from_index)
            .filter(|&l| self.representative(l) == l)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn q(id: u32) -> LocId {
        LocId::new(id)
    }

    #[test]
    fn test_one_direction() {
        let mut rel = SimRel::new(3);
        assert!(rel.insert(q(1), q(2)));
        assert!(!rel.insert(q(1), q(2)));
        assert!(rel.has(q(1), q(2)));
        assert!(!rel.has(q(2), q(1)));
        assert!(!rel.is_bisimilar(q(1), q(2)));
    }

    #[test]
    fn test_mutual_pairs_merge() {
        let mut rel = SimRel::new(4);
        rel.insert(q(4), q(2));
        rel.insert(q(2), q(4));
        assert!(rel.is_bisimilar(q(2), q(4)));
        assert_eq!(rel.representative(q(4)), q(2));

        rel.insert(q(3), q(4));
        rel.insert(q(4), q(3));
        // Transitive through the shared class.
        assert!(rel.is_bisimilar(q(2), q(3)));
        assert_eq!(rel.representative(q(3)), q(2));
        assert_eq!(rel.representatives(), vec![q(1), q(2)]);
    }

    #[test]
    fn test_class() {
        let mut rel = SimRel::new(5);
        rel.insert_bisimilar_class(&[q(5), q(3), q(4)]);
        assert_eq!(rel.representative(q(5)), q(3));
        assert_eq!(rel.representative(q(4)), q(3));
        assert!(rel.has(q(4), q(5)));
        assert_eq!(rel.representatives(), vec![q(1), q(2), q(3)]);
    }
}
