//! Partitioning of labeled destinations, the core of the transitions-based subset step.

use log::debug;

use crate::index::LocSet;
use crate::label::{Label, LabelFactory};
use crate::location::LocId;

/// Splits a set of `(label, destination)` pairs into regions of the symbol space.
pub struct LabelCombinator {
    top: Label,
}

impl LabelCombinator {
    pub fn new(factory: &LabelFactory) -> Self {
        Self {
            top: factory.mk_true(),
        }
    }

    /// Partition the symbol space by the set of destinations each symbol reaches.
    ///
    /// The returned labels are satisfiable, pairwise disjoint and cover `true`; every symbol
    /// of a returned label reaches exactly the returned destination set. Symbols reading none
    /// of the input labels form the region with the empty set.
    pub fn combine(&self, pairs: &[(Label, LocId)]) -> Vec<(Label, LocSet)> {
        debug!("combine(pairs = {})", pairs.len());

        let mut parts: Vec<(Label, LocSet)> = vec![(self.top.clone(), LocSet::new())];
        for (label, end) in pairs {
            let mut next = Vec::with_capacity(parts.len() * 2);
            for (region, ends) in parts {
                let inside = region.and(label);
                let outside = region.and(&label.not());
                if inside.is_sat() {
                    let mut ends = ends.clone();
                    ends.insert(*end);
                    next.push((inside, ends));
                }
                if outside.is_sat() {
                    next.push((outside, ends));
                }
            }
            parts = next;
        }

        // Regions reaching the same destinations are one transition.
        let mut merged: Vec<(Label, LocSet)> = Vec::with_capacity(parts.len());
        for (region, ends) in parts {
            match merged.iter_mut().find(|(_, e)| *e == ends) {
                Some((label, _)) => *label = label.or(&region),
                None => merged.push((region, ends)),
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::ast::Expr;
    use crate::label::LabelKind;

    #[test]
    fn test_combine() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let p = factory.from_expr(&Expr::atom("p"));
        let q = factory.from_expr(&Expr::atom("q"));
        let (q1, q2) = (LocId::new(1), LocId::new(2));

        let combinator = LabelCombinator::new(&factory);
        let parts = combinator.combine(&[(p.clone(), q1), (q.clone(), q2)]);
        for (label, ends) in &parts {
            println!("{} -> {:?}", label, ends);
        }
        assert_eq!(parts.len(), 4);

        // Pairwise disjoint, jointly covering.
        let mut cover = factory.mk_false();
        for (i, (a, _)) in parts.iter().enumerate() {
            for (b, _) in parts.iter().skip(i + 1) {
                assert!(!a.and(b).is_sat());
            }
            cover = cover.or(a);
        }
        assert!(cover.is_true());

        let both = parts.iter().find(|(_, e)| e.len() == 2).unwrap();
        assert_eq!(both.0, p.and(&q));
        let none = parts.iter().find(|(_, e)| e.is_empty()).unwrap();
        assert_eq!(none.0, p.not().and(&q.not()));
    }

    #[test]
    fn test_combine_merges_same_destinations() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let p = factory.from_expr(&Expr::atom("p"));
        let q = factory.from_expr(&Expr::atom("q"));
        let q1 = LocId::new(1);

        let parts = LabelCombinator::new(&factory).combine(&[(p.clone(), q1), (q.clone(), q1)]);
        assert_eq!(parts.len(), 2);
        let to_q1 = parts.iter().find(|(_, e)| !e.is_empty()).unwrap();
        assert_eq!(to_q1.0, p.or(&q));
    }

    #[test]
    fn test_combine_true() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let parts = LabelCombinator::new(&factory).combine(&[(factory.mk_true(), LocId::new(3))]);
        assert_eq!(parts.len(), 1);
        assert!(parts[0].0.is_true());
        assert_eq!(parts[0].1, LocSet::from([LocId::new(3)]));

        let parts = LabelCombinator::new(&factory).combine(&[]);
        assert_eq!(parts.len(), 1);
        assert!(parts[0].1.is_empty());
    }
}
