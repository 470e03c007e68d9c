use log::debug;

use crate::automaton::Automaton;
use crate::chooser::AlgoChooser;
use crate::config::AlgorithmType;
use crate::error::Result;
use crate::index::Worklist;
use crate::location::{LocId, TransitionType};
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Result location of the pair `(l1, l2)`; a pair involving an operand sink is the sink.
    fn product_location(
        &self,
        res: &mut Automaton,
        worklist: &mut Worklist<(LocId, LocId)>,
        a1: &Automaton,
        a2: &Automaton,
        (l1, l2): (LocId, LocId),
    ) -> Result<LocId> {
        if a1.sink() == Some(l1) || a2.sink() == Some(l2) {
            return res.ensure_sink(self.labels());
        }
        let (loc, _) = worklist.find_or_insert_with((l1, l2), |_| {
            let payload = a1.location(l1).payload().clone();
            res.add_location(a1.is_final(l1) && a2.is_final(l2), payload)
        });
        Ok(loc)
    }

    /// Automaton of `L(a1) ∩ L(a2)` by the product construction.
    ///
    /// The product is pruned of locations that cannot reach a final location.
    pub fn intersection(&self, a1: &Automaton, a2: &Automaton) -> Result<Automaton> {
        debug!(
            "intersection(a1 = {} locations, a2 = {} locations)",
            a1.location_count(),
            a2.location_count()
        );

        let (i1, i2) = (a1.unique_init(), a2.unique_init());

        let mut res = self.new_automaton();
        let init = res.add_location(a1.is_final(i1) && a2.is_final(i2), a1.location(i1).payload().clone());
        res.add_initial_location(init);
        res.set_ty(if self.config().keep_type {
            TransitionType::Deterministic
        } else {
            TransitionType::Unknown
        });
        res.set_complete(self.config().keep_complete);

        let mut worklist = Worklist::new();
        worklist.insert((i1, i2), init);
        let mut chooser = AlgoChooser::new(self.config().algorithm);

        while let Some(((l1, l2), r)) = worklist.pop() {
            let (loc1, loc2) = (a1.location(l1), a2.location(l2));

            match chooser.choose_from_locations(&[loc1, loc2]) {
                AlgorithmType::AlphabetBased => {
                    for symbol in self.labels().alphabet(chooser.last_support()) {
                        for t1 in loc1.transitions().iter().filter(|t| t.label.is_model_of(&symbol)) {
                            for t2 in loc2.transitions().iter().filter(|t| t.label.is_model_of(&symbol)) {
                                let d = self.product_location(&mut res, &mut worklist, a1, a2, (t1.end, t2.end))?;
                                res.create_transition(r, d, symbol.clone())?;
                            }
                        }
                    }
                }
                AlgorithmType::TransitionsBased => {
                    for t1 in loc1.transitions() {
                        for t2 in loc2.transitions() {
                            let label = t1.label.and(&t2.label);
                            if label.is_sat() {
                                let d = self.product_location(&mut res, &mut worklist, a1, a2, (t1.end, t2.end))?;
                                res.create_transition(r, d, label)?;
                            }
                        }
                    }
                }
            }

            res.location_mut(r).merge_duplicates();
            self.update_type_and_complete(&mut res, r)?;
        }

        self.prune_non_accepting(&res)
    }

    /// Letter-wise conjunction: `(a1;TRUE[*] ∩ a2) ∪ (a1 ∩ a2;TRUE[*])`.
    pub fn and(&self, a1: &Automaton, a2: &Automaton) -> Result<Automaton> {
        debug!(
            "and(a1 = {} locations, a2 = {} locations)",
            a1.location_count(),
            a2.location_count()
        );
        let all = self.true_star()?;
        let left = self.intersection(&self.concat(a1, &all)?, a2)?;
        let right = self.intersection(a1, &self.concat(a2, &all)?)?;
        self.prune_non_accepting(&self.union(&left, &right)?)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::ast::Expr;
    use crate::config::{AlgorithmPolicy, AutomataConfig};
    use crate::manager::AutomataManager;

    fn check_intersection(mgr: &AutomataManager) {
        let a = mgr.create_from_expr(&Expr::atom("p")).unwrap();
        let b = mgr.create_from_expr(&Expr::atom("q")).unwrap();
        let c = mgr.intersection(&a, &b).unwrap();

        let (vp, vq) = (mgr.labels().var("p"), mgr.labels().var("q"));
        let both = mgr.labels().symbol([vp.lit(true), vq.lit(true)]);
        let p_only = mgr.labels().symbol([vp.lit(true), vq.lit(false)]);
        assert!(c.accepts(&[both.clone()]));
        assert!(!c.accepts(&[p_only]));
        assert!(!c.accepts(&[both.clone(), both]));
        assert!(!c.accepts(&[]));

        let not_p = mgr.create_from_expr(&Expr::not(Expr::atom("p"))).unwrap();
        assert!(mgr.emptiness(&mgr.intersection(&a, &not_p).unwrap()));
    }

    #[test]
    fn test_intersection_transitions_based() {
        check_intersection(&AutomataManager::default());
    }

    #[test]
    fn test_intersection_alphabet_based() {
        check_intersection(&AutomataManager::new(AutomataConfig {
            algorithm: AlgorithmPolicy::AlphabetBased,
            ..Default::default()
        }));
    }

    #[test]
    fn test_intersection_heuristic_complete() {
        check_intersection(&AutomataManager::new(AutomataConfig {
            algorithm: AlgorithmPolicy::Heuristic,
            keep_complete: true,
            keep_type: true,
            ..Default::default()
        }));
    }

    #[test]
    fn test_intersection_of_loops() {
        let mgr = AutomataManager::default();
        let p_star = mgr.propositional_kleene_star(&Expr::atom("p")).unwrap();
        let q_star = mgr.propositional_kleene_star(&Expr::atom("q")).unwrap();
        let c = mgr.intersection(&p_star, &q_star).unwrap();
        let pq_star = mgr
            .propositional_kleene_star(&Expr::and(Expr::atom("p"), Expr::atom("q")))
            .unwrap();
        assert!(mgr.equals(&c, &pq_star).unwrap());
    }

    #[test]
    fn test_and() {
        let mgr = AutomataManager::default();
        // {p;q} && {r}: the longer word extends the shorter one.
        let pq = mgr
            .concat(
                &mgr.create_from_expr(&Expr::atom("p")).unwrap(),
                &mgr.create_from_expr(&Expr::atom("q")).unwrap(),
            )
            .unwrap();
        let r = mgr.create_from_expr(&Expr::atom("r")).unwrap();
        let c = mgr.and(&pq, &r).unwrap();

        let labels = mgr.labels();
        let (vp, vq, vr) = (labels.var("p"), labels.var("q"), labels.var("r"));
        let pr = labels.symbol([vp.lit(true), vq.lit(false), vr.lit(true)]);
        let q = labels.symbol([vp.lit(false), vq.lit(true), vr.lit(false)]);
        let p = labels.symbol([vp.lit(true), vq.lit(false), vr.lit(false)]);
        assert!(c.accepts(&[pr.clone(), q.clone()]));
        assert!(!c.accepts(&[p, q]));
        assert!(!c.accepts(&[pr]));
    }
}
