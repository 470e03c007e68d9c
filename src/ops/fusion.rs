use log::debug;

use crate::automaton::Automaton;
use crate::chooser::AlgoChooser;
use crate::config::AlgorithmType;
use crate::error::Result;
use crate::index::Worklist;
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Automaton of the fusion `a1 : a2`: the last letter of a word of `a1` is also the first
    /// letter of a word of `a2`.
    ///
    /// A transition of `a1` entering a final location is joined with every transition leaving
    /// the initial location of `a2`; the joined label is the conjunction of both. No copy of
    /// `a1` is final, so neither operand contributes the empty word.
    pub fn fusion(&self, a1: &Automaton, a2: &Automaton) -> Result<Automaton> {
        debug!(
            "fusion(a1 = {} locations, a2 = {} locations)",
            a1.location_count(),
            a2.location_count()
        );

        let (i1, i2) = (a1.unique_init(), a2.unique_init());
        let init2 = a2.location(i2);

        let mut res = self.new_automaton();
        let init = res.add_location(false, a1.location(i1).payload().clone());
        res.add_initial_location(init);
        self.init_type_complete(&mut res, a1, a2);

        let mut chooser = AlgoChooser::new(self.config().algorithm);
        chooser.set_permanent_location(init2);

        let mut map1 = Worklist::new();
        let mut map2 = Worklist::new();
        map1.insert(i1, init);

        while let Some((l1, r)) = map1.pop() {
            for t1 in a1.location(l1).transitions() {
                let end = self.find_or_copy(&mut res, &mut map1, a1, t1.end, false);
                res.create_transition(r, end, t1.label.clone())?;

                if !a1.is_final(t1.end) {
                    continue;
                }
                match chooser.choose_from_transition(t1) {
                    AlgorithmType::AlphabetBased => {
                        for symbol in self.labels().alphabet(chooser.last_support()) {
                            if !t1.label.is_model_of(&symbol) {
                                continue;
                            }
                            for t2 in init2.transitions().iter().filter(|t| t.label.is_model_of(&symbol)) {
                                let d = self.find_or_copy(&mut res, &mut map2, a2, t2.end, a2.is_final(t2.end));
                                res.create_transition(r, d, symbol.clone())?;
                            }
                        }
                    }
                    AlgorithmType::TransitionsBased => {
                        for t2 in init2.transitions() {
                            let label = t1.label.and(&t2.label);
                            if label.is_sat() {
                                let d = self.find_or_copy(&mut res, &mut map2, a2, t2.end, a2.is_final(t2.end));
                                res.create_transition(r, d, label)?;
                            }
                        }
                    }
                }
            }
            res.location_mut(r).merge_duplicates();
            self.update_type_and_complete(&mut res, r)?;
        }

        self.drain_copy(&mut res, &mut map2, a2)?;
        self.prune_non_accepting(&res)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::ast::Expr;
    use crate::config::{AlgorithmPolicy, AutomataConfig};
    use crate::manager::AutomataManager;

    fn check_fusion(mgr: &AutomataManager) {
        // {a;b} : {c;d} accepts a, b&c, d.
        let atom = |name: &str| mgr.create_from_expr(&Expr::atom(name)).unwrap();
        let ab = mgr.concat(&atom("a"), &atom("b")).unwrap();
        let cd = mgr.concat(&atom("c"), &atom("d")).unwrap();
        let f = mgr.fusion(&ab, &cd).unwrap();

        let labels = mgr.labels();
        let vars: Vec<_> = ["a", "b", "c", "d"].iter().map(|n| labels.var(n)).collect();
        let letter = |on: &[usize]| labels.symbol(vars.iter().enumerate().map(|(i, v)| v.lit(on.contains(&i))));

        assert!(f.accepts(&[letter(&[0]), letter(&[1, 2]), letter(&[3])]));
        assert!(!f.accepts(&[letter(&[0]), letter(&[1]), letter(&[3])]));
        assert!(!f.accepts(&[letter(&[0]), letter(&[1]), letter(&[2]), letter(&[3])]));
        assert!(!f.accepts(&[]));
    }

    #[test]
    fn test_fusion_transitions_based() {
        check_fusion(&AutomataManager::default());
    }

    #[test]
    fn test_fusion_alphabet_based() {
        check_fusion(&AutomataManager::new(AutomataConfig {
            algorithm: AlgorithmPolicy::AlphabetBased,
            ..Default::default()
        }));
    }

    #[test]
    fn test_fusion_heuristic_complete() {
        check_fusion(&AutomataManager::new(AutomataConfig {
            algorithm: AlgorithmPolicy::Heuristic,
            keep_complete: true,
            keep_type: true,
            ..Default::default()
        }));
    }

    #[test]
    fn test_fusion_contradiction_is_empty() {
        let mgr = AutomataManager::default();
        let p = mgr.create_from_expr(&Expr::atom("p")).unwrap();
        let not_p = mgr.create_from_expr(&Expr::not(Expr::atom("p"))).unwrap();
        assert!(mgr.emptiness(&mgr.fusion(&p, &not_p).unwrap()));
    }
}
