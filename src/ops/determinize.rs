use log::debug;

use crate::automaton::Automaton;
use crate::chooser::AlgoChooser;
use crate::combinator::LabelCombinator;
use crate::config::AlgorithmType;
use crate::error::Result;
use crate::index::{LocSet, Worklist};
use crate::location::{LocId, Location, TransitionType};
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Subset construction started from `start`, a set of locations of `a`.
    ///
    /// `a` needs no initial location: the result's initial location stands for `start`. The
    /// empty subset is the sink; it loops on `true`. The sink of `a` accepts nothing and is left
    /// out of every subset.
    pub(crate) fn determinize_from(&self, a: &Automaton, start: LocSet) -> Result<Automaton> {
        let mut res = self.new_automaton();
        res.set_ty(TransitionType::Deterministic);
        res.set_complete(true);

        let mut worklist: Worklist<LocSet> = Worklist::new();
        let init = self.subset_location(&mut res, &mut worklist, a, start);
        res.add_initial_location(init);

        let mut chooser = AlgoChooser::new(self.config().algorithm);
        let combinator = LabelCombinator::new(self.labels());

        while let Some((set, r)) = worklist.pop() {
            let locations: Vec<&Location> = set.iter().map(|&l| a.location(l)).collect();

            match chooser.choose_from_locations(&locations) {
                AlgorithmType::AlphabetBased => {
                    for symbol in self.labels().alphabet(chooser.last_support()) {
                        let ends: LocSet = locations
                            .iter()
                            .flat_map(|l| l.transitions())
                            .filter(|t| t.label.is_model_of(&symbol))
                            .map(|t| t.end)
                            .collect();
                        let d = self.subset_location(&mut res, &mut worklist, a, ends);
                        res.create_transition(r, d, symbol)?;
                    }
                }
                AlgorithmType::TransitionsBased => {
                    let pairs: Vec<_> = locations
                        .iter()
                        .flat_map(|l| l.transitions())
                        .map(|t| (t.label.clone(), t.end))
                        .collect();
                    for (label, ends) in combinator.combine(&pairs) {
                        let d = self.subset_location(&mut res, &mut worklist, a, ends);
                        res.create_transition(r, d, label)?;
                    }
                }
            }

            let loc = res.location_mut(r);
            loc.merge_duplicates();
            loc.set_ty(TransitionType::Deterministic);
            loc.set_complete(true);
        }

        Ok(res)
    }

    fn subset_location(
        &self,
        res: &mut Automaton,
        worklist: &mut Worklist<LocSet>,
        a: &Automaton,
        mut set: LocSet,
    ) -> LocId {
        if let Some(sink) = a.sink() {
            set.remove(&sink);
        }
        let is_sink = set.is_empty();
        let (loc, created) = worklist.find_or_insert_with(set, |s| {
            let is_final = s.iter().any(|&l| a.is_final(l));
            self.add_location(res, is_final)
        });
        if created && is_sink {
            res.set_sink(Some(loc));
        }
        loc
    }

    /// Equivalent deterministic and complete automaton.
    pub fn determinize(&self, a: &Automaton) -> Result<Automaton> {
        debug!("determinize(a = {} locations)", a.location_count());
        self.determinize_from(a, LocSet::from([a.unique_init()]))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::ast::Expr;
    use crate::config::{AlgorithmPolicy, AutomataConfig};
    use crate::location::TransitionType;
    use crate::manager::AutomataManager;

    fn check_determinize(mgr: &AutomataManager) {
        // (p | q);r unioned with p;!r: non-deterministic on p.
        let atom = |e: Expr| mgr.create_from_expr(&e).unwrap();
        let a = mgr
            .concat(&atom(Expr::or(Expr::atom("p"), Expr::atom("q"))), &atom(Expr::atom("r")))
            .unwrap();
        let b = mgr
            .concat(&atom(Expr::atom("p")), &atom(Expr::not(Expr::atom("r"))))
            .unwrap();
        let u = mgr.union(&a, &b).unwrap();
        let d = mgr.determinize(&u).unwrap();
        println!("determinized: {} locations", d.location_count());

        assert_eq!(d.ty(), TransitionType::Deterministic);
        assert!(d.is_complete());
        assert!(d.sink().is_some());
        for loc in d.locations() {
            let mut copy = loc.clone();
            assert_eq!(copy.update_type(), TransitionType::Deterministic);
            assert!(loc.completion_label(mgr.labels()).is_none());
        }
        assert!(mgr.equals(&u, &d).unwrap());
    }

    #[test]
    fn test_determinize_transitions_based() {
        check_determinize(&AutomataManager::default());
    }

    #[test]
    fn test_determinize_alphabet_based() {
        check_determinize(&AutomataManager::new(AutomataConfig {
            algorithm: AlgorithmPolicy::AlphabetBased,
            ..Default::default()
        }));
    }

    #[test]
    fn test_determinize_heuristic() {
        check_determinize(&AutomataManager::new(AutomataConfig {
            algorithm: AlgorithmPolicy::Heuristic,
            ..Default::default()
        }));
    }

    #[test]
    fn test_determinize_propositional_star() {
        let mgr = AutomataManager::new(AutomataConfig {
            keep_complete: true,
            ..Default::default()
        });
        let star = mgr.propositional_kleene_star(&Expr::atom("p")).unwrap();
        let d = mgr.determinize(&star).unwrap();
        // The accepting loop and the location collecting every other letter.
        assert_eq!(d.location_count(), 2);
        assert!(mgr.equals(&d, &star).unwrap());
    }

    #[test]
    fn test_determinize_drops_operand_sink() {
        for algorithm in [AlgorithmPolicy::AlphabetBased, AlgorithmPolicy::TransitionsBased] {
            let mgr = AutomataManager::new(AutomataConfig {
                algorithm,
                keep_complete: true,
                keep_type: true,
                ..Default::default()
            });
            let p = mgr.create_from_expr(&Expr::atom("p")).unwrap();
            let star = mgr.kleene_star(&p).unwrap();
            let d = mgr.determinize(&star).unwrap();
            // {init}, {init, end} and the sink: the operand's sink joins no subset.
            assert_eq!(d.location_count(), 3);
            assert_eq!(d.transitions_duplicate_count(), 0);
            let sink = d.sink().unwrap();
            assert_eq!(d.location(sink).transitions().len(), 1);
            assert!(mgr.equals(&d, &star).unwrap());
            assert_eq!(mgr.minimize(&star).unwrap().location_count(), 2);
        }
    }

    #[test]
    fn test_determinize_alphabet_based_many_propositions() {
        let mgr = AutomataManager::new(AutomataConfig {
            algorithm: AlgorithmPolicy::AlphabetBased,
            ..Default::default()
        });
        let wide = (1..40).fold(Expr::atom("x0"), |acc, i| Expr::or(acc, Expr::atom(format!("x{}", i))));
        let a = mgr.create_from_expr(&wide).unwrap();
        let u = mgr.union(&a, &mgr.create_from_expr(&Expr::atom("x0")).unwrap()).unwrap();
        let d = mgr.determinize(&u).unwrap();
        assert_eq!(d.ty(), TransitionType::Deterministic);
        assert!(mgr.equals(&u, &d).unwrap());
    }

    #[test]
    fn test_determinize_empty() {
        let mgr = AutomataManager::default();
        let d = mgr.determinize(&mgr.create_empty().unwrap()).unwrap();
        assert!(mgr.emptiness(&d));
        // The initial location reaches the empty subset on every letter.
        assert_eq!(d.location_count(), 2);
    }
}
