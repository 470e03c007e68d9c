use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use crate::automaton::Automaton;
use crate::config::ReductionPolicy;
use crate::error::Result;
use crate::index::LocSet;
use crate::label::Label;
use crate::location::LocId;
use crate::manager::AutomataManager;
use crate::simrel::SimRel;

impl AutomataManager {
    /// Minimal deterministic complete automaton, by Brzozowski's double reversal.
    ///
    /// Each reversal is determinized from the set of locations standing for the final
    /// locations it reverses.
    pub fn minimize(&self, a: &Automaton) -> Result<Automaton> {
        debug!("minimize(a = {} locations)", a.location_count());
        let once = self.determinize_reversed(a)?;
        self.determinize_reversed(&once)
    }

    fn determinize_reversed(&self, a: &Automaton) -> Result<Automaton> {
        let (reversed, map) = self.reverse_locations(a)?;
        let start: LocSet = a.finals().iter().filter_map(|f| map.get(f).copied()).collect();
        self.determinize_from(&reversed, start)
    }

    /// Does `x` simulate `y` under the current relation?
    fn simulates(a: &Automaton, rel: &SimRel, x: LocId, y: LocId) -> bool {
        let from_x = a.location(x).transitions();
        a.location(y).transitions().iter().all(|ty| {
            let related = from_x.iter().filter(|tx| rel.has(tx.end, ty.end));
            let mut big_or: Option<Label> = None;
            for tx in related {
                if tx.label.is_true() {
                    return true;
                }
                big_or = Some(match big_or {
                    Some(acc) => acc.or(&tx.label),
                    None => tx.label.clone(),
                });
            }
            match big_or {
                Some(acc) => ty.label.is_contained_in(&acc),
                None => !ty.label.is_sat(),
            }
        })
    }

    /// Quotient of `a` by the largest bisimulation found by the fixpoint.
    ///
    /// Language-preserving, but not necessarily minimal.
    pub fn bisimulation(&self, a: &Automaton) -> Result<Automaton> {
        debug!("bisimulation(a = {} locations)", a.location_count());

        let n = a.location_count();
        let mut rel = SimRel::new(n);
        let preds = a.predecessors();

        // Locations without transitions accept either only the empty word or nothing.
        let (dead_final, dead): (Vec<LocId>, Vec<LocId>) = a
            .locations()
            .iter()
            .filter(|l| l.transitions().is_empty())
            .map(|l| l.id())
            .partition(|&l| a.is_final(l));
        rel.insert_bisimilar_class(&dead_final);
        rel.insert_bisimilar_class(&dead);

        let mut pending: VecDeque<(LocId, LocId)> = VecDeque::new();
        let mut queued: HashSet<(LocId, LocId)> = HashSet::new();
        for x in a.locations().iter().map(|l| l.id()) {
            for y in a.locations().iter().map(|l| l.id()) {
                if x != y && a.is_final(x) == a.is_final(y) && !rel.has(x, y) {
                    pending.push_back((x, y));
                    queued.insert((x, y));
                }
            }
        }

        while let Some((x, y)) = pending.pop_front() {
            queued.remove(&(x, y));
            if rel.has(x, y) || !Self::simulates(a, &rel, x, y) {
                continue;
            }
            debug!("{} simulates {}", x, y);
            rel.insert(x, y);
            for &px in preds.of(x) {
                for &py in preds.of(y) {
                    for pair in [(px, py), (py, px)] {
                        if pair.0 != pair.1
                            && a.is_final(pair.0) == a.is_final(pair.1)
                            && !rel.has(pair.0, pair.1)
                            && queued.insert(pair)
                        {
                            pending.push_back(pair);
                        }
                    }
                }
            }
        }

        let mut res = self.new_automaton();
        res.set_ty(a.ty());
        res.set_complete(a.is_complete());
        let mut map: HashMap<LocId, LocId> = HashMap::new();
        for rep in rel.representatives() {
            let original = a.location(rep);
            let copy = res.add_location(original.is_final(), original.payload().clone());
            let loc = res.location_mut(copy);
            loc.set_ty(original.ty());
            loc.set_complete(original.is_complete());
            map.insert(rep, copy);
        }
        res.add_initial_location(map[&rel.representative(a.unique_init())]);
        res.set_sink(a.sink().map(|s| map[&rel.representative(s)]));

        for (&rep, &copy) in &map {
            for t in a.location(rep).transitions() {
                let end = map[&rel.representative(t.end)];
                res.create_transition(copy, end, t.label.clone())?;
            }
            res.location_mut(copy).merge_duplicates();
        }

        debug!("bisimulation: {} -> {} locations", n, res.location_count());
        self.prune(&res)
    }

    /// Reduce `a` with the configured reduction.
    pub fn nfa_reduction(&self, a: &Automaton) -> Result<Automaton> {
        debug!("nfa_reduction(a = {} locations)", a.location_count());
        match self.config().reduction {
            ReductionPolicy::Bisimulation => self.bisimulation(a),
            ReductionPolicy::Brzozowski => self.minimize(a),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::ast::Expr;
    use crate::config::{AutomataConfig, ReductionPolicy};
    use crate::manager::AutomataManager;

    fn p_or_q_then_r(mgr: &AutomataManager) -> crate::automaton::Automaton {
        // p;r | q;r: two bisimilar branches.
        let atom = |name: &str| mgr.create_from_expr(&Expr::atom(name)).unwrap();
        let pr = mgr.concat(&atom("p"), &atom("r")).unwrap();
        let qr = mgr.concat(&atom("q"), &atom("r")).unwrap();
        mgr.union(&pr, &qr).unwrap()
    }

    #[test]
    fn test_minimize() {
        let mgr = AutomataManager::default();
        let a = p_or_q_then_r(&mgr);
        let m = mgr.minimize(&a).unwrap();
        println!("minimize: {} -> {} locations", a.location_count(), m.location_count());
        // start, after (p | q), accepting, sink
        assert_eq!(m.location_count(), 4);
        assert!(mgr.equals(&a, &m).unwrap());
        assert_eq!(mgr.minimize(&m).unwrap().location_count(), m.location_count());
    }

    #[test]
    fn test_minimize_kleene_star() {
        let mgr = AutomataManager::new(AutomataConfig {
            keep_complete: true,
            ..Default::default()
        });
        let p = mgr.create_from_expr(&Expr::atom("p")).unwrap();
        let star = mgr.kleene_star(&p).unwrap();
        let m = mgr.minimize(&star).unwrap();
        assert_eq!(m.location_count(), 2);
        assert!(mgr.equals(&m, &star).unwrap());
    }

    #[test]
    fn test_bisimulation() {
        let mgr = AutomataManager::default();
        let a = p_or_q_then_r(&mgr);
        // init, the two middle copies, the two final copies
        assert_eq!(a.location_count(), 5);

        let b = mgr.bisimulation(&a).unwrap();
        println!("bisimulation: {} -> {} locations", a.location_count(), b.location_count());
        assert_eq!(b.location_count(), 3);
        assert_eq!(b.transitions_duplicate_count(), 0);
        assert!(mgr.equals(&a, &b).unwrap());
    }

    #[test]
    fn test_bisimulation_of_loops() {
        let mgr = AutomataManager::default();
        let p_star = mgr.propositional_kleene_star(&Expr::atom("p")).unwrap();
        let twice = mgr.concat(&p_star, &p_star).unwrap();
        let b = mgr.bisimulation(&twice).unwrap();
        assert!(b.location_count() <= twice.location_count());
        assert!(mgr.equals(&b, &p_star).unwrap());
    }

    #[test]
    fn test_nfa_reduction_policy() {
        let mgr = AutomataManager::new(AutomataConfig {
            reduction: ReductionPolicy::Brzozowski,
            ..Default::default()
        });
        let a = p_or_q_then_r(&mgr);
        let r = mgr.nfa_reduction(&a).unwrap();
        assert_eq!(r.location_count(), 4);
        assert!(r.sink().is_some());
    }
}
