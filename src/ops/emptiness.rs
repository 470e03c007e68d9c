use std::collections::HashSet;

use log::debug;

use crate::automaton::Automaton;
use crate::error::Result;
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Is `L(a)` empty?
    pub fn emptiness(&self, a: &Automaton) -> bool {
        debug!("emptiness(a = {} locations)", a.location_count());

        let init = a.unique_init();
        if a.is_final(init) {
            return false;
        }
        if a.finals().is_empty() {
            return true;
        }

        let mut visited = HashSet::from([init]);
        let mut stack = vec![init];
        while let Some(loc) = stack.pop() {
            for t in a.location(loc).transitions() {
                if visited.insert(t.end) {
                    if a.is_final(t.end) {
                        return false;
                    }
                    stack.push(t.end);
                }
            }
        }
        true
    }

    /// Automaton of `L(a1) \ L(a2)`.
    pub fn difference(&self, a1: &Automaton, a2: &Automaton) -> Result<Automaton> {
        debug!(
            "difference(a1 = {} locations, a2 = {} locations)",
            a1.location_count(),
            a2.location_count()
        );
        self.intersection(a1, &self.complement(a2)?)
    }

    /// Is `L(a1) ⊆ L(a2)`?
    pub fn containment(&self, a1: &Automaton, a2: &Automaton) -> Result<bool> {
        Ok(self.emptiness(&self.difference(a1, a2)?))
    }

    /// Is `L(a1) = L(a2)`?
    pub fn equals(&self, a1: &Automaton, a2: &Automaton) -> Result<bool> {
        Ok(self.containment(a1, a2)? && self.containment(a2, a1)?)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::ast::Expr;
    use crate::location::LocationPayload;
    use crate::manager::AutomataManager;

    #[test]
    fn test_emptiness() {
        let mgr = AutomataManager::default();
        assert!(mgr.emptiness(&mgr.create_empty().unwrap()));
        assert!(!mgr.emptiness(&mgr.create_empty_word().unwrap()));
        assert!(!mgr.emptiness(&mgr.create_from_expr(&Expr::atom("p")).unwrap()));
    }

    #[test]
    fn test_emptiness_unreachable_final() {
        let mgr = AutomataManager::default();
        let mut a = mgr.create_empty().unwrap();
        a.add_location(true, LocationPayload::Plain);
        assert_eq!(a.finals().len(), 1);
        assert!(mgr.emptiness(&a));
    }

    #[test]
    fn test_difference() {
        let mgr = AutomataManager::default();
        let p_or_q = mgr
            .create_from_expr(&Expr::or(Expr::atom("p"), Expr::atom("q")))
            .unwrap();
        let p = mgr.create_from_expr(&Expr::atom("p")).unwrap();
        let d = mgr.difference(&p_or_q, &p).unwrap();
        let q_not_p = mgr
            .create_from_expr(&Expr::and(Expr::atom("q"), Expr::not(Expr::atom("p"))))
            .unwrap();
        assert!(mgr.equals(&d, &q_not_p).unwrap());
        assert!(mgr.containment(&p, &p_or_q).unwrap());
        assert!(!mgr.equals(&p, &p_or_q).unwrap());
    }
}
