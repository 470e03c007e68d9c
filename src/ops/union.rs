use log::debug;

use crate::automaton::Automaton;
use crate::error::Result;
use crate::index::Worklist;
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Automaton of `L(a1) ∪ L(a2)`.
    ///
    /// A fresh initial location takes over the outgoing transitions of both initial
    /// locations; the rest of each operand is copied as is, with both sinks collapsed into
    /// one.
    pub fn union(&self, a1: &Automaton, a2: &Automaton) -> Result<Automaton> {
        debug!(
            "union(a1 = {} locations, a2 = {} locations)",
            a1.location_count(),
            a2.location_count()
        );

        let (i1, i2) = (a1.unique_init(), a2.unique_init());

        let mut res = self.new_automaton();
        let init = self.add_location(&mut res, a1.is_final(i1) || a2.is_final(i2));
        res.add_initial_location(init);
        self.init_type_complete(&mut res, a1, a2);

        let mut map1 = Worklist::new();
        self.copy_transitions_onto(&mut res, &mut map1, a1, i1, init)?;
        self.drain_copy(&mut res, &mut map1, a1)?;

        let mut map2 = Worklist::new();
        self.copy_transitions_onto(&mut res, &mut map2, a2, i2, init)?;
        self.drain_copy(&mut res, &mut map2, a2)?;

        self.update_type_and_complete(&mut res, init)?;
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::ast::Expr;
    use crate::config::AutomataConfig;
    use crate::location::TransitionType;
    use crate::manager::AutomataManager;

    #[test]
    fn test_union() {
        let mgr = AutomataManager::default();
        let p = mgr.create_from_expr(&Expr::atom("p")).unwrap();
        let q = mgr.create_from_expr(&Expr::atom("q")).unwrap();
        let u = mgr.union(&p, &q).unwrap();
        println!("union: {} locations, {} transitions", u.location_count(), u.transition_count());

        assert_eq!(u.location_count(), 3);
        assert_eq!(u.transition_count(), 2);
        assert!(mgr.containment(&p, &u).unwrap());
        assert!(mgr.containment(&q, &u).unwrap());
        assert!(!mgr.containment(&u, &p).unwrap());
    }

    #[test]
    fn test_union_with_looping_init() {
        let mgr = AutomataManager::default();
        let p_star = mgr.propositional_kleene_star(&Expr::atom("p")).unwrap();
        let q = mgr.create_from_expr(&Expr::atom("q")).unwrap();
        let u = mgr.union(&p_star, &q).unwrap();

        let (vp, vq) = (mgr.labels().var("p"), mgr.labels().var("q"));
        let p_only = mgr.labels().symbol([vp.lit(true), vq.lit(false)]);
        let q_only = mgr.labels().symbol([vp.lit(false), vq.lit(true)]);
        assert!(u.accepts(&[]));
        assert!(u.accepts(&[p_only.clone(), p_only.clone()]));
        assert!(u.accepts(&[q_only.clone()]));
        // The loop of `p[*]` must not lead back into `q`.
        assert!(!u.accepts(&[p_only, q_only]));
    }

    #[test]
    fn test_union_shares_sink() {
        let mgr = AutomataManager::new(AutomataConfig {
            keep_complete: true,
            keep_type: true,
            ..Default::default()
        });
        let p = mgr.create_from_expr(&Expr::atom("p")).unwrap();
        let q = mgr.create_from_expr(&Expr::atom("q")).unwrap();
        let u = mgr.union(&p, &q).unwrap();

        // init, two copies of the final location, one sink
        assert_eq!(u.location_count(), 4);
        assert!(u.is_complete());
        assert_eq!(u.ty(), TransitionType::NonDeterministic);
        assert!(mgr.equals(&u, &mgr.union(&q, &p).unwrap()).unwrap());
    }
}
