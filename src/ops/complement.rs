use log::debug;

use crate::automaton::Automaton;
use crate::error::Result;
use crate::location::{LocId, TransitionType};
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Automaton of the complement of `L(a)`.
    ///
    /// Finality is swapped on a deterministic and complete automaton; `a` is determinized
    /// first unless it is flagged as both already.
    pub fn complement(&self, a: &Automaton) -> Result<Automaton> {
        debug!("complement(a = {} locations)", a.location_count());

        let mut res = if a.ty() == TransitionType::Deterministic && a.is_complete() {
            self.prune(a)?
        } else {
            self.determinize(a)?
        };

        for index in 0..res.location_count() {
            let loc = res.location_mut(LocId::from_index(index));
            let is_final = loc.is_final();
            loc.set_final(!is_final);
        }
        res.rebuild_finals();
        res.set_sink(None);
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use crate::ast::Expr;
    use crate::config::AutomataConfig;
    use crate::manager::AutomataManager;

    #[test]
    fn test_complement() {
        let mgr = AutomataManager::default();
        let p = mgr.create_from_expr(&Expr::atom("p")).unwrap();
        let c = mgr.complement(&p).unwrap();
        assert!(c.sink().is_none());

        let vp = mgr.labels().var("p");
        let sp = mgr.labels().symbol([vp.lit(true)]);
        let sn = mgr.labels().symbol([vp.lit(false)]);
        assert!(c.accepts(&[]));
        assert!(!c.accepts(&[sp.clone()]));
        assert!(c.accepts(&[sn]));
        assert!(c.accepts(&[sp.clone(), sp]));

        assert!(mgr.emptiness(&mgr.intersection(&p, &c).unwrap()));
    }

    #[test]
    fn test_complement_of_complete_deterministic() {
        let mgr = AutomataManager::new(AutomataConfig {
            keep_type: true,
            keep_complete: true,
            ..Default::default()
        });
        let p = mgr.create_from_expr(&Expr::atom("p")).unwrap();
        let c = mgr.complement(&p).unwrap();
        // No subset construction needed: same shape, finality swapped.
        assert_eq!(c.location_count(), p.location_count());
        assert!(mgr.equals(&mgr.complement(&c).unwrap(), &p).unwrap());
    }

    #[test]
    fn test_complement_of_everything() {
        let mgr = AutomataManager::default();
        let all = mgr.true_star().unwrap();
        assert!(mgr.emptiness(&mgr.complement(&all).unwrap()));
    }
}
