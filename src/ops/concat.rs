use log::debug;

use crate::automaton::Automaton;
use crate::error::Result;
use crate::index::Worklist;
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Automaton of `L(a1)·L(a2)`.
    ///
    /// The initial location of `a2` is not copied on its own: its outgoing transitions are
    /// spliced onto every final location of `a1`, which stays final only when `a2` accepts
    /// the empty word.
    pub fn concat(&self, a1: &Automaton, a2: &Automaton) -> Result<Automaton> {
        debug!(
            "concat(a1 = {} locations, a2 = {} locations)",
            a1.location_count(),
            a2.location_count()
        );

        let (i1, i2) = (a1.unique_init(), a2.unique_init());
        let empty2 = a2.is_final(i2);
        let keep_complete = self.config().keep_complete;

        let mut res = self.new_automaton();
        let init = res.add_location(a1.is_final(i1) && empty2, a1.location(i1).payload().clone());
        res.add_initial_location(init);
        self.init_type_complete(&mut res, a1, a2);

        let mut map1 = Worklist::new();
        let mut map2 = Worklist::new();
        map1.insert(i1, init);

        while let Some((l1, r)) = map1.pop() {
            let loc1 = a1.location(l1);
            for t in loc1.transitions() {
                if keep_complete && loc1.is_final() && a1.sink() == Some(t.end) {
                    continue;
                }
                let end = self.find_or_copy(&mut res, &mut map1, a1, t.end, a1.is_final(t.end) && empty2);
                res.create_transition(r, end, t.label.clone())?;
            }
            if loc1.is_final() {
                self.copy_transitions_onto(&mut res, &mut map2, a2, i2, r)?;
            }
            self.update_type_and_complete(&mut res, r)?;
        }

        self.drain_copy(&mut res, &mut map2, a2)?;
        Ok(res)
    }

    /// Automaton of `L(a)^n`; `n = 0` gives the empty-word automaton.
    pub fn concat_n_times(&self, a: &Automaton, n: usize) -> Result<Automaton> {
        debug!("concat_n_times(a = {} locations, n = {})", a.location_count(), n);
        if n == 0 {
            return self.create_empty_word();
        }
        let mut res = a.clone();
        for _ in 1..n {
            res = self.concat(&res, a)?;
        }
        Ok(res)
    }
}
