use log::debug;

use crate::automaton::Automaton;
use crate::error::Result;
use crate::index::Worklist;
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Automaton of `L(a)^+`.
    ///
    /// Every transition entering a final location is doubled by a transition with the same
    /// label back to the initial location.
    pub fn kleene_plus(&self, a: &Automaton) -> Result<Automaton> {
        debug!("kleene_plus(a = {} locations)", a.location_count());

        let i = a.unique_init();

        let mut res = self.new_automaton();
        res.set_ty(a.ty());
        res.set_complete(a.is_complete());
        let mut map = Worklist::new();
        let init = self.find_or_copy(&mut res, &mut map, a, i, a.is_final(i));
        res.add_initial_location(init);

        while let Some((l, r)) = map.pop() {
            let mut looped = false;
            for t in a.location(l).transitions() {
                let end = self.find_or_copy(&mut res, &mut map, a, t.end, a.is_final(t.end));
                res.create_transition(r, end, t.label.clone())?;
                if a.is_final(t.end) && t.end != i {
                    res.create_transition(r, init, t.label.clone())?;
                    looped = true;
                }
            }
            if looped {
                self.update_type(&mut res, r);
            }
        }

        Ok(res)
    }

    /// Automaton of `L(a)^*`.
    ///
    /// When no transition of `a` enters its initial location, the initial location of the
    /// Kleene plus is simply made final; otherwise the empty word is added by a union.
    pub fn kleene_star(&self, a: &Automaton) -> Result<Automaton> {
        debug!("kleene_star(a = {} locations)", a.location_count());

        let i = a.unique_init();
        let mut plus = self.kleene_plus(a)?;
        if a.transitions().any(|(_, t)| t.end == i) {
            return self.union(&self.create_empty_word()?, &plus);
        }
        let init = plus.unique_init();
        plus.set_final(init, true);
        Ok(plus)
    }
}
