use std::collections::HashMap;

use log::debug;

use crate::automaton::Automaton;
use crate::error::Result;
use crate::location::{LocId, TransitionType};
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Reachable part of `a` with every transition reversed and no initial location.
    ///
    /// The copy of the initial location of `a` is the only final location. Returns the copy
    /// and the map from locations of `a` to their copies.
    pub(crate) fn reverse_locations(&self, a: &Automaton) -> Result<(Automaton, HashMap<LocId, LocId>)> {
        let i = a.unique_init();
        let reachable = a.reachable();

        let mut res = self.new_automaton();
        let mut map = HashMap::with_capacity(reachable.len());
        for &loc in &reachable {
            let copy = res.add_location(loc == i, a.location(loc).payload().clone());
            map.insert(loc, copy);
        }
        for (from, t) in a.transitions() {
            if let Some(&copy) = map.get(&from) {
                res.create_transition(map[&t.end], copy, t.label.clone())?;
            }
        }
        Ok((res, map))
    }

    /// Automaton of the mirror language of `a`.
    ///
    /// A fresh initial location reads the last letter of a word: it gets one transition per
    /// transition of `a` entering a final location. The type and completeness flags are not
    /// maintained: the result is `Unknown` and incomplete.
    pub fn reverse(&self, a: &Automaton) -> Result<Automaton> {
        debug!("reverse(a = {} locations)", a.location_count());

        let (mut res, map) = self.reverse_locations(a)?;
        let init = self.add_location(&mut res, a.is_final(a.unique_init()));
        res.add_initial_location(init);

        for (from, t) in a.transitions() {
            if a.is_final(t.end) {
                if let Some(&copy) = map.get(&from) {
                    res.create_transition(init, copy, t.label.clone())?;
                }
            }
        }

        res.set_ty(TransitionType::Unknown);
        res.set_complete(false);
        let mut res = self.prune(&res)?;
        res.set_sink(None);
        Ok(res)
    }
}
