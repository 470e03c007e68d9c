use log::debug;

use crate::automaton::Automaton;
use crate::error::Result;
use crate::index::{PredecessorList, Worklist};
use crate::location::LocId;
use crate::manager::AutomataManager;

/// Which locations can reach a final location.
///
/// Filled during a single forward traversal: as soon as a location is known to be accepting,
/// the mark is pushed backward through the predecessors discovered so far.
struct Accepting {
    marks: Vec<bool>,
    preds: PredecessorList,
}

impl Accepting {
    fn compute(a: &Automaton) -> Self {
        let mut acc = Accepting {
            marks: vec![false; a.location_count()],
            preds: PredecessorList::new(a.location_count()),
        };

        let init = a.unique_init();
        let mut visited = vec![false; a.location_count()];
        visited[init.index()] = true;
        let mut stack = vec![init];
        if a.is_final(init) {
            acc.mark(init);
        }
        while let Some(loc) = stack.pop() {
            for t in a.location(loc).transitions() {
                acc.preds.add(loc, t.end);
                if acc.marks[t.end.index()] {
                    acc.mark(loc);
                }
                if !visited[t.end.index()] {
                    visited[t.end.index()] = true;
                    if a.is_final(t.end) {
                        acc.mark(t.end);
                    }
                    stack.push(t.end);
                }
            }
        }
        acc
    }

    fn mark(&mut self, loc: LocId) {
        if self.marks[loc.index()] {
            return;
        }
        self.marks[loc.index()] = true;
        let mut stack = vec![loc];
        while let Some(l) = stack.pop() {
            for &p in self.preds.of(l) {
                if !self.marks[p.index()] {
                    self.marks[p.index()] = true;
                    stack.push(p);
                }
            }
        }
    }

    fn is_accepting(&self, loc: LocId) -> bool {
        self.marks[loc.index()]
    }
}

impl AutomataManager {
    /// Copy of the part of `a` reachable from its initial location.
    pub fn prune(&self, a: &Automaton) -> Result<Automaton> {
        debug!("prune(a = {} locations)", a.location_count());

        let i = a.unique_init();
        let mut res = self.new_automaton();
        res.set_ty(a.ty());
        res.set_complete(a.is_complete());
        let mut map = Worklist::new();
        let init = self.find_or_copy(&mut res, &mut map, a, i, a.is_final(i));
        res.add_initial_location(init);
        self.drain_copy(&mut res, &mut map, a)?;
        Ok(res)
    }

    /// Copy of `a` without the locations from which no final location is reachable.
    ///
    /// When completeness is kept, the symbols of removed transitions are routed to a sink.
    pub fn prune_non_accepting(&self, a: &Automaton) -> Result<Automaton> {
        debug!("prune_non_accepting(a = {} locations)", a.location_count());

        let acc = Accepting::compute(a);
        let i = a.unique_init();
        let keep_complete = self.config().keep_complete;
        if !acc.is_accepting(i) {
            let mut res = self.create_empty()?;
            if keep_complete {
                let init = res.unique_init();
                self.update_complete(&mut res, init)?;
                res.set_complete(true);
            }
            return Ok(res);
        }

        let mut res = self.new_automaton();
        res.set_ty(a.ty());
        res.set_complete(keep_complete);
        let mut map = Worklist::new();
        let init = self.find_or_copy(&mut res, &mut map, a, i, a.is_final(i));
        res.add_initial_location(init);

        while let Some((loc, copy)) = map.pop() {
            for t in a.location(loc).transitions() {
                if acc.is_accepting(t.end) {
                    let end = self.find_or_copy(&mut res, &mut map, a, t.end, a.is_final(t.end));
                    res.create_transition(copy, end, t.label.clone())?;
                }
            }
            self.update_complete(&mut res, copy)?;
        }

        Ok(res)
    }
}
