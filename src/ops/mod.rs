//! The operation engine.
//!
//! Every construction is an on-the-fly traversal: a [`Worklist`] maps operand locations
//! (single locations, pairs or subsets) to result locations, and each popped correspondence is
//! expanded exactly once. The helpers below are shared by all constructions: structural copies
//! of operand locations and the incremental maintenance of the type and completeness flags.

mod complement;
mod concat;
mod determinize;
mod emptiness;
mod fusion;
mod intersection;
mod kleene;
mod prune;
mod reduce;
mod reverse;
mod union;

use crate::automaton::Automaton;
use crate::error::Result;
use crate::index::Worklist;
use crate::location::{LocId, TransitionType};
use crate::manager::AutomataManager;

impl AutomataManager {
    /// Recompute the type of `loc` (if types are kept) and propagate it to the automaton.
    pub(crate) fn update_type(&self, res: &mut Automaton, loc: LocId) {
        if self.config().keep_type {
            if res.location_mut(loc).update_type() == TransitionType::NonDeterministic {
                res.set_ty(TransitionType::NonDeterministic);
            }
        } else {
            res.location_mut(loc).set_ty(TransitionType::Unknown);
            res.set_ty(TransitionType::Unknown);
        }
    }

    /// Complete `loc` through the sink (if completeness is kept), creating the sink lazily.
    pub(crate) fn update_complete(&self, res: &mut Automaton, loc: LocId) -> Result<()> {
        if self.config().keep_complete {
            let missing = res.sink() != Some(loc) && res.location(loc).completion_label(self.labels()).is_some();
            if missing {
                let sink = res.ensure_sink(self.labels())?;
                res.location_mut(loc).update_is_complete(sink, self.labels())?;
            } else {
                res.location_mut(loc).set_complete(true);
            }
        } else {
            res.location_mut(loc).set_complete(false);
            res.set_complete(false);
        }
        Ok(())
    }

    pub(crate) fn update_type_and_complete(&self, res: &mut Automaton, loc: LocId) -> Result<()> {
        self.update_complete(res, loc)?;
        self.update_type(res, loc);
        Ok(())
    }

    /// Flags of a result built from two operands.
    pub(crate) fn init_type_complete(&self, res: &mut Automaton, a1: &Automaton, a2: &Automaton) {
        let ty = if !self.config().keep_type {
            TransitionType::Unknown
        } else if a1.ty() == TransitionType::NonDeterministic || a2.ty() == TransitionType::NonDeterministic {
            TransitionType::NonDeterministic
        } else {
            TransitionType::Deterministic
        };
        res.set_ty(ty);
        res.set_complete(self.config().keep_complete && a1.is_complete() && a2.is_complete());
    }

    /// Result location standing for `loc` of `src`, copied on first use.
    ///
    /// The sink of `src` is mapped onto the sink of `res` when `res` already has one.
    pub(crate) fn find_or_copy(
        &self,
        res: &mut Automaton,
        map: &mut Worklist<LocId>,
        src: &Automaton,
        loc: LocId,
        is_final: bool,
    ) -> LocId {
        if let Some(copy) = map.get(&loc) {
            return copy;
        }
        let is_sink = src.sink() == Some(loc);
        if is_sink {
            if let Some(sink) = res.sink() {
                map.alias(loc, sink);
                return sink;
            }
        }

        let (copy, _) = map.find_or_insert_with(loc, |_| {
            let original = src.location(loc);
            let copy = res.add_location(is_final, original.payload().clone());
            let new = res.location_mut(copy);
            new.set_ty(original.ty());
            new.set_complete(original.is_complete());
            copy
        });
        if is_sink {
            res.set_sink(Some(copy));
        }
        copy
    }

    /// Copy the outgoing transitions of `from` (in `src`) onto the result location `onto`.
    pub(crate) fn copy_transitions_onto(
        &self,
        res: &mut Automaton,
        map: &mut Worklist<LocId>,
        src: &Automaton,
        from: LocId,
        onto: LocId,
    ) -> Result<()> {
        for t in src.location(from).transitions() {
            let end = self.find_or_copy(res, map, src, t.end, src.is_final(t.end));
            res.create_transition(onto, end, t.label.clone())?;
        }
        Ok(())
    }

    /// Expand every scheduled copy until the reachable part of `src` is in `res`.
    pub(crate) fn drain_copy(&self, res: &mut Automaton, map: &mut Worklist<LocId>, src: &Automaton) -> Result<()> {
        while let Some((loc, copy)) = map.pop() {
            self.copy_transitions_onto(res, map, src, loc, copy)?;
        }
        Ok(())
    }
}
