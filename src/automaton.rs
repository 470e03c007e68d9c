//! Symbolic finite automata.
//!
//! An [`Automaton`] owns its locations, which own their outgoing transitions. Locations are
//! addressed by [`LocId`]; ids are dense (`1..=location_count`) and never reused.
//!
//! Construction goes through the [`AutomataManager`][crate::manager::AutomataManager], which
//! knows the configuration the flags below are maintained for.

use std::collections::{BTreeSet, HashSet, VecDeque};

use log::debug;

use crate::error::{AutomataError, Result};
use crate::index::{LocSet, PredecessorList};
use crate::label::{Label, LabelFactory, LabelKind};
use crate::location::{LocId, Location, LocationPayload, Transition, TransitionType};

#[derive(Debug, Clone)]
pub struct Automaton {
    locations: Vec<Location>,
    initial: Vec<LocId>,
    finals: Vec<LocId>,
    sink: Option<LocId>,
    ty: TransitionType,
    complete: bool,
    label_kind: LabelKind,
    keep_support: bool,
}

impl Automaton {
    /// Automaton without any location.
    ///
    /// Every public construction adds the initial location right away.
    pub(crate) fn new(label_kind: LabelKind, keep_support: bool) -> Self {
        Self {
            locations: Vec::new(),
            initial: Vec::new(),
            finals: Vec::new(),
            sink: None,
            ty: TransitionType::Unknown,
            complete: false,
            label_kind,
            keep_support,
        }
    }

    pub fn label_kind(&self) -> LabelKind {
        self.label_kind
    }

    pub fn ty(&self) -> TransitionType {
        self.ty
    }
    pub fn set_ty(&mut self, ty: TransitionType) {
        self.ty = ty;
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
    pub fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    pub fn sink(&self) -> Option<LocId> {
        self.sink
    }
    pub(crate) fn set_sink(&mut self, sink: Option<LocId>) {
        self.sink = sink;
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: LocId) -> &Location {
        &self.locations[id.index()]
    }

    pub fn location_mut(&mut self, id: LocId) -> &mut Location {
        &mut self.locations[id.index()]
    }

    /// Location with the raw id `id`, if it exists.
    pub fn get(&self, id: u32) -> Option<&Location> {
        if id == 0 {
            return None;
        }
        self.locations.get(id as usize - 1)
    }

    pub fn finals(&self) -> &[LocId] {
        &self.finals
    }

    pub fn is_final(&self, id: LocId) -> bool {
        self.location(id).is_final()
    }

    pub fn set_final(&mut self, id: LocId, is_final: bool) {
        let loc = &mut self.locations[id.index()];
        if loc.is_final() == is_final {
            return;
        }
        loc.set_final(is_final);
        if is_final {
            self.finals.push(id);
        } else {
            self.finals.retain(|&f| f != id);
        }
    }

    /// Rebuild the final location list from the location flags.
    pub(crate) fn rebuild_finals(&mut self) {
        self.finals = self.locations.iter().filter(|l| l.is_final()).map(|l| l.id()).collect();
    }

    /// Append a location and return its id.
    pub fn add_location(&mut self, is_final: bool, payload: LocationPayload) -> LocId {
        let id = LocId::from_index(self.locations.len());
        let mut loc = Location::new(id, is_final, self.label_kind, self.keep_support);
        loc.set_payload(payload);
        self.locations.push(loc);
        if is_final {
            self.finals.push(id);
        }
        id
    }

    /// Mark `id` as the initial location.
    ///
    /// # Panics
    ///
    /// Panics if an initial location is already set.
    pub fn add_initial_location(&mut self, id: LocId) {
        assert!(self.initial.is_empty(), "Initial location is already set");
        self.initial.push(id);
    }

    /// The sole initial location.
    ///
    /// # Panics
    ///
    /// Panics if the initial location set is not a singleton.
    pub fn unique_init(&self) -> LocId {
        assert_eq!(self.initial.len(), 1, "Initial location set is not a singleton");
        self.initial[0]
    }

    pub fn create_transition(&mut self, from: LocId, to: LocId, label: Label) -> Result<()> {
        debug!("create_transition({} -> {}, label = {})", from, to, label);
        self.locations[from.index()].create_transition(to, label)?;
        Ok(())
    }

    /// Add a transition between two locations given by raw ids.
    ///
    /// The type of the source location and of the automaton become unknown.
    pub fn new_transition(&mut self, from: u32, to: u32, label: Label) -> Result<()> {
        let from = self.get(from).ok_or(AutomataError::NoSuchLocation(from))?.id();
        let to = self.get(to).ok_or(AutomataError::NoSuchLocation(to))?.id();
        self.create_transition(from, to, label)?;
        self.location_mut(from).set_ty(TransitionType::Unknown);
        self.ty = TransitionType::Unknown;
        Ok(())
    }

    /// The sink location, created on first use with a `true` self-loop.
    pub fn ensure_sink(&mut self, factory: &LabelFactory) -> Result<LocId> {
        if let Some(sink) = self.sink {
            return Ok(sink);
        }
        let sink = self.add_location(false, LocationPayload::Plain);
        debug!("new sink {}", sink);
        self.create_transition(sink, sink, factory.mk_true())?;
        let loc = self.location_mut(sink);
        loc.set_ty(TransitionType::Deterministic);
        loc.set_complete(true);
        self.sink = Some(sink);
        Ok(sink)
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn transition_count(&self) -> usize {
        self.locations.iter().map(|l| l.transitions().len()).sum()
    }

    /// Number of transitions whose (source, destination) pair already occurred.
    pub fn transitions_duplicate_count(&self) -> usize {
        self.locations
            .iter()
            .map(|l| {
                let mut seen = HashSet::new();
                l.transitions().iter().filter(|t| !seen.insert(t.end)).count()
            })
            .sum()
    }

    /// All transitions with their source location.
    pub fn transitions(&self) -> impl Iterator<Item = (LocId, &Transition)> + '_ {
        self.locations
            .iter()
            .flat_map(|l| l.transitions().iter().map(move |t| (l.id(), t)))
    }

    pub fn predecessors(&self) -> PredecessorList {
        let mut preds = PredecessorList::new(self.locations.len());
        for (from, t) in self.transitions() {
            preds.add(from, t.end);
        }
        preds
    }

    /// Locations reachable from the initial location, the initial location included.
    pub fn reachable(&self) -> LocSet {
        let init = self.unique_init();
        let mut visited = BTreeSet::from([init]);
        let mut stack = vec![init];
        while let Some(loc) = stack.pop() {
            for t in self.location(loc).transitions() {
                if visited.insert(t.end) {
                    stack.push(t.end);
                }
            }
        }
        visited
    }

    /// Does the automaton accept `word`, a sequence of symbols (full assignments)?
    pub fn accepts(&self, word: &[Label]) -> bool {
        let mut current = BTreeSet::from([self.unique_init()]);
        for symbol in word {
            current = current
                .iter()
                .flat_map(|&loc| self.location(loc).transitions())
                .filter(|t| t.label.is_model_of(symbol))
                .map(|t| t.end)
                .collect();
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|&loc| self.is_final(loc))
    }

    /// A shortest accepted word, as one symbol per letter; `None` for the empty language.
    pub fn shortest_word(&self) -> Option<Vec<Label>> {
        let init = self.unique_init();
        let mut parent: Vec<Option<(LocId, &Label)>> = vec![None; self.locations.len()];
        let mut visited = BTreeSet::from([init]);
        let mut queue = VecDeque::from([init]);
        while let Some(loc) = queue.pop_front() {
            if self.is_final(loc) {
                let mut word = Vec::new();
                let mut current = loc;
                while let Some((from, label)) = parent[current.index()] {
                    word.push(label.pick_symbol()?);
                    current = from;
                }
                word.reverse();
                return Some(word);
            }
            for t in self.location(loc).transitions() {
                if t.label.is_sat() && visited.insert(t.end) {
                    parent[t.end.index()] = Some((loc, &t.label));
                    queue.push_back(t.end);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::ast::Expr;

    fn two_locations(factory: &LabelFactory) -> Automaton {
        let mut a = Automaton::new(factory.kind(), false);
        let q1 = a.add_location(false, LocationPayload::Plain);
        let q2 = a.add_location(true, LocationPayload::Plain);
        a.add_initial_location(q1);
        a.create_transition(q1, q2, factory.from_expr(&Expr::atom("p")))
            .unwrap();
        a
    }

    #[test]
    fn test_add_location() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let a = two_locations(&factory);
        assert_eq!(a.location_count(), 2);
        assert_eq!(a.transition_count(), 1);
        assert_eq!(a.unique_init(), LocId::new(1));
        assert_eq!(a.finals(), &[LocId::new(2)]);
    }

    #[test]
    fn test_set_final() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let mut a = two_locations(&factory);
        a.set_final(LocId::new(1), true);
        a.set_final(LocId::new(1), true);
        assert_eq!(a.finals(), &[LocId::new(2), LocId::new(1)]);
        a.set_final(LocId::new(2), false);
        assert_eq!(a.finals(), &[LocId::new(1)]);
    }

    #[test]
    #[should_panic(expected = "Initial location is already set")]
    fn test_second_initial_panics() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let mut a = two_locations(&factory);
        a.add_initial_location(LocId::new(2));
    }

    #[test]
    #[should_panic(expected = "Initial location set is not a singleton")]
    fn test_no_initial_panics() {
        let a = Automaton::new(LabelKind::Bdd, false);
        a.unique_init();
    }

    #[test]
    fn test_new_transition() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let mut a = two_locations(&factory);
        a.new_transition(2, 2, factory.mk_true()).unwrap();
        assert_eq!(a.transition_count(), 2);
        assert_eq!(
            a.new_transition(1, 3, factory.mk_true()),
            Err(AutomataError::NoSuchLocation(3))
        );
        assert_eq!(
            a.new_transition(0, 1, factory.mk_true()),
            Err(AutomataError::NoSuchLocation(0))
        );
    }

    #[test]
    fn test_duplicate_count() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let mut a = two_locations(&factory);
        let q = factory.from_expr(&Expr::atom("q"));
        a.create_transition(LocId::new(1), LocId::new(2), q.clone()).unwrap();
        a.create_transition(LocId::new(1), LocId::new(2), q).unwrap();
        assert_eq!(a.transitions_duplicate_count(), 2);
        a.location_mut(LocId::new(1)).merge_duplicates();
        assert_eq!(a.transitions_duplicate_count(), 0);
        assert_eq!(a.transition_count(), 1);
    }

    #[test]
    fn test_transitions_and_predecessors() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let mut a = two_locations(&factory);
        a.create_transition(LocId::new(2), LocId::new(1), factory.mk_true())
            .unwrap();
        let sources: Vec<LocId> = a.transitions().map(|(from, _)| from).collect();
        assert_eq!(sources, vec![LocId::new(1), LocId::new(2)]);

        let preds = a.predecessors();
        assert_eq!(preds.of(LocId::new(1)), &[LocId::new(2)]);
        assert_eq!(preds.of(LocId::new(2)), &[LocId::new(1)]);
    }

    #[test]
    fn test_ensure_sink() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let mut a = two_locations(&factory);
        let sink = a.ensure_sink(&factory).unwrap();
        assert_eq!(a.ensure_sink(&factory).unwrap(), sink);
        assert_eq!(a.location_count(), 3);
        let loop_ = &a.location(sink).transitions()[0];
        assert_eq!(loop_.end, sink);
        assert!(loop_.label.is_true());
    }

    #[test]
    fn test_accepts() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let a = two_locations(&factory);
        let p = factory.var("p");
        let yes = factory.symbol([p.lit(true)]);
        let no = factory.symbol([p.lit(false)]);

        assert!(a.accepts(&[yes.clone()]));
        assert!(!a.accepts(&[no]));
        assert!(!a.accepts(&[]));
        assert!(!a.accepts(&[yes.clone(), yes]));
    }

    #[test]
    fn test_shortest_word() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let mut a = two_locations(&factory);
        let word = a.shortest_word().unwrap();
        assert_eq!(word.len(), 1);
        assert!(a.accepts(&word));

        a.set_final(LocId::new(2), false);
        assert_eq!(a.shortest_word(), None);

        a.set_final(LocId::new(1), true);
        assert_eq!(a.shortest_word(), Some(vec![]));
    }
}
