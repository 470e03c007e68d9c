//! Locations and transitions of a symbolic automaton.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

use log::debug;

use crate::error::{AutomataError, Result};
use crate::label::{Label, LabelFactory, LabelKind};
use crate::types::Var;

/// A location identifier (1-indexed).
///
/// Ids are assigned in insertion order and never reused, so `id - 1` is a dense index into
/// per-location side tables.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LocId(u32);

impl LocId {
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Location IDs must be >= 1");
        LocId(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    /// Dense index `id - 1`.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn from_index(index: usize) -> Self {
        LocId::new(index as u32 + 1)
    }
}

impl Display for LocId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Determinism of a location or of a whole automaton.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TransitionType {
    Deterministic,
    NonDeterministic,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub end: LocId,
    pub label: Label,
}

/// Flavor-specific data attached to a location.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationPayload {
    Plain,
    Named(String),
    Mode(String),
    State(Label),
}

#[derive(Debug, Clone)]
pub struct Location {
    id: LocId,
    is_final: bool,
    transitions: Vec<Transition>,
    ty: TransitionType,
    complete: bool,
    support: Option<BTreeSet<Var>>,
    label_kind: LabelKind,
    payload: LocationPayload,
}

impl Location {
    pub(crate) fn new(id: LocId, is_final: bool, label_kind: LabelKind, keep_support: bool) -> Self {
        Self {
            id,
            is_final,
            transitions: Vec::new(),
            ty: TransitionType::Unknown,
            complete: false,
            support: if keep_support { Some(BTreeSet::new()) } else { None },
            label_kind,
            payload: LocationPayload::Plain,
        }
    }

    pub fn id(&self) -> LocId {
        self.id
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }
    pub(crate) fn set_final(&mut self, is_final: bool) {
        self.is_final = is_final;
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
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

    pub fn label_kind(&self) -> LabelKind {
        self.label_kind
    }

    pub fn payload(&self) -> &LocationPayload {
        &self.payload
    }
    pub fn set_payload(&mut self, payload: LocationPayload) {
        self.payload = payload;
    }

    /// Append a transition to `end`.
    ///
    /// Fails if the label was built for another label kind.
    pub fn create_transition(&mut self, end: LocId, label: Label) -> Result<&Transition> {
        if label.kind() != self.label_kind {
            return Err(AutomataError::WrongLabelKind {
                expected: self.label_kind,
                found: label.kind(),
            });
        }
        if let Some(support) = &mut self.support {
            support.extend(label.support());
        }
        self.transitions.push(Transition { end, label });
        Ok(&self.transitions[self.transitions.len() - 1])
    }

    /// Atomic propositions of the outgoing labels.
    ///
    /// Returns the memoized set when the location keeps one, otherwise computes it afresh.
    pub fn support_set(&self) -> BTreeSet<Var> {
        match &self.support {
            Some(support) => support.clone(),
            None => self.transitions.iter().flat_map(|t| t.label.support()).collect(),
        }
    }

    /// Collapse transitions sharing a destination into one labeled with their disjunction.
    pub fn merge_duplicates(&mut self) {
        let mut seen: HashMap<LocId, usize> = HashMap::new();
        let mut merged: Vec<Transition> = Vec::with_capacity(self.transitions.len());
        for t in self.transitions.drain(..) {
            match seen.get(&t.end) {
                Some(&i) => {
                    merged[i].label = merged[i].label.or(&t.label);
                }
                None => {
                    seen.insert(t.end, merged.len());
                    merged.push(t);
                }
            }
        }
        self.transitions = merged;
    }

    /// Recompute the type: deterministic iff no two outgoing labels overlap.
    pub fn update_type(&mut self) -> TransitionType {
        let n = self.transitions.len();
        let overlap = (0..n).any(|i| {
            (i + 1..n).any(|j| {
                self.transitions[i]
                    .label
                    .and(&self.transitions[j].label)
                    .is_sat()
            })
        });
        self.ty = if overlap {
            TransitionType::NonDeterministic
        } else {
            TransitionType::Deterministic
        };
        self.ty
    }

    /// Label of the symbols no outgoing transition reads, if any.
    pub fn completion_label(&self, factory: &LabelFactory) -> Option<Label> {
        if self.transitions.is_empty() {
            return Some(factory.mk_true());
        }
        let covered = self
            .transitions
            .iter()
            .skip(1)
            .fold(self.transitions[0].label.clone(), |acc, t| acc.or(&t.label));
        let rest = covered.not();
        if rest.is_sat() {
            Some(rest)
        } else {
            None
        }
    }

    /// Route the symbols without a transition to `sink`. Returns whether a transition was added.
    pub fn update_is_complete(&mut self, sink: LocId, factory: &LabelFactory) -> Result<bool> {
        if self.transitions.is_empty() && self.id == sink {
            return Ok(false);
        }
        let changed = match self.completion_label(factory) {
            Some(rest) => {
                debug!("complete {} -> {} with {}", self.id, sink, rest);
                self.create_transition(sink, rest)?;
                true
            }
            None => false,
        };
        self.complete = true;
        Ok(changed)
    }
}
