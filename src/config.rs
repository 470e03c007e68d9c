//! Global options of the automata manager.
//!
//! Every policy has a textual form (`FromStr` / `Display`), so options coming from a command
//! line or a configuration file end up in the closed enums below; an unrecognised name is
//! reported as an [`AutomataError`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::AutomataError;
use crate::label::LabelKind;

/// How product-like constructions enumerate the successors of a location.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AlgorithmPolicy {
    /// Enumerate every symbol of the current support.
    AlphabetBased,
    /// Combine labels transition by transition.
    TransitionsBased,
    /// Decide per step, see [`AlgoChooser`][crate::chooser::AlgoChooser].
    Heuristic,
}

/// The concrete step an operation performs, as picked by the chooser.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AlgorithmType {
    AlphabetBased,
    TransitionsBased,
}

/// Which reduction [`nfa_reduction`][crate::manager::AutomataManager::nfa_reduction] applies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ReductionPolicy {
    Bisimulation,
    Brzozowski,
}

/// Payload flavor of the locations created by the manager.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LocationFlavor {
    Plain,
    Named,
    Mode,
    State,
}

/// Configuration shared by all operations of one [`AutomataManager`][crate::manager::AutomataManager].
///
/// # Examples
///
/// ```
/// use sere_automata::config::{AlgorithmPolicy, AutomataConfig};
///
/// let config = AutomataConfig {
///     algorithm: AlgorithmPolicy::Heuristic,
///     keep_complete: true,
///     ..Default::default()
/// };
/// assert!(!config.keep_type);
/// ```
#[derive(Debug, Clone)]
pub struct AutomataConfig {
    /// Successor enumeration policy (default: transitions-based)
    pub algorithm: AlgorithmPolicy,
    /// Label backend (default: BDD)
    pub label_kind: LabelKind,
    /// Reduction used by `nfa_reduction` (default: bisimulation)
    pub reduction: ReductionPolicy,
    /// Maintain the deterministic/non-deterministic flags eagerly (default: false)
    pub keep_type: bool,
    /// Keep every automaton complete through a sink location (default: false)
    pub keep_complete: bool,
    /// Memoize the support set inside every location (default: false)
    pub keep_support_set: bool,
    /// Reduce the result of every composite SERE construction (default: false)
    pub minimize_automaton: bool,
    /// Carried for the model-checking layer, unused by the operations (default: true)
    pub use_simulation_reduction: bool,
    /// Carried for the model-checking layer, unused by the operations (default: false)
    pub use_length_abstraction: bool,
    /// Payload flavor of new locations (default: plain)
    pub location_flavor: LocationFlavor,
}

impl Default for AutomataConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmPolicy::TransitionsBased,
            label_kind: LabelKind::Bdd,
            reduction: ReductionPolicy::Bisimulation,
            keep_type: false,
            keep_complete: false,
            keep_support_set: false,
            minimize_automaton: false,
            use_simulation_reduction: true,
            use_length_abstraction: false,
            location_flavor: LocationFlavor::Plain,
        }
    }
}

impl FromStr for AlgorithmPolicy {
    type Err = AutomataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alphabet" | "alphabet-based" => Ok(AlgorithmPolicy::AlphabetBased),
            "transitions" | "transitions-based" => Ok(AlgorithmPolicy::TransitionsBased),
            "heuristic" => Ok(AlgorithmPolicy::Heuristic),
            _ => Err(AutomataError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl Display for AlgorithmPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmPolicy::AlphabetBased => write!(f, "alphabet"),
            AlgorithmPolicy::TransitionsBased => write!(f, "transitions"),
            AlgorithmPolicy::Heuristic => write!(f, "heuristic"),
        }
    }
}

impl FromStr for ReductionPolicy {
    type Err = AutomataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bisimulation" | "bisim" => Ok(ReductionPolicy::Bisimulation),
            "brzozowski" | "minimize" => Ok(ReductionPolicy::Brzozowski),
            _ => Err(AutomataError::UnknownReduction(s.to_string())),
        }
    }
}

impl Display for ReductionPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReductionPolicy::Bisimulation => write!(f, "bisimulation"),
            ReductionPolicy::Brzozowski => write!(f, "brzozowski"),
        }
    }
}

impl FromStr for LabelKind {
    type Err = AutomataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bdd" => Ok(LabelKind::Bdd),
            "hybrid" => Ok(LabelKind::Hybrid),
            _ => Err(AutomataError::UnknownLabelKind(s.to_string())),
        }
    }
}
