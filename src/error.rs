//! Errors reported by automaton construction and the operation engine.

use crate::label::LabelKind;

/// Errors that abort the current operation.
///
/// All of them are configuration or usage errors: a partially built automaton is never
/// returned alongside one.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AutomataError {
    /// A label of one kind was attached to a location configured for another.
    WrongLabelKind { expected: LabelKind, found: LabelKind },
    /// The SERE compiler met an operator it has no construction for.
    UnknownSereOperator(String),
    /// Textual algorithm policy that names no known policy.
    UnknownAlgorithm(String),
    /// Textual reduction policy that names no known policy.
    UnknownReduction(String),
    /// Textual label kind that names no known kind.
    UnknownLabelKind(String),
    /// A location id that does not belong to the automaton.
    NoSuchLocation(u32),
}

impl std::fmt::Display for AutomataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomataError::WrongLabelKind { expected, found } => {
                write!(f, "Wrong label type: expected {}, found {}", expected, found)
            }
            AutomataError::UnknownSereOperator(op) => write!(f, "Unknown SERE operator: {}", op),
            AutomataError::UnknownAlgorithm(name) => write!(f, "Unknown algorithm type: {}", name),
            AutomataError::UnknownReduction(name) => write!(f, "Unknown reduction algorithm type: {}", name),
            AutomataError::UnknownLabelKind(name) => write!(f, "Unknown label type: {}", name),
            AutomataError::NoSuchLocation(id) => write!(f, "No location with id {}", id),
        }
    }
}

impl std::error::Error for AutomataError {}

pub type Result<T> = std::result::Result<T, AutomataError>;
