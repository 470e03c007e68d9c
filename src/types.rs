//! Type-safe wrapper for atomic propositions.
//!
//! Every atomic proposition that occurs in a label is a BDD variable. The newtype keeps
//! proposition identities apart from node indices and literal encodings.
use std::fmt;

/// A variable identifier (1-indexed).
///
/// Variables are allocated by the [`LabelFactory`][crate::label::LabelFactory] in the order
/// atomic propositions are first seen, which also fixes the BDD variable order.
///
/// # Invariants
///
/// - Variable IDs must be >= 1 (0 is reserved for terminals)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0`. Variables must be 1-indexed.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Variable IDs must be >= 1");
        Var(id)
    }

    /// Returns the raw variable ID as a `u32`.
    pub fn id(self) -> u32 {
        self.0
    }

    /// Signed literal of this variable with the given polarity.
    pub fn lit(self, positive: bool) -> i32 {
        if positive {
            self.0 as i32
        } else {
            -(self.0 as i32)
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_var_creation() {
        let v1 = Var::new(1);
        let v2 = Var::new(2);
        assert_eq!(v1.id(), 1);
        assert_eq!(v2.id(), 2);
        assert!(v1 < v2);
        assert_eq!(format!("{}", v2), "x2");
    }

    #[test]
    fn test_var_literals() {
        let v = Var::new(3);
        assert_eq!(v.lit(true), 3);
        assert_eq!(v.lit(false), -3);
    }

    #[test]
    #[should_panic(expected = "Variable IDs must be >= 1")]
    fn test_var_zero_panics() {
        Var::new(0);
    }
}
