//! Propositional expressions over named atomic propositions.
//!
//! An [`Expr`] is the source form of a transition label: the
//! [`LabelFactory`][crate::label::LabelFactory] turns it into a BDD-backed
//! [`Label`][crate::label::Label], allocating one variable per distinct atom name.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expr {
    Const(bool),
    Atom(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Xor(Box<Expr>, Box<Expr>),
    Imply(Box<Expr>, Box<Expr>),
    Iff(Box<Expr>, Box<Expr>),
    Ite(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn constant(value: bool) -> Self {
        Expr::Const(value)
    }

    pub fn atom(name: impl Into<String>) -> Self {
        Expr::Atom(name.into())
    }

    pub fn not(value: Self) -> Self {
        match value {
            Expr::Const(b) => Expr::Const(!b),
            Expr::Not(inner) => *inner,
            _ => Expr::Not(Box::new(value)),
        }
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Expr::Xor(Box::new(lhs), Box::new(rhs))
    }

    pub fn imply(lhs: Self, rhs: Self) -> Self {
        Expr::Imply(Box::new(lhs), Box::new(rhs))
    }

    pub fn iff(lhs: Self, rhs: Self) -> Self {
        Expr::Iff(Box::new(lhs), Box::new(rhs))
    }

    pub fn ite(cond: Self, then: Self, else_: Self) -> Self {
        Expr::Ite(Box::new(cond), Box::new(then), Box::new(else_))
    }

    /// Names of all atoms occurring in the expression.
    pub fn atoms(&self) -> BTreeSet<&str> {
        let mut atoms = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Expr::Const(_) => {}
                Expr::Atom(name) => {
                    atoms.insert(name.as_str());
                }
                Expr::Not(a) => stack.push(a),
                Expr::And(a, b) | Expr::Or(a, b) | Expr::Xor(a, b) | Expr::Imply(a, b) | Expr::Iff(a, b) => {
                    stack.push(a);
                    stack.push(b);
                }
                Expr::Ite(a, b, c) => {
                    stack.push(a);
                    stack.push(b);
                    stack.push(c);
                }
            }
        }
        atoms
    }

    /// Evaluate under an assignment of atom names.
    pub fn eval<F>(&self, assignment: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            Expr::Const(b) => *b,
            Expr::Atom(name) => assignment(name),
            Expr::Not(a) => !a.eval(assignment),
            Expr::And(a, b) => a.eval(assignment) && b.eval(assignment),
            Expr::Or(a, b) => a.eval(assignment) || b.eval(assignment),
            Expr::Xor(a, b) => a.eval(assignment) ^ b.eval(assignment),
            Expr::Imply(a, b) => !a.eval(assignment) || b.eval(assignment),
            Expr::Iff(a, b) => a.eval(assignment) == b.eval(assignment),
            Expr::Ite(a, b, c) => {
                if a.eval(assignment) {
                    b.eval(assignment)
                } else {
                    c.eval(assignment)
                }
            }
        }
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Const(value)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::atom(name)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Const(true) => write!(f, "TRUE"),
            Expr::Const(false) => write!(f, "FALSE"),
            Expr::Atom(name) => write!(f, "{}", name),
            Expr::Not(a) => write!(f, "!{}", a),
            Expr::And(a, b) => write!(f, "({} & {})", a, b),
            Expr::Or(a, b) => write!(f, "({} | {})", a, b),
            Expr::Xor(a, b) => write!(f, "({} ^ {})", a, b),
            Expr::Imply(a, b) => write!(f, "({} -> {})", a, b),
            Expr::Iff(a, b) => write!(f, "({} <-> {})", a, b),
            Expr::Ite(a, b, c) => write!(f, "({} ? {} : {})", a, b, c),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_builders() {
        let e = Expr::and(Expr::atom("p"), Expr::or(Expr::atom("q"), Expr::not(Expr::atom("r"))));
        println!("e = {}", e);
        assert_eq!(e.to_string(), "(p & (q | !r))");
        assert_eq!(e.atoms(), BTreeSet::from(["p", "q", "r"]));
    }

    #[test]
    fn test_not_simplifies() {
        assert_eq!(Expr::not(Expr::not(Expr::atom("p"))), Expr::atom("p"));
        assert_eq!(Expr::not(Expr::constant(true)), Expr::Const(false));
    }

    #[test]
    fn test_eval() {
        let e = Expr::ite(Expr::atom("p"), Expr::atom("q"), Expr::iff(Expr::atom("q"), Expr::atom("r")));
        let assignment = |name: &str| name == "p" || name == "q";
        assert!(e.eval(&assignment));
        let assignment = |name: &str| name == "r";
        assert!(!e.eval(&assignment));
        assert!(Expr::imply(Expr::atom("p"), Expr::atom("q")).eval(&|_: &str| false));
    }
}
