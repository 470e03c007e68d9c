//! Sequential extended regular expressions.
//!
//! A [`Sere`] is an already-parsed SERE tree. [`AutomataManager::create_from_sere`] compiles it
//! bottom-up into an [`Automaton`], one operation per operator.
//!
//! ```
//! use sere_automata::ast::Expr;
//! use sere_automata::manager::AutomataManager;
//! use sere_automata::sere::Sere;
//!
//! let mgr = AutomataManager::default();
//! // {req ; ack[*]}
//! let sere = Sere::concat(Sere::prop(Expr::atom("req")), Sere::star(Sere::prop(Expr::atom("ack"))));
//! let aut = mgr.create_from_sere(&sere).unwrap();
//! assert!(!mgr.emptiness(&aut));
//! ```

use std::fmt::{Display, Formatter};

use log::debug;

use crate::ast::Expr;
use crate::automaton::Automaton;
use crate::error::{AutomataError, Result};
use crate::manager::AutomataManager;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CompoundOp {
    /// `r | s`
    Or,
    /// `r && s`: both sides match the same word
    LengthMatchingAnd,
    /// `r & s`: the shorter match is a prefix of the longer one
    NonLengthMatchingAnd,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RepeatOp {
    Star,
    Plus,
}

/// PSL operators that may appear in a parsed tree but do not denote a SERE.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TemporalOp {
    Next,
    Always,
    Eventually,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Sere {
    True,
    False,
    Prop(Expr),
    Concat(Box<Sere>, Box<Sere>),
    Fusion(Box<Sere>, Box<Sere>),
    Compound(CompoundOp, Box<Sere>, Box<Sere>),
    /// `r[*]` or `r[+]`; without a body, the standalone `[*]` or `[+]`.
    Repeat(RepeatOp, Option<Box<Sere>>),
    /// `r[*n]`
    RepeatCount(Box<Sere>, usize),
    Not(Box<Sere>),
    Bracket(Box<Sere>),
    Temporal(TemporalOp, Box<Sere>),
}

impl Sere {
    pub fn prop(expr: Expr) -> Self {
        Sere::Prop(expr)
    }

    pub fn concat(lhs: Self, rhs: Self) -> Self {
        Sere::Concat(Box::new(lhs), Box::new(rhs))
    }

    pub fn fusion(lhs: Self, rhs: Self) -> Self {
        Sere::Fusion(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Sere::Compound(CompoundOp::Or, Box::new(lhs), Box::new(rhs))
    }

    pub fn length_matching_and(lhs: Self, rhs: Self) -> Self {
        Sere::Compound(CompoundOp::LengthMatchingAnd, Box::new(lhs), Box::new(rhs))
    }

    pub fn non_length_matching_and(lhs: Self, rhs: Self) -> Self {
        Sere::Compound(CompoundOp::NonLengthMatchingAnd, Box::new(lhs), Box::new(rhs))
    }

    pub fn star(body: Self) -> Self {
        Sere::Repeat(RepeatOp::Star, Some(Box::new(body)))
    }

    pub fn plus(body: Self) -> Self {
        Sere::Repeat(RepeatOp::Plus, Some(Box::new(body)))
    }

    pub fn repeat(body: Self, n: usize) -> Self {
        Sere::RepeatCount(Box::new(body), n)
    }

    pub fn not(body: Self) -> Self {
        Sere::Not(Box::new(body))
    }

    pub fn bracket(body: Self) -> Self {
        Sere::Bracket(Box::new(body))
    }

    /// The propositional formula this SERE stands for, if it is a single letter.
    pub fn as_propositional(&self) -> Option<Expr> {
        match self {
            Sere::True => Some(Expr::constant(true)),
            Sere::False => Some(Expr::constant(false)),
            Sere::Prop(expr) => Some(expr.clone()),
            Sere::Bracket(inner) => inner.as_propositional(),
            _ => None,
        }
    }
}

impl Display for CompoundOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CompoundOp::Or => write!(f, "|"),
            CompoundOp::LengthMatchingAnd => write!(f, "&&"),
            CompoundOp::NonLengthMatchingAnd => write!(f, "&"),
        }
    }
}

impl Display for TemporalOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TemporalOp::Next => write!(f, "next"),
            TemporalOp::Always => write!(f, "always"),
            TemporalOp::Eventually => write!(f, "eventually!"),
        }
    }
}

impl Display for Sere {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Sere::True => write!(f, "TRUE"),
            Sere::False => write!(f, "FALSE"),
            Sere::Prop(expr) => write!(f, "{}", expr),
            Sere::Concat(l, r) => write!(f, "{} ; {}", l, r),
            Sere::Fusion(l, r) => write!(f, "{} : {}", l, r),
            Sere::Compound(op, l, r) => write!(f, "{} {} {}", l, op, r),
            Sere::Repeat(op, body) => {
                if let Some(body) = body {
                    write!(f, "{}", body)?;
                }
                match op {
                    RepeatOp::Star => write!(f, "[*]"),
                    RepeatOp::Plus => write!(f, "[+]"),
                }
            }
            Sere::RepeatCount(body, n) => write!(f, "{}[*{}]", body, n),
            Sere::Not(body) => write!(f, "!{}", body),
            Sere::Bracket(body) => write!(f, "{{{}}}", body),
            Sere::Temporal(op, body) => write!(f, "{} {}", op, body),
        }
    }
}

impl AutomataManager {
    /// Compile a SERE into an automaton.
    ///
    /// With `minimize_automaton` set, the configured reduction is applied after every
    /// concatenation, fusion, compound and non-propositional repetition.
    pub fn create_from_sere(&self, sere: &Sere) -> Result<Automaton> {
        debug!("create_from_sere(sere = {})", sere);

        let (res, need_min) = match sere {
            Sere::True => (self.create_from_expr(&Expr::constant(true))?, false),
            Sere::False => (self.create_empty()?, false),
            Sere::Prop(expr) => (self.create_from_expr(expr)?, false),
            Sere::Bracket(inner) => return self.create_from_sere(inner),
            Sere::Concat(l, r) => {
                let a1 = self.create_from_sere(l)?;
                let a2 = self.create_from_sere(r)?;
                (self.concat(&a1, &a2)?, true)
            }
            Sere::Fusion(l, r) => {
                let a1 = self.create_from_sere(l)?;
                let a2 = self.create_from_sere(r)?;
                (self.fusion(&a1, &a2)?, true)
            }
            Sere::Compound(op, l, r) => {
                let a1 = self.create_from_sere(l)?;
                let a2 = self.create_from_sere(r)?;
                let res = match op {
                    CompoundOp::Or => self.union(&a1, &a2)?,
                    CompoundOp::LengthMatchingAnd => self.intersection(&a1, &a2)?,
                    CompoundOp::NonLengthMatchingAnd => self.and(&a1, &a2)?,
                };
                (res, true)
            }
            Sere::Repeat(RepeatOp::Star, None) => (self.true_star()?, false),
            Sere::Repeat(RepeatOp::Plus, None) => {
                let t = self.create_from_expr(&Expr::constant(true))?;
                (self.kleene_plus(&t)?, false)
            }
            Sere::Repeat(RepeatOp::Star, Some(body)) => match body.as_propositional() {
                Some(expr) => (self.propositional_kleene_star(&expr)?, false),
                None => (self.kleene_star(&self.create_from_sere(body)?)?, true),
            },
            Sere::Repeat(RepeatOp::Plus, Some(body)) => (self.kleene_plus(&self.create_from_sere(body)?)?, true),
            Sere::RepeatCount(body, n) => (self.concat_n_times(&self.create_from_sere(body)?, *n)?, true),
            Sere::Not(body) => (self.complement(&self.create_from_sere(body)?)?, false),
            Sere::Temporal(op, _) => return Err(AutomataError::UnknownSereOperator(op.to_string())),
        };

        if need_min && self.config().minimize_automaton {
            self.nfa_reduction(&res)
        } else {
            Ok(res)
        }
    }
}
