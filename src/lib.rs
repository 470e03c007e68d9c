//! # sere-automata: Symbolic Finite Automata for SEREs
//!
//! **`sere-automata`** compiles sequential extended regular expressions (SEREs) into finite automata
//! over a symbolic alphabet, and implements the automata-theoretic operations needed to decide
//! language-level properties: union, intersection, concatenation, Kleene star and plus, fusion,
//! reversal, complementation, determinization, minimization and emptiness checking.
//!
//! ## Symbolic Alphabet
//!
//! A letter is a full assignment of the atomic propositions in use. Transitions are not labeled
//! with single letters but with propositional formulas, represented canonically as BDDs: a
//! transition labeled `req & !ack` is taken by every letter in which `req` holds and `ack` does not.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All operations go through the
//!   [`AutomataManager`][crate::manager::AutomataManager], which owns the configuration and the
//!   label factory. Every operation builds a fresh automaton and leaves its operands untouched.
//! - **Flag Bookkeeping**: Automata and locations carry deterministic/complete flags, maintained
//!   on demand (`keep_type`, `keep_complete`), and a sink location when completeness is kept.
//! - **Algorithm Selection**: Products and subset constructions pick between alphabet-based and
//!   transition-based label synthesis per step, driven by a size heuristic.
//!
//! ## Basic Usage
//!
//! ```rust
//! use sere_automata::ast::Expr;
//! use sere_automata::manager::AutomataManager;
//! use sere_automata::sere::Sere;
//!
//! // 1. Initialize the manager
//! let mgr = AutomataManager::default();
//!
//! // 2. Compile {req ; ack[*]} and {req}
//! let req = Sere::prop(Expr::atom("req"));
//! let ack = Sere::prop(Expr::atom("ack"));
//! let a = mgr.create_from_sere(&Sere::concat(req.clone(), Sere::star(ack))).unwrap();
//! let b = mgr.create_from_sere(&req).unwrap();
//!
//! // 3. Check language properties
//! assert!(mgr.containment(&b, &a).unwrap());
//! assert!(!mgr.containment(&a, &b).unwrap());
//!
//! // 4. Reduce
//! let m = mgr.minimize(&a).unwrap();
//! assert!(mgr.equals(&a, &m).unwrap());
//! ```
//!
//! ## Core Components
//!
//! - **[`manager`]**: The [`AutomataManager`][crate::manager::AutomataManager] and the elementary
//!   automata. The operation engine extends it with one method per operation.
//! - **[`automaton`]** and **[`location`]**: The location/transition graph.
//! - **[`label`]**: BDD-backed transition labels and their factory, built on [`bdd`].
//! - **[`sere`]**: The SERE tree and its compiler.
//! - **[`dot`]**: Utilities for visualizing automata using Graphviz.

pub mod ast;
pub mod automaton;
pub mod bdd;
pub mod cache;
pub mod chooser;
pub mod combinator;
pub mod config;
pub mod dot;
pub mod error;
pub mod index;
pub mod label;
pub mod location;
pub mod manager;
pub mod node;
mod ops;
pub mod reference;
pub mod sere;
pub mod simrel;
pub mod table;
pub mod types;
pub mod utils;
