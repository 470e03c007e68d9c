//! The automata manager: configuration, label factory and elementary constructions.
//!
//! Every operation on automata is a method of [`AutomataManager`], so the configuration and
//! the shared label factory are always at hand. The operation engine adds one method per
//! operation; the SERE compiler is in [`sere`][crate::sere].
//!
//! # Examples
//!
//! ```
//! use sere_automata::ast::Expr;
//! use sere_automata::manager::AutomataManager;
//!
//! let mgr = AutomataManager::default();
//! let p = mgr.create_from_expr(&Expr::atom("p")).unwrap();
//! let q = mgr.create_from_expr(&Expr::atom("q")).unwrap();
//!
//! let p_or_q = mgr.union(&p, &q).unwrap();
//! assert!(mgr.containment(&p, &p_or_q).unwrap());
//! assert!(!mgr.containment(&p_or_q, &p).unwrap());
//! ```

use log::debug;

use crate::ast::Expr;
use crate::automaton::Automaton;
use crate::config::{AutomataConfig, LocationFlavor};
use crate::error::Result;
use crate::label::{Label, LabelFactory};
use crate::location::{LocId, LocationPayload, TransitionType};

#[derive(Debug)]
pub struct AutomataManager {
    config: AutomataConfig,
    labels: LabelFactory,
}

impl Default for AutomataManager {
    fn default() -> Self {
        AutomataManager::new(AutomataConfig::default())
    }
}

impl AutomataManager {
    pub fn new(config: AutomataConfig) -> Self {
        let labels = LabelFactory::new(config.label_kind);
        Self { config, labels }
    }

    pub fn config(&self) -> &AutomataConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelFactory {
        &self.labels
    }

    /// Label of `expr`, built by the shared factory.
    pub fn label(&self, expr: &Expr) -> Label {
        self.labels.from_expr(expr)
    }

    pub(crate) fn new_automaton(&self) -> Automaton {
        Automaton::new(self.config.label_kind, self.config.keep_support_set)
    }

    /// Append a fresh location carrying the payload of the configured flavor.
    pub fn add_location(&self, aut: &mut Automaton, is_final: bool) -> LocId {
        let id = aut.add_location(is_final, LocationPayload::Plain);
        let payload = match self.config.location_flavor {
            LocationFlavor::Plain => LocationPayload::Plain,
            LocationFlavor::Named => LocationPayload::Named(id.to_string()),
            LocationFlavor::Mode => LocationPayload::Mode(String::new()),
            LocationFlavor::State => LocationPayload::State(self.labels.mk_true()),
        };
        aut.location_mut(id).set_payload(payload);
        id
    }

    fn initial_type(&self) -> TransitionType {
        if self.config.keep_type {
            TransitionType::Deterministic
        } else {
            TransitionType::Unknown
        }
    }

    /// One initial location without transitions.
    ///
    /// It reads no letter, so it is never complete; operations completing their result add the
    /// sink on demand.
    fn single_location(&self, is_final: bool) -> Result<Automaton> {
        let mut res = self.new_automaton();
        let init = self.add_location(&mut res, is_final);
        res.add_initial_location(init);
        res.set_ty(self.initial_type());
        res.set_complete(false);
        res.location_mut(init).set_ty(self.initial_type());
        Ok(res)
    }

    /// Automaton of the empty language: a single non-final initial location.
    pub fn create_empty(&self) -> Result<Automaton> {
        debug!("create_empty()");
        self.single_location(false)
    }

    /// Automaton accepting only the empty word.
    pub fn create_empty_word(&self) -> Result<Automaton> {
        debug!("create_empty_word()");
        self.single_location(true)
    }

    /// Automaton accepting the one-letter words whose letter satisfies `label`.
    ///
    /// An unsatisfiable label gives the empty-language automaton.
    pub fn create_from_label(&self, label: Label) -> Result<Automaton> {
        debug!("create_from_label(label = {})", label);
        if !label.is_sat() {
            return self.create_empty();
        }

        let mut res = self.new_automaton();
        let init = self.add_location(&mut res, false);
        res.add_initial_location(init);
        let end = self.add_location(&mut res, true);
        let rest = label.not();
        res.create_transition(init, end, label)?;

        if self.config.keep_complete {
            let sink = res.ensure_sink(&self.labels)?;
            if rest.is_sat() {
                res.create_transition(init, sink, rest)?;
            }
            res.create_transition(end, sink, self.labels.mk_true())?;
            for loc in [init, end] {
                res.location_mut(loc).set_complete(true);
            }
            res.set_complete(true);
        }
        for loc in [init, end] {
            res.location_mut(loc).set_ty(TransitionType::Deterministic);
        }
        res.set_ty(TransitionType::Deterministic);
        Ok(res)
    }

    pub fn create_from_expr(&self, expr: &Expr) -> Result<Automaton> {
        debug!("create_from_expr(expr = {})", expr);
        self.create_from_label(self.labels.from_expr(expr))
    }

    /// `expr[*]`: a single final location looping on `expr`.
    pub fn propositional_kleene_star(&self, expr: &Expr) -> Result<Automaton> {
        debug!("propositional_kleene_star(expr = {})", expr);
        let label = self.labels.from_expr(expr);

        let mut res = self.new_automaton();
        let init = self.add_location(&mut res, true);
        res.add_initial_location(init);
        if label.is_sat() {
            res.create_transition(init, init, label)?;
        }
        res.location_mut(init).set_ty(TransitionType::Deterministic);
        res.set_ty(TransitionType::Deterministic);
        res.set_complete(self.config.keep_complete);
        self.update_complete(&mut res, init)?;
        Ok(res)
    }

    /// `TRUE[*]`: every word.
    pub fn true_star(&self) -> Result<Automaton> {
        self.propositional_kleene_star(&Expr::constant(true))
    }

    /// Add a transition labeled `expr` between two existing locations.
    pub fn new_transition(&self, aut: &mut Automaton, from: u32, to: u32, expr: &Expr) -> Result<()> {
        debug!("new_transition(from = {}, to = {}, expr = {})", from, to, expr);
        aut.new_transition(from, to, self.labels.from_expr(expr))
    }
}
