//! Symbolic transition labels.
//!
//! A [`Label`] is a boolean formula over atomic propositions, stored as a handle into a BDD
//! manager shared by every label of one [`LabelFactory`]. Since BDDs are canonical, label
//! equivalence is a handle comparison and satisfiability is a comparison with the zero
//! terminal.
//!
//! # Examples
//!
//! ```
//! use sere_automata::ast::Expr;
//! use sere_automata::label::{LabelFactory, LabelKind};
//!
//! let factory = LabelFactory::new(LabelKind::Bdd);
//! let p = factory.from_expr(&Expr::atom("p"));
//! let q = factory.from_expr(&Expr::atom("q"));
//!
//! let p_and_q = p.and(&q);
//! assert!(p_and_q.is_contained_in(&p));
//! assert!(!p.and(&p.not()).is_sat());
//! assert!(p.or(&p.not()).is_true());
//! ```

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

use log::debug;

use crate::ast::Expr;
use crate::bdd::Bdd;
use crate::reference::Ref;
use crate::types::Var;

/// Largest support whose alphabet is ever enumerated.
pub const MAX_ALPHABET_VARS: usize = 20;

/// Label backend in use.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LabelKind {
    /// Plain propositional formulas.
    Bdd,
    /// Event/guard/effect triples, encoded as their conjunction.
    Hybrid,
}

impl Display for LabelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelKind::Bdd => write!(f, "bdd"),
            LabelKind::Hybrid => write!(f, "hybrid"),
        }
    }
}

struct Universe {
    bdd: Bdd,
    names: RefCell<Vec<String>>,
}

impl Universe {
    fn name(&self, var: u32) -> String {
        match self.names.borrow().get(var as usize - 1) {
            Some(name) => name.clone(),
            None => format!("x{}", var),
        }
    }
}

#[derive(Clone)]
pub struct Label {
    universe: Rc<Universe>,
    node: Ref,
    kind: LabelKind,
}

impl Label {
    fn with_node(&self, node: Ref) -> Label {
        Label {
            universe: Rc::clone(&self.universe),
            node,
            kind: self.kind,
        }
    }

    fn check_compatible(&self, other: &Label) {
        assert!(
            Rc::ptr_eq(&self.universe, &other.universe),
            "Labels belong to different factories"
        );
        assert_eq!(self.kind, other.kind, "Label kinds differ");
    }

    fn bdd(&self) -> &Bdd {
        &self.universe.bdd
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    pub fn node(&self) -> Ref {
        self.node
    }

    pub fn is_sat(&self) -> bool {
        !self.bdd().is_zero(self.node)
    }

    pub fn is_true(&self) -> bool {
        self.bdd().is_one(self.node)
    }

    /// Does the (full) assignment `symbol` satisfy this label?
    pub fn is_model_of(&self, symbol: &Label) -> bool {
        symbol.is_contained_in(self)
    }

    pub fn and(&self, other: &Label) -> Label {
        self.check_compatible(other);
        self.with_node(self.bdd().apply_and(self.node, other.node))
    }

    pub fn or(&self, other: &Label) -> Label {
        self.check_compatible(other);
        self.with_node(self.bdd().apply_or(self.node, other.node))
    }

    pub fn not(&self) -> Label {
        self.with_node(self.bdd().apply_not(self.node))
    }

    /// Does this label imply `other`?
    pub fn is_contained_in(&self, other: &Label) -> bool {
        self.check_compatible(other);
        self.bdd().is_implies(self.node, other.node)
    }

    pub fn is_equivalent(&self, other: &Label) -> bool {
        self.check_compatible(other);
        self.node == other.node
    }

    pub fn support(&self) -> BTreeSet<Var> {
        self.bdd().support(self.node).into_iter().map(Var::new).collect()
    }

    /// A symbol satisfying the label: a cube over part of its support, `None` if unsatisfiable.
    pub fn pick_symbol(&self) -> Option<Label> {
        let literals = self.bdd().one_sat(self.node)?;
        Some(self.with_node(self.bdd().cube(literals)))
    }

    fn write_cubes(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bdd = self.bdd();
        let mut cubes = Vec::new();
        let mut stack = vec![(self.node, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            if bdd.is_zero(node) {
                continue;
            }
            if bdd.is_one(node) {
                cubes.push(path);
                continue;
            }
            let v = bdd.variable(node.index()) as i32;
            let mut high_path = path.clone();
            high_path.push(v);
            let mut low_path = path;
            low_path.push(-v);
            stack.push((bdd.low_node(node), low_path));
            stack.push((bdd.high_node(node), high_path));
        }

        for (i, cube) in cubes.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            for (j, &lit) in cube.iter().enumerate() {
                if j > 0 {
                    write!(f, " & ")?;
                }
                let name = self.universe.name(lit.unsigned_abs());
                if lit < 0 {
                    write!(f, "!{}", name)?;
                } else {
                    write!(f, "{}", name)?;
                }
            }
        }
        Ok(())
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.universe, &other.universe) && self.kind == other.kind && self.node == other.node
    }
}

impl Eq for Label {}

impl Debug for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Label({}, {}, \"{}\")", self.kind, self.node, self)
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_true() {
            write!(f, "TRUE")
        } else if !self.is_sat() {
            write!(f, "FALSE")
        } else {
            self.write_cubes(f)
        }
    }
}

/// Creates labels and owns the atomic proposition registry.
///
/// Atom names are mapped to BDD variables in order of first use.
pub struct LabelFactory {
    universe: Rc<Universe>,
    index: RefCell<HashMap<String, Var>>,
    kind: LabelKind,
}

impl LabelFactory {
    pub fn new(kind: LabelKind) -> Self {
        Self::with_bits(kind, 16)
    }

    /// Factory whose BDD tables start with `2^bits` slots.
    pub fn with_bits(kind: LabelKind, bits: usize) -> Self {
        Self {
            universe: Rc::new(Universe {
                bdd: Bdd::new(bits),
                names: RefCell::new(Vec::new()),
            }),
            index: RefCell::new(HashMap::new()),
            kind,
        }
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    /// The shared BDD manager.
    pub fn bdd(&self) -> &Bdd {
        &self.universe.bdd
    }

    pub fn num_vars(&self) -> usize {
        self.universe.names.borrow().len()
    }

    /// Variable of the atom `name`, registering it on first use.
    pub fn var(&self, name: &str) -> Var {
        if let Some(&var) = self.index.borrow().get(name) {
            return var;
        }
        let mut names = self.universe.names.borrow_mut();
        names.push(name.to_string());
        let var = Var::new(names.len() as u32);
        debug!("new atomic proposition {} = {}", name, var);
        self.index.borrow_mut().insert(name.to_string(), var);
        var
    }

    pub fn var_name(&self, var: Var) -> Option<String> {
        self.universe.names.borrow().get(var.id() as usize - 1).cloned()
    }

    fn mk(&self, node: Ref, kind: LabelKind) -> Label {
        Label {
            universe: Rc::clone(&self.universe),
            node,
            kind,
        }
    }

    pub fn mk_true(&self) -> Label {
        self.mk(self.bdd().one, self.kind)
    }

    pub fn mk_false(&self) -> Label {
        self.mk(self.bdd().zero, self.kind)
    }

    fn build(&self, expr: &Expr) -> Ref {
        let bdd = self.bdd();
        match expr {
            Expr::Const(true) => bdd.one,
            Expr::Const(false) => bdd.zero,
            Expr::Atom(name) => bdd.mk_var(self.var(name).id()),
            Expr::Not(a) => bdd.apply_not(self.build(a)),
            Expr::And(a, b) => bdd.apply_and(self.build(a), self.build(b)),
            Expr::Or(a, b) => bdd.apply_or(self.build(a), self.build(b)),
            Expr::Xor(a, b) => bdd.apply_xor(self.build(a), self.build(b)),
            Expr::Imply(a, b) => bdd.apply_imply(self.build(a), self.build(b)),
            Expr::Iff(a, b) => bdd.apply_eq(self.build(a), self.build(b)),
            Expr::Ite(a, b, c) => bdd.apply_ite(self.build(a), self.build(b), self.build(c)),
        }
    }

    /// Label of the configured kind denoting `expr`.
    pub fn from_expr(&self, expr: &Expr) -> Label {
        debug!("from_expr(expr = {})", expr);
        self.mk(self.build(expr), self.kind)
    }

    /// Hybrid label: the event holds, every guard holds and every effect holds.
    pub fn mk_hybrid(&self, event: &Expr, guards: &[Expr], effects: &[Expr]) -> Label {
        debug!("mk_hybrid(event = {}, guards = {}, effects = {})", event, guards.len(), effects.len());
        let bdd = self.bdd();
        let node = bdd.apply_and_many(
            std::iter::once(event)
                .chain(guards)
                .chain(effects)
                .map(|e| self.build(e))
                .collect::<Vec<_>>(),
        );
        self.mk(node, LabelKind::Hybrid)
    }

    /// Full assignment given as signed literals.
    pub fn symbol(&self, literals: impl IntoIterator<Item = i32>) -> Label {
        self.mk(self.bdd().cube(literals), self.kind)
    }

    /// All `2^n` full assignments of `support`, as cube labels.
    ///
    /// An empty support has the single symbol `true`.
    ///
    /// # Panics
    ///
    /// Panics if `support` has more than [`MAX_ALPHABET_VARS`] propositions.
    pub fn alphabet(&self, support: &BTreeSet<Var>) -> Vec<Label> {
        let vars: Vec<Var> = support.iter().copied().collect();
        assert!(
            vars.len() <= MAX_ALPHABET_VARS,
            "Alphabet of {} propositions is too large",
            vars.len()
        );
        debug!("alphabet(support = {:?})", vars);

        (0..1u64 << vars.len())
            .map(|bits| {
                self.symbol(
                    vars.iter()
                        .enumerate()
                        .map(|(i, v)| v.lit(bits & (1 << i) != 0)),
                )
            })
            .collect()
    }
}

impl Debug for LabelFactory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFactory")
            .field("kind", &self.kind)
            .field("num_vars", &self.num_vars())
            .field("bdd", &self.universe.bdd)
            .finish()
    }
}
