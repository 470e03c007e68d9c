//! Automaton to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Locations** are circles labeled with their id (or their name, for named locations)
//! - **Final locations** are double circles
//! - **The sink** is dashed
//! - **The initial location** is pointed to by an arrow from an invisible point
//! - **Transitions** are labeled with their formula, e.g. `req & !ack`
//!
//! # Examples
//!
//! ```
//! use sere_automata::ast::Expr;
//! use sere_automata::manager::AutomataManager;
//!
//! let mgr = AutomataManager::default();
//! let a = mgr.create_from_expr(&Expr::atom("p")).unwrap();
//!
//! let dot = a.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! assert!(dot.contains("doublecircle"));
//! ```

use std::fmt::Write as _;

use crate::automaton::Automaton;
use crate::location::{Location, LocationPayload};

/// Configuration options for DOT output generation.
///
/// ```
/// use sere_automata::dot::DotConfig;
///
/// let config = DotConfig {
///     rankdir: "TB",
///     ..DotConfig::default()
/// };
/// assert_eq!(config.final_shape, "doublecircle");
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Layout direction (default: "LR")
    pub rankdir: &'static str,
    /// Shape for non-final locations (default: "circle")
    pub location_shape: &'static str,
    /// Shape for final locations (default: "doublecircle")
    pub final_shape: &'static str,
    /// Style for the sink location (default: "dashed")
    pub sink_style: &'static str,
    /// Whether to print location payloads (names, modes, states) instead of ids (default: true)
    pub show_payload: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            rankdir: "LR",
            location_shape: "circle",
            final_shape: "doublecircle",
            sink_style: "dashed",
            show_payload: true,
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn location_label(loc: &Location, config: &DotConfig) -> String {
    if config.show_payload {
        match loc.payload() {
            LocationPayload::Named(name) => return escape(name),
            LocationPayload::Mode(mode) if !mode.is_empty() => return format!("{}\\n{}", loc.id(), escape(mode)),
            LocationPayload::State(state) => return format!("{}\\n{}", loc.id(), escape(&state.to_string())),
            _ => {}
        }
    }
    loc.id().to_string()
}

impl Automaton {
    /// Converts the automaton to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the automaton to DOT format with custom configuration.
    ///
    /// Transitions are printed per location in insertion order, so the output is stable for a
    /// given automaton.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir={};", config.rankdir)?;
        writeln!(dot, "node [shape={}];", config.location_shape)?;

        // Initial arrow
        writeln!(dot, "init [shape=point, style=invis];")?;
        for loc in self.locations() {
            let mut attrs = vec![format!("label=\"{}\"", location_label(loc, config))];
            if loc.is_final() {
                attrs.push(format!("shape={}", config.final_shape));
            }
            if self.sink() == Some(loc.id()) {
                attrs.push(format!("style={}", config.sink_style));
            }
            writeln!(dot, "{} [{}];", loc.id().id(), attrs.join(", "))?;
        }

        if !self.locations().is_empty() {
            writeln!(dot, "init -> {};", self.unique_init().id())?;
        }
        for (from, t) in self.transitions() {
            writeln!(
                dot,
                "{} -> {} [label=\"{}\"];",
                from.id(),
                t.end.id(),
                escape(&t.label.to_string())
            )?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
