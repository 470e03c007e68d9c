//! Per-step choice between alphabet enumeration and transition combination.
//!
//! Combining transitions costs about `transitions^2` label operations per step, enumerating
//! the alphabet costs `2^|support|` symbols per step. Under the heuristic policy the cheaper
//! of the two is picked from the concrete numbers of the current step. A support larger than
//! [`MAX_ALPHABET_VARS`] always combines transitions, whatever the policy.

use std::collections::BTreeSet;

use log::debug;
use num_bigint::BigUint;

use crate::config::{AlgorithmPolicy, AlgorithmType};
use crate::label::MAX_ALPHABET_VARS;
use crate::location::{Location, Transition};
use crate::types::Var;

#[derive(Debug)]
pub struct AlgoChooser {
    policy: AlgorithmPolicy,
    permanent: Option<(BTreeSet<Var>, usize)>,
    last_support: BTreeSet<Var>,
}

impl AlgoChooser {
    pub fn new(policy: AlgorithmPolicy) -> Self {
        Self {
            policy,
            permanent: None,
            last_support: BTreeSet::new(),
        }
    }

    /// Pin a location whose support and out-degree take part in every later choice.
    pub fn set_permanent_location(&mut self, loc: &Location) {
        self.permanent = Some((loc.support_set(), loc.transitions().len()));
    }

    /// Support computed by the last choice.
    ///
    /// Only maintained when the policy is not the constant transitions-based one.
    pub fn last_support(&self) -> &BTreeSet<Var> {
        &self.last_support
    }

    fn needs_support(&self) -> bool {
        self.policy != AlgorithmPolicy::TransitionsBased
    }

    fn decide(&self, transition_count: usize) -> AlgorithmType {
        if self.needs_support() && self.last_support.len() > MAX_ALPHABET_VARS {
            debug!(
                "choose(support = {}) -> TransitionsBased, alphabet too large",
                self.last_support.len()
            );
            return AlgorithmType::TransitionsBased;
        }
        match self.policy {
            AlgorithmPolicy::AlphabetBased => AlgorithmType::AlphabetBased,
            AlgorithmPolicy::TransitionsBased => AlgorithmType::TransitionsBased,
            AlgorithmPolicy::Heuristic => {
                let count = BigUint::from(transition_count);
                let symbols = BigUint::from(1u32) << self.last_support.len();
                let choice = if &count * &count < symbols {
                    AlgorithmType::TransitionsBased
                } else {
                    AlgorithmType::AlphabetBased
                };
                debug!(
                    "choose(transitions = {}, support = {}) -> {:?}",
                    transition_count,
                    self.last_support.len(),
                    choice
                );
                choice
            }
        }
    }

    fn add_permanent(&mut self) -> usize {
        match &self.permanent {
            Some((support, count)) => {
                self.last_support.extend(support.iter().copied());
                *count
            }
            None => 0,
        }
    }

    pub fn choose_from_locations(&mut self, locations: &[&Location]) -> AlgorithmType {
        let mut count = locations.iter().map(|l| l.transitions().len()).sum();
        if self.needs_support() {
            self.last_support = locations.iter().flat_map(|l| l.support_set()).collect();
            count += self.add_permanent();
        }
        self.decide(count)
    }

    pub fn choose_from_transition(&mut self, transition: &Transition) -> AlgorithmType {
        let mut count = 1;
        if self.needs_support() {
            self.last_support = transition.label.support();
            count += self.add_permanent();
        }
        self.decide(count)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::ast::Expr;
    use crate::label::{LabelFactory, LabelKind};
    use crate::location::LocId;

    fn location_with(factory: &LabelFactory, id: u32, atoms: &[&str]) -> Location {
        let mut loc = Location::new(LocId::new(id), false, LabelKind::Bdd, false);
        for atom in atoms {
            loc.create_transition(LocId::new(id), factory.from_expr(&Expr::atom(*atom)))
                .unwrap();
        }
        loc
    }

    #[test]
    fn test_constant_policies() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let loc = location_with(&factory, 1, &["p", "q"]);

        let mut chooser = AlgoChooser::new(AlgorithmPolicy::TransitionsBased);
        assert_eq!(chooser.choose_from_locations(&[&loc]), AlgorithmType::TransitionsBased);
        assert!(chooser.last_support().is_empty());

        let mut chooser = AlgoChooser::new(AlgorithmPolicy::AlphabetBased);
        assert_eq!(chooser.choose_from_locations(&[&loc]), AlgorithmType::AlphabetBased);
        assert_eq!(chooser.last_support().len(), 2);
    }

    #[test]
    fn test_heuristic() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let mut chooser = AlgoChooser::new(AlgorithmPolicy::Heuristic);

        // 2 transitions over 2 propositions: 4 < 4 fails, the alphabet wins.
        let small = location_with(&factory, 1, &["p", "q"]);
        assert_eq!(chooser.choose_from_locations(&[&small]), AlgorithmType::AlphabetBased);

        // 3 transitions over 3 propositions: 9 < 8 fails; 6 over 6: 36 < 64.
        let wide = location_with(&factory, 2, &["a", "b", "c"]);
        let other = location_with(&factory, 3, &["d", "e", "f"]);
        let wide_and_other = location_with(&factory, 4, &[]);
        assert_eq!(
            chooser.choose_from_locations(&[&wide, &wide_and_other]),
            AlgorithmType::AlphabetBased
        );
        assert_eq!(chooser.choose_from_locations(&[&wide, &other]), AlgorithmType::TransitionsBased);
        assert_eq!(chooser.last_support().len(), 6);
    }

    #[test]
    fn test_large_support_combines_transitions() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let names: Vec<String> = (0..40).map(|i| format!("x{}", i)).collect();
        let atoms: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let loc = location_with(&factory, 1, &atoms);

        for policy in [AlgorithmPolicy::AlphabetBased, AlgorithmPolicy::Heuristic] {
            let mut chooser = AlgoChooser::new(policy);
            assert_eq!(chooser.choose_from_locations(&[&loc]), AlgorithmType::TransitionsBased);
            assert_eq!(chooser.last_support().len(), 40);
        }
    }

    #[test]
    fn test_permanent_location() {
        let factory = LabelFactory::new(LabelKind::Bdd);
        let mut chooser = AlgoChooser::new(AlgorithmPolicy::Heuristic);
        let pinned = location_with(&factory, 1, &["a", "b", "c", "d"]);
        chooser.set_permanent_location(&pinned);

        let t = Transition {
            end: LocId::new(1),
            label: factory.from_expr(&Expr::atom("e")),
        };
        // (1 + 4)^2 = 25 < 2^5 = 32
        assert_eq!(chooser.choose_from_transition(&t), AlgorithmType::TransitionsBased);
        assert_eq!(chooser.last_support().len(), 5);
    }
}
