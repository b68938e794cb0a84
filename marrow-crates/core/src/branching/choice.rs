use std::fmt::Display;

use itertools::Itertools;

use crate::engine::predicates::Predicate;
use crate::marrow_asserts::marrow_assert_simple;

/// The alternatives of a branching decision.
///
/// Every alternative is a [`Predicate`] which is committed to a copy of the space being branched
/// on. Together, the alternatives cover every value of the current domain of the branched
/// variable, so no solution is lost by exploring each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    alternatives: Vec<Predicate>,
}

impl Choice {
    pub fn new(alternatives: Vec<Predicate>) -> Self {
        marrow_assert_simple!(
            !alternatives.is_empty(),
            "A choice needs at least one alternative"
        );
        Choice { alternatives }
    }

    /// The two-way choice `[predicate]` or `[!predicate]`.
    pub fn binary(predicate: Predicate) -> Self {
        Choice {
            alternatives: vec![predicate, !predicate],
        }
    }

    pub fn num_alternatives(&self) -> usize {
        self.alternatives.len()
    }

    pub fn alternative(&self, index: usize) -> Option<Predicate> {
        self.alternatives.get(index).copied()
    }

    pub fn alternatives(&self) -> &[Predicate] {
        &self.alternatives
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.alternatives.iter().join(" | "))
    }
}
