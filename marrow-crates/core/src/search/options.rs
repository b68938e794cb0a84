use std::time::Duration;

use super::termination::Combinator;
use super::termination::FailBudget;
use super::termination::NodeBudget;
use super::termination::TerminationCondition;
use super::termination::TimeBudget;
use crate::basic_types::sequence_generators::SequenceGeneratorType;

/// How a depth-first search returns to an earlier node of the search tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Backtracking {
    /// Every alternative is explored in its own clone of the branched space.
    #[default]
    Clone,
    /// A single space is used, which is restored to a checkpoint before each alternative.
    Trail,
}

impl std::fmt::Display for Backtracking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backtracking::Clone => write!(f, "clone"),
            Backtracking::Trail => write!(f, "trail"),
        }
    }
}

/// The options of the search engines.
#[derive(Clone, Copy, Debug)]
pub struct SearchOptions {
    /// The maximum number of nodes to expand.
    pub node_limit: Option<u64>,
    /// The maximum number of failed nodes.
    pub fail_limit: Option<u64>,
    /// The maximum duration of the search.
    pub time_limit: Option<Duration>,
    /// The number of solutions after which the search stops.
    pub solution_limit: Option<usize>,
    pub backtracking: Backtracking,
    /// The number of threads used by the parallel search.
    pub threads: usize,
    /// The sequence of node limits of the runs of a restart-based search.
    pub restart_sequence: SequenceGeneratorType,
    /// The base value of [`SearchOptions::restart_sequence`].
    pub restart_base: i64,
    /// The multiplication factor in case of a geometric restart sequence.
    pub restart_geometric_factor: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            node_limit: None,
            fail_limit: None,
            time_limit: None,
            solution_limit: None,
            backtracking: Backtracking::default(),
            threads: 1,
            restart_sequence: SequenceGeneratorType::default(),
            restart_base: 100,
            restart_geometric_factor: 1.5,
        }
    }
}

impl SearchOptions {
    /// The [`TerminationCondition`] enforcing the node, fail and time limits. The time budget
    /// starts now.
    pub fn termination(&self) -> impl TerminationCondition {
        Combinator::new(
            self.node_limit.map(NodeBudget::new),
            Combinator::new(
                self.fail_limit.map(FailBudget::new),
                self.time_limit.map(TimeBudget::starting_now),
            ),
        )
    }
}
