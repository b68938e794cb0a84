use crate::basic_types::Solution;
use crate::create_statistics_struct;

create_statistics_struct!(
    /// Statistics of a single search.
    SearchStatistics {
        /// The number of nodes which were propagated.
        nodes: u64,
        /// The number of failed nodes.
        failures: u64,
        /// The number of solved nodes.
        solutions: u64,
        /// The number of restarts of a restart-based search.
        restarts: u64,
        /// The depth of the deepest node.
        max_depth: u64,
        /// The number of propagator calls.
        propagations: u64,
});

impl SearchStatistics {
    /// Add the statistics of another (part of the) search.
    pub(crate) fn absorb(&mut self, other: SearchStatistics) {
        self.nodes += other.nodes;
        self.failures += other.failures;
        self.solutions += other.solutions;
        self.restarts += other.restarts;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.propagations += other.propagations;
    }
}

/// The result of a search.
#[derive(Clone, Debug, Default)]
pub struct Outcome {
    /// The solutions in the order in which they were found. For an optimising search, every
    /// solution improves on the previous one.
    pub solutions: Vec<Solution>,
    /// Whether the search stopped before the search tree was exhausted.
    pub incomplete: bool,
    pub statistics: SearchStatistics,
}

impl Outcome {
    /// Whether the search proved that there is no solution.
    pub fn is_infeasible(&self) -> bool {
        !self.incomplete && self.solutions.is_empty()
    }

    /// The last solution found; for an exhaustive optimising search this is an optimal one.
    pub fn best(&self) -> Option<&Solution> {
        self.solutions.last()
    }
}
