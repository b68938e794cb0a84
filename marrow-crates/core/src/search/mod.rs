//! Search engines which explore the tree of spaces spanned by the branchers of a root [`Space`].
//!
//! Every engine drives the nodes of the tree through the same life cycle: a node is propagated to
//! a fixpoint, after which it is either failed, solved or branched on. Branching commits each
//! alternative of the [`crate::branching::Choice`] of the node into a child node.
//!
//! The engines differ in the order in which they explore the tree:
//! - [`Dfs`] explores depth-first, either by cloning a space per alternative or by backtracking a
//!   single space with checkpoints (see [`Backtracking`]).
//! - [`BranchAndBound`] explores best-first by the lower bound of an objective, and only accepts
//!   solutions which improve on the best one found so far.
//! - [`RestartSearch`] repeatedly runs a depth-first search with a growing node limit.
//! - [`ParallelDfs`] shares the open nodes between the threads of a [`WorkerPool`].
//!
//! # Example
//! ```rust
//! # use marrow_core::branching::branchers::IndependentVariableValueBrancher;
//! # use marrow_core::branching::value_selection::InDomainMin;
//! # use marrow_core::branching::variable_selection::InputOrder;
//! # use marrow_core::constraints;
//! # use marrow_core::search::termination::Indefinite;
//! # use marrow_core::search::Dfs;
//! # use marrow_core::search::SearchEngine;
//! # use marrow_core::Space;
//! let mut space = Space::default();
//! let x = space.new_bounded_integer(0, 3).unwrap();
//! let y = space.new_bounded_integer(0, 3).unwrap();
//!
//! space
//!     .add_constraint(constraints::linear_equals(vec![1, 1], vec![x, y], 3))
//!     .post()
//!     .unwrap();
//! space.add_brancher(IndependentVariableValueBrancher::new(
//!     InputOrder::new(&[x, y]),
//!     InDomainMin,
//! ));
//!
//! let outcome = Dfs::default().search(space, &mut Indefinite);
//! assert_eq!(outcome.solutions.len(), 4);
//! assert!(!outcome.incomplete);
//! ```

mod branch_and_bound;
mod dfs;
mod options;
mod outcome;
mod parallel;
mod restart;
pub mod termination;
mod test_models;
mod worker_pool;

pub use branch_and_bound::*;
pub use dfs::*;
pub use options::*;
pub use outcome::*;
pub use parallel::*;
pub use restart::*;
pub use worker_pool::*;

use log::info;
use termination::TerminationCondition;
use thiserror::Error;

use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::Space;
use crate::SpaceStatus;

/// A strategy for exploring the search tree of a [`Space`].
pub trait SearchEngine {
    /// Explore the tree rooted at `root` until it is exhausted, the solution limit of the engine
    /// is reached, or `termination` triggers.
    fn search(&mut self, root: Space, termination: &mut impl TerminationCondition) -> Outcome;
}

/// Errors raised when setting up a search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Not a single worker thread could be started.
    #[error("failed to spawn any of the {requested} worker threads")]
    ThreadSpawn {
        requested: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Propagate the space of a node at the given depth, and account for it in the statistics and
/// the termination condition.
fn propagate_node(
    space: &mut Space,
    depth: u64,
    statistics: &mut SearchStatistics,
    termination: &mut impl TerminationCondition,
) -> SpaceStatus {
    let propagations_before = space.num_propagations();
    let status = space.propagate();

    statistics.nodes += 1;
    statistics.max_depth = statistics.max_depth.max(depth);
    statistics.propagations += space.num_propagations() - propagations_before;
    termination.node_expanded();

    match status {
        SpaceStatus::Failed => {
            statistics.failures += 1;
            termination.failure_occurred();
        }
        SpaceStatus::Solved => {
            statistics.solutions += 1;
            info!("Found solution {} at depth {depth}", statistics.solutions);
        }
        SpaceStatus::Branch => {}
    }

    status
}

/// Log the statistics of a finished search, if statistic logging is configured.
fn log_outcome(engine: &str, outcome: &Outcome) {
    if should_log_statistics() {
        outcome.statistics.log(StatisticLogger::new(engine));
    }
}

fn is_solution_limit_reached(solution_limit: Option<usize>, num_solutions: usize) -> bool {
    solution_limit.is_some_and(|limit| num_solutions >= limit)
}
