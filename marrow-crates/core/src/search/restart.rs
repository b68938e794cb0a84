use std::fmt::Debug;

use log::debug;

use super::is_solution_limit_reached;
use super::log_outcome;
use super::termination::Combinator;
use super::termination::NodeBudget;
use super::termination::TerminationCondition;
use super::Dfs;
use super::Outcome;
use super::SearchEngine;
use super::SearchOptions;
use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::basic_types::Solution;
use crate::engine::predicates::Predicate;
use crate::predicate;
use crate::variables::IntegerVariable;
use crate::Space;

/// Turns the last solution into the predicate which every next solution has to satisfy.
type Constrain = Box<dyn FnMut(&Solution) -> Predicate>;

/// A search which repeatedly runs a depth-first search from the root, each run with a node limit
/// taken from a [`SequenceGenerator`].
///
/// The branchers of the root are informed of every restart and of every solution (see
/// [`crate::branching::Brancher::on_restart`] and [`crate::branching::Brancher::on_solution`]), so
/// each run can make different choices than the previous one. When the branchers report that a
/// restart is pointless, the run is not limited.
///
/// Without a constrain function the search stops at the first solution. With one (e.g. through
/// [`RestartSearch::minimising`]), every solution is followed by a restart in which the root is
/// constrained to improve on it.
pub struct RestartSearch {
    sequence: Box<dyn SequenceGenerator>,
    dfs: Dfs,
    solution_limit: Option<usize>,
    constrain: Option<Constrain>,
}

impl Debug for RestartSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestartSearch")
            .field("sequence", &self.sequence)
            .field("dfs", &self.dfs)
            .field("solution_limit", &self.solution_limit)
            .field("constrained", &self.constrain.is_some())
            .finish()
    }
}

impl RestartSearch {
    pub fn new(options: &SearchOptions) -> RestartSearch {
        RestartSearch {
            sequence: options
                .restart_sequence
                .create(options.restart_base, options.restart_geometric_factor),
            dfs: Dfs::with_backtracking(options.backtracking).with_solution_limit(1),
            solution_limit: options.solution_limit,
            constrain: None,
        }
    }

    /// After every solution, restart with the root constrained by the predicate `constrain`
    /// creates from that solution.
    pub fn with_constrain(mut self, constrain: impl FnMut(&Solution) -> Predicate + 'static) -> Self {
        self.constrain = Some(Box::new(constrain));
        self
    }

    /// After every solution, restart with the root constrained to a smaller value of `objective`.
    pub fn minimising<Var: IntegerVariable>(self, objective: Var) -> Self {
        self.with_constrain(move |solution| {
            let value = solution.get_integer_value(objective.clone());
            predicate!(objective <= value - 1)
        })
    }

    /// Run until the next solution, the tree being exhausted or `termination` triggering.
    ///
    /// Returns the solution of the run, and whether the run was cut short.
    fn run(
        &mut self,
        root: &mut Space,
        outcome: &mut Outcome,
        termination: &mut impl TerminationCondition,
    ) -> (Option<Solution>, bool) {
        loop {
            let run = if root.is_restart_pointless() {
                self.dfs.explore(root.clone(), termination)
            } else {
                let node_limit = self.sequence.next().max(1) as u64;
                let mut limited = Combinator::new(&mut *termination, NodeBudget::new(node_limit));
                self.dfs.explore(root.clone(), &mut limited)
            };

            let Outcome {
                solutions,
                incomplete,
                statistics,
            } = run;
            outcome.statistics.absorb(statistics);

            if let Some(solution) = solutions.into_iter().next() {
                return (Some(solution), incomplete);
            }
            if !incomplete || termination.should_stop() {
                return (None, incomplete);
            }

            outcome.statistics.restarts += 1;
            debug!("Restart {}", outcome.statistics.restarts);
            root.on_restart();
        }
    }
}

impl SearchEngine for RestartSearch {
    fn search(&mut self, mut root: Space, termination: &mut impl TerminationCondition) -> Outcome {
        debug!("Starting restart-based search with {:?}", self.sequence);
        let mut outcome = Outcome::default();

        loop {
            let (solution, incomplete) = self.run(&mut root, &mut outcome, termination);
            let Some(solution) = solution else {
                outcome.incomplete = incomplete;
                break;
            };

            root.on_solution(&solution);
            let constraint = self.constrain.as_mut().map(|constrain| constrain(&solution));
            outcome.solutions.push(solution);

            let Some(constraint) = constraint else {
                outcome.incomplete = incomplete;
                break;
            };
            if is_solution_limit_reached(self.solution_limit, outcome.solutions.len()) {
                outcome.incomplete = true;
                break;
            }
            if termination.should_stop() {
                outcome.incomplete = true;
                break;
            }

            debug!("Restarting with {constraint}");
            root.post(constraint);
            if root.is_failed() {
                break;
            }
            outcome.statistics.restarts += 1;
            root.on_restart();
        }

        log_outcome("restart", &outcome);
        outcome
    }
}
