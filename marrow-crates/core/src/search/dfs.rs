use log::debug;

use super::is_solution_limit_reached;
use super::log_outcome;
use super::propagate_node;
use super::termination::TerminationCondition;
use super::Backtracking;
use super::Outcome;
use super::SearchEngine;
use super::SearchOptions;
use crate::branching::Choice;
use crate::Space;
use crate::SpaceStatus;

/// Depth-first exploration of the search tree, with the first alternative of every choice explored
/// first.
///
/// With [`Backtracking::Clone`], each alternative of a choice is committed in its own clone of the
/// branched space; the space itself is reused for the last alternative. With
/// [`Backtracking::Trail`], a single space is used which is restored to the checkpoint of the
/// branched node before the next alternative is committed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dfs {
    backtracking: Backtracking,
    solution_limit: Option<usize>,
}

/// An open choice of the trail-based search.
#[derive(Debug)]
struct Branch {
    /// The checkpoint of the branched node.
    checkpoint: usize,
    choice: Choice,
    next_alternative: usize,
}

impl Branch {
    fn is_exhausted(&self) -> bool {
        self.next_alternative >= self.choice.num_alternatives()
    }
}

impl Dfs {
    pub fn new(options: &SearchOptions) -> Dfs {
        Dfs {
            backtracking: options.backtracking,
            solution_limit: options.solution_limit,
        }
    }

    pub fn with_backtracking(backtracking: Backtracking) -> Dfs {
        Dfs {
            backtracking,
            solution_limit: None,
        }
    }

    /// Stop after the given number of solutions.
    pub fn with_solution_limit(mut self, solution_limit: usize) -> Dfs {
        self.solution_limit = Some(solution_limit);
        self
    }

    /// Explore without logging the statistics; used by the engines which run several depth-first
    /// searches.
    pub(crate) fn explore(&self, root: Space, termination: &mut impl TerminationCondition) -> Outcome {
        match self.backtracking {
            Backtracking::Clone => self.explore_with_clones(root, termination),
            Backtracking::Trail => self.explore_with_trail(root, termination),
        }
    }

    fn explore_with_clones(
        &self,
        root: Space,
        termination: &mut impl TerminationCondition,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        let mut open = vec![(root, 0_u64)];

        while let Some((mut space, depth)) = open.pop() {
            if termination.should_stop() {
                outcome.incomplete = true;
                break;
            }

            match propagate_node(&mut space, depth, &mut outcome.statistics, termination) {
                SpaceStatus::Failed => {}
                SpaceStatus::Solved => {
                    outcome.solutions.push(space.solution());
                    if is_solution_limit_reached(self.solution_limit, outcome.solutions.len()) {
                        outcome.incomplete = !open.is_empty();
                        break;
                    }
                }
                SpaceStatus::Branch => {
                    let Some(choice) = space.choice().cloned() else {
                        continue;
                    };
                    let last = choice.num_alternatives() - 1;

                    let children = (0..last)
                        .map(|alternative| {
                            let mut child = space.clone();
                            child.commit(&choice, alternative);
                            child
                        })
                        .collect::<Vec<_>>();
                    space.commit(&choice, last);

                    open.push((space, depth + 1));
                    open.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
                }
            }
        }

        outcome
    }

    fn explore_with_trail(
        &self,
        mut space: Space,
        termination: &mut impl TerminationCondition,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        let mut branches: Vec<Branch> = vec![];

        loop {
            if termination.should_stop() {
                outcome.incomplete = true;
                break;
            }

            let depth = branches.len() as u64;
            match propagate_node(&mut space, depth, &mut outcome.statistics, termination) {
                SpaceStatus::Failed => {}
                SpaceStatus::Solved => {
                    outcome.solutions.push(space.solution());
                    if is_solution_limit_reached(self.solution_limit, outcome.solutions.len()) {
                        outcome.incomplete = branches.iter().any(|branch| !branch.is_exhausted());
                        break;
                    }
                }
                SpaceStatus::Branch => {
                    if let Some(choice) = space.choice().cloned() {
                        branches.push(Branch {
                            checkpoint: space.get_checkpoint(),
                            choice,
                            next_alternative: 0,
                        });
                    }
                }
            }

            if !next_alternative(&mut space, &mut branches) {
                break;
            }
        }

        outcome
    }
}

/// Restore the space to the deepest branch with an alternative left, and commit that alternative.
/// Returns `false` if every branch is exhausted.
fn next_alternative(space: &mut Space, branches: &mut Vec<Branch>) -> bool {
    while let Some(branch) = branches.last_mut() {
        space.restore_to(branch.checkpoint);

        if !branch.is_exhausted() {
            space.new_checkpoint();
            space.commit(&branch.choice, branch.next_alternative);
            branch.next_alternative += 1;
            return true;
        }

        let _ = branches.pop();
    }

    false
}

impl SearchEngine for Dfs {
    fn search(&mut self, root: Space, termination: &mut impl TerminationCondition) -> Outcome {
        debug!("Starting depth-first search with {} backtracking", self.backtracking);

        let outcome = self.explore(root, termination);
        log_outcome("dfs", &outcome);
        outcome
    }
}
