use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use super::is_solution_limit_reached;
use super::log_outcome;
use super::propagate_node;
use super::termination::TerminationCondition;
use super::Outcome;
use super::SearchEngine;
use super::SearchOptions;
use crate::predicate;
use crate::propagation::ReadDomains;
use crate::variables::IntegerVariable;
use crate::Space;
use crate::SpaceStatus;

/// The direction of the optimisation, either maximising or minimising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimisationDirection {
    Maximise,
    Minimise,
}

/// Best-first branch and bound over an objective.
///
/// Open nodes are explored in order of the bound they give on the objective (the lower bound when
/// minimising), the most recently created node first among equal bounds. Every node which is
/// explored after a solution was found is constrained to improve on that solution, so the found
/// solutions are strictly improving. When the search is exhaustive, the last solution is optimal.
#[derive(Debug, Clone)]
pub struct BranchAndBound<Var> {
    objective: Var,
    direction: OptimisationDirection,
    solution_limit: Option<usize>,
}

/// An open node of the frontier.
#[derive(Debug)]
struct OpenNode {
    /// The bound on the minimised objective when the node was created.
    bound: i32,
    /// Later nodes have higher sequence numbers.
    sequence: u64,
    depth: u64,
    space: Space,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // The heap pops the greatest node.
        other
            .bound
            .cmp(&self.bound)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl<Var: IntegerVariable> BranchAndBound<Var> {
    pub fn new(direction: OptimisationDirection, objective: Var, options: &SearchOptions) -> Self {
        BranchAndBound {
            objective,
            direction,
            solution_limit: options.solution_limit,
        }
    }

    pub fn minimise(objective: Var) -> Self {
        BranchAndBound::new(
            OptimisationDirection::Minimise,
            objective,
            &SearchOptions::default(),
        )
    }

    pub fn maximise(objective: Var) -> Self {
        BranchAndBound::new(
            OptimisationDirection::Maximise,
            objective,
            &SearchOptions::default(),
        )
    }

    /// The objective as a view which is minimised.
    fn minimised_objective(&self) -> Var::AffineView {
        match self.direction {
            OptimisationDirection::Minimise => self.objective.scaled(1),
            OptimisationDirection::Maximise => self.objective.scaled(-1),
        }
    }

    /// Convert a value of the minimised objective back to the objective.
    fn objective_value(&self, minimised_value: i32) -> i32 {
        match self.direction {
            OptimisationDirection::Minimise => minimised_value,
            OptimisationDirection::Maximise => -minimised_value,
        }
    }
}

impl<Var: IntegerVariable> SearchEngine for BranchAndBound<Var> {
    fn search(&mut self, root: Space, termination: &mut impl TerminationCondition) -> Outcome {
        let objective = self.minimised_objective();
        debug!("Starting branch and bound, {:?} {:?}", self.direction, self.objective);

        let mut outcome = Outcome::default();
        let mut best: Option<i32> = None;
        let mut sequence = 0_u64;
        let mut frontier = BinaryHeap::new();
        frontier.push(OpenNode {
            bound: root.lower_bound(&objective),
            sequence,
            depth: 0,
            space: root,
        });

        while let Some(node) = frontier.pop() {
            let OpenNode {
                bound,
                depth,
                mut space,
                ..
            } = node;

            if best.is_some_and(|best| bound >= best) {
                // No open node can improve on the best solution anymore.
                break;
            }
            if termination.should_stop() {
                outcome.incomplete = true;
                break;
            }

            if let Some(best) = best {
                space.post(predicate!(objective <= best - 1));
            }

            match propagate_node(&mut space, depth, &mut outcome.statistics, termination) {
                SpaceStatus::Failed => {}
                SpaceStatus::Solved => {
                    let solution = space.solution();
                    let value = solution.get_integer_value(objective.clone());
                    debug!("New best objective value {}", self.objective_value(value));

                    best = Some(value);
                    outcome.solutions.push(solution);
                    if is_solution_limit_reached(self.solution_limit, outcome.solutions.len()) {
                        outcome.incomplete = !frontier.is_empty();
                        break;
                    }
                }
                SpaceStatus::Branch => {
                    let Some(choice) = space.choice().cloned() else {
                        continue;
                    };
                    let last = choice.num_alternatives() - 1;

                    let mut children = (0..last)
                        .map(|alternative| {
                            let mut child = space.clone();
                            child.commit(&choice, alternative);
                            child
                        })
                        .collect::<Vec<_>>();
                    space.commit(&choice, last);
                    children.push(space);

                    // The first alternative gets the highest sequence number.
                    for child in children.into_iter().rev() {
                        sequence += 1;
                        frontier.push(OpenNode {
                            bound: child.lower_bound(&objective),
                            sequence,
                            depth: depth + 1,
                            space: child,
                        });
                    }
                }
            }
        }

        log_outcome("bab", &outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::value_selection::InDomainMax;
    use crate::branching::value_selection::InDomainMin;
    use crate::constraints;
    use crate::search::termination::Indefinite;
    use crate::search::termination::NodeBudget;
    use crate::search::test_models::branch_in_order;
    use crate::search::test_models::sum_of_distinct;
    use crate::search::test_models::weighted_cover;

    #[test]
    fn finds_the_minimum() {
        let (space, sum) = weighted_cover(InDomainMax);

        let outcome = BranchAndBound::minimise(sum).search(space, &mut Indefinite);

        assert!(!outcome.incomplete);
        let best = outcome.best().expect("the problem is feasible");
        assert_eq!(best.get_integer_value(sum), 4);
    }

    #[test]
    fn solutions_strictly_improve() {
        let (space, sum) = weighted_cover(InDomainMax);

        let outcome = BranchAndBound::minimise(sum).search(space, &mut Indefinite);

        let values = outcome
            .solutions
            .iter()
            .map(|solution| solution.get_integer_value(sum))
            .collect::<Vec<_>>();
        assert!(values.windows(2).all(|pair| pair[1] < pair[0]));
    }

    #[test]
    fn finds_the_maximum() {
        let (space, [x, _]) = sum_of_distinct();

        let outcome = BranchAndBound::maximise(x).search(space, &mut Indefinite);

        assert!(!outcome.incomplete);
        assert_eq!(outcome.best().map(|best| best.get_integer_value(x)), Some(3));
    }

    #[test]
    fn infeasible_problem_has_no_solution() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 3).unwrap();
        let y = space.new_bounded_integer(0, 3).unwrap();
        space
            .add_constraint(constraints::less_than(x, y))
            .post()
            .unwrap();
        space
            .add_constraint(constraints::less_than(y, x))
            .post()
            .unwrap();
        branch_in_order(&mut space, &[x, y], InDomainMin);

        let outcome = BranchAndBound::minimise(x).search(space, &mut Indefinite);

        assert!(outcome.is_infeasible());
    }

    #[test]
    fn node_limit_leaves_the_search_incomplete() {
        let (space, sum) = weighted_cover(InDomainMax);

        let outcome = BranchAndBound::minimise(sum).search(space, &mut NodeBudget::new(1));

        assert!(outcome.incomplete);
        assert_eq!(outcome.statistics.nodes, 1);
    }
}
