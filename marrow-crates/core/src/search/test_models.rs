#![cfg(test)]
//! Small models shared by the tests of the search engines.
use std::collections::BTreeSet;

use crate::basic_types::Solution;
use crate::branching::branchers::IndependentVariableValueBrancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::InputOrder;
use crate::constraints;
use crate::variables::DomainId;
use crate::variables::TransformableVariable;
use crate::Space;

/// `x + y = 3` and `x != y` with `x, y in [0, 3]`; it has four solutions.
pub(crate) fn sum_of_distinct() -> (Space, [DomainId; 2]) {
    let mut space = Space::default();
    let x = space.new_bounded_integer(0, 3).expect("valid domain");
    let y = space.new_bounded_integer(0, 3).expect("valid domain");

    space
        .add_constraint(constraints::linear_equals(vec![1, 1], vec![x, y], 3))
        .post()
        .expect("valid constraint");
    space
        .add_constraint(constraints::binary_not_equals(x, y))
        .post()
        .expect("valid constraint");
    branch_in_order(&mut space, &[x, y], InDomainMin);

    (space, [x, y])
}

/// Minimise `x + y` subject to `x + 2y >= 7`, with `x, y in [0, 5]`; the optimum is 4. Returns
/// the variable holding `x + y`.
pub(crate) fn weighted_cover(
    value_selector: impl ValueSelector<DomainId> + Clone + 'static,
) -> (Space, DomainId) {
    let mut space = Space::default();
    let x = space.new_bounded_integer(0, 5).expect("valid domain");
    let y = space.new_bounded_integer(0, 5).expect("valid domain");
    let sum = space.new_bounded_integer(0, 10).expect("valid domain");

    space
        .add_constraint(constraints::linear_less_equal(vec![-1, -2], vec![x, y], -7))
        .post()
        .expect("valid constraint");
    space
        .add_constraint(constraints::linear_equals(vec![1, 1, -1], vec![x, y, sum], 0))
        .post()
        .expect("valid constraint");
    branch_in_order(&mut space, &[x, y], value_selector);

    (space, sum)
}

/// The `n`-queens problem, branching in order with [`InDomainMin`].
pub(crate) fn queens(n: i32) -> (Space, Vec<DomainId>) {
    let (mut space, queens) = queens_without_brancher(n);
    branch_in_order(&mut space, &queens, InDomainMin);
    (space, queens)
}

/// The `n`-queens problem, with one variable per column holding the row of its queen.
pub(crate) fn queens_without_brancher(n: i32) -> (Space, Vec<DomainId>) {
    let mut space = Space::default();
    let queens = (0..n)
        .map(|_| space.new_bounded_integer(0, n - 1).expect("valid domain"))
        .collect::<Vec<_>>();

    space
        .add_constraint(constraints::all_different(queens.clone()))
        .post()
        .expect("valid constraint");
    for sign in [-1, 1] {
        let diagonal = queens
            .iter()
            .enumerate()
            .map(|(column, queen)| queen.offset(sign * column as i32))
            .collect::<Vec<_>>();
        space
            .add_constraint(constraints::all_different(diagonal))
            .post()
            .expect("valid constraint");
    }

    (space, queens)
}

/// Branch over `variables` in the given order.
pub(crate) fn branch_in_order(
    space: &mut Space,
    variables: &[DomainId],
    value_selector: impl ValueSelector<DomainId> + Clone + 'static,
) {
    space.add_brancher(IndependentVariableValueBrancher::new(
        InputOrder::new(variables),
        value_selector,
    ));
}

/// The values of `variables` in each solution, in the order in which the solutions were found.
pub(crate) fn values_of(solutions: &[Solution], variables: &[DomainId]) -> Vec<Vec<i32>> {
    solutions
        .iter()
        .map(|solution| {
            variables
                .iter()
                .map(|&variable| solution.get_integer_value(variable))
                .collect()
        })
        .collect()
}

/// The distinct assignments of `variables` among the solutions.
pub(crate) fn distinct_values_of(
    solutions: &[Solution],
    variables: &[DomainId],
) -> BTreeSet<Vec<i32>> {
    values_of(solutions, variables).into_iter().collect()
}
