//! The models which can be solved from the command line.
use std::fmt::Write;

use clap::Subcommand;
use marrow_core::constraints;
use marrow_core::variables::DomainId;
use marrow_core::variables::TransformableVariable;
use marrow_core::Solution;
use marrow_core::Space;

use crate::result::MarrowResult;

#[derive(Debug, Clone, Copy, Subcommand)]
pub(crate) enum ModelKind {
    /// Place `n` queens on an `n` by `n` board such that no two queens attack each other.
    Queens {
        /// The size of the board.
        #[arg(default_value_t = 8)]
        n: i32,
    },
    /// Find `x, y in [0, 3]` with `x + y = 3` and `x != y`.
    SumOfDistinct,
    /// Find `x in {5, 6, 7}` with `x <= 4`; this fails without branching.
    Infeasible,
    /// Minimise `x + y` subject to `x + 2y >= 7` with `x, y in [0, 5]`.
    Cover,
    /// Assign six workers to three shifts which need one, two and three workers, where the first
    /// two workers cannot work the same shift.
    Shifts,
}

/// What is printed for every solution.
#[derive(Debug)]
pub(crate) enum Output {
    Scalar(&'static str, DomainId),
    Array(&'static str, Vec<DomainId>),
}

#[derive(Debug)]
pub(crate) struct Model {
    pub(crate) space: Space,
    /// The variables which are branched on.
    pub(crate) decision_variables: Vec<DomainId>,
    pub(crate) outputs: Vec<Output>,
    /// The variable which is minimised, if any.
    pub(crate) objective: Option<DomainId>,
}

impl ModelKind {
    pub(crate) fn build(self, mut space: Space) -> MarrowResult<Model> {
        match self {
            ModelKind::Queens { n } => queens(space, n),
            ModelKind::SumOfDistinct => {
                let x = space.new_bounded_integer(0, 3)?;
                let y = space.new_bounded_integer(0, 3)?;
                space
                    .add_constraint(constraints::linear_equals(vec![1, 1], vec![x, y], 3))
                    .post()?;
                space
                    .add_constraint(constraints::binary_not_equals(x, y))
                    .post()?;

                Ok(Model {
                    space,
                    decision_variables: vec![x, y],
                    outputs: vec![Output::Scalar("x", x), Output::Scalar("y", y)],
                    objective: None,
                })
            }
            ModelKind::Infeasible => {
                let x = space.new_sparse_integer(vec![5, 6, 7])?;
                space
                    .add_constraint(constraints::linear_less_equal(vec![1], vec![x], 4))
                    .post()?;

                Ok(Model {
                    space,
                    decision_variables: vec![x],
                    outputs: vec![Output::Scalar("x", x)],
                    objective: None,
                })
            }
            ModelKind::Cover => {
                let x = space.new_bounded_integer(0, 5)?;
                let y = space.new_bounded_integer(0, 5)?;
                let cost = space.new_bounded_integer(0, 10)?;
                space
                    .add_constraint(constraints::linear_less_equal(vec![-1, -2], vec![x, y], -7))
                    .post()?;
                space
                    .add_constraint(constraints::linear_equals(
                        vec![1, 1, -1],
                        vec![x, y, cost],
                        0,
                    ))
                    .post()?;

                Ok(Model {
                    space,
                    decision_variables: vec![x, y],
                    outputs: vec![
                        Output::Scalar("x", x),
                        Output::Scalar("y", y),
                        Output::Scalar("cost", cost),
                    ],
                    objective: Some(cost),
                })
            }
            ModelKind::Shifts => {
                let workers = (0..6)
                    .map(|_| space.new_bounded_integer(1, 3))
                    .collect::<Result<Vec<_>, _>>()?;
                space
                    .add_constraint(constraints::count(
                        workers.clone(),
                        vec![1, 2, 3],
                        vec![1, 2, 3],
                    ))
                    .post()?;
                space
                    .add_constraint(constraints::binary_not_equals(workers[0], workers[1]))
                    .post()?;

                Ok(Model {
                    space,
                    decision_variables: workers.clone(),
                    outputs: vec![Output::Array("shift", workers)],
                    objective: None,
                })
            }
        }
    }
}

fn queens(mut space: Space, n: i32) -> MarrowResult<Model> {
    let rows = (0..n)
        .map(|_| space.new_bounded_integer(0, n - 1))
        .collect::<Result<Vec<_>, _>>()?;

    space
        .add_constraint(constraints::all_different(rows.clone()))
        .post()?;
    for sign in [-1, 1] {
        let diagonal = rows
            .iter()
            .enumerate()
            .map(|(column, row)| row.offset(sign * column as i32))
            .collect::<Vec<_>>();
        space
            .add_constraint(constraints::all_different(diagonal))
            .post()?;
    }

    Ok(Model {
        space,
        decision_variables: rows.clone(),
        outputs: vec![Output::Array("q", rows)],
        objective: None,
    })
}

impl Model {
    /// Format a solution in the style of MiniZinc, one output per line.
    pub(crate) fn format_solution(&self, solution: &Solution) -> String {
        let mut formatted = String::new();

        for output in &self.outputs {
            let _ = match output {
                Output::Scalar(name, variable) => {
                    writeln!(formatted, "{name} = {};", solution.get_integer_value(*variable))
                }
                Output::Array(name, variables) => {
                    let values = variables
                        .iter()
                        .map(|&variable| solution.get_integer_value(variable).to_string())
                        .collect::<Vec<_>>();
                    writeln!(formatted, "{name} = [{}];", values.join(", "))
                }
            };
        }

        formatted
    }
}

#[cfg(test)]
mod tests {
    use marrow_core::branching::BranchingStrategy;
    use marrow_core::search::termination::Indefinite;
    use marrow_core::search::Dfs;
    use marrow_core::search::SearchEngine;
    use marrow_core::ConstraintOperationError;

    use super::*;
    use crate::result::MarrowError;

    fn solve_all(kind: ModelKind) -> (Model, Vec<Solution>) {
        let mut model = kind.build(Space::default()).expect("valid model");
        let brancher = BranchingStrategy::default().create_brancher(&model.decision_variables);
        model.space.add_brancher(brancher);

        let outcome = Dfs::default().search(model.space.clone(), &mut Indefinite);
        assert!(!outcome.incomplete);
        (model, outcome.solutions)
    }

    #[test]
    fn queens_has_the_known_number_of_solutions() {
        assert_eq!(solve_all(ModelKind::Queens { n: 6 }).1.len(), 4);
        assert_eq!(solve_all(ModelKind::Queens { n: 8 }).1.len(), 92);
    }

    #[test]
    fn empty_board_is_a_model_error() {
        assert!(matches!(
            ModelKind::Queens { n: 0 }.build(Space::default()),
            Err(MarrowError::Model(
                ConstraintOperationError::EmptyInitialDomain { .. }
            ))
        ));
    }

    #[test]
    fn shifts_respect_the_demand() {
        let (model, solutions) = solve_all(ModelKind::Shifts);

        assert_eq!(solutions.len(), 44);
        for solution in &solutions {
            let shifts = model
                .decision_variables
                .iter()
                .map(|&worker| solution.get_integer_value(worker))
                .collect::<Vec<_>>();
            for (shift, demand) in [(1, 1), (2, 2), (3, 3)] {
                assert_eq!(shifts.iter().filter(|&&s| s == shift).count(), demand);
            }
            assert_ne!(shifts[0], shifts[1]);
        }
    }

    #[test]
    fn infeasible_model_has_no_solutions() {
        assert!(solve_all(ModelKind::Infeasible).1.is_empty());
    }

    #[test]
    fn solutions_are_formatted_per_output() {
        let (model, solutions) = solve_all(ModelKind::SumOfDistinct);

        assert_eq!(model.format_solution(&solutions[0]), "x = 0;\ny = 3;\n");
    }
}
