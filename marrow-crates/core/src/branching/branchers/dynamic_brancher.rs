//! A [`Brancher`] which sequentially applies a list of [`Brancher`]s until all of them can not find
//! another choice.
//!
//! Note that this structure should be used if you want to use dynamic [`Brancher`]s but
//! require a [`Sized`] object (e.g. when a function takes as input `impl Brancher`).
use std::fmt::Debug;

use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::statistics::StatisticLogger;

/// An implementation of a [`Brancher`] which takes a [`Vec`] of `Box<dyn Brancher>` and
/// sequentially applies [`Brancher::next_choice`] until all of them return [`None`].
///
/// Every call starts again from the first brancher, since restoring an earlier state of a space
/// can give work back to a brancher that was already exhausted.
///
/// For any other method in [`Brancher`] it will simply pass it along to all of the provided
/// `Box<dyn Brancher>`s.
#[derive(Clone)]
pub struct DynamicBrancher {
    branchers: Vec<Box<dyn Brancher>>,
}

impl Debug for DynamicBrancher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicBrancher")
            .field("num_branchers", &self.branchers.len())
            .finish()
    }
}

impl DynamicBrancher {
    /// Creates a new [`DynamicBrancher`] with the provided `branchers`. It will attempt to use the
    /// `branchers` in the order in which they were provided.
    pub fn new(branchers: Vec<Box<dyn Brancher>>) -> Self {
        Self { branchers }
    }

    pub fn add_brancher(&mut self, brancher: Box<dyn Brancher>) {
        self.branchers.push(brancher);
    }

    pub fn is_empty(&self) -> bool {
        self.branchers.is_empty()
    }
}

impl Brancher for DynamicBrancher {
    fn next_choice(&mut self, context: &mut SelectionContext) -> Option<Choice> {
        self.branchers
            .iter_mut()
            .find_map(|brancher| brancher.next_choice(context))
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.branchers
            .iter()
            .enumerate()
            .for_each(move |(index, brancher)| {
                brancher.log_statistics(statistic_logger.attach_to_prefix(index))
            })
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_solution(solution));
    }

    fn on_restart(&mut self) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_restart());
    }

    fn is_restart_pointless(&mut self) -> bool {
        // Do not use `all` here, every brancher has to be asked.
        self.branchers
            .iter_mut()
            .fold(true, |pointless, brancher| {
                brancher.is_restart_pointless() && pointless
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::branchers::IndependentVariableValueBrancher;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::predicate;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn later_branchers_are_used_once_earlier_ones_are_exhausted() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 3).unwrap();
        let y = space.new_bounded_integer(0, 3).unwrap();
        let mut brancher = DynamicBrancher::new(vec![
            Box::new(IndependentVariableValueBrancher::new(
                InputOrder::new(&[x]),
                InDomainMin,
            )),
            Box::new(IndependentVariableValueBrancher::new(
                InputOrder::new(&[y]),
                InDomainMin,
            )),
        ]);
        let mut test_rng = TestRandom::default();

        {
            let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
            assert_eq!(
                brancher.next_choice(&mut context),
                Some(Choice::binary(predicate!(x == 0)))
            );
        }

        space.post(predicate!(x == 2));
        {
            let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
            assert_eq!(
                brancher.next_choice(&mut context),
                Some(Choice::binary(predicate!(y == 0)))
            );
        }

        space.post(predicate!(y == 1));
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
        assert!(brancher.next_choice(&mut context).is_none());
    }
}
