use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use super::Choice;
use super::SelectionContext;
#[cfg(doc)]
use crate::basic_types::Random;
use crate::basic_types::Solution;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::statistics::StatisticLogger;

/// A trait for defining a branching strategy (oftentimes utilising a [`VariableSelector`] and a
/// [`ValueSelector`]).
///
/// Branchers live inside a [`crate::Space`] and are cloned together with it. After a space
/// reaches a fixpoint, its branchers are asked in order of addition for a [`Choice`]; when none of
/// them has one, the space is solved.
///
/// The alternatives of a returned [`Choice`] have to cover the current domain of the branched
/// variable and each of them has to exclude at least one value. If the [`Brancher`] (or any
/// component thereof) is implemented incorrectly then the behaviour of the search is undefined.
pub trait Brancher: DynClone + Send {
    /// Logs statistics of the brancher using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}

    /// Returns the next [`Choice`] (or [`None`] if all variables under consideration are
    /// assigned).
    ///
    /// Note that this method **cannot** commit the choice; the [`SelectionContext`] is only
    /// mutable to account for the usage of random generators (e.g. see [`Random`]).
    fn next_choice(&mut self, context: &mut SelectionContext) -> Option<Choice>;

    /// This method is called when a solution is found; either a new incumbent of an optimisation
    /// search or the solution which ended a run of a restart-based search.
    fn on_solution(&mut self, _solution: &Solution) {}

    /// This method is called whenever a restart is performed.
    fn on_restart(&mut self) {}

    /// This method returns whether a restart is *currently* pointless for the [`Brancher`].
    ///
    /// For example, if a [`Brancher`] is using a static search strategy then a restart is
    /// pointless.
    fn is_restart_pointless(&mut self) -> bool {
        true
    }
}

// Cloning a space clones its branchers.
clone_trait_object!(Brancher);

impl Brancher for Box<dyn Brancher> {
    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        (**self).log_statistics(statistic_logger)
    }

    fn next_choice(&mut self, context: &mut SelectionContext) -> Option<Choice> {
        (**self).next_choice(context)
    }

    fn on_solution(&mut self, solution: &Solution) {
        (**self).on_solution(solution)
    }

    fn on_restart(&mut self) {
        (**self).on_restart()
    }

    fn is_restart_pointless(&mut self) -> bool {
        (**self).is_restart_pointless()
    }
}
