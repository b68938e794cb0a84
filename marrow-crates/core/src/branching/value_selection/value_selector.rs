use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use crate::basic_types::Solution;
#[cfg(doc)]
use crate::branching::value_selection::InDomainMin;
#[cfg(doc)]
use crate::branching::value_selection::InDomainRandom;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::branching::Choice;
use crate::branching::SelectionContext;

/// A trait containing the interface for [`ValueSelector`]s, specifying the appropriate hooks into
/// the search and the methods required for selecting values.
pub trait ValueSelector<Var>: DynClone + Send {
    /// Determines the [`Choice`] to branch on for the unfixed `decision_variable`; examples are
    /// assigning the smallest value ([`InDomainMin`]) or a random value ([`InDomainRandom`]).
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Choice;

    /// Called when a solution is found, see [`Brancher::on_solution`].
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Called when a restart is performed, see [`Brancher::on_restart`].
    fn on_restart(&mut self) {}

    /// This method returns whether a restart is *currently* pointless for the [`ValueSelector`].
    fn is_restart_pointless(&mut self) -> bool {
        true
    }
}

clone_trait_object!(<Var> ValueSelector<Var>);

impl<Var> ValueSelector<Var> for Box<dyn ValueSelector<Var>> {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Choice {
        self.as_mut().select_value(context, decision_variable)
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.as_mut().on_solution(solution)
    }

    fn on_restart(&mut self) {
        self.as_mut().on_restart()
    }

    fn is_restart_pointless(&mut self) -> bool {
        self.as_mut().is_restart_pointless()
    }
}
