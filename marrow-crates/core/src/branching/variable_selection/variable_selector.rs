use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use crate::basic_types::Solution;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::branching::SelectionContext;

/// A trait containing the interface for [`VariableSelector`]s, specifying the appropriate hooks
/// into the search and the methods required for selecting variables.
pub trait VariableSelector<Var>: DynClone + Send {
    /// Determines which variable to select next if there are any left to branch on.
    /// Should only return [`None`] when all variables which have been passed to the
    /// [`VariableSelector`] have been assigned. Otherwise it should return the variable to
    /// branch on next.
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var>;

    /// Called when a solution is found, see [`Brancher::on_solution`].
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Called when a restart is performed, see [`Brancher::on_restart`].
    fn on_restart(&mut self) {}

    /// This method returns whether a restart is *currently* pointless for the
    /// [`VariableSelector`].
    fn is_restart_pointless(&mut self) -> bool {
        true
    }
}

clone_trait_object!(<Var> VariableSelector<Var>);

impl<Var> VariableSelector<Var> for Box<dyn VariableSelector<Var>> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.as_mut().select_variable(context)
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
