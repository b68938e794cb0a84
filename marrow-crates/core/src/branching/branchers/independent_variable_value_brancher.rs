//! A [`Brancher`] which simply uses a single [`VariableSelector`] and a single [`ValueSelector`].

use std::marker::PhantomData;

use crate::basic_types::Solution;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::Choice;
use crate::branching::SelectionContext;

/// An implementation of a [`Brancher`] which simply uses a single [`VariableSelector`] and a
/// single [`ValueSelector`] independently of one another.
#[derive(Debug)]
pub struct IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect> {
    /// Determines which (unfixed) variable to branch next on.
    pub(crate) variable_selector: VariableSelect,
    /// Determines how the domain of the selected variable is split.
    pub(crate) value_selector: ValueSelect,
    pub(crate) variable_type: PhantomData<fn() -> Var>,
}

impl<Var, VariableSelect, ValueSelect>
    IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    pub fn new(variable_selector: VariableSelect, value_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
            variable_type: PhantomData,
        }
    }
}

impl<Var, VariableSelect: Clone, ValueSelect: Clone> Clone
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
{
    fn clone(&self) -> Self {
        IndependentVariableValueBrancher {
            variable_selector: self.variable_selector.clone(),
            value_selector: self.value_selector.clone(),
            variable_type: PhantomData,
        }
    }
}

impl<Var, VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    Var: 'static,
    VariableSelect: VariableSelector<Var> + Clone + 'static,
    ValueSelect: ValueSelector<Var> + Clone + 'static,
{
    /// First we select a variable
    ///  - If all variables under consideration are fixed (i.e. `select_variable` return None) then
    ///    we simply return None
    ///  - Otherwise we select a value and return the corresponding choice
    fn next_choice(&mut self, context: &mut SelectionContext) -> Option<Choice> {
        self.variable_selector
            .select_variable(context)
            .map(|selected_variable| self.value_selector.select_value(context, selected_variable))
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.variable_selector.on_solution(solution);
        self.value_selector.on_solution(solution);
    }

    fn on_restart(&mut self) {
        self.variable_selector.on_restart();
        self.value_selector.on_restart();
    }

    fn is_restart_pointless(&mut self) -> bool {
        self.variable_selector.is_restart_pointless() && self.value_selector.is_restart_pointless()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::value_selection::InDomainMax;
    use crate::branching::variable_selection::InputOrder;
    use crate::predicate;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn variable_and_value_are_selected_independently() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 0).unwrap();
        let y = space.new_bounded_integer(2, 6).unwrap();
        let mut brancher = IndependentVariableValueBrancher::new(InputOrder::new(&[x, y]), InDomainMax);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = brancher.next_choice(&mut context);

        assert_eq!(choice, Some(Choice::binary(predicate!(y == 6))));
    }

    #[test]
    fn no_choice_when_everything_is_fixed() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(3, 3).unwrap();
        let mut brancher = IndependentVariableValueBrancher::new(InputOrder::new(&[x]), InDomainMax);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        assert!(brancher.next_choice(&mut context).is_none());
    }

    #[test]
    fn boxed_clone_continues_independently() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(1, 4).unwrap();
        let mut brancher: Box<dyn Brancher> = Box::new(IndependentVariableValueBrancher::new(
            InputOrder::new(&[x]),
            InDomainMax,
        ));
        let mut cloned = dyn_clone::clone_box(&*brancher);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        assert_eq!(
            brancher.next_choice(&mut context),
            cloned.next_choice(&mut context)
        );
    }
}
