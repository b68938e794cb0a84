use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::marrow_asserts::marrow_assert_eq_simple;
use crate::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the variable with the largest accumulated failure count
/// weighted degree (see [`SelectionContext::weighted_degree`]).
///
/// The failure counts are shared by all copies of a space, so the selection adapts as the search
/// encounters failures.
///
/// Uses a [`TieBreaker`] to break ties, the default is the [`InOrderTieBreaker`] but it is
/// possible to construct the variable selector with a custom [`TieBreaker`] by using
/// the method [`MaxWeightedDegree::with_tie_breaker`].
#[derive(Clone)]
pub struct MaxWeightedDegree<Var, TieBreaking> {
    variables: Vec<Var>,
    tie_breaker: TieBreaking,
}

impl<Var, TieBreaking> std::fmt::Debug for MaxWeightedDegree<Var, TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaxWeightedDegree").finish()
    }
}

impl<Var: Clone> MaxWeightedDegree<Var, InOrderTieBreaker<Var, u64>> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The MaxWeightedDegree variable selector was not provided with any variables");
        }
        Self {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Maximum),
        }
    }
}

impl<Var: Clone, TieBreaking: TieBreaker<Var, u64>> MaxWeightedDegree<Var, TieBreaking> {
    pub fn with_tie_breaker(variables: &[Var], tie_breaker: TieBreaking) -> Self {
        marrow_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Maximum,
            "The provided tie-breaker to MaxWeightedDegree attempts to find the Minimum value
             instead of the Maximum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The MaxWeightedDegree variable selector was not provided with any variables");
        }

        Self {
            variables: variables.to_vec(),
            tie_breaker,
        }
    }
}

impl<Var, TieBreaking> VariableSelector<Var> for MaxWeightedDegree<Var, TieBreaking>
where
    Var: IntegerVariable + Copy,
    TieBreaking: TieBreaker<Var, u64> + 'static,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .filter(|variable| !context.is_integer_fixed(*variable))
            .for_each(|variable| {
                self.tie_breaker
                    .consider(*variable, context.weighted_degree(variable.domain_id()));
            });
        self.tie_breaker.select()
    }

    fn is_restart_pointless(&mut self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn the_most_constrained_variable_is_selected() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 5).unwrap();
        let y = space.new_bounded_integer(0, 5).unwrap();
        let z = space.new_bounded_integer(0, 5).unwrap();
        space
            .add_constraint(constraints::binary_not_equals(y, x))
            .post()
            .unwrap();
        space
            .add_constraint(constraints::binary_not_equals(z, x))
            .post()
            .unwrap();

        let mut strategy = MaxWeightedDegree::new(&[y, z, x]);
        let selected = space.with_selection_context(|context| strategy.select_variable(context));

        assert_eq!(selected, Some(x));
    }

    #[test]
    fn without_degree_information_the_first_variable_is_selected() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 5).unwrap();
        let y = space.new_bounded_integer(0, 5).unwrap();
        let mut test_rng = crate::basic_types::TestRandom::default();

        let mut strategy = MaxWeightedDegree::new(&[x, y]);
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        assert_eq!(strategy.select_variable(&mut context), Some(x));
    }
}
