use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::marrow_asserts::marrow_assert_eq_simple;
use crate::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the variable with the smallest lower bound.
///
/// Uses a [`TieBreaker`] to break ties, the default is the [`InOrderTieBreaker`] but it is
/// possible to construct the variable selector with a custom [`TieBreaker`] by using
/// the method [`Smallest::with_tie_breaker`].
#[derive(Clone)]
pub struct Smallest<Var, TieBreaking> {
    variables: Vec<Var>,
    tie_breaker: TieBreaking,
}

impl<Var, TieBreaking> std::fmt::Debug for Smallest<Var, TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Smallest").finish()
    }
}

impl<Var: Clone> Smallest<Var, InOrderTieBreaker<Var, i32>> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The Smallest variable selector was not provided with any variables");
        }
        Self {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Minimum),
        }
    }
}

impl<Var: Clone, TieBreaking: TieBreaker<Var, i32>> Smallest<Var, TieBreaking> {
    pub fn with_tie_breaker(variables: &[Var], tie_breaker: TieBreaking) -> Self {
        marrow_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Minimum,
            "The provided tie-breaker to Smallest attempts to find the Maximum value
             instead of the Minimum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The Smallest variable selector was not provided with any variables");
        }

        Self {
            variables: variables.to_vec(),
            tie_breaker,
        }
    }
}

impl<Var, TieBreaking> VariableSelector<Var> for Smallest<Var, TieBreaking>
where
    Var: IntegerVariable + Copy,
    TieBreaking: TieBreaker<Var, i32> + 'static,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .filter(|variable| !context.is_integer_fixed(*variable))
            .for_each(|variable| {
                self.tie_breaker
                    .consider(*variable, context.lower_bound(variable));
            });
        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn test_correctly_selected() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(3, 10).unwrap();
        let y = space.new_bounded_integer(-2, 20).unwrap();
        let z = space.new_bounded_integer(-5, -5).unwrap();
        let mut strategy = Smallest::new(&[x, y, z]);
        let mut test_rng = TestRandom::default();

        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
        assert_eq!(strategy.select_variable(&mut context), Some(y));
    }
}
