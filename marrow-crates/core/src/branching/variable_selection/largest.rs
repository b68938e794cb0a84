use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::marrow_asserts::marrow_assert_eq_simple;
use crate::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the variable with the largest upper bound.
///
/// Uses a [`TieBreaker`] to break ties, the default is the [`InOrderTieBreaker`] but it is
/// possible to construct the variable selector with a custom [`TieBreaker`] by using
/// the method [`Largest::with_tie_breaker`].
#[derive(Clone)]
pub struct Largest<Var, TieBreaking> {
    variables: Vec<Var>,
    tie_breaker: TieBreaking,
}

impl<Var, TieBreaking> std::fmt::Debug for Largest<Var, TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Largest").finish()
    }
}

impl<Var: Clone> Largest<Var, InOrderTieBreaker<Var, i32>> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The Largest variable selector was not provided with any variables");
        }
        Self {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Maximum),
        }
    }
}

impl<Var: Clone, TieBreaking: TieBreaker<Var, i32>> Largest<Var, TieBreaking> {
    pub fn with_tie_breaker(variables: &[Var], tie_breaker: TieBreaking) -> Self {
        marrow_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Maximum,
            "The provided tie-breaker to Largest attempts to find the Minimum value
             instead of the Maximum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The Largest variable selector was not provided with any variables");
        }

        Self {
            variables: variables.to_vec(),
            tie_breaker,
        }
    }
}

impl<Var, TieBreaking> VariableSelector<Var> for Largest<Var, TieBreaking>
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
                    .consider(*variable, context.upper_bound(variable));
            });
        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::tie_breaking::RandomTieBreaker;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn test_correctly_selected() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(3, 10).unwrap();
        let y = space.new_bounded_integer(-2, 20).unwrap();
        let z = space.new_bounded_integer(30, 30).unwrap();
        let mut strategy = Largest::new(&[x, y, z]);
        let mut test_rng = TestRandom::default();

        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
        assert_eq!(strategy.select_variable(&mut context), Some(y));
    }

    #[test]
    fn ties_are_broken_by_the_tie_breaker() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 20).unwrap();
        let y = space.new_bounded_integer(5, 20).unwrap();
        let tie_breaker = RandomTieBreaker::new(
            Direction::Maximum,
            Box::new(TestRandom {
                bools: vec![true],
                ..Default::default()
            }),
        );
        let mut strategy = Largest::with_tie_breaker(&[x, y], tie_breaker);
        let mut test_rng = TestRandom::default();

        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
        assert_eq!(strategy.select_variable(&mut context), Some(y));
    }
}
