use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::marrow_asserts::marrow_assert_eq_simple;
use crate::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the variable with the largest domain (counting only the
/// values which are actually in the domain).
///
/// Uses a [`TieBreaker`] to break ties, the default is the [`InOrderTieBreaker`] but it is
/// possible to construct the variable selector with a custom [`TieBreaker`] by using
/// the method [`AntiFirstFail::with_tie_breaker`].
#[derive(Clone)]
pub struct AntiFirstFail<Var, TieBreaking> {
    variables: Vec<Var>,
    tie_breaker: TieBreaking,
}

impl<Var, TieBreaking> std::fmt::Debug for AntiFirstFail<Var, TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AntiFirstFail").finish()
    }
}

impl<Var: Clone> AntiFirstFail<Var, InOrderTieBreaker<Var, u32>> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The AntiFirstFail variable selector was not provided with any variables");
        }
        Self {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Maximum),
        }
    }
}

impl<Var: Clone, TieBreaking: TieBreaker<Var, u32>> AntiFirstFail<Var, TieBreaking> {
    pub fn with_tie_breaker(variables: &[Var], tie_breaker: TieBreaking) -> Self {
        marrow_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Maximum,
            "The provided tie-breaker to AntiFirstFail attempts to find the Minimum value
             instead of the Maximum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The AntiFirstFail variable selector was not provided with any variables");
        }

        Self {
            variables: variables.to_vec(),
            tie_breaker,
        }
    }
}

impl<Var, TieBreaking> VariableSelector<Var> for AntiFirstFail<Var, TieBreaking>
where
    Var: IntegerVariable + Copy,
    TieBreaking: TieBreaker<Var, u32> + 'static,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .filter(|variable| !context.is_integer_fixed(*variable))
            .for_each(|variable| {
                self.tie_breaker
                    .consider(*variable, context.get_size_of_domain(variable));
            });
        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::predicate;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn test_correctly_selected() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 10).unwrap();
        let y = space.new_bounded_integer(5, 20).unwrap();
        let mut strategy = AntiFirstFail::new(&[x, y]);
        let mut test_rng = TestRandom::default();

        {
            let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
            assert_eq!(strategy.select_variable(&mut context), Some(y));
        }

        space.post(predicate!(y >= 18));

        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
        assert_eq!(strategy.select_variable(&mut context), Some(x));
    }
}
