use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::variables::IntegerVariable;

/// A [`VariableSelector`] which selects the first unfixed variable in the order in which the
/// variables were provided.
#[derive(Debug, Clone)]
pub struct InputOrder<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> InputOrder<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The InputOrder variable selector was not provided with any variables");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl<Var: IntegerVariable> VariableSelector<Var> for InputOrder<Var> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .find(|variable| !context.is_integer_fixed(*variable))
            .cloned()
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
        let mut strategy = InputOrder::new(&[x, y]);
        let mut test_rng = TestRandom::default();

        {
            let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
            assert_eq!(strategy.select_variable(&mut context), Some(x));
        }

        space.post(predicate!(x == 3));

        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
        assert_eq!(strategy.select_variable(&mut context), Some(y));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(10, 10).unwrap();
        let y = space.new_bounded_integer(20, 20).unwrap();
        let mut strategy = InputOrder::new(&[x, y]);
        let mut test_rng = TestRandom::default();

        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
        assert!(strategy.select_variable(&mut context).is_none());
    }
}
