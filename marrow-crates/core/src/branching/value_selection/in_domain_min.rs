use crate::branching::value_selection::ValueSelector;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::variables::IntegerVariable;

/// A [`ValueSelector`] which first tries the lower bound of the domain, and then excludes it.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMin {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Choice {
        let lower_bound = context.lower_bound(&decision_variable);
        Choice::binary(predicate!(decision_variable == lower_bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::variables::TransformableVariable;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn test_returns_correct_choice() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(3, 10).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainMin.select_value(&mut context, x);

        assert_eq!(choice, Choice::new(vec![predicate!(x == 3), predicate!(x != 3)]));
    }

    #[test]
    fn negated_view_branches_on_the_upper_bound_of_the_domain() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(3, 10).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainMin.select_value(&mut context, x.scaled(-1));

        assert_eq!(choice, Choice::binary(predicate!(x == 10)));
    }
}
