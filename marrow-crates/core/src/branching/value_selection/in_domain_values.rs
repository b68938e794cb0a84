use crate::branching::value_selection::ValueSelector;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::variables::IntegerVariable;

/// A [`ValueSelector`] which creates one alternative per value of the domain, in increasing order.
#[derive(Debug, Clone, Copy)]
pub struct InDomainValues;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainValues {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Choice {
        Choice::new(
            context
                .values(&decision_variable)
                .into_iter()
                .map(|value| predicate!(decision_variable == value))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn one_alternative_per_value() {
        let mut space = Space::default();
        let x = space.new_sparse_integer(vec![5, 1, 3]).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainValues.select_value(&mut context, x);

        assert_eq!(
            choice,
            Choice::new(vec![
                predicate!(x == 1),
                predicate!(x == 3),
                predicate!(x == 5)
            ])
        );
    }
}
