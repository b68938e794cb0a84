use crate::branching::value_selection::InDomainSplit;
use crate::branching::value_selection::ValueSelector;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::variables::IntegerVariable;

/// A [`ValueSelector`] which splits the domain in half (see [`InDomainSplit`]) and first explores
/// the upper half.
#[derive(Debug, Copy, Clone)]
pub struct InDomainReverseSplit;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainReverseSplit {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Choice {
        let bound = InDomainSplit::middle(context, &decision_variable);
        Choice::binary(predicate!(decision_variable >= bound + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn test_returns_correct_choice() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 10).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainReverseSplit.select_value(&mut context, x);

        assert_eq!(choice, Choice::new(vec![predicate!(x >= 6), predicate!(x <= 5)]));
    }
}
