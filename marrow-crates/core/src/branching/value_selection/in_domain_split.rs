use crate::branching::value_selection::ValueSelector;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::marrow_asserts::marrow_assert_advanced;
use crate::predicate;
use crate::variables::IntegerVariable;

/// A [`ValueSelector`] which splits the domain in half (based on the lower-bound and upper-bound,
/// disregarding holes) and first explores the lower half.
///
/// Note that this strategy will not necessarily result in an equal split if there are holes in the
/// domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainSplit;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainSplit {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Choice {
        let bound = InDomainSplit::middle(context, &decision_variable);
        Choice::binary(predicate!(decision_variable <= bound))
    }
}

impl InDomainSplit {
    /// The largest value of the lower half of the bounds of `decision_variable`.
    pub(crate) fn middle<Var: IntegerVariable>(
        context: &SelectionContext,
        decision_variable: &Var,
    ) -> i32 {
        // The domain has at least two values, otherwise the variable would not be selected.
        let lower_bound = context.lower_bound(decision_variable);
        let upper_bound = context.upper_bound(decision_variable);
        let bound = (lower_bound as i64 + (upper_bound as i64 - lower_bound as i64) / 2) as i32;
        marrow_assert_advanced!(
            lower_bound <= bound && bound < upper_bound,
            "It should hold that {lower_bound} <= {bound} < {upper_bound}",
        );
        bound
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

        let choice = InDomainSplit.select_value(&mut context, x);

        assert_eq!(choice, Choice::new(vec![predicate!(x <= 5), predicate!(x >= 6)]));
    }

    #[test]
    fn test_domain_of_size_two() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(1, 2).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainSplit.select_value(&mut context, x);

        assert_eq!(choice, Choice::binary(predicate!(x <= 1)));
    }

    #[test]
    fn negative_domains_are_split_towards_minus_infinity() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(-5, -2).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainSplit.select_value(&mut context, x);

        assert_eq!(choice, Choice::binary(predicate!(x <= -4)));
    }
}
