use crate::branching::value_selection::ValueSelector;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::variables::IntegerVariable;

/// A [`ValueSelector`] which first tries the median value of the domain, and then excludes it.
///
/// Unlike [`super::InDomainSplit`], holes are taken into account: the median is an element of the
/// domain. For domains with an even number of values, the lower of the two middle values is used.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMedian;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMedian {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Choice {
        let size = context.get_size_of_domain(&decision_variable);
        let median = context
            .nth_value(&decision_variable, (size - 1) / 2)
            .unwrap_or_else(|| context.lower_bound(&decision_variable));
        Choice::binary(predicate!(decision_variable == median))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::propagation::HasAssignments;
    use crate::variables::TransformableVariable;
    use crate::Space;

    #[test]
    fn median_of_an_odd_domain() {
        let mut space = Space::default();
        let x = space.new_sparse_integer(vec![1, 2, 8, 9, 10]).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainMedian.select_value(&mut context, x);

        assert_eq!(choice, Choice::binary(predicate!(x == 8)));
    }

    #[test]
    fn median_of_an_even_domain_is_the_lower_middle() {
        let mut space = Space::default();
        let x = space.new_sparse_integer(vec![1, 2, 8, 9]).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainMedian.select_value(&mut context, x);

        assert_eq!(choice, Choice::binary(predicate!(x == 2)));
    }

    #[test]
    fn median_of_a_wide_domain() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 2_000_000_000).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainMedian.select_value(&mut context, x);

        assert_eq!(choice, Choice::binary(predicate!(x == 1_000_000_000)));
    }

    #[test]
    fn median_of_a_view_with_holes() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 4).unwrap();
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = InDomainMedian.select_value(&mut context, x.scaled(3));

        // The view takes the values 0, 3, 6, 9 and 12.
        assert_eq!(choice, Choice::binary(predicate!(x == 2)));
    }
}
