use crate::branching::value_selection::ValueSelector;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::variables::IntegerVariable;

/// A [`ValueSelector`] which first tries a random value of the domain, and then excludes it.
#[derive(Debug, Clone, Copy)]
pub struct InDomainRandom;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainRandom {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Choice {
        let size = context.get_size_of_domain(&decision_variable);
        let random_index = context.random().generate_usize_in_range(0..size as usize);
        let value = context
            .nth_value(&decision_variable, random_index as u32)
            .unwrap_or_else(|| context.lower_bound(&decision_variable));
        Choice::binary(predicate!(decision_variable == value))
    }

    fn is_restart_pointless(&mut self) -> bool {
        false
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
        let x = space.new_sparse_integer(vec![0, 4, 6, 10]).unwrap();
        let mut test_random = TestRandom {
            usizes: vec![2],
            ..Default::default()
        };
        let mut context = SelectionContext::new(space.assignments(), &mut test_random);

        let choice = InDomainRandom.select_value(&mut context, x);

        assert_eq!(choice, Choice::binary(predicate!(x == 6)));
    }
}
