use crate::basic_types::Solution;
use crate::branching::value_selection::ValueSelector;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::variables::IntegerVariable;

/// A [`ValueSelector`] which first tries the value a variable had in the last solution found, and
/// falls back to another [`ValueSelector`] when there is no such solution or the value has been
/// removed from the domain.
///
/// Combined with restarts, this lets the search continue around the last solution.
#[derive(Debug, Clone)]
pub struct InDomainLastValue<ValueSelect> {
    last_solution: Option<Solution>,
    backup_selector: ValueSelect,
}

impl<ValueSelect> InDomainLastValue<ValueSelect> {
    pub fn new(backup_selector: ValueSelect) -> Self {
        InDomainLastValue {
            last_solution: None,
            backup_selector,
        }
    }
}

impl<Var, ValueSelect> ValueSelector<Var> for InDomainLastValue<ValueSelect>
where
    Var: IntegerVariable,
    ValueSelect: ValueSelector<Var> + Clone,
{
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Choice {
        if let Some(solution) = &self.last_solution {
            let last_value = solution.get_integer_value(decision_variable.clone());
            if context.contains(&decision_variable, last_value) {
                return Choice::binary(predicate!(decision_variable == last_value));
            }
        }

        self.backup_selector.select_value(context, decision_variable)
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.last_solution = Some(solution.clone());
        self.backup_selector.on_solution(solution);
    }

    fn on_restart(&mut self) {
        self.backup_selector.on_restart();
    }

    fn is_restart_pointless(&mut self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::value_selection::InDomainMin;
    use crate::propagation::HasAssignments;
    use crate::Space;
    use crate::variables::DomainId;

    #[test]
    fn backup_is_used_without_a_solution() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 10).unwrap();
        let mut test_rng = TestRandom::default();
        let mut selector = InDomainLastValue::new(InDomainMin);
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        let choice = selector.select_value(&mut context, x);

        assert_eq!(choice, Choice::binary(predicate!(x == 0)));
    }

    #[test]
    fn last_value_is_preferred_when_still_in_the_domain() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 10).unwrap();

        let mut solved = space.clone();
        solved.post(predicate!(x == 7));
        let mut selector = InDomainLastValue::new(InDomainMin);
        ValueSelector::<DomainId>::on_solution(&mut selector, &solved.solution());

        let mut test_rng = TestRandom::default();
        {
            let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
            let choice = selector.select_value(&mut context, x);
            assert_eq!(choice, Choice::binary(predicate!(x == 7)));
        }

        space.post(predicate!(x <= 5));
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);
        let choice = selector.select_value(&mut context, x);
        assert_eq!(choice, Choice::binary(predicate!(x == 0)));
    }
}
