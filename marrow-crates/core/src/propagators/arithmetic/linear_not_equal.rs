use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::predicate;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::Priority;
use crate::propagation::Propagation;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`LinearNotEqualPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct LinearNotEqualPropagatorArgs<Var> {
    pub(crate) terms: Box<[Var]>,
    pub(crate) rhs: i32,
}

impl<Var> PropagatorConstructor for LinearNotEqualPropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = LinearNotEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for (i, x_i) in self.terms.iter().enumerate() {
            context.register(x_i.clone(), DomainEvents::ASSIGN, LocalId::from(i as u32));
        }

        LinearNotEqualPropagator {
            terms: self.terms,
            rhs: self.rhs,
        }
    }
}

/// Propagator for the constraint `\sum x_i != rhs`.
///
/// Nothing can be deduced until at most one term is unfixed; the value which would make the sum
/// equal to `rhs` is then removed from that term.
#[derive(Clone, Debug)]
pub(crate) struct LinearNotEqualPropagator<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

impl<Var: IntegerVariable> Propagator for LinearNotEqualPropagator<Var> {
    fn name(&self) -> &str {
        "LinearNe"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate_from_scratch(&self, mut context: PropagationContext) -> PropagationStatusCP {
        let mut fixed_sum = 0_i64;
        let mut unfixed = None;

        for x_i in self.terms.iter() {
            match context.fixed_value(x_i) {
                Some(value) => fixed_sum += value as i64,
                None if unfixed.is_none() => unfixed = Some(x_i),
                // Two unfixed terms can still make the sum differ from `rhs`.
                None => return Ok(Propagation::AtFixpoint),
            }
        }

        match unfixed {
            None if fixed_sum == self.rhs as i64 => Err(PropagatorConflict {
                conjunction: self
                    .terms
                    .iter()
                    .map(|var| predicate![var == context.lower_bound(var)])
                    .collect(),
            }
            .into()),
            None => Ok(Propagation::Subsumed),
            Some(x_i) => {
                let excluded = self.rhs as i64 - fixed_sum;
                if let Ok(excluded) = i32::try_from(excluded) {
                    let _ = context.remove(x_i, excluded)?;
                }
                Ok(Propagation::Subsumed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_space::TestSpace;
    use crate::variables::TransformableVariable;

    #[test]
    fn last_unfixed_term_loses_the_forbidden_value() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 5);
        let y = space.new_variable(0, 5);
        let z = space.new_variable(0, 5);

        let _ = space
            .new_propagator(LinearNotEqualPropagatorArgs {
                terms: [x.scaled(1), y.scaled(2), z.scaled(1)].into(),
                rhs: 7,
            })
            .expect("non-empty domain");
        assert_eq!(space.num_propagators(), 1);

        space.post(predicate!(x == 1)).expect("non-empty domain");
        assert_eq!(space.num_propagators(), 1);

        space.post(predicate!(y == 2)).expect("non-empty domain");
        assert!(!space.contains(z, 2));
        assert_eq!(space.num_propagators(), 0);
    }

    #[test]
    fn fixed_sum_equal_to_rhs_is_a_conflict() {
        let mut space = TestSpace::default();
        let x = space.new_variable(2, 2);
        let y = space.new_variable(0, 5);

        let _ = space
            .new_propagator(LinearNotEqualPropagatorArgs {
                terms: [x, y].into(),
                rhs: 5,
            })
            .expect("non-empty domain");
        assert!(!space.contains(y, 3));

        let mut space = TestSpace::default();
        let x = space.new_variable(2, 2);
        let y = space.new_variable(3, 3);

        let _ = space
            .new_propagator(LinearNotEqualPropagatorArgs {
                terms: [x, y].into(),
                rhs: 5,
            })
            .expect_err("Expected the sum to equal the right-hand side");
    }
}
