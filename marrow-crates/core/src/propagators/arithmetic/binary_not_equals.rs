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

/// The [`PropagatorConstructor`] for the [`BinaryNotEqualsPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct BinaryNotEqualsPropagatorArgs<AVar, BVar> {
    pub(crate) a: AVar,
    pub(crate) b: BVar,
}

impl<AVar, BVar> PropagatorConstructor for BinaryNotEqualsPropagatorArgs<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    type PropagatorImpl = BinaryNotEqualsPropagator<AVar, BVar>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let BinaryNotEqualsPropagatorArgs { a, b } = self;

        // We only care about the case where one of the two is assigned
        context.register(a.clone(), DomainEvents::ASSIGN, LocalId::from(0));
        context.register(b.clone(), DomainEvents::ASSIGN, LocalId::from(1));

        BinaryNotEqualsPropagator { a, b }
    }
}

/// Propagator for the constraint `a != b`.
#[derive(Clone, Debug)]
pub(crate) struct BinaryNotEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
}

impl<AVar, BVar> Propagator for BinaryNotEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    fn priority(&self) -> Priority {
        Priority::High
    }

    fn name(&self) -> &str {
        "BinaryNotEq"
    }

    fn propagate_from_scratch(&self, mut context: PropagationContext) -> PropagationStatusCP {
        let a_lb = context.lower_bound(&self.a);
        let a_ub = context.upper_bound(&self.a);

        let b_lb = context.lower_bound(&self.b);
        let b_ub = context.upper_bound(&self.b);

        if a_lb == a_ub && b_lb == b_ub && a_lb == b_lb {
            return Err(PropagatorConflict {
                conjunction: vec![predicate!(self.a == a_lb), predicate!(self.b == a_lb)],
            }
            .into());
        }

        if a_ub < b_lb || b_ub < a_lb {
            // The domains are non-overlapping
            return Ok(Propagation::Subsumed);
        }

        if a_lb == a_ub {
            let _ = context.remove(&self.b, a_lb)?;
            return Ok(Propagation::Subsumed);
        }

        if b_lb == b_ub {
            let _ = context.remove(&self.a, b_lb)?;
            return Ok(Propagation::Subsumed);
        }

        Ok(Propagation::AtFixpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_space::TestSpace;
    use crate::variables::TransformableVariable;

    #[test]
    fn detects_conflict() {
        let mut space = TestSpace::default();
        let a = space.new_variable(0, 0);
        let b = space.new_variable(0, 0);

        let _ = space
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect_err("Expected conflict to be detected");
    }

    #[test]
    fn propagate_when_one_is_fixed() {
        let mut space = TestSpace::default();
        let a = space.new_variable(0, 0);
        let b = space.new_variable(0, 1);

        let _ = space
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("non-empty domain");

        space.assert_bounds(b, 1, 1);
        assert_eq!(space.num_propagators(), 0);
    }

    #[test]
    fn waits_until_a_side_is_assigned() {
        let mut space = TestSpace::default();
        let a = space.new_variable(0, 5);
        let b = space.new_variable(0, 5);

        let _ = space
            .new_propagator(BinaryNotEqualsPropagatorArgs {
                a,
                b: b.offset(1),
            })
            .expect("non-empty domain");
        assert_eq!(space.num_propagators(), 1);

        space.post(predicate!(b == 2)).expect("non-empty domain");

        assert!(!space.contains(a, 3));
        assert!(space.contains(a, 2));
        assert!(!space.is_fixed(a));
    }
}
