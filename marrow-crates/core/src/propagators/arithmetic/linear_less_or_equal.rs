use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::marrow_asserts::marrow_assert_moderate;
use crate::predicate;
use crate::propagation::DomainEvents;
use crate::propagation::Domains;
use crate::propagation::EnqueueDecision;
use crate::propagation::LocalId;
use crate::propagation::ManipulateTrailedValues;
use crate::propagation::NotificationContext;
use crate::propagation::Priority;
use crate::propagation::Propagation;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;
use crate::propagation::TrailedInteger;
use crate::variables::view_array;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`LinearLessOrEqualPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagatorArgs<Var> {
    pub(crate) x: Box<[Var]>,
    pub(crate) c: i32,
}

impl<Var> PropagatorConstructor for LinearLessOrEqualPropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = LinearLessOrEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let LinearLessOrEqualPropagatorArgs { x, c } = self;

        // Fixed terms are folded into the right-hand side.
        let mut unfixed = x.into_vec();
        let fixed = view_array::drop_fixed(&mut unfixed, &context);
        let c = c as i64
            - fixed
                .iter()
                .map(|x_i| context.lower_bound(x_i) as i64)
                .sum::<i64>();

        let mut lower_bound_left_hand_side = 0_i64;
        let mut current_bounds = vec![];

        for (i, x_i) in unfixed.iter().enumerate() {
            context.register(
                x_i.clone(),
                DomainEvents::LOWER_BOUND,
                LocalId::from(i as u32),
            );
            let lower_bound = context.lower_bound(x_i) as i64;
            lower_bound_left_hand_side += lower_bound;
            current_bounds.push(context.new_trailed_integer(lower_bound));
        }

        let lower_bound_left_hand_side = context.new_trailed_integer(lower_bound_left_hand_side);

        LinearLessOrEqualPropagator {
            x: unfixed.into(),
            c,
            lower_bound_left_hand_side,
            current_bounds: current_bounds.into(),
        }
    }
}

/// Propagator for the constraint `\sum x_i <= c`.
///
/// The lower bound of the left-hand side is maintained incrementally in trailed integers, which
/// are updated when the propagator is notified of a lower bound change.
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagator<Var> {
    x: Box<[Var]>,
    c: i64,

    /// The lower bound of the sum of the left-hand side. This is incremental state.
    lower_bound_left_hand_side: TrailedInteger,
    /// The value at index `i` is the bound for `x[i]`.
    current_bounds: Box<[TrailedInteger]>,
}

impl<Var: IntegerVariable> LinearLessOrEqualPropagator<Var> {
    fn create_conflict(&self, domains: &impl ReadDomains) -> PropagatorConflict {
        PropagatorConflict {
            conjunction: self
                .x
                .iter()
                .map(|var| predicate![var >= domains.lower_bound(var)])
                .collect(),
        }
    }

    /// Tighten the upper bounds of the terms given the lower bound of the left-hand side.
    fn propagate_bounds(
        &self,
        context: &mut PropagationContext,
        lower_bound_left_hand_side: i64,
    ) -> PropagationStatusCP {
        if lower_bound_left_hand_side > self.c {
            return Err(self.create_conflict(&*context).into());
        }

        let upper_bound_left_hand_side = self
            .x
            .iter()
            .map(|var| context.upper_bound(var) as i64)
            .sum::<i64>();
        if upper_bound_left_hand_side <= self.c {
            return Ok(Propagation::Subsumed);
        }

        for x_i in self.x.iter() {
            let bound = self.c - (lower_bound_left_hand_side - context.lower_bound(x_i) as i64);

            if (context.upper_bound(x_i) as i64) > bound {
                // The bound lies between the lower and upper bound of `x_i`, so it fits.
                let _ = context.set_upper_bound(x_i, bound as i32)?;
            }
        }

        Ok(Propagation::NotAtFixpoint)
    }
}

impl<Var: IntegerVariable> Propagator for LinearLessOrEqualPropagator<Var> {
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn notify(
        &mut self,
        mut context: NotificationContext,
        local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;
        let x_i = &self.x[index];

        let old_bound = context.read_trailed(self.current_bounds[index]);
        let new_bound = context.lower_bound(x_i) as i64;

        if new_bound != old_bound {
            context.add_assign_trailed(self.lower_bound_left_hand_side, new_bound - old_bound);
            context.assign_trailed(self.current_bounds[index], new_bound);
        }

        EnqueueDecision::Enqueue
    }

    fn synchronise(&mut self, domains: Domains) {
        // The trailed integers are restored together with the domains.
        marrow_assert_moderate!(
            domains.read_trailed(self.lower_bound_left_hand_side)
                == self
                    .x
                    .iter()
                    .map(|var| domains.lower_bound(var) as i64)
                    .sum::<i64>()
        );
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        let lower_bound_left_hand_side = context.read_trailed(self.lower_bound_left_hand_side);
        self.propagate_bounds(&mut context, lower_bound_left_hand_side)
    }

    fn propagate_from_scratch(&self, mut context: PropagationContext) -> PropagationStatusCP {
        let lower_bound_left_hand_side = self
            .x
            .iter()
            .map(|var| context.lower_bound(var) as i64)
            .sum::<i64>();

        self.propagate_bounds(&mut context, lower_bound_left_hand_side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_space::TestSpace;
    use crate::variables::TransformableVariable;

    #[test]
    fn bounds_are_propagated() {
        let mut space = TestSpace::default();
        let x = space.new_variable(1, 5);
        let y = space.new_variable(0, 10);

        let _ = space
            .new_propagator(LinearLessOrEqualPropagatorArgs {
                x: [x, y].into(),
                c: 7,
            })
            .expect("non-empty domain");

        space.assert_bounds(x, 1, 5);
        space.assert_bounds(y, 0, 6);
    }

    #[test]
    fn lower_bound_changes_are_tracked_incrementally() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 10);
        let y = space.new_variable(0, 10);
        let z = space.new_variable(0, 10);

        let _ = space
            .new_propagator(LinearLessOrEqualPropagatorArgs {
                x: [x, y, z].into(),
                c: 12,
            })
            .expect("non-empty domain");
        space.assert_bounds(z, 0, 10);

        space.post(predicate!(x >= 4)).expect("non-empty domain");
        space.assert_bounds(y, 0, 8);

        space.post(predicate!(y >= 5)).expect("non-empty domain");
        space.assert_bounds(x, 4, 7);
        space.assert_bounds(z, 0, 3);
    }

    #[test]
    fn trailed_sum_is_restored_with_the_domains() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 10);
        let y = space.new_variable(0, 10);

        let _ = space
            .new_propagator(LinearLessOrEqualPropagatorArgs {
                x: [x, y].into(),
                c: 10,
            })
            .expect("non-empty domain");

        space.space.new_checkpoint();
        space.post(predicate!(x >= 8)).expect("non-empty domain");
        space.assert_bounds(y, 0, 2);
        space.space.restore_to(0);

        space.post(predicate!(y >= 3)).expect("non-empty domain");
        space.assert_bounds(x, 0, 7);
    }

    #[test]
    fn violated_sum_is_a_conflict() {
        let mut space = TestSpace::default();
        let x = space.new_variable(3, 5);
        let y = space.new_variable(4, 10);

        let _ = space
            .new_propagator(LinearLessOrEqualPropagatorArgs {
                x: [x, y].into(),
                c: 6,
            })
            .expect_err("Expected the sum to exceed the right-hand side");
    }

    #[test]
    fn negative_views_are_bounded_from_below() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 10);
        let y = space.new_variable(0, 10);

        // x - y <= -3
        let _ = space
            .new_propagator(LinearLessOrEqualPropagatorArgs {
                x: [x.scaled(1), y.scaled(-1)].into(),
                c: -3,
            })
            .expect("non-empty domain");

        space.assert_bounds(x, 0, 7);
        space.assert_bounds(y, 3, 10);
    }

    #[test]
    fn fixed_terms_are_folded_into_the_constant() {
        let mut space = TestSpace::default();
        let x = space.new_variable(-1, 1);
        let y = space.new_variable(-1, -1);

        let handle = space
            .new_propagator(LinearLessOrEqualPropagatorArgs {
                x: [x, y].into(),
                c: 0,
            })
            .expect("non-empty domain");

        let propagator = space
            .space
            .get_propagator(handle)
            .expect("the handle refers to this propagator type");
        assert_eq!(propagator.c, 1);
        assert_eq!(&*propagator.x, &[x]);
    }

    #[test]
    fn entailed_sum_is_subsumed() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 3);
        let y = space.new_variable(0, 3);

        let _ = space
            .new_propagator(LinearLessOrEqualPropagatorArgs {
                x: [x, y].into(),
                c: 8,
            })
            .expect("non-empty domain");

        assert_eq!(space.num_propagators(), 0);
    }
}
