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
use crate::variables::view_array;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`GlobalCardinalityPropagator`].
///
/// The `values` are distinct and sorted, and `cards[i]` is the number of variables which take
/// `values[i]`.
#[derive(Clone, Debug)]
pub(crate) struct GlobalCardinalityPropagatorArgs<Var> {
    pub(crate) vars: Box<[Var]>,
    pub(crate) values: Box<[i32]>,
    pub(crate) cards: Box<[u32]>,
}

impl<Var> PropagatorConstructor for GlobalCardinalityPropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = GlobalCardinalityPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for (i, x_i) in self.vars.iter().enumerate() {
            context.register(x_i.clone(), DomainEvents::ANY_INT, LocalId::from(i as u32));
        }

        GlobalCardinalityPropagator {
            vars: self.vars,
            values: self.values,
            cards: self.cards,
        }
    }
}

/// Propagator for the closed global cardinality constraint: every variable takes one of the
/// `values`, and each value `values[i]` is taken by exactly `cards[i]` variables.
///
/// A value which is taken as often as allowed is removed from the other variables, and a value
/// which can only be reached by as many variables as it needs is assigned to them.
#[derive(Clone, Debug)]
pub(crate) struct GlobalCardinalityPropagator<Var> {
    vars: Box<[Var]>,
    values: Box<[i32]>,
    cards: Box<[u32]>,
}

impl<Var: IntegerVariable> GlobalCardinalityPropagator<Var> {
    /// Restrict every variable to the values of the constraint.
    fn restrict_to_values(&self, context: &mut PropagationContext) -> PropagationStatusCP {
        let (Some(&smallest), Some(&largest)) = (self.values.first(), self.values.last()) else {
            // No value may be taken at all.
            return match self.vars.first() {
                Some(var) => Err(PropagatorConflict {
                    conjunction: vec![predicate!(var >= context.lower_bound(var))],
                }
                .into()),
                None => Ok(Propagation::Subsumed),
            };
        };

        for var in self.vars.iter() {
            let _ = context.set_lower_bound(var, smallest)?;
            let _ = context.set_upper_bound(var, largest)?;

            let excluded = context
                .iterate_domain(var)
                .filter(|value| self.values.binary_search(value).is_err())
                .collect::<Vec<_>>();
            for value in excluded {
                let _ = context.remove(var, value)?;
            }
        }

        Ok(Propagation::AtFixpoint)
    }

    fn count_conflict(&self, context: &PropagationContext, value: i32) -> PropagatorConflict {
        PropagatorConflict {
            conjunction: self
                .vars
                .iter()
                .map(|var| {
                    if context.contains(var, value) {
                        predicate!(var == value)
                    } else {
                        predicate!(var != value)
                    }
                })
                .collect(),
        }
    }
}

impl<Var: IntegerVariable> Propagator for GlobalCardinalityPropagator<Var> {
    fn name(&self) -> &str {
        "GlobalCardinality"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn propagate_from_scratch(&self, mut context: PropagationContext) -> PropagationStatusCP {
        if self.restrict_to_values(&mut context)? == Propagation::Subsumed {
            return Ok(Propagation::Subsumed);
        }

        loop {
            let mut changed = false;

            for (&value, &card) in self.values.iter().zip(self.cards.iter()) {
                let assigned = self
                    .vars
                    .iter()
                    .filter(|var| context.fixed_value(*var) == Some(value))
                    .count() as u32;
                let possible = self
                    .vars
                    .iter()
                    .filter(|var| context.contains(*var, value))
                    .count() as u32;

                if assigned > card || possible < card {
                    return Err(self.count_conflict(&context, value).into());
                }

                if assigned == card && possible > card {
                    for var in self.vars.iter() {
                        if context.fixed_value(var) != Some(value) {
                            changed |= context.remove(var, value)?.is_changed();
                        }
                    }
                } else if possible == card && assigned < card {
                    for var in self.vars.iter() {
                        if context.contains(var, value) {
                            changed |= context.assign(var, value)?.is_changed();
                        }
                    }
                }
            }

            if !changed {
                break;
            }
        }

        if view_array::all_fixed(&self.vars, &context) {
            Ok(Propagation::Subsumed)
        } else {
            Ok(Propagation::AtFixpoint)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_space::TestSpace;

    #[test]
    fn variables_are_restricted_to_the_values() {
        let mut space = TestSpace::default();
        let x = space.new_variable(0, 10);
        let y = space.new_variable(0, 10);

        let _ = space
            .new_propagator(GlobalCardinalityPropagatorArgs {
                vars: [x, y].into(),
                values: [2, 5].into(),
                cards: [1, 1].into(),
            })
            .expect("non-empty domain");

        space.assert_bounds(x, 2, 5);
        assert!(!space.contains(x, 3));
        assert!(!space.contains(y, 4));
    }

    #[test]
    fn saturated_value_is_removed_elsewhere() {
        let mut space = TestSpace::default();
        let x = space.new_variable(1, 3);
        let y = space.new_variable(1, 3);
        let z = space.new_variable(1, 3);

        let _ = space
            .new_propagator(GlobalCardinalityPropagatorArgs {
                vars: [x, y, z].into(),
                values: [1, 2, 3].into(),
                cards: [2, 1, 0].into(),
            })
            .expect("non-empty domain");
        space.assert_bounds(x, 1, 2);

        space.post(predicate!(x == 2)).expect("non-empty domain");

        space.assert_bounds(y, 1, 1);
        space.assert_bounds(z, 1, 1);
        assert_eq!(space.num_propagators(), 0);
    }

    #[test]
    fn unreachable_cardinality_is_a_conflict() {
        let mut space = TestSpace::default();
        let x = space.new_variable(1, 2);
        let y = space.new_sparse_variable(vec![2, 3]);

        let _ = space
            .new_propagator(GlobalCardinalityPropagatorArgs {
                vars: [x, y].into(),
                values: [1, 2, 3].into(),
                cards: [2, 0, 0].into(),
            })
            .expect_err("Expected value 1 not to be reachable twice");
    }
}
