use super::Constraint;
use crate::propagators::AllDifferentPropagatorArgs;
use crate::variables::view_array;
use crate::variables::IntegerVariable;
use crate::ConstraintOperationError;
use crate::Space;

/// Creates the [`Constraint`] that enforces that all the given `variables` are distinct.
///
/// A variable occurring twice is not an error; it makes the constraint infeasible once that
/// variable is assigned. Posting fails with [`ConstraintOperationError::Overflow`] when a view
/// reaches outside of the limits.
pub fn all_different<Var: IntegerVariable>(variables: impl Into<Box<[Var]>>) -> impl Constraint {
    AllDifferent {
        vars: variables.into(),
    }
}

struct AllDifferent<Var> {
    vars: Box<[Var]>,
}

impl<Var: IntegerVariable> Constraint for AllDifferent<Var> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        view_array::check_limits(&self.vars, &*space, "all_different")?;
        AllDifferentPropagatorArgs { vars: self.vars }.post(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::ReadDomains;
    use crate::variables::TransformableVariable;
    use crate::SpaceStatus;

    #[test]
    fn pigeonhole_fails_without_branching() {
        let mut space = Space::default();
        let variables = (0..4)
            .map(|_| space.new_bounded_integer(1, 3).unwrap())
            .collect::<Vec<_>>();

        space
            .add_constraint(all_different(variables))
            .post()
            .unwrap();

        assert_eq!(space.propagate(), SpaceStatus::Failed);
    }

    #[test]
    fn assignment_is_removed_from_the_others() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(1, 3).unwrap();
        let y = space.new_bounded_integer(1, 3).unwrap();
        let z = space.new_bounded_integer(1, 3).unwrap();

        space
            .add_constraint(all_different(vec![x, y, z]))
            .post()
            .unwrap();
        space.post(crate::predicate!(y == 3));

        assert_eq!(space.propagate(), SpaceStatus::Solved);
        assert_eq!(space.upper_bound(&x), 2);
        assert_eq!(space.upper_bound(&z), 2);
    }

    #[test]
    fn offset_beyond_the_limits_is_rejected() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, crate::basic_types::limits::MAX).unwrap();
        let y = space.new_bounded_integer(0, 5).unwrap();

        assert_eq!(
            space
                .add_constraint(all_different(vec![x.offset(1), y.offset(1)]))
                .post(),
            Err(ConstraintOperationError::Overflow {
                location: "all_different"
            })
        );
        assert_eq!(space.num_propagators(), 0);
    }
}
