use std::collections::BTreeMap;

use super::Constraint;
use crate::basic_types::limits;
use crate::propagators::GlobalCardinalityPropagatorArgs;
use crate::variables::view_array;
use crate::variables::IntegerVariable;
use crate::ConstraintOperationError;
use crate::Space;

const LOCATION: &str = "count";

struct CountConstraint<Var> {
    vars: Box<[Var]>,
    values: Box<[i32]>,
    cards: Box<[i32]>,
}

/// Creates the global cardinality [`Constraint`]: every variable of `vars` takes one of the
/// `values`, and exactly `cards[i]` of the variables take `values[i]`.
///
/// A value which occurs more than once in `values` requires the sum of its cardinalities.
///
/// Posting fails with
/// - [`ConstraintOperationError::SizeMismatch`] when `values` and `cards` differ in length,
/// - [`ConstraintOperationError::ArgumentSame`] when an unfixed variable occurs twice in `vars`,
/// - [`ConstraintOperationError::ValueOutOfRange`] when a value lies outside of the limits or a
///   cardinality is negative,
/// - [`ConstraintOperationError::Overflow`] when a view in `vars` reaches outside of the limits or
///   the merged cardinality of a value does not fit.
pub fn count<Var: IntegerVariable>(
    vars: impl Into<Box<[Var]>>,
    values: impl Into<Box<[i32]>>,
    cards: impl Into<Box<[i32]>>,
) -> impl Constraint {
    CountConstraint {
        vars: vars.into(),
        values: values.into(),
        cards: cards.into(),
    }
}

impl<Var: IntegerVariable> Constraint for CountConstraint<Var> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        if self.values.len() != self.cards.len() {
            return Err(ConstraintOperationError::SizeMismatch {
                location: LOCATION,
                expected: self.values.len(),
                actual: self.cards.len(),
            });
        }
        view_array::check_limits(&self.vars, &*space, LOCATION)?;
        if view_array::has_duplicates(&self.vars, &*space) {
            return Err(ConstraintOperationError::ArgumentSame { location: LOCATION });
        }

        let mut merged = BTreeMap::<i32, u32>::new();
        for (&value, &card) in self.values.iter().zip(self.cards.iter()) {
            limits::check(value as i64, LOCATION)?;
            let card = u32::try_from(card).map_err(|_| ConstraintOperationError::ValueOutOfRange {
                location: LOCATION,
                value: card as i64,
            })?;

            let merged_card = merged.entry(value).or_default();
            *merged_card = merged_card
                .checked_add(card)
                .ok_or(ConstraintOperationError::Overflow { location: LOCATION })?;
        }

        GlobalCardinalityPropagatorArgs {
            vars: self.vars,
            values: merged.keys().copied().collect(),
            cards: merged.values().copied().collect(),
        }
        .post(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::ReadDomains;
    use crate::variables::TransformableVariable;
    use crate::SpaceStatus;

    #[test]
    fn argument_errors_add_no_propagator() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 5).unwrap();
        let y = space.new_bounded_integer(0, 5).unwrap();

        assert!(matches!(
            space.add_constraint(count(vec![x, y], vec![1, 2], vec![1])).post(),
            Err(ConstraintOperationError::SizeMismatch { .. })
        ));
        assert_eq!(
            space.add_constraint(count(vec![x, y, x], vec![1], vec![1])).post(),
            Err(ConstraintOperationError::ArgumentSame { location: LOCATION })
        );
        assert!(matches!(
            space
                .add_constraint(count(vec![x, y], vec![i32::MAX], vec![1]))
                .post(),
            Err(ConstraintOperationError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            space.add_constraint(count(vec![x, y], vec![1], vec![-1])).post(),
            Err(ConstraintOperationError::ValueOutOfRange { value: -1, .. })
        ));
        assert_eq!(
            space
                .add_constraint(count(vec![x], vec![1, 1, 1], vec![i32::MAX; 3]))
                .post(),
            Err(ConstraintOperationError::Overflow { location: LOCATION })
        );
        let wide = vec![x.scaled(i32::MAX / 2), y.scaled(1)];
        assert_eq!(
            space.add_constraint(count(wide, vec![1], vec![1])).post(),
            Err(ConstraintOperationError::Overflow { location: LOCATION })
        );

        assert_eq!(space.num_propagators(), 0);
    }

    #[test]
    fn duplicate_values_are_merged() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 5).unwrap();
        let y = space.new_bounded_integer(0, 5).unwrap();

        space
            .add_constraint(count(vec![x, y], vec![4, 4], vec![1, 1]))
            .post()
            .unwrap();

        assert_eq!(space.propagate(), SpaceStatus::Solved);
        assert_eq!(space.fixed_value(&x), Some(4));
        assert_eq!(space.fixed_value(&y), Some(4));
    }
}
