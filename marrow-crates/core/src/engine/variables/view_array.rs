//! Operations on arrays of views which constraints use while posting and propagating.
//!
//! The test for views of the same variable ignores fixed views: a fixed view behaves like a
//! constant, so it occurring more than once never changes the meaning of a constraint.

use super::DomainId;
use super::IntegerVariable;
use crate::basic_types::limits;
use crate::containers::HashSet;
use crate::propagation::ReadDomains;
use crate::ConstraintOperationError;

/// Returns whether all views are fixed.
pub fn all_fixed<Var: IntegerVariable>(vars: &[Var], domains: &impl ReadDomains) -> bool {
    vars.iter().all(|var| domains.is_fixed(var))
}

/// Returns whether an unfixed variable is viewed more than once in `vars`.
pub fn has_duplicates<Var: IntegerVariable>(vars: &[Var], domains: &impl ReadDomains) -> bool {
    let mut seen: HashSet<DomainId> = HashSet::default();
    vars.iter()
        .filter(|var| !domains.is_fixed(*var))
        .any(|var| !seen.insert(var.domain_id()))
}

/// Check that the bounds of every view lie within [`limits::MIN`] and [`limits::MAX`].
///
/// A scaled or offset view of a valid variable can reach outside of the limits; posting a
/// constraint over such a view fails with [`ConstraintOperationError::Overflow`].
pub fn check_limits<Var: IntegerVariable>(
    vars: &[Var],
    domains: &impl ReadDomains,
    location: &'static str,
) -> Result<(), ConstraintOperationError> {
    let within_limits = vars.iter().all(|var| {
        limits::is_valid(domains.lower_bound(var) as i64)
            && limits::is_valid(domains.upper_bound(var) as i64)
    });

    if within_limits {
        Ok(())
    } else {
        Err(ConstraintOperationError::Overflow { location })
    }
}

/// Remove the fixed views from `vars`, returning the removed views in their original order.
pub fn drop_fixed<Var: IntegerVariable>(vars: &mut Vec<Var>, domains: &impl ReadDomains) -> Vec<Var> {
    let (fixed, unfixed) = vars
        .drain(..)
        .partition::<Vec<_>, _>(|var| domains.is_fixed(var));
    *vars = unfixed;
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::TransformableVariable;
    use crate::Space;

    #[test]
    fn fixed_duplicates_are_ignored() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 5).unwrap();
        let y = space.new_bounded_integer(0, 5).unwrap();
        let c = space.new_bounded_integer(3, 3).unwrap();

        assert!(!has_duplicates(&[x, y, c, c], &space));
        assert!(has_duplicates(&[x, y, x], &space));
    }

    #[test]
    fn transformed_views_share_their_variable() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 5).unwrap();
        let y = space.new_bounded_integer(0, 5).unwrap();

        assert!(has_duplicates(&[x.scaled(1), y.scaled(1), x.scaled(-1)], &space));
        assert!(!has_duplicates(&[x.offset(1), y.offset(1)], &space));
    }

    #[test]
    fn views_outside_of_the_limits_are_rejected() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 10_000_000).unwrap();
        let y = space.new_bounded_integer(limits::MIN, limits::MAX).unwrap();

        assert_eq!(check_limits(&[x.scaled(100), y.scaled(1)], &space, "test"), Ok(()));
        assert_eq!(
            check_limits(&[x.scaled(1000)], &space, "test"),
            Err(ConstraintOperationError::Overflow { location: "test" })
        );
        assert_eq!(
            check_limits(&[y.offset(1)], &space, "test"),
            Err(ConstraintOperationError::Overflow { location: "test" })
        );
        assert_eq!(check_limits(&[y.scaled(-1)], &space, "test"), Ok(()));
    }

    #[test]
    fn drop_fixed_splits_the_array() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 5).unwrap();
        let c = space.new_bounded_integer(3, 3).unwrap();
        let y = space.new_bounded_integer(0, 5).unwrap();

        let mut vars = vec![x, c, y];
        let dropped = drop_fixed(&mut vars, &space);

        assert_eq!(vec![x, y], vars);
        assert_eq!(vec![c], dropped);
        assert!(all_fixed(&dropped, &space));
        assert!(!all_fixed(&vars, &space));
    }
}
