use super::predicate::Predicate;
use super::predicate::PredicateType;
use crate::engine::variables::DomainId;

/// A trait which defines methods for creating a [`Predicate`].
pub trait PredicateConstructor {
    /// The value used to represent a bound.
    type Value;

    /// Creates a lower-bound predicate (e.g. `[x >= v]`).
    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// Creates an upper-bound predicate (e.g. `[x <= v]`).
    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// Creates an equality predicate (e.g. `[x == v]`).
    fn equality_predicate(&self, bound: Self::Value) -> Predicate;

    /// Creates a disequality predicate (e.g. `[x != v]`).
    fn disequality_predicate(&self, bound: Self::Value) -> Predicate;
}

impl PredicateConstructor for DomainId {
    type Value = i32;

    fn equality_predicate(&self, bound: Self::Value) -> Predicate {
        Predicate::new(*self, PredicateType::Equal, bound)
    }

    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate {
        Predicate::new(*self, PredicateType::LowerBound, bound)
    }

    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate {
        Predicate::new(*self, PredicateType::UpperBound, bound)
    }

    fn disequality_predicate(&self, bound: Self::Value) -> Predicate {
        Predicate::new(*self, PredicateType::NotEqual, bound)
    }
}

/// A macro which allows for the creation of a [`Predicate`].
///
/// # Example
/// ```rust
/// # use marrow_core::Space;
/// # use marrow_core::predicate;
/// let mut space = Space::default();
/// let x = space.new_bounded_integer(0, 10).unwrap();
///
/// let lower_bound_predicate = predicate!(x >= 5);
/// assert_eq!(lower_bound_predicate.get_domain(), x);
/// assert_eq!(lower_bound_predicate.get_right_hand_side(), 5);
///
/// let disequality_predicate = predicate!(x != 5);
/// assert!(disequality_predicate.is_not_equal_predicate());
/// ```
#[macro_export]
macro_rules! predicate {
    ($($var:ident).+$([$index:expr])? >= $bound:expr) => {{
        #[allow(unused, reason = "could be imported at call-site")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.lower_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? <= $bound:expr) => {{
        #[allow(unused, reason = "could be imported at call-site")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.upper_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? == $value:expr) => {{
        #[allow(unused, reason = "could be imported at call-site")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.equality_predicate($value)
    }};
    ($($var:ident).+$([$index:expr])? != $value:expr) => {{
        #[allow(unused, reason = "could be imported at call-site")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.disequality_predicate($value)
    }};
}
