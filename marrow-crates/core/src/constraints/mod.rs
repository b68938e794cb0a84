//! Defines the constraints that marrow provides out of the box which can be added to a [`Space`].
//!
//! A constraint is a relation over variables. In a space, constraints are enforced through
//! propagators, and therefore constraints can be viewed as a collection of propagators.
//!
//! Every constraint checks its arguments when it is posted, before any propagator is created; a
//! constraint with invalid arguments leaves the space untouched.
//!
//! # Example
//! ```
//! # use marrow_core::constraints;
//! # use marrow_core::Space;
//! let mut space = Space::default();
//!
//! let a = space.new_bounded_integer(0, 3).unwrap();
//! let b = space.new_bounded_integer(0, 3).unwrap();
//!
//! space
//!     .add_constraint(constraints::linear_equals(vec![1, 1], vec![a, b], 3))
//!     .post()
//!     .unwrap();
//! ```

mod all_different;
mod arithmetic;
mod constraint_poster;
mod count;

pub use all_different::*;
pub use arithmetic::*;
pub use constraint_poster::*;
pub use count::*;

use crate::propagation::PropagatorConstructor;
use crate::ConstraintOperationError;
use crate::Space;

/// A [`Constraint`] is a relation over variables. It disqualifies certain partial assignments of
/// making it into a solution of the problem.
///
/// For example, the constraint `a = b` over two variables `a` and `b` only allows assignments to
/// `a` and `b` of the same value, and rejects any assignment where `a` and `b` differ.
pub trait Constraint {
    /// Add the [`Constraint`] to the [`Space`].
    ///
    /// This method returns a [`ConstraintOperationError`] if the arguments of the constraint are
    /// invalid, or if the space is already failed.
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError>;
}

impl<ConcretePropagator> Constraint for ConcretePropagator
where
    ConcretePropagator: PropagatorConstructor,
    ConcretePropagator::PropagatorImpl: 'static,
{
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        let _ = space.add_propagator(self)?;
        Ok(())
    }
}

impl<C: Constraint> Constraint for Vec<C> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        self.into_iter().try_for_each(|c| c.post(space))
    }
}
