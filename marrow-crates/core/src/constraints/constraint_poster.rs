use log::warn;

use super::Constraint;
use crate::ConstraintOperationError;
use crate::Space;

/// A structure which is responsible for adding the created [`Constraint`]s to the
/// [`Space`]. For an example on how to use this, see [`crate::constraints`].
#[derive(Debug)]
pub struct ConstraintPoster<'space, ConstraintImpl> {
    space: &'space mut Space,
    constraint: Option<ConstraintImpl>,
}

impl<'a, ConstraintImpl> ConstraintPoster<'a, ConstraintImpl> {
    pub(crate) fn new(space: &'a mut Space, constraint: ConstraintImpl) -> Self {
        ConstraintPoster {
            space,
            constraint: Some(constraint),
        }
    }
}

impl<ConstraintImpl: Constraint> ConstraintPoster<'_, ConstraintImpl> {
    /// Add the [`Constraint`] to the [`Space`].
    ///
    /// This method returns a [`ConstraintOperationError`] if the arguments of the constraint are
    /// invalid, or if the space is already failed. In both cases no propagator is added.
    pub fn post(mut self) -> Result<(), ConstraintOperationError> {
        match self.constraint.take() {
            Some(constraint) => constraint.post(self.space),
            None => Ok(()),
        }
    }
}

impl<ConstraintImpl> Drop for ConstraintPoster<'_, ConstraintImpl> {
    fn drop(&mut self) {
        if self.constraint.is_some() {
            warn!("A constraint poster is never used, this is likely a mistake.");
        }
    }
}
