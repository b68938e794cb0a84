use thiserror::Error;

#[cfg(doc)]
use crate::Space;

/// Errors raised while building a model in a [`Space`].
///
/// These are raised before any propagator is created; a constraint that fails one of its argument
/// checks leaves the space untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// Two argument arrays which must have the same length do not.
    #[error("{location}: argument sizes do not match ({expected} vs {actual})")]
    SizeMismatch {
        location: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The same variable occurs more than once where the constraint requires distinct variables.
    #[error("{location}: the same variable occurs multiple times")]
    ArgumentSame { location: &'static str },
    /// A constant lies outside of the representable integer range.
    #[error("{location}: value {value} is outside of the supported range")]
    ValueOutOfRange { location: &'static str, value: i64 },
    /// An initial domain would be empty.
    #[error("{location}: the initial domain is empty")]
    EmptyInitialDomain { location: &'static str },
    /// Intermediate results of the constraint may not fit in the supported integer range.
    #[error("{location}: the constraint may overflow")]
    Overflow { location: &'static str },
    /// A constraint was added while the space was failed.
    #[error("adding constraint failed because the space is failed")]
    InfeasibleState,
}
