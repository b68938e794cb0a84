mod constraint_operation_error;
pub mod limits;
mod propagation_status_cp;
mod random;
pub mod sequence_generators;
mod solution;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use propagation_status_cp::*;
pub use random::Random;
#[cfg(test)]
pub(crate) use random::tests::TestRandom;
pub use solution::Solution;
pub(crate) use trail::Trail;
