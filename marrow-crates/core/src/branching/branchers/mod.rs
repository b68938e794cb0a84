//! Provides several implementations of [`Brancher`]s.
mod custom_brancher;
mod dynamic_brancher;
mod independent_variable_value_brancher;

pub use custom_brancher::CustomBrancher;
pub use dynamic_brancher::DynamicBrancher;
pub use independent_variable_value_brancher::IndependentVariableValueBrancher;

#[cfg(doc)]
use crate::branching::Brancher;
