//! Provides the [`VariableSelector`] trait which is required for variable selectors to implement;
//! the main method in this trait is the [`VariableSelector::select_variable`] method.
//!
//! Each selector which ranks variables uses a
//! [`TieBreaker`](crate::branching::tie_breaking::TieBreaker) to decide between equally ranked
//! variables.
mod anti_first_fail;
mod first_fail;
mod input_order;
mod largest;
mod max_weighted_degree;
mod smallest;
mod variable_selector;

pub use anti_first_fail::*;
pub use first_fail::*;
pub use input_order::*;
pub use largest::*;
pub use max_weighted_degree::*;
pub use smallest::*;
pub use variable_selector::VariableSelector;
