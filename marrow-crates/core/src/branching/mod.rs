//! Contains structures and traits to define the decision making procedure of a search.
//!
//! In general, it provides 3 traits:
//! - The [`Brancher`] which defines how a branching procedure (which selects an unfixed variable
//!   and splits its domain into the alternatives of a [`Choice`]) should operate; the main method
//!   of this trait is the [`Brancher::next_choice`] method. An example implementation of this
//!   trait is the [`IndependentVariableValueBrancher`].
//! - The [`VariableSelector`] which defines the method required of a variable selector; the main
//!   method of this trait is the [`VariableSelector::select_variable`] method. An example
//!   implementation of this trait is the [`AntiFirstFail`] strategy.
//! - The [`ValueSelector`] which defines the method required of a value selector; the main method
//!   of this trait is the [`ValueSelector::select_value`] method.
//!
//! Branchers are added to a [`crate::Space`] with [`crate::Space::add_brancher`]:
//! ```rust
//! # use marrow_core::branching::branchers::IndependentVariableValueBrancher;
//! # use marrow_core::branching::value_selection::InDomainSplit;
//! # use marrow_core::branching::variable_selection::FirstFail;
//! # use marrow_core::Space;
//! let mut space = Space::default();
//! let variables = vec![
//!     space.new_bounded_integer(0, 10).unwrap(),
//!     space.new_bounded_integer(0, 4).unwrap(),
//! ];
//! space.add_brancher(IndependentVariableValueBrancher::new(
//!     FirstFail::new(&variables),
//!     InDomainSplit,
//! ));
//! ```
mod brancher;
pub mod branchers;
mod choice;
mod selection_context;
mod strategy;
pub mod tie_breaking;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use choice::Choice;
pub use selection_context::SelectionContext;
pub use strategy::*;

#[cfg(doc)]
use crate::branching::branchers::IndependentVariableValueBrancher;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::AntiFirstFail;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
