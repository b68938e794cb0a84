//! Contains the main building blocks for propagators.
//!
//! # Theoretical
//!
//! A propagator takes as input a set of variables (`x_i ∈ X`) and for each variable a corresponding
//! domain (`D_i ∈ D`); it can then be seen as a function which maps `D ↦ D'` such that `D'_i ⊆ D_i`
//! for all variables (i.e. the domain of a variable either remains the same after applying the
//! propagator or it becomes a subset of the domain before applying the propagator).
//!
//! A propagator is said to be at fix-point if applying it again does not change any domain. A
//! propagator which reaches its fix-point with a single call can report
//! [`Propagation::AtFixpoint`], so that the changes it made itself do not schedule it again.
//!
//! # Practical
//!
//! Each concrete propagator is associated with two structs, which implement traits with
//! corresponding names:
//! - [`Propagator`]: contains most of the propagator logic.
//! - [`PropagatorConstructor`]: propagators do not directly communicate with the space, but rather
//!   use this struct as a communication point during creation to subscribe to variables.
//!
//! A propagator subscribes to a view with a [`DomainEvents`] propagation condition; whenever one
//! of those events happens, [`Propagator::notify`] is called (the advisor hook) and, unless it
//! returns [`EnqueueDecision::Skip`], the propagator is scheduled according to its [`Priority`].

mod constructor;
mod contexts;
mod local_id;
mod propagator;
mod propagator_id;
pub(crate) mod store;

pub use constructor::*;
pub use contexts::*;
pub use local_id::*;
pub use propagator::*;
pub use propagator_id::PropagatorId;
pub(crate) use propagator_id::PropagatorVarId;
pub use store::PropagatorHandle;

pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::Propagation;
pub use crate::basic_types::PropagationStatusCP;
pub use crate::basic_types::PropagatorConflict;
pub use crate::engine::notifications::DomainEvent;
pub use crate::engine::notifications::DomainEvents;
pub use crate::engine::notifications::OpaqueDomainEvent;
pub use crate::engine::TrailedInteger;
