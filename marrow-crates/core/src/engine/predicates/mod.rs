//! Predicates are the atomic domain operations `[x >= v]`, `[x <= v]`, `[x == v]` and `[x != v]`.
//!
//! Branchers describe the alternatives of a choice with them, and a [`crate::Space`] can post them
//! directly.

mod predicate;
mod predicate_constructor;

pub use predicate::Predicate;
pub use predicate::PredicateType;
pub use predicate_constructor::PredicateConstructor;
