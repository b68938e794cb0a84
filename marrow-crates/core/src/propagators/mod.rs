//! The propagators behind the constraints of [`crate::constraints`].

mod all_different;
pub(crate) mod arithmetic;
mod global_cardinality;

pub(crate) use all_different::*;
pub(crate) use global_cardinality::*;
