//! A variable, in the context of the engine, is a view onto a domain. It may forward domain
//! information unaltered, or apply transformations which can be performed without the need of
//! constraints.

mod affine_view;
mod domain_id;
mod integer_variable;
mod transformable_variable;
pub mod view_array;

pub use affine_view::AffineView;
pub use domain_id::DomainId;
pub use integer_variable::IntegerVariable;
pub use transformable_variable::TransformableVariable;
