mod binary_not_equals;
mod linear_less_or_equal;
mod linear_not_equal;

pub(crate) use binary_not_equals::*;
pub(crate) use linear_less_or_equal::*;
pub(crate) use linear_not_equal::*;
