//! Sequences which determine the node limits of consecutive runs of a restart-based search.
mod constant_sequence;
mod geometric_sequence;
mod luby_sequence;
mod sequence_generator_type;

pub use constant_sequence::ConstantSequence;
pub use geometric_sequence::GeometricSequence;
pub use luby_sequence::LubySequence;
pub use sequence_generator_type::SequenceGeneratorType;

use std::fmt::Debug;

/// An infinite sequence of positive integers.
pub trait SequenceGenerator: Debug + Send {
    fn next(&mut self) -> i64;
}

impl SequenceGeneratorType {
    /// Create the sequence of this type, with `base_value` as the constant, the starting value or
    /// the multiplier respectively.
    pub fn create(self, base_value: i64, multiplication_factor: f64) -> Box<dyn SequenceGenerator> {
        match self {
            SequenceGeneratorType::Constant => Box::new(ConstantSequence::new(base_value)),
            SequenceGeneratorType::Geometric => {
                Box::new(GeometricSequence::new(base_value, multiplication_factor))
            }
            SequenceGeneratorType::Luby => Box::new(LubySequence::new(base_value)),
        }
    }
}
