pub(crate) mod marrow_asserts;

pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod propagators;

pub mod branching;
pub mod constraints;
pub mod propagation;
pub mod search;
pub mod statistics;

pub use convert_case;
pub use rand;

pub use crate::basic_types::limits;
pub use crate::basic_types::sequence_generators;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Random;
pub use crate::basic_types::Solution;
pub use crate::engine::predicates;
pub use crate::engine::variables;
pub use crate::engine::DomainChange;
pub use crate::engine::EmptyDomain;
pub use crate::engine::Space;
pub use crate::engine::SpaceStatistics;
pub use crate::engine::SpaceStatus;
