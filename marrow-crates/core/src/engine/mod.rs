//! The propagation engine: the domains of the variables, the subscriptions of propagators to
//! domain events, the propagator queue, and the [`Space`] that ties them together.

pub(crate) mod cp;
pub(crate) mod notifications;
pub mod predicates;
mod space;
pub(crate) mod test_space;
pub mod variables;

pub use cp::*;
pub use space::Space;
pub use space::SpaceStatistics;
pub use space::SpaceStatus;
