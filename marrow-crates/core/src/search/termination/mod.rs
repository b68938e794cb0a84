//! A [`TerminationCondition`] is a condition which is polled by the search engines before every
//! node they expand. It indicates when the search should stop, even if the search tree has not
//! been explored completely. The most common example would be [`TimeBudget`], which gives the
//! search a certain time budget to complete.
//!
//! A search which is stopped reports the solutions it found so far, and marks its
//! [`crate::search::Outcome`] as incomplete.

mod combinator;
mod fail_budget;
mod indefinite;
mod node_budget;
mod stop_flag;
mod time_budget;

pub use combinator::Combinator;
pub use fail_budget::FailBudget;
pub use indefinite::Indefinite;
pub use node_budget::NodeBudget;
pub use stop_flag::StopFlag;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition. A termination condition determines when
/// the search should give up exploring the search tree.
pub trait TerminationCondition {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called after a node of the search tree was propagated.
    fn node_expanded(&mut self) {}

    /// Called after a node of the search tree failed.
    fn failure_occurred(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn node_expanded(&mut self) {
        if let Some(t) = self {
            t.node_expanded()
        }
    }

    fn failure_occurred(&mut self) {
        if let Some(t) = self {
            t.failure_occurred()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn node_expanded(&mut self) {
        (**self).node_expanded()
    }

    fn failure_occurred(&mut self) {
        (**self).failure_occurred()
    }
}
