use downcast_rs::impl_downcast;
use downcast_rs::Downcast;
use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use super::Domains;
use super::LocalId;
use super::NotificationContext;
use super::PropagationContext;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::notifications::OpaqueDomainEvent;
#[cfg(doc)]
use crate::propagation::DomainEvent;
#[cfg(doc)]
use crate::propagation::PropagatorConstructor;
#[cfg(doc)]
use crate::propagation::PropagatorConstructorContext;
use crate::statistics::StatisticLogger;

// Allows tests and callers holding a handle to get back the concrete propagator.
impl_downcast!(Propagator);

// Cloning a space clones every propagator in it.
clone_trait_object!(Propagator);

/// A propagator removes values from domains which will never be in any solution, or reports that
/// the current domains are infeasible.
///
/// The only required functions are [`Propagator::name`] and
/// [`Propagator::propagate_from_scratch`]; all other functions have default implementations.
///
/// See the [`crate::propagation`] documentation for more details.
pub trait Propagator: Downcast + DynClone + Send {
    /// Return the name of the propagator.
    ///
    /// This is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Performs propagation from scratch (i.e., without relying on updating internal data
    /// structures, as opposed to [`Propagator::propagate`]).
    ///
    /// Values which cannot be part of any solution given the current domains are removed through
    /// the narrowing methods of the [`PropagationContext`]. A narrowing which empties a domain
    /// returns an error which is propagated with `?`; a propagator which detects infeasibility
    /// itself returns an [`crate::basic_types::Inconsistency::Conflict`].
    ///
    /// It is usually best to implement this method in the simplest but correct way. When this
    /// crate is compiled with the `debug-checks` feature, it is used to double check that a space
    /// which claims to be at a fixpoint really is.
    fn propagate_from_scratch(&self, context: PropagationContext) -> PropagationStatusCP;

    /// Performs propagation with state (i.e., with being able to mutate internal data structures,
    /// as opposed to [`Propagator::propagate_from_scratch`]).
    ///
    /// The returned [`crate::basic_types::Propagation`] tells the space whether the changes made
    /// by this call may reschedule the propagator itself, or whether it can be removed.
    ///
    /// By default, this function calls [`Propagator::propagate_from_scratch`].
    fn propagate(&mut self, context: PropagationContext) -> PropagationStatusCP {
        self.propagate_from_scratch(context)
    }

    /// Returns whether the propagator should be enqueued for propagation when a [`DomainEvent`]
    /// happens to one of the variables the propagator is subscribed to (as registered during
    /// creation with [`PropagatorConstructor`] using [`PropagatorConstructorContext::register`]).
    ///
    /// This is called for every such event, also for the events caused by the propagator itself,
    /// before the propagator is scheduled. It can be used to incrementally maintain data
    /// structures, and should only be used for computationally cheap logic.
    ///
    /// By default the propagator is always enqueued for every event it is subscribed to.
    fn notify(
        &mut self,
        _context: NotificationContext,
        _local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Called after the space restored an earlier checkpoint, allowing the propagator to update
    /// its internal data structures given the new variable domains.
    ///
    /// By default this function does nothing.
    fn synchronise(&mut self, _domains: Domains) {}

    /// Returns the [`Priority`] of the propagator, used for determining the order in which
    /// propagators are called.
    ///
    /// By default the priority is set to [`Priority::VeryLow`]. It is expected that
    /// propagator implementations would set this value to some appropriate value.
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator should not be enqueued.
    Skip,
}

/// The priority of a propagator, used for determining the order in which propagators will be
/// called.
///
/// Propagators with high priority are propagated before propagators with low(er) priority.
/// Propagators with the same priority run in the order in which they were scheduled.
///
/// Typically, propagators with low computational complexity should be assigned a high
/// priority (i.e., should be propagated before computationally expensive propagators).
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}

impl Priority {
    pub(crate) const NUM_PRIORITIES: usize = 4;
}
