use super::LocalId;
use super::Propagator;
use super::PropagatorId;
use super::PropagatorVarId;
use crate::engine::notifications::WatchList;
use crate::engine::notifications::Watchers;
use crate::engine::Assignments;
use crate::engine::TrailedValues;
use crate::propagation::DomainEvents;
use crate::propagation::Domains;
use crate::variables::IntegerVariable;
#[cfg(doc)]
use crate::Space;

/// A propagator constructor creates a fully initialized instance of a [`Propagator`].
///
/// The constructor is responsible for indicating on which events the propagator should be
/// enqueued. Additionally, the propagator can be initialized with values that come from the
/// current domains.
pub trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator + Clone;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// [`PropagatorConstructorContext`] is used when [`Propagator`]s are initialised after creation.
///
/// It represents a communication point between the [`Space`] and the [`Propagator`].
/// Propagators use the [`PropagatorConstructorContext`] to register to domain changes
/// of variables and to retrieve the current bounds of variables.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    assignments: &'a Assignments,
    trailed_values: &'a mut TrailedValues,
    watch_list: &'a mut WatchList,
    pub(crate) propagator_id: PropagatorId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(
        propagator_id: PropagatorId,
        assignments: &'a Assignments,
        trailed_values: &'a mut TrailedValues,
        watch_list: &'a mut WatchList,
    ) -> PropagatorConstructorContext<'a> {
        PropagatorConstructorContext {
            assignments,
            trailed_values,
            watch_list,
            propagator_id,
        }
    }

    /// Get domain information.
    pub fn domains(&mut self) -> Domains<'_> {
        Domains::new(self.assignments, self.trailed_values)
    }

    /// Subscribes the propagator to the given [`DomainEvents`].
    ///
    /// The domain events determine when [`Propagator::notify()`] will be called on the propagator.
    /// The [`LocalId`] is internal information related to the propagator,
    /// which is used when calling [`Propagator::notify()`] to identify the variable.
    ///
    /// Each variable *must* have a unique [`LocalId`]. Most often this would be its index of the
    /// variable in the internal array of variables.
    ///
    /// The new propagator is scheduled once by [`Space::add_propagator`], regardless of how many
    /// variables it registers for.
    pub fn register(
        &mut self,
        var: impl IntegerVariable,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        let propagator_var = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };

        let mut watchers = Watchers::new(propagator_var, self.watch_list);
        var.watch_all(&mut watchers, domain_events.get_int_events());
    }
}

mod private {
    use super::*;
    use crate::propagation::HasAssignments;
    use crate::propagation::HasTrailedValues;

    impl HasAssignments for PropagatorConstructorContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasTrailedValues for PropagatorConstructorContext<'_> {
        fn trailed_values(&self) -> &TrailedValues {
            self.trailed_values
        }

        fn trailed_values_mut(&mut self) -> &mut TrailedValues {
            self.trailed_values
        }
    }
}
