use crate::engine::notifications::WatchList;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::Predicate;
use crate::engine::Assignments;
use crate::engine::DomainChange;
use crate::engine::EmptyDomain;
use crate::engine::TrailedInteger;
use crate::engine::TrailedValues;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
#[cfg(doc)]
use crate::propagation::Propagator;
#[cfg(doc)]
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorVarId;
use crate::variables::IntegerVariable;

/// A trait which defines common methods for retrieving the [`Assignments`] from the structure
/// which implements this trait.
pub trait HasAssignments {
    /// Returns the stored [`Assignments`].
    fn assignments(&self) -> &Assignments;
}

pub(crate) trait HasTrailedValues {
    fn trailed_values(&self) -> &TrailedValues;
    fn trailed_values_mut(&mut self) -> &mut TrailedValues;
}

/// Reading and writing of [`TrailedInteger`]s.
#[allow(private_bounds, reason = "the trailed values are an implementation detail")]
pub trait ManipulateTrailedValues: HasTrailedValues {
    fn new_trailed_integer(&mut self, initial_value: i64) -> TrailedInteger {
        self.trailed_values_mut().grow(initial_value)
    }

    fn read_trailed(&self, trailed_integer: TrailedInteger) -> i64 {
        self.trailed_values().read(trailed_integer)
    }

    fn add_assign_trailed(&mut self, trailed_integer: TrailedInteger, addition: i64) {
        self.trailed_values_mut()
            .add_assign(trailed_integer, addition);
    }

    fn assign_trailed(&mut self, trailed_integer: TrailedInteger, value: i64) {
        self.trailed_values_mut().assign(trailed_integer, value);
    }
}

impl<T: HasTrailedValues> ManipulateTrailedValues for T {}

/// Read access to the domains of views.
pub trait ReadDomains: HasAssignments {
    fn is_predicate_satisfied(&self, predicate: Predicate) -> bool {
        predicate.is_satisfied(self.assignments())
    }

    fn is_predicate_falsified(&self, predicate: Predicate) -> bool {
        predicate.is_falsified(self.assignments())
    }

    /// Returns `true` if the domain of the given variable is singleton.
    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments(), value)
    }

    fn size<Var: IntegerVariable>(&self, var: &Var) -> u32 {
        var.size(self.assignments())
    }

    fn fixed_value<Var: IntegerVariable>(&self, var: &Var) -> Option<i32> {
        self.is_fixed(var).then(|| self.lower_bound(var))
    }

    fn iterate_domain<Var: IntegerVariable>(&self, var: &Var) -> impl Iterator<Item = i32> {
        var.iterate_domain(self.assignments())
    }
}

impl<T: HasAssignments> ReadDomains for T {}

/// Read access to the domains, together with write access to the trailed values.
#[derive(Debug)]
pub struct Domains<'a> {
    pub(crate) assignments: &'a Assignments,
    pub(crate) trailed_values: &'a mut TrailedValues,
}

impl<'a> Domains<'a> {
    pub(crate) fn new(assignments: &'a Assignments, trailed_values: &'a mut TrailedValues) -> Self {
        Domains {
            assignments,
            trailed_values,
        }
    }
}

/// Provided to the propagator when it is notified of a domain event.
///
/// Domains can be read through the implementation of [`ReadDomains`].
///
/// The difference with [`PropagationContext`] is that it is not possible to perform a propagation
/// in the notify callback.
#[derive(Debug)]
pub struct NotificationContext<'a> {
    pub(crate) trailed_values: &'a mut TrailedValues,
    pub(crate) assignments: &'a Assignments,
}

impl<'a> NotificationContext<'a> {
    pub(crate) fn new(trailed_values: &'a mut TrailedValues, assignments: &'a Assignments) -> Self {
        Self {
            trailed_values,
            assignments,
        }
    }

    /// Get the current domains.
    pub fn domains(&mut self) -> Domains<'_> {
        Domains::new(self.assignments, self.trailed_values)
    }
}

/// Provides information about the state of the space to a propagator.
///
/// Domains can be read through the implementation of [`ReadDomains`], and narrowed through the
/// methods of this context. Narrowing never runs other propagators; the events it causes are
/// handled once the propagator returns.
#[derive(Debug)]
pub struct PropagationContext<'a> {
    pub(crate) trailed_values: &'a mut TrailedValues,
    pub(crate) assignments: &'a mut Assignments,
    pub(crate) watch_list: &'a mut WatchList,
    pub(crate) propagator_id: PropagatorId,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(
        trailed_values: &'a mut TrailedValues,
        assignments: &'a mut Assignments,
        watch_list: &'a mut WatchList,
        propagator_id: PropagatorId,
    ) -> Self {
        PropagationContext {
            trailed_values,
            assignments,
            watch_list,
            propagator_id,
        }
    }

    /// Subscribes the propagator to the given [`DomainEvents`] of `var`.
    ///
    /// Unlike [`PropagatorConstructorContext::register`], this does not schedule the propagator;
    /// the propagator is expected to have taken the current domain of `var` into account already.
    pub fn register_domain_event(
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

    /// Cancel the subscription to the given [`DomainEvents`] of `var`.
    pub fn unregister_domain_event(
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
        var.unwatch_all(&mut watchers, domain_events.get_int_events());
    }

    /// Get the current domain information.
    pub fn domains(&mut self) -> Domains<'_> {
        Domains::new(self.assignments, self.trailed_values)
    }

    pub fn reborrow(&mut self) -> PropagationContext<'_> {
        PropagationContext {
            trailed_values: self.trailed_values,
            assignments: self.assignments,
            watch_list: self.watch_list,
            propagator_id: self.propagator_id,
        }
    }
}

impl PropagationContext<'_> {
    /// Remove all values smaller than `bound` from the domain of `var`.
    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        var.set_lower_bound(self.assignments, bound)
    }

    /// Remove all values larger than `bound` from the domain of `var`.
    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        var.set_upper_bound(self.assignments, bound)
    }

    /// Exclude `value` from the domain of `var`.
    pub fn remove<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        var.remove(self.assignments, value)
    }

    /// Narrow the domain of `var` to `value`.
    pub fn assign<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        var.assign(self.assignments, value)
    }

    /// Make the given [`Predicate`] true.
    pub fn post(&mut self, predicate: Predicate) -> Result<DomainChange, EmptyDomain> {
        self.assignments.post_predicate(predicate)
    }
}

mod private {
    use super::*;

    impl HasAssignments for Assignments {
        fn assignments(&self) -> &Assignments {
            self
        }
    }

    impl HasAssignments for Domains<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasTrailedValues for Domains<'_> {
        fn trailed_values(&self) -> &TrailedValues {
            self.trailed_values
        }

        fn trailed_values_mut(&mut self) -> &mut TrailedValues {
            self.trailed_values
        }
    }

    impl HasAssignments for NotificationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasTrailedValues for NotificationContext<'_> {
        fn trailed_values(&self) -> &TrailedValues {
            self.trailed_values
        }

        fn trailed_values_mut(&mut self) -> &mut TrailedValues {
            self.trailed_values
        }
    }

    impl HasAssignments for PropagationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasTrailedValues for PropagationContext<'_> {
        fn trailed_values(&self) -> &TrailedValues {
            self.trailed_values
        }

        fn trailed_values_mut(&mut self) -> &mut TrailedValues {
            self.trailed_values
        }
    }
}
