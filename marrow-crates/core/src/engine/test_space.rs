#![cfg(test)]
//! Helpers that aid testing of propagators. The [`TestSpace`] allows setting up specific scenarios
//! under which to test the various operations of a propagator.
use std::sync::Arc;
use std::sync::Mutex;

use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::engine::EmptyDomain;
use crate::engine::SpaceStatus;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::Priority;
use crate::propagation::Propagation;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationStatusCP;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorHandle;
use crate::propagation::ReadDomains;
use crate::variables::IntegerVariable;
use crate::Space;

/// A space in which propagators are added and propagated one change at a time.
#[derive(Debug, Default)]
pub(crate) struct TestSpace {
    pub(crate) space: Space,
}

impl TestSpace {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.space
            .new_bounded_integer(lb, ub)
            .expect("valid test domain")
    }

    pub(crate) fn new_sparse_variable(&mut self, values: Vec<i32>) -> DomainId {
        self.space
            .new_sparse_integer(values)
            .expect("valid test domain")
    }

    /// Add the propagator and propagate the space to a fixpoint.
    pub(crate) fn new_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, EmptyDomain>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let handle = self
            .space
            .add_propagator(constructor)
            .expect("the test space is not failed");

        self.propagate().map(|_| handle)
    }

    /// Post the predicate and propagate the space to a fixpoint.
    pub(crate) fn post(&mut self, predicate: Predicate) -> Result<(), EmptyDomain> {
        self.space.post(predicate);
        self.propagate()
    }

    fn propagate(&mut self) -> Result<(), EmptyDomain> {
        match self.space.propagate() {
            SpaceStatus::Failed => Err(EmptyDomain),
            SpaceStatus::Solved | SpaceStatus::Branch => Ok(()),
        }
    }

    pub(crate) fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.space.lower_bound(&var)
    }

    pub(crate) fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.space.upper_bound(&var)
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        self.space.contains(&var, value)
    }

    pub(crate) fn is_fixed<Var: IntegerVariable>(&self, var: Var) -> bool {
        self.space.is_fixed(&var)
    }

    pub(crate) fn num_propagators(&self) -> usize {
        self.space.num_propagators()
    }

    pub(crate) fn assert_bounds<Var: IntegerVariable>(&self, var: Var, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var.clone());
        let actual_ub = self.upper_bound(var.clone());

        assert_eq!(
            (lb, ub),
            (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}] of {var:?}"
        );
    }
}

/// Constructs a propagator which records its name every time it runs.
#[derive(Clone, Debug)]
pub(crate) struct RecordingConstructor {
    pub(crate) name: &'static str,
    pub(crate) priority: Priority,
    pub(crate) watched: DomainId,
    pub(crate) order: Arc<Mutex<Vec<&'static str>>>,
    /// Applied the first time the propagator runs.
    pub(crate) watch_change: Option<WatchChange>,
}

/// A change to the subscriptions of a [`RecordingPropagator`] from within its propagation.
#[derive(Clone, Copy, Debug)]
pub(crate) enum WatchChange {
    /// Also watch all events of this domain.
    Watch(DomainId),
    /// Stop watching the domain given at construction.
    Unwatch,
}

impl PropagatorConstructor for RecordingConstructor {
    type PropagatorImpl = RecordingPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register(self.watched, DomainEvents::ANY_INT, LocalId::from(0));

        RecordingPropagator {
            name: self.name,
            priority: self.priority,
            watched: self.watched,
            order: self.order,
            watch_change: self.watch_change,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct RecordingPropagator {
    name: &'static str,
    priority: Priority,
    watched: DomainId,
    order: Arc<Mutex<Vec<&'static str>>>,
    watch_change: Option<WatchChange>,
}

impl Propagator for RecordingPropagator {
    fn name(&self) -> &str {
        self.name
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        self.order
            .lock()
            .expect("no test thread panicked")
            .push(self.name);

        match self.watch_change.take() {
            Some(WatchChange::Watch(domain)) => {
                context.register_domain_event(domain, DomainEvents::ANY_INT, LocalId::from(1));
            }
            Some(WatchChange::Unwatch) => {
                context.unregister_domain_event(
                    self.watched,
                    DomainEvents::ANY_INT,
                    LocalId::from(0),
                );
            }
            None => {}
        }

        Ok(Propagation::AtFixpoint)
    }

    fn propagate_from_scratch(&self, _context: PropagationContext) -> PropagationStatusCP {
        Ok(Propagation::AtFixpoint)
    }
}
