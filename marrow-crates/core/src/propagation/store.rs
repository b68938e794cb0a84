use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

use super::Propagator;
use super::PropagatorId;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::marrow_asserts::marrow_assert_eq_simple;

/// A central store for the propagators of a space.
///
/// Subsumed propagators stay in the store but are inactive. Additions and subsumptions which
/// happen after the first checkpoint are trailed, so restoring a checkpoint brings back the exact
/// set of propagators of that moment.
#[derive(Default, Clone)]
pub(crate) struct PropagatorStore {
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    active: KeyedVec<PropagatorId, bool>,
    num_active: usize,
    trail: Trail<StoreChange>,
}

#[derive(Debug, Clone, Copy)]
enum StoreChange {
    Added(PropagatorId),
    Subsumed(PropagatorId),
}

/// A typed wrapper around a [`PropagatorId`] that allows retrieving concrete propagators from a
/// [`crate::Space`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PropagatorHandle<P> {
    id: PropagatorId,
    propagator: PhantomData<P>,
}

impl<P> PropagatorHandle<P> {
    /// Get a type-erased handle to the propagator.
    pub fn propagator_id(self) -> PropagatorId {
        self.id
    }
}

impl<P> Clone for PropagatorHandle<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for PropagatorHandle<P> {}

impl PropagatorStore {
    /// The number of propagators which have not been subsumed.
    pub(crate) fn num_active(&self) -> usize {
        self.num_active
    }

    pub(crate) fn is_active(&self, propagator_id: PropagatorId) -> bool {
        self.active.get(propagator_id).copied().unwrap_or_default()
    }

    /// The id which the next propagator added to the store receives.
    pub(crate) fn next_id(&self) -> PropagatorId {
        PropagatorId::create_from_index(self.propagators.len())
    }

    pub(crate) fn add<P: Propagator>(&mut self, propagator: P) -> PropagatorHandle<P> {
        let next_id = self.next_id();
        let id = self.propagators.push(Box::new(propagator));
        let _ = self.active.push(true);
        marrow_assert_eq_simple!(next_id, id);

        self.num_active += 1;
        if self.trail.get_checkpoint() > 0 {
            self.trail.push(StoreChange::Added(id));
        }

        PropagatorHandle {
            id,
            propagator: PhantomData,
        }
    }

    pub(crate) fn subsume(&mut self, propagator_id: PropagatorId) {
        if !self.is_active(propagator_id) {
            return;
        }

        self.active[propagator_id] = false;
        self.num_active -= 1;
        if self.trail.get_checkpoint() > 0 {
            self.trail.push(StoreChange::Subsumed(propagator_id));
        }
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        let undone = self.trail.synchronise(checkpoint).collect::<Vec<_>>();

        for change in undone {
            match change {
                StoreChange::Added(propagator_id) => {
                    let _ = self.propagators.pop();
                    let _ = self.active.pop();
                    marrow_assert_eq_simple!(self.next_id(), propagator_id);
                    self.num_active -= 1;
                }
                StoreChange::Subsumed(propagator_id) => {
                    self.active[propagator_id] = true;
                    self.num_active += 1;
                }
            }
        }
    }

    pub(crate) fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Propagator>> + '_ {
        self.propagators
            .iter_mut()
            .zip(self.active.iter())
            .filter_map(|(propagator, &active)| active.then_some(propagator))
    }

    pub(crate) fn iter_active(&self) -> impl Iterator<Item = (PropagatorId, &dyn Propagator)> + '_ {
        self.propagators
            .keys()
            .zip(self.propagators.iter())
            .filter(|(id, _)| self.is_active(*id))
            .map(|(id, propagator)| (id, propagator.as_ref()))
    }

    /// Get a reference to the propagator identified by the given handle.
    pub(crate) fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.propagators.get(handle.id)?.downcast_ref()
    }
}

impl Index<PropagatorId> for PropagatorStore {
    type Output = dyn Propagator;

    fn index(&self, index: PropagatorId) -> &Self::Output {
        self.propagators[index].as_ref()
    }
}

impl IndexMut<PropagatorId> for PropagatorStore {
    fn index_mut(&mut self, index: PropagatorId) -> &mut Self::Output {
        self.propagators[index].as_mut()
    }
}

impl Debug for PropagatorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter_active().map(|(_, propagator)| propagator.name()))
            .finish()
    }
}
