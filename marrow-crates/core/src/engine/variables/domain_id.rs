use enumset::EnumSet;

use super::TransformableVariable;
use crate::containers::StorageKey;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::variables::AffineView;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::DomainChange;
use crate::engine::EmptyDomain;

/// A structure which represents the most basic [`IntegerVariable`]; it is simply the id which links
/// to a domain (hence the name).
///
/// Since the id is an index into the arena of a [`crate::Space`], the same id refers to the
/// corresponding domain in every clone of that space.
#[derive(Clone, PartialEq, Eq, Copy, Hash, PartialOrd, Ord)]
pub struct DomainId {
    id: u32,
}

impl DomainId {
    pub const fn new(id: u32) -> Self {
        DomainId { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }
}

impl IntegerVariable for DomainId {
    type AffineView = AffineView<Self>;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        assignments.get_lower_bound(*self)
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        assignments.get_upper_bound(*self)
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        assignments.is_value_in_domain(*self, value)
    }

    fn size(&self, assignments: &Assignments) -> u32 {
        assignments.get_domain_size(*self)
    }

    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32> {
        assignments.get_domain_iterator(*self)
    }

    fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        assignments.tighten_lower_bound(*self, value)
    }

    fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        assignments.tighten_upper_bound(*self, value)
    }

    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<DomainChange, EmptyDomain> {
        assignments.remove_value_from_domain(*self, value)
    }

    fn assign(&self, assignments: &mut Assignments, value: i32) -> Result<DomainChange, EmptyDomain> {
        assignments.make_assignment(*self, value)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        watchers.watch_all(*self, events);
    }

    fn unwatch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        watchers.unwatch_all(*self, events);
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> DomainEvent {
        event.unwrap()
    }

    fn domain_id(&self) -> DomainId {
        *self
    }
}

impl TransformableVariable<AffineView<DomainId>> for DomainId {
    fn scaled(&self, scale: i32) -> AffineView<DomainId> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<DomainId> {
        AffineView::new(*self, 1, offset)
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId { id: index as u32 }
    }
}

impl std::fmt::Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}
