use enumset::enum_set;
use enumset::EnumSet;

use super::DomainEvent;

/// A propagation condition: the set of [`DomainEvent`]s a propagator subscribes to for a view.
///
/// A bound change that fixes the variable raises both the bound event and
/// [`DomainEvent::Assign`], so [`DomainEvents::BOUNDS`] also covers assignments.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainEvents {
    int_events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Any change to the domain.
    pub const ANY_INT: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        DomainEvent::Assign
            | DomainEvent::LowerBound
            | DomainEvent::UpperBound
            | DomainEvent::Removal
    ));
    /// Lower and upper bound tightening, but not the removal of inner values.
    pub const BOUNDS: DomainEvents = DomainEvents::create_with_int_events(enum_set!(
        DomainEvent::LowerBound | DomainEvent::UpperBound
    ));
    pub const LOWER_BOUND: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(DomainEvent::LowerBound));
    pub const UPPER_BOUND: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(DomainEvent::UpperBound));
    /// The domain became a single value.
    pub const ASSIGN: DomainEvents =
        DomainEvents::create_with_int_events(enum_set!(DomainEvent::Assign));
}

impl DomainEvents {
    pub const fn create_with_int_events(int_events: EnumSet<DomainEvent>) -> DomainEvents {
        DomainEvents { int_events }
    }

    pub fn get_int_events(&self) -> EnumSet<DomainEvent> {
        self.int_events
    }
}
