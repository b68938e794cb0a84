use std::fmt::Debug;

use enumset::EnumSet;

use super::DomainId;
use super::TransformableVariable;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::PredicateConstructor;
use crate::engine::Assignments;
use crate::engine::DomainChange;
use crate::engine::EmptyDomain;

/// A view onto the domain of an integer variable.
///
/// Views are cheap handles: reading goes through the [`Assignments`] of the space the view is
/// used in, and narrowing reports whether the domain changed or would become empty. Narrowing
/// never runs propagators; it only records the resulting [`DomainEvent`]s.
pub trait IntegerVariable:
    Clone
    + Debug
    + Send
    + 'static
    + PredicateConstructor<Value = i32>
    + TransformableVariable<Self::AffineView>
{
    type AffineView: IntegerVariable;

    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignments: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignments: &Assignments) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, assignments: &Assignments, value: i32) -> bool;

    /// The number of values in the domain.
    fn size(&self, assignments: &Assignments) -> u32;

    /// Iterate over the values of the domain.
    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32>;

    /// Remove all values smaller than `value`.
    fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<DomainChange, EmptyDomain>;

    /// Remove all values larger than `value`.
    fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<DomainChange, EmptyDomain>;

    /// Exclude `value` from the domain.
    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<DomainChange, EmptyDomain>;

    /// Narrow the domain to exactly `value`.
    fn assign(&self, assignments: &mut Assignments, value: i32) -> Result<DomainChange, EmptyDomain>;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>);

    /// Remove the watches for this variable on the given domain events.
    fn unwatch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>);

    /// Decode a domain event for this variable.
    fn unpack_event(&self, event: OpaqueDomainEvent) -> DomainEvent;

    /// The domain this view reads from.
    fn domain_id(&self) -> DomainId;
}
