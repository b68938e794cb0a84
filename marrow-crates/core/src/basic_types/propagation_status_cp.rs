use crate::engine::EmptyDomain;
use crate::predicates::Predicate;

/// The result of invoking a propagator: either a [`Propagation`] status, or an [`Inconsistency`]
/// which fails the space.
pub type PropagationStatusCP = Result<Propagation, Inconsistency>;

/// What a propagator reports after a successful run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// The propagator is at a fixpoint with respect to the current domains, including the changes
    /// it made itself. Its own changes will not schedule it again.
    AtFixpoint,
    /// The propagator may not be at a fixpoint; changes it made to variables it is subscribed to
    /// schedule it again.
    NotAtFixpoint,
    /// The constraint is satisfied by every remaining assignment. The propagator is cancelled and
    /// removed from the space.
    Subsumed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    EmptyDomain,
    Conflict(PropagatorConflict),
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

impl From<PropagatorConflict> for Inconsistency {
    fn from(conflict: PropagatorConflict) -> Self {
        Inconsistency::Conflict(conflict)
    }
}

/// A conflict stated by a propagator. A propagator that identifies a conflict that is _not_ an
/// empty domain describes that conflict with this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropagatorConflict {
    /// The conjunction that describes the infeasible partial assignment.
    pub conjunction: Vec<Predicate>,
}
