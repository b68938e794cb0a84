use std::collections::BTreeMap;

use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::EventSink;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateType;
use crate::engine::variables::DomainId;
use crate::marrow_asserts::marrow_assert_moderate;
use crate::marrow_asserts::marrow_assert_simple;

/// The arena with the domains of all integer variables of a space.
///
/// Narrowing a domain records an undo entry on the trail (once a checkpoint exists) and the
/// resulting [`DomainEvent`]s in the event sink. A narrowing that would empty a domain fails with
/// [`EmptyDomain`] and leaves the domain as it was.
#[derive(Clone, Debug)]
pub struct Assignments {
    domains: KeyedVec<DomainId, IntegerDomain>,
    trail: Trail<DomainUpdate>,
    events: EventSink,
    /// The number of values that have been pruned from the domains.
    pruned_values: u64,
}

impl Default for Assignments {
    fn default() -> Self {
        let mut assignments = Self {
            domains: Default::default(),
            trail: Default::default(),
            events: Default::default(),
            pruned_values: 0,
        };

        // As a convention, we allocate a dummy domain_id=0, which represents a 0-1 variable that is
        // assigned to one. We use it to represent predicates that are trivially true.
        let dummy_variable = assignments.grow(1, 1);
        marrow_assert_simple!(dummy_variable.id() == 0);

        assignments
    }
}

/// Returned when a narrowing operation would leave a domain without values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// The effect of a successful narrowing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainChange {
    Unchanged,
    Changed,
}

impl DomainChange {
    pub fn is_changed(self) -> bool {
        self == DomainChange::Changed
    }
}

#[derive(Clone, Copy, Debug)]
enum DomainUpdate {
    LowerBound { domain: DomainId, old: i32 },
    UpperBound { domain: DomainId, old: i32 },
    Removal { domain: DomainId, value: i32 },
}

impl Assignments {
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        marrow_assert_simple!(lower_bound <= upper_bound, "Cannot create an empty domain.");

        self.events.grow();
        self.domains
            .push(IntegerDomain::new(lower_bound, upper_bound))
    }

    /// Create a domain holding exactly the given values. The values must not be empty.
    pub(crate) fn grow_sparse(&mut self, mut values: Vec<i32>) -> DomainId {
        values.sort_unstable();
        values.dedup();
        marrow_assert_simple!(!values.is_empty(), "Cannot create an empty domain.");

        let lower_bound = values[0];
        let upper_bound = values[values.len() - 1];
        let domain_id = self.grow(lower_bound, upper_bound);

        for gap in values.windows(2) {
            if gap[1] as i64 - gap[0] as i64 > 1 {
                self.domains[domain_id].add_holes(gap[0] + 1, gap[1] - 1);
            }
        }

        domain_id
    }

    pub(crate) fn num_domains(&self) -> u32 {
        self.domains.len() as u32
    }

    /// All domains except for the dummy domain which represents trivially true predicates.
    pub(crate) fn domain_ids(&self) -> impl Iterator<Item = DomainId> {
        self.domains.keys().skip(1)
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(crate) fn get_pruned_value_count(&self) -> u64 {
        self.pruned_values
    }

    pub fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub fn get_domain_size(&self, domain_id: DomainId) -> u32 {
        self.domains[domain_id].size()
    }

    pub fn is_domain_assigned(&self, domain_id: DomainId) -> bool {
        self.get_lower_bound(domain_id) == self.get_upper_bound(domain_id)
    }

    pub fn get_assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        self.is_domain_assigned(domain_id)
            .then(|| self.get_lower_bound(domain_id))
    }

    pub fn get_domain_iterator(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        let domain = &self.domains[domain_id];
        std::iter::successors(domain.next_value_from(domain.lower_bound), move |&value| {
            value
                .checked_add(1)
                .and_then(|next| domain.next_value_from(next))
        })
    }

    pub(crate) fn drain_domain_events(
        &mut self,
    ) -> impl Iterator<Item = (DomainEvent, DomainId)> + '_ {
        self.events.drain()
    }

    pub(crate) fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    fn check_ownership(&self, domain_id: DomainId) {
        marrow_assert_simple!(
            domain_id.id() < self.num_domains(),
            "{domain_id} does not belong to this space"
        );
    }

    fn push_update(&mut self, update: DomainUpdate) {
        // Changes before the first checkpoint are never undone.
        if self.trail.get_checkpoint() > 0 {
            self.trail.push(update);
        }
    }

    /// Raise a bound event, and the assign event if the domain became fixed.
    fn bound_changed(&mut self, domain_id: DomainId, event: DomainEvent) {
        self.events.event_occurred(event, domain_id);
        if self.is_domain_assigned(domain_id) {
            self.events.event_occurred(DomainEvent::Assign, domain_id);
        }
    }
}

// methods to change the domains
impl Assignments {
    pub fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        self.check_ownership(domain_id);

        let domain = &self.domains[domain_id];
        // No need to do any changes if the new lower bound is weaker.
        if new_lower_bound <= domain.lower_bound {
            return Ok(DomainChange::Unchanged);
        }

        let lower_bound = domain.next_value_from(new_lower_bound).ok_or(EmptyDomain)?;
        let old = domain.lower_bound;

        self.push_update(DomainUpdate::LowerBound {
            domain: domain_id,
            old,
        });
        self.pruned_values += self.domains[domain_id].count_in(old, lower_bound - 1) as u64;
        self.domains[domain_id].lower_bound = lower_bound;
        self.bound_changed(domain_id, DomainEvent::LowerBound);

        Ok(DomainChange::Changed)
    }

    pub fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        self.check_ownership(domain_id);

        let domain = &self.domains[domain_id];
        // No need to do any changes if the new upper bound is weaker.
        if new_upper_bound >= domain.upper_bound {
            return Ok(DomainChange::Unchanged);
        }

        let upper_bound = domain
            .previous_value_from(new_upper_bound)
            .ok_or(EmptyDomain)?;
        let old = domain.upper_bound;

        self.push_update(DomainUpdate::UpperBound {
            domain: domain_id,
            old,
        });
        self.pruned_values += self.domains[domain_id].count_in(upper_bound + 1, old) as u64;
        self.domains[domain_id].upper_bound = upper_bound;
        self.bound_changed(domain_id, DomainEvent::UpperBound);

        Ok(DomainChange::Changed)
    }

    pub fn make_assignment(
        &mut self,
        domain_id: DomainId,
        assigned_value: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        self.check_ownership(domain_id);

        if !self.is_value_in_domain(domain_id, assigned_value) {
            return Err(EmptyDomain);
        }

        let lower_bound_change = self.tighten_lower_bound(domain_id, assigned_value)?;
        let upper_bound_change = self.tighten_upper_bound(domain_id, assigned_value)?;

        if lower_bound_change.is_changed() || upper_bound_change.is_changed() {
            Ok(DomainChange::Changed)
        } else {
            Ok(DomainChange::Unchanged)
        }
    }

    pub fn remove_value_from_domain(
        &mut self,
        domain_id: DomainId,
        removed_value: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        self.check_ownership(domain_id);

        let domain = &self.domains[domain_id];
        // No need to do any changes if the value is not present anyway.
        if !domain.contains(removed_value) {
            return Ok(DomainChange::Unchanged);
        }

        if domain.lower_bound == domain.upper_bound {
            return Err(EmptyDomain);
        }

        if removed_value == domain.lower_bound {
            return self.tighten_lower_bound(domain_id, removed_value + 1);
        }

        if removed_value == domain.upper_bound {
            return self.tighten_upper_bound(domain_id, removed_value - 1);
        }

        self.domains[domain_id].add_holes(removed_value, removed_value);
        self.push_update(DomainUpdate::Removal {
            domain: domain_id,
            value: removed_value,
        });
        self.pruned_values += 1;
        self.events
            .event_occurred(DomainEvent::Removal, domain_id);

        Ok(DomainChange::Changed)
    }

    /// Apply the given [`Predicate`] to the integer domains.
    pub(crate) fn post_predicate(
        &mut self,
        predicate: Predicate,
    ) -> Result<DomainChange, EmptyDomain> {
        let domain_id = predicate.get_domain();
        let value = predicate.get_right_hand_side();

        match predicate.get_predicate_type() {
            PredicateType::LowerBound => self.tighten_lower_bound(domain_id, value),
            PredicateType::UpperBound => self.tighten_upper_bound(domain_id, value),
            PredicateType::NotEqual => self.remove_value_from_domain(domain_id, value),
            PredicateType::Equal => self.make_assignment(domain_id, value),
        }
    }

    /// Undo every change made after the given checkpoint.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        marrow_assert_simple!(checkpoint < self.get_checkpoint());

        let undone = self.trail.synchronise(checkpoint).collect::<Vec<_>>();
        for update in undone {
            match update {
                DomainUpdate::LowerBound { domain, old } => {
                    self.domains[domain].lower_bound = old;
                }
                DomainUpdate::UpperBound { domain, old } => {
                    self.domains[domain].upper_bound = old;
                }
                DomainUpdate::Removal { domain, value } => {
                    self.domains[domain].remove_hole(value);
                }
            }
        }

        self.events.clear();
    }
}

/// The domain of an integer variable: an interval with holes.
///
/// The holes are kept as disjoint ranges which never touch, mapping the first value of a range to
/// its last value. The holes may contain values outside of the current bounds, but the bounds
/// themselves are never holes.
#[derive(Clone, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    holes: BTreeMap<i32, i32>,
}

impl IntegerDomain {
    fn new(lower_bound: i32, upper_bound: i32) -> IntegerDomain {
        IntegerDomain {
            lower_bound,
            upper_bound,
            holes: BTreeMap::new(),
        }
    }

    fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value
            && value <= self.upper_bound
            && self.hole_containing(value).is_none()
    }

    fn size(&self) -> u32 {
        self.count_in(self.lower_bound, self.upper_bound)
    }

    /// The range of holes which `value` lies in.
    fn hole_containing(&self, value: i32) -> Option<(i32, i32)> {
        self.holes
            .range(..=value)
            .next_back()
            .filter(|&(_, &end)| value <= end)
            .map(|(&start, &end)| (start, end))
    }

    /// Turn all values in `[from, to]` into holes, merging with the neighbouring ranges.
    fn add_holes(&mut self, from: i32, to: i32) {
        marrow_assert_moderate!(from <= to);
        let mut start = from;
        let mut end = to;

        if let Some((&previous_start, &previous_end)) = self.holes.range(..from).next_back() {
            if previous_end as i64 + 1 >= from as i64 {
                start = previous_start;
                end = end.max(previous_end);
                let _ = self.holes.remove(&previous_start);
            }
        }

        while let Some((&next_start, &next_end)) = self.holes.range(from..).next() {
            if next_start as i64 > end as i64 + 1 {
                break;
            }
            end = end.max(next_end);
            let _ = self.holes.remove(&next_start);
        }

        let _ = self.holes.insert(start, end);
    }

    /// Put `value` back into the domain, splitting the range of holes it lies in.
    fn remove_hole(&mut self, value: i32) {
        let Some((start, end)) = self.hole_containing(value) else {
            return;
        };

        let _ = self.holes.remove(&start);
        if start < value {
            let _ = self.holes.insert(start, value - 1);
        }
        if value < end {
            let _ = self.holes.insert(value + 1, end);
        }
    }

    /// The number of values of the domain within `[from, to]`, ignoring the bounds of the domain.
    fn count_in(&self, from: i32, to: i32) -> u32 {
        if from > to {
            return 0;
        }

        let first = self.hole_containing(from).map_or(from, |(start, _)| start);
        let in_holes = self
            .holes
            .range(first..=to)
            .map(|(&start, &end)| end.min(to) as i64 - start.max(from) as i64 + 1)
            .sum::<i64>();

        (to as i64 - from as i64 + 1 - in_holes) as u32
    }

    /// The smallest value of the domain which is at least `value`.
    fn next_value_from(&self, value: i32) -> Option<i32> {
        let candidate = value.max(self.lower_bound);
        let candidate = match self.hole_containing(candidate) {
            Some((_, end)) => end as i64 + 1,
            None => candidate as i64,
        };

        marrow_assert_moderate!(
            candidate > self.upper_bound as i64 || self.contains(candidate as i32)
        );
        (candidate <= self.upper_bound as i64).then_some(candidate as i32)
    }

    /// The largest value of the domain which is at most `value`.
    fn previous_value_from(&self, value: i32) -> Option<i32> {
        let candidate = value.min(self.upper_bound);
        let candidate = match self.hole_containing(candidate) {
            Some((start, _)) => start as i64 - 1,
            None => candidate as i64,
        };

        marrow_assert_moderate!(
            candidate < self.lower_bound as i64 || self.contains(candidate as i32)
        );
        (candidate >= self.lower_bound as i64).then_some(candidate as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::limits;
    use crate::predicate;

    fn drain(assignments: &mut Assignments) -> Vec<(DomainEvent, DomainId)> {
        assignments.drain_domain_events().collect()
    }

    #[test]
    fn bounds_change_can_also_trigger_assign_event() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);
        let d2 = assignments.grow(1, 5);

        let _ = assignments.post_predicate(predicate!(d1 >= 5)).unwrap();
        let _ = assignments.post_predicate(predicate!(d2 <= 1)).unwrap();

        assert_eq!(
            vec![
                (DomainEvent::LowerBound, d1),
                (DomainEvent::Assign, d1),
                (DomainEvent::UpperBound, d2),
                (DomainEvent::Assign, d2),
            ],
            drain(&mut assignments)
        );
    }

    #[test]
    fn making_assignment_triggers_appropriate_events() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);
        let d2 = assignments.grow(1, 5);

        let _ = assignments.make_assignment(d1, 1).unwrap();
        let _ = assignments.make_assignment(d2, 3).unwrap();

        let events = drain(&mut assignments);
        assert_eq!(5, events.len());
        assert!(events.contains(&(DomainEvent::UpperBound, d1)));
        assert!(events.contains(&(DomainEvent::Assign, d1)));
        assert!(events.contains(&(DomainEvent::LowerBound, d2)));
        assert!(events.contains(&(DomainEvent::UpperBound, d2)));
        assert!(events.contains(&(DomainEvent::Assign, d2)));
    }

    #[test]
    fn interior_removal_triggers_removal_event() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assert_eq!(
            Ok(DomainChange::Changed),
            assignments.remove_value_from_domain(d1, 2)
        );
        assert_eq!(vec![(DomainEvent::Removal, d1)], drain(&mut assignments));
        assert_eq!(4, assignments.get_domain_size(d1));
    }

    #[test]
    fn removing_the_bounds_skips_over_holes() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow_sparse(vec![1, 3, 4, 6]);

        let _ = assignments.remove_value_from_domain(d1, 1).unwrap();
        assert_eq!(3, assignments.get_lower_bound(d1));

        let _ = assignments.remove_value_from_domain(d1, 6).unwrap();
        assert_eq!(4, assignments.get_upper_bound(d1));
        assert_eq!(vec![3, 4], assignments.get_domain_iterator(d1).collect::<Vec<_>>());
    }

    #[test]
    fn narrowing_never_increases_the_size() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(0, 9);

        let mut previous_size = assignments.get_domain_size(d1);
        for predicate in [
            predicate!(d1 != 4),
            predicate!(d1 >= 2),
            predicate!(d1 != 4),
            predicate!(d1 <= 8),
            predicate!(d1 >= 1),
            predicate!(d1 == 6),
        ] {
            let _ = assignments.post_predicate(predicate).unwrap();
            let size = assignments.get_domain_size(d1);
            assert!(size <= previous_size);
            previous_size = size;
        }

        assert_eq!(Some(6), assignments.get_assigned_value(d1));
    }

    #[test]
    fn an_emptying_operation_leaves_the_domain_untouched() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow_sparse(vec![1, 3, 5]);
        let _ = drain(&mut assignments);

        assert_eq!(Err(EmptyDomain), assignments.tighten_lower_bound(d1, 6));
        assert_eq!(Err(EmptyDomain), assignments.tighten_upper_bound(d1, 0));
        assert_eq!(Err(EmptyDomain), assignments.make_assignment(d1, 2));

        assert_eq!(vec![1, 3, 5], assignments.get_domain_iterator(d1).collect::<Vec<_>>());
        assert!(drain(&mut assignments).is_empty());

        let _ = assignments.make_assignment(d1, 3).unwrap();
        assert_eq!(Err(EmptyDomain), assignments.remove_value_from_domain(d1, 3));
        assert_eq!(Some(3), assignments.get_assigned_value(d1));
    }

    #[test]
    fn unchanged_operations_raise_no_events() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assert_eq!(Ok(DomainChange::Unchanged), assignments.tighten_lower_bound(d1, 0));
        assert_eq!(Ok(DomainChange::Unchanged), assignments.tighten_upper_bound(d1, 5));
        assert_eq!(Ok(DomainChange::Unchanged), assignments.remove_value_from_domain(d1, 7));
        assert!(drain(&mut assignments).is_empty());
    }

    #[test]
    fn synchronise_restores_domains() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 10);
        let _ = assignments.remove_value_from_domain(d1, 5).unwrap();

        assignments.new_checkpoint();
        let _ = assignments.tighten_lower_bound(d1, 3).unwrap();
        let _ = assignments.remove_value_from_domain(d1, 7).unwrap();

        assignments.new_checkpoint();
        let _ = assignments.make_assignment(d1, 8).unwrap();

        assignments.synchronise(1);
        assert_eq!(vec![3, 4, 6, 8, 9, 10], assignments.get_domain_iterator(d1).collect::<Vec<_>>());

        assignments.synchronise(0);
        assert_eq!(9, assignments.get_domain_size(d1));
        assert_eq!(1, assignments.get_lower_bound(d1));
        assert!(!assignments.is_value_in_domain(d1, 5));
    }

    #[test]
    fn sparse_domain_stores_its_gaps_as_ranges() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow_sparse(vec![limits::MIN, limits::MAX]);

        assert_eq!(2, assignments.get_domain_size(d1));
        assert_eq!(1, assignments.domains[d1].holes.len());
        assert!(!assignments.is_value_in_domain(d1, 0));
        assert_eq!(
            vec![limits::MIN, limits::MAX],
            assignments.get_domain_iterator(d1).collect::<Vec<_>>()
        );

        let _ = assignments.tighten_lower_bound(d1, -5).unwrap();
        assert_eq!(Some(limits::MAX), assignments.get_assigned_value(d1));
    }

    #[test]
    fn adjacent_removals_merge_and_split_on_undo() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow_sparse(vec![0, 1, 4, 5, 6, 9]);
        assignments.new_checkpoint();

        let _ = assignments.remove_value_from_domain(d1, 5).unwrap();
        let _ = assignments.remove_value_from_domain(d1, 4).unwrap();
        let _ = assignments.remove_value_from_domain(d1, 6).unwrap();
        assert_eq!(1, assignments.domains[d1].holes.len());
        assert_eq!(vec![0, 1, 9], assignments.get_domain_iterator(d1).collect::<Vec<_>>());

        let _ = assignments.tighten_lower_bound(d1, 2).unwrap();
        assert_eq!(Some(9), assignments.get_assigned_value(d1));

        assignments.synchronise(0);
        assert_eq!(
            vec![0, 1, 4, 5, 6, 9],
            assignments.get_domain_iterator(d1).collect::<Vec<_>>()
        );
        assert_eq!(2, assignments.domains[d1].holes.len());
        assert_eq!(6, assignments.get_domain_size(d1));
    }
}
