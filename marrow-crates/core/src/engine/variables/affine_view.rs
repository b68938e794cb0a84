use std::cmp::Ordering;

use enumset::EnumSet;
use num::integer::div_floor;

use super::TransformableVariable;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateConstructor;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::DomainChange;
use crate::engine::EmptyDomain;

/// Models the constraint `y = ax + b`, by expressing the domain of `y` as a transformation of the
/// domain of `x`.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

impl<Inner> AffineView<Inner> {
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        assert_ne!(scale, 0, "Multiplication by zero is not invertable");
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    /// Apply the inverse transformation of this view on a value, to go from the value in the domain
    /// of `self` to a value in the domain of `self.inner`.
    ///
    /// The computation happens in `i64` and saturates at the bounds of `i32`, which is harmless
    /// since no domain contains those extreme values.
    fn invert(&self, value: i32, rounding: Rounding) -> i32 {
        let inverted_translation = value as i64 - self.offset as i64;
        let scale = self.scale as i64;

        let inverted = match rounding {
            Rounding::Up => -div_floor(-inverted_translation, scale),
            Rounding::Down => div_floor(inverted_translation, scale),
        };

        inverted.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Returns the exact pre-image of `value` under this view, if there is one.
    fn exact_inverse(&self, value: i32) -> Option<i32> {
        let inverted_translation = value as i64 - self.offset as i64;
        if inverted_translation % self.scale as i64 == 0 {
            i32::try_from(inverted_translation / self.scale as i64).ok()
        } else {
            None
        }
    }

    /// Apply the transformation of this view on a value of `self.inner`.
    ///
    /// Like [`AffineView::invert`], this saturates at the bounds of `i32`. Constraints reject
    /// views whose image leaves the supported range when they are posted.
    fn map(&self, value: i32) -> i32 {
        let mapped = self.scale as i64 * value as i64 + self.offset as i64;
        mapped.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

impl<View> IntegerVariable for AffineView<View>
where
    View: IntegerVariable,
{
    type AffineView = Self;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.upper_bound(assignments))
        } else {
            self.map(self.inner.lower_bound(assignments))
        }
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.lower_bound(assignments))
        } else {
            self.map(self.inner.upper_bound(assignments))
        }
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        self.exact_inverse(value)
            .is_some_and(|inverted| self.inner.contains(assignments, inverted))
    }

    fn size(&self, assignments: &Assignments) -> u32 {
        self.inner.size(assignments)
    }

    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32> {
        self.inner
            .iterate_domain(assignments)
            .map(move |value| self.map(value))
    }

    fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        if self.scale < 0 {
            let inverted = self.invert(value, Rounding::Down);
            self.inner.set_upper_bound(assignments, inverted)
        } else {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.set_lower_bound(assignments, inverted)
        }
    }

    fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: i32,
    ) -> Result<DomainChange, EmptyDomain> {
        if self.scale < 0 {
            let inverted = self.invert(value, Rounding::Up);
            self.inner.set_lower_bound(assignments, inverted)
        } else {
            let inverted = self.invert(value, Rounding::Down);
            self.inner.set_upper_bound(assignments, inverted)
        }
    }

    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<DomainChange, EmptyDomain> {
        match self.exact_inverse(value) {
            Some(inverted) => self.inner.remove(assignments, inverted),
            None => Ok(DomainChange::Unchanged),
        }
    }

    fn assign(&self, assignments: &mut Assignments, value: i32) -> Result<DomainChange, EmptyDomain> {
        match self.exact_inverse(value) {
            Some(inverted) => self.inner.assign(assignments, inverted),
            None => Err(EmptyDomain),
        }
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        self.inner.watch_all(watchers, self.transform_events(events));
    }

    fn unwatch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        self.inner.unwatch_all(watchers, self.transform_events(events));
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> DomainEvent {
        if self.scale.is_negative() {
            match self.inner.unpack_event(event) {
                DomainEvent::LowerBound => DomainEvent::UpperBound,
                DomainEvent::UpperBound => DomainEvent::LowerBound,
                event => event,
            }
        } else {
            self.inner.unpack_event(event)
        }
    }

    fn domain_id(&self) -> DomainId {
        self.inner.domain_id()
    }
}

impl<View> AffineView<View> {
    /// A negative scale turns lower bound changes of the inner domain into upper bound changes of
    /// the view, and vice versa.
    fn transform_events(&self, mut events: EnumSet<DomainEvent>) -> EnumSet<DomainEvent> {
        let bound = DomainEvent::LowerBound | DomainEvent::UpperBound;
        let intersection = events.intersection(bound);
        if intersection.len() == 1 && self.scale.is_negative() {
            events = events.symmetric_difference(bound);
        }
        events
    }
}

impl<View> TransformableVariable<AffineView<View>> for AffineView<View>
where
    View: IntegerVariable,
{
    fn scaled(&self, scale: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.scale *= scale;
        result.offset *= scale;
        result
    }

    fn offset(&self, offset: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.offset += offset;
        result
    }
}

impl<Var: std::fmt::Debug> std::fmt::Debug for AffineView<Var> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == -1 {
            write!(f, "-")?;
        } else if self.scale != 1 {
            write!(f, "{} * ", self.scale)?;
        }

        write!(f, "({:?})", self.inner)?;

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -self.offset)?,
            Ordering::Equal => {}
            Ordering::Greater => write!(f, " + {}", self.offset)?,
        }

        Ok(())
    }
}

impl<Var: PredicateConstructor<Value = i32>> PredicateConstructor for AffineView<Var> {
    type Value = Var::Value;

    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate {
        if self.scale < 0 {
            let inverted_bound = self.invert(bound, Rounding::Down);
            self.inner.upper_bound_predicate(inverted_bound)
        } else {
            let inverted_bound = self.invert(bound, Rounding::Up);
            self.inner.lower_bound_predicate(inverted_bound)
        }
    }

    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate {
        if self.scale < 0 {
            let inverted_bound = self.invert(bound, Rounding::Up);
            self.inner.lower_bound_predicate(inverted_bound)
        } else {
            let inverted_bound = self.invert(bound, Rounding::Down);
            self.inner.upper_bound_predicate(inverted_bound)
        }
    }

    fn equality_predicate(&self, bound: Self::Value) -> Predicate {
        match self.exact_inverse(bound) {
            Some(inverted_bound) => self.inner.equality_predicate(inverted_bound),
            None => Predicate::trivially_false(),
        }
    }

    fn disequality_predicate(&self, bound: Self::Value) -> Predicate {
        match self.exact_inverse(bound) {
            Some(inverted_bound) => self.inner.disequality_predicate(inverted_bound),
            None => Predicate::trivially_true(),
        }
    }
}

impl From<DomainId> for AffineView<DomainId> {
    fn from(value: DomainId) -> Self {
        AffineView::new(value, 1, 0)
    }
}

enum Rounding {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn scaling_an_affine_view() {
        let view = AffineView::new(DomainId::new(0), 3, 4);
        assert_eq!(3, view.scale);
        assert_eq!(4, view.offset);

        let scaled_view = view.scaled(6);
        assert_eq!(18, scaled_view.scale);
        assert_eq!(24, scaled_view.offset);
    }

    #[test]
    fn offsetting_an_affine_view() {
        let view = AffineView::new(DomainId::new(0), 3, 4);

        let offset_view = view.offset(6);
        assert_eq!(3, offset_view.scale);
        assert_eq!(10, offset_view.offset);
    }

    #[test]
    fn bounds_are_rounded_towards_the_inner_domain() {
        let x = DomainId::new(1);
        let view = x.scaled(2);

        // 2x >= 3 <-> x >= 2
        assert_eq!(predicate![x >= 2], predicate![view >= 3]);
        // 2x <= 3 <-> x <= 1
        assert_eq!(predicate![x <= 1], predicate![view <= 3]);
    }

    #[test]
    fn negative_scales_swap_bounds() {
        let x = DomainId::new(1);
        let view = x.scaled(-3);

        // -3x >= 7 <-> x <= -7/3 <-> x <= -3
        assert_eq!(predicate![x <= -3], predicate![view >= 7]);
        // -3x <= 7 <-> x >= -2
        assert_eq!(predicate![x >= -2], predicate![view <= 7]);
    }

    #[test]
    fn values_outside_of_the_image_are_trivial() {
        let x = DomainId::new(1);
        let view = x.scaled(2);

        assert_eq!(Predicate::trivially_false(), predicate![view == 3]);
        assert_eq!(Predicate::trivially_true(), predicate![view != 3]);
        assert_eq!(predicate![x == 2], predicate![view == 4]);
    }

    #[test]
    fn events_are_swapped_for_negative_scales() {
        let view = DomainId::new(1).scaled(-1);

        assert_eq!(
            EnumSet::only(DomainEvent::UpperBound),
            view.transform_events(EnumSet::only(DomainEvent::LowerBound))
        );
        assert_eq!(
            DomainEvent::LowerBound | DomainEvent::UpperBound,
            view.transform_events(DomainEvent::LowerBound | DomainEvent::UpperBound)
        );
        assert_eq!(
            DomainEvent::LowerBound,
            view.unpack_event(OpaqueDomainEvent::from(DomainEvent::UpperBound))
        );
    }

    #[test]
    fn image_beyond_i32_saturates() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 10_000_000);

        assert_eq!(i32::MAX, x.scaled(1000).upper_bound(&assignments));
        assert_eq!(i32::MIN, x.scaled(-1000).lower_bound(&assignments));
        assert_eq!(-10, x.scaled(1000).offset(-10).lower_bound(&assignments));
    }
}
