use crate::engine::variables::DomainId;
use crate::engine::Assignments;
use crate::predicate;

/// A domain operation on a single variable, the triple ([`DomainId`], [`PredicateType`], value).
///
/// To create a [`Predicate`], use [`Predicate::new`] or the more concise [`predicate!`] macro.
#[derive(Clone, PartialEq, Eq, Copy, Hash)]
pub struct Predicate {
    domain: DomainId,
    predicate_type: PredicateType,
    value: i32,
}

#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
pub enum PredicateType {
    LowerBound,
    UpperBound,
    NotEqual,
    Equal,
}

impl Predicate {
    pub fn new(domain: DomainId, predicate_type: PredicateType, value: i32) -> Self {
        Self {
            domain,
            predicate_type,
            value,
        }
    }

    pub fn get_predicate_type(&self) -> PredicateType {
        self.predicate_type
    }

    /// Returns the [`DomainId`] of the [`Predicate`]
    pub fn get_domain(&self) -> DomainId {
        self.domain
    }

    pub fn get_right_hand_side(&self) -> i32 {
        self.value
    }

    pub fn is_equality_predicate(&self) -> bool {
        self.predicate_type == PredicateType::Equal
    }

    pub fn is_lower_bound_predicate(&self) -> bool {
        self.predicate_type == PredicateType::LowerBound
    }

    pub fn is_upper_bound_predicate(&self) -> bool {
        self.predicate_type == PredicateType::UpperBound
    }

    pub fn is_not_equal_predicate(&self) -> bool {
        self.predicate_type == PredicateType::NotEqual
    }

    /// Whether every value left in the domain satisfies the predicate.
    pub fn is_satisfied(&self, assignments: &Assignments) -> bool {
        let lower_bound = assignments.get_lower_bound(self.domain);
        let upper_bound = assignments.get_upper_bound(self.domain);

        match self.predicate_type {
            PredicateType::LowerBound => lower_bound >= self.value,
            PredicateType::UpperBound => upper_bound <= self.value,
            PredicateType::Equal => lower_bound == self.value && upper_bound == self.value,
            PredicateType::NotEqual => !assignments.is_value_in_domain(self.domain, self.value),
        }
    }

    /// Whether no value left in the domain satisfies the predicate.
    pub fn is_falsified(&self, assignments: &Assignments) -> bool {
        (!*self).is_satisfied(assignments)
    }

    /// By convention, every space has a dummy variable fixed to one at the root. It is used to
    /// denote the trivially true predicate.
    pub fn trivially_true() -> Predicate {
        let domain_id = DomainId::new(0);
        predicate!(domain_id == 1)
    }

    pub fn trivially_false() -> Predicate {
        let domain_id = DomainId::new(0);
        predicate!(domain_id != 1)
    }
}

impl std::ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        let domain_id = self.domain;
        let value = self.value;

        match self.predicate_type {
            PredicateType::LowerBound => predicate!(domain_id <= value - 1),
            PredicateType::UpperBound => predicate!(domain_id >= value + 1),
            PredicateType::NotEqual => predicate!(domain_id == value),
            PredicateType::Equal => predicate!(domain_id != value),
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Predicate::trivially_true() {
            write!(f, "[True]")
        } else if *self == Predicate::trivially_false() {
            write!(f, "[False]")
        } else {
            let domain_id = self.domain;
            let rhs = self.value;

            match self.predicate_type {
                PredicateType::LowerBound => write!(f, "[{domain_id} >= {rhs}]"),
                PredicateType::UpperBound => write!(f, "[{domain_id} <= {rhs}]"),
                PredicateType::NotEqual => write!(f, "[{domain_id} != {rhs}]"),
                PredicateType::Equal => write!(f, "[{domain_id} == {rhs}]"),
            }
        }
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::Predicate;
    use crate::predicate;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn negation_is_an_involution() {
        let trivially_true = Predicate::trivially_true();
        let trivially_false = Predicate::trivially_false();
        assert_eq!(trivially_false, !trivially_true);
        assert_eq!(trivially_true, !trivially_false);

        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 10).unwrap();
        assert_eq!(predicate![x <= 4], !predicate![x >= 5]);
        assert_eq!(predicate![x >= 5], !!predicate![x >= 5]);
    }

    #[test]
    fn satisfaction_follows_the_domain() {
        let mut space = Space::default();
        let x = space.new_sparse_integer(vec![1, 3, 5]).unwrap();
        let assignments = space.assignments();

        assert!(predicate![x >= 1].is_satisfied(assignments));
        assert!(predicate![x != 2].is_satisfied(assignments));
        assert!(predicate![x >= 6].is_falsified(assignments));
        assert!(predicate![x == 4].is_falsified(assignments));
        assert!(!predicate![x <= 3].is_satisfied(assignments));
        assert!(!predicate![x <= 3].is_falsified(assignments));

        assert!(Predicate::trivially_true().is_satisfied(assignments));
        assert!(Predicate::trivially_false().is_falsified(assignments));
    }
}
