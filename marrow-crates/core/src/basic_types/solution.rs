use crate::engine::Assignments;
use crate::propagation::HasAssignments;
use crate::variables::DomainId;
use crate::variables::IntegerVariable;

/// A snapshot of the domains of a solved space.
///
/// Every view has a single value in a solution; a variable which no brancher fixed (because no
/// brancher covers it) takes the lower bound of its domain.
#[derive(Clone, Debug)]
pub struct Solution {
    assignments: Assignments,
}

impl Solution {
    pub(crate) fn new(assignments: Assignments) -> Self {
        Solution { assignments }
    }

    pub fn get_integer_value<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.lower_bound(&self.assignments)
    }

    /// The value of every variable, in order of creation.
    pub fn values(&self) -> impl Iterator<Item = (DomainId, i32)> + '_ {
        self.assignments
            .domain_ids()
            .map(|domain_id| (domain_id, self.assignments.get_lower_bound(domain_id)))
    }

    pub fn num_domains(&self) -> usize {
        self.assignments.domain_ids().count()
    }
}

impl HasAssignments for Solution {
    fn assignments(&self) -> &Assignments {
        &self.assignments
    }
}
