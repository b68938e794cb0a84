use std::fmt::Debug;

use crate::basic_types::Random;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::engine::notifications::WatchList;
use crate::engine::Assignments;
use crate::propagation::HasAssignments;
use crate::variables::DomainId;
use crate::variables::IntegerVariable;

/// The context provided to the [`Brancher`].
///
/// It allows the retrieval of domain values of variables, access to methods from a [`Random`]
/// generator, and the failure-weighted degree of variables.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    assignments: &'a Assignments,
    random_generator: &'a mut dyn Random,
    degrees: Option<DegreeInformation<'a>>,
}

#[derive(Debug, Clone, Copy)]
struct DegreeInformation<'a> {
    watch_list: &'a WatchList,
    failure_counts: &'a [u64],
}

impl<'a> SelectionContext<'a> {
    pub fn new(assignments: &'a Assignments, rng: &'a mut dyn Random) -> Self {
        SelectionContext {
            assignments,
            random_generator: rng,
            degrees: None,
        }
    }

    pub(crate) fn with_degrees(
        mut self,
        watch_list: &'a WatchList,
        failure_counts: &'a [u64],
    ) -> Self {
        self.degrees = Some(DegreeInformation {
            watch_list,
            failure_counts,
        });
        self
    }

    /// Returns a random generator which can be used to generate random values (see [`Random`] for
    /// more information).
    pub fn random(&mut self) -> &mut dyn Random {
        self.random_generator
    }

    /// Returns the number of values in the domain of the provided [`IntegerVariable`].
    pub fn get_size_of_domain<Var: IntegerVariable>(&self, var: &Var) -> u32 {
        var.size(self.assignments)
    }

    /// Returns the lower bound of the provided [`IntegerVariable`]
    pub fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments)
    }

    /// Returns the upper bound of the provided [`IntegerVariable`]
    pub fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments)
    }

    /// Determines whether the provided value is in the domain of the provided [`IntegerVariable`]
    pub fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments, value)
    }

    /// Determines whether the provided [`IntegerVariable`] has a unit domain.
    pub fn is_integer_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    /// The values in the domain of `var`, in increasing order.
    pub fn values<Var: IntegerVariable>(&self, var: &Var) -> Vec<i32> {
        var.iterate_domain(self.assignments).collect()
    }

    /// The value at position `index` of the domain of `var` in increasing order, without
    /// collecting the domain.
    pub fn nth_value<Var: IntegerVariable>(&self, var: &Var, index: u32) -> Option<i32> {
        let lower_bound = self.lower_bound(var) as i64;
        let width = self.upper_bound(var) as i64 - lower_bound + 1;
        let size = self.get_size_of_domain(var);

        if width == size as i64 {
            // The domain is an interval.
            return (index < size).then(|| (lower_bound + index as i64) as i32);
        }

        var.iterate_domain(self.assignments).nth(index as usize)
    }

    /// The accumulated failure count weighted degree of `domain`: every propagator subscribed to
    /// the domain contributes one plus the number of times it failed.
    ///
    /// Without degree information (e.g. a context built outside of a space) this is zero.
    pub fn weighted_degree(&self, domain: DomainId) -> u64 {
        let Some(degrees) = self.degrees else {
            return 0;
        };

        degrees
            .watch_list
            .propagators_watching(domain)
            .into_iter()
            .map(|propagator| {
                1 + degrees
                    .failure_counts
                    .get(propagator.0 as usize)
                    .copied()
                    .unwrap_or_default()
            })
            .sum()
    }

    /// Returns all currently defined [`DomainId`]s.
    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.assignments.domain_ids()
    }
}

impl HasAssignments for SelectionContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
