use std::fmt::Debug;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use log::trace;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::basic_types::limits;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Inconsistency;
use crate::basic_types::Propagation;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::Choice;
use crate::branching::SelectionContext;
use crate::constraints::Constraint;
use crate::constraints::ConstraintPoster;
use crate::create_statistics_struct;
use crate::engine::notifications::OpaqueDomainEvent;
use crate::engine::notifications::WatchList;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::engine::Assignments;
use crate::engine::PropagatorQueue;
use crate::engine::TrailedValues;
use crate::marrow_asserts::marrow_assert_eq_simple;
use crate::marrow_asserts::marrow_assert_extreme;
use crate::marrow_asserts::marrow_assert_simple;
use crate::propagation::store::PropagatorStore;
use crate::propagation::Domains;
use crate::propagation::EnqueueDecision;
use crate::propagation::HasAssignments;
use crate::propagation::NotificationContext;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorHandle;
use crate::propagation::PropagatorId;
use crate::statistics::log_statistic;
use crate::statistics::StatisticLogger;

/// The outcome of propagating a [`Space`] to a fixpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceStatus {
    /// A propagator (or a posted predicate) detected that the space has no solution.
    Failed,
    /// The space is at a fixpoint and no brancher has anything left to branch on.
    Solved,
    /// The space is at a fixpoint and [`Space::choice`] holds the choice to branch on.
    Branch,
}

create_statistics_struct!(
    /// Statistics of the propagation performed in a single [`Space`] and the spaces cloned from
    /// it.
    SpaceStatistics {
        /// The number of calls to [`Propagator::propagate`].
        num_propagations: u64,
        /// The number of times the space became failed.
        num_failures: u64,
});

/// A node of the search tree: the variables with their domains, the propagators over them and the
/// branchers which split the space once propagation is done.
///
/// Cloning a space yields a fully independent copy; views and propagator handles of the original
/// can be used unchanged with the copy. Only the accumulated failure counts of the propagators
/// (used by [`crate::branching::variable_selection::MaxWeightedDegree`]) are shared between all
/// copies.
///
/// Once a space is failed it stays failed: propagating reports [`SpaceStatus::Failed`], and
/// posting or committing does nothing. The only way back is [`Space::restore_to`] a checkpoint
/// created before the failure.
///
/// # Example
/// ```rust
/// # use marrow_core::constraints;
/// # use marrow_core::propagation::ReadDomains;
/// # use marrow_core::Space;
/// # use marrow_core::SpaceStatus;
/// let mut space = Space::default();
/// let x = space.new_bounded_integer(0, 10).unwrap();
/// let y = space.new_bounded_integer(0, 10).unwrap();
///
/// space
///     .add_constraint(constraints::less_than(x, y))
///     .post()
///     .unwrap();
///
/// assert_eq!(space.propagate(), SpaceStatus::Solved);
/// assert_eq!(space.upper_bound(&x), 9);
/// assert_eq!(space.lower_bound(&y), 1);
/// ```
#[derive(Clone)]
pub struct Space {
    assignments: Assignments,
    trailed_values: TrailedValues,
    watch_list: WatchList,
    propagators: PropagatorStore,
    propagator_queue: PropagatorQueue,
    branchers: Vec<Box<dyn Brancher>>,
    /// The choice computed by the last call to [`Space::propagate`] which returned
    /// [`SpaceStatus::Branch`].
    choice: Option<Choice>,
    /// The checkpoint at which the space failed.
    failed_at: Option<usize>,
    random: SmallRng,
    failure_counts: Arc<Mutex<Vec<u64>>>,
    statistics: SpaceStatistics,
}

impl Default for Space {
    fn default() -> Self {
        Space::with_seed(42)
    }
}

impl Debug for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Space")
            .field("num_domains", &self.assignments.domain_ids().count())
            .field("propagators", &self.propagators)
            .field("num_branchers", &self.branchers.len())
            .field("failed", &self.is_failed())
            .finish()
    }
}

/// Operations to build a model.
impl Space {
    /// Create an empty space whose random generator (used by the random heuristics) is seeded
    /// with `seed`.
    pub fn with_seed(seed: u64) -> Space {
        let mut watch_list = WatchList::default();
        // The dummy domain of the assignments.
        watch_list.grow();

        Space {
            assignments: Assignments::default(),
            trailed_values: TrailedValues::default(),
            watch_list,
            propagators: PropagatorStore::default(),
            propagator_queue: PropagatorQueue::default(),
            branchers: vec![],
            choice: None,
            failed_at: None,
            random: SmallRng::seed_from_u64(seed),
            failure_counts: Arc::default(),
            statistics: SpaceStatistics::default(),
        }
    }

    /// Create a new variable with the domain `[lower_bound, upper_bound]`.
    ///
    /// Both bounds have to lie within [`limits::MIN`] and [`limits::MAX`], and the domain may not
    /// be empty.
    pub fn new_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<DomainId, ConstraintOperationError> {
        limits::check(lower_bound as i64, "new_bounded_integer")?;
        limits::check(upper_bound as i64, "new_bounded_integer")?;
        if lower_bound > upper_bound {
            return Err(ConstraintOperationError::EmptyInitialDomain {
                location: "new_bounded_integer",
            });
        }

        self.watch_list.grow();
        Ok(self.assignments.grow(lower_bound, upper_bound))
    }

    /// Create a new variable whose domain holds exactly the given values.
    pub fn new_sparse_integer(
        &mut self,
        values: Vec<i32>,
    ) -> Result<DomainId, ConstraintOperationError> {
        if values.is_empty() {
            return Err(ConstraintOperationError::EmptyInitialDomain {
                location: "new_sparse_integer",
            });
        }
        for &value in &values {
            limits::check(value as i64, "new_sparse_integer")?;
        }

        self.watch_list.grow();
        Ok(self.assignments.grow_sparse(values))
    }

    /// Add a constraint to the space. The constraint is only added once
    /// [`ConstraintPoster::post`] is called on the result.
    pub fn add_constraint<C: Constraint>(&mut self, constraint: C) -> ConstraintPoster<'_, C> {
        ConstraintPoster::new(self, constraint)
    }

    /// Add a new propagator to the space. The constructor of that propagator should subscribe to
    /// the appropriate domain events so that the propagator is scheduled when necessary.
    ///
    /// The new propagator is scheduled, but no propagation happens until [`Space::propagate`] is
    /// called.
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, ConstraintOperationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        if self.is_failed() {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let propagator_id = self.propagators.next_id();
        let constructor_context = PropagatorConstructorContext::new(
            propagator_id,
            &self.assignments,
            &mut self.trailed_values,
            &mut self.watch_list,
        );
        let propagator = constructor.create(constructor_context);
        let priority = propagator.priority();

        let handle = self.propagators.add(propagator);
        marrow_assert_eq_simple!(handle.propagator_id(), propagator_id);

        self.propagator_queue
            .enqueue_propagator(propagator_id, priority);

        Ok(handle)
    }

    /// Add a brancher. Branchers are asked for a choice in the order in which they were added.
    pub fn add_brancher(&mut self, brancher: impl Brancher + 'static) {
        self.branchers.push(Box::new(brancher));
    }

    /// Make the given [`Predicate`] true. If this empties a domain, the space becomes failed.
    ///
    /// No propagation happens until [`Space::propagate`] is called.
    pub fn post(&mut self, predicate: Predicate) {
        if self.is_failed() {
            trace!("Ignoring {predicate} posted to a failed space");
            return;
        }

        self.choice = None;
        if self.assignments.post_predicate(predicate).is_err() {
            self.fail(None);
        }
    }

    /// Commit to the alternative with the given index of a [`Choice`] of this space (or of the
    /// space it was cloned from).
    pub fn commit(&mut self, choice: &Choice, alternative: usize) {
        marrow_assert_simple!(
            alternative < choice.num_alternatives(),
            "Alternative {alternative} does not exist in a choice with {} alternatives",
            choice.num_alternatives()
        );

        if let Some(predicate) = choice.alternative(alternative) {
            self.post(predicate);
        }
    }
}

/// Operations for retrieving information about the space.
impl Space {
    pub fn is_failed(&self) -> bool {
        self.failed_at.is_some()
    }

    /// The choice computed by the last call to [`Space::propagate`], if it returned
    /// [`SpaceStatus::Branch`] and the space was not changed since.
    pub fn choice(&self) -> Option<&Choice> {
        self.choice.as_ref()
    }

    /// The values of all variables. See [`Solution`] for the value of unfixed variables.
    pub fn solution(&self) -> Solution {
        Solution::new(self.assignments.clone())
    }

    /// The number of propagators which are not yet subsumed.
    pub fn num_propagators(&self) -> usize {
        self.propagators.num_active()
    }

    /// The number of propagator calls in this space (including the calls made before it was
    /// cloned).
    pub fn num_propagations(&self) -> u64 {
        self.statistics.num_propagations
    }

    /// Get a reference to the propagator identified by the given handle.
    pub fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.propagators.get_propagator(handle)
    }

    pub fn log_statistics(&self, verbose: bool) {
        log_statistic("variables", self.assignments.domain_ids().count());
        log_statistic("propagators", self.propagators.num_active());
        log_statistic("failures", self.statistics.num_failures);
        log_statistic("propagations", self.statistics.num_propagations);
        log_statistic("prunedValues", self.assignments.get_pruned_value_count());
        if verbose {
            for (propagator_id, propagator) in self.propagators.iter_active() {
                propagator.log_statistics(
                    StatisticLogger::new(propagator.name()).attach_to_prefix(propagator_id.0),
                );
            }
            for (index, brancher) in self.branchers.iter().enumerate() {
                brancher.log_statistics(StatisticLogger::new("brancher").attach_to_prefix(index));
            }
        }
    }

    /// Run `f` with a [`SelectionContext`] over the current domains of this space, including the
    /// failure weighted degrees of the variables.
    pub fn with_selection_context<T>(&mut self, f: impl FnOnce(&mut SelectionContext<'_>) -> T) -> T {
        let failure_counts = self
            .failure_counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut context = SelectionContext::new(&self.assignments, &mut self.random)
            .with_degrees(&self.watch_list, &failure_counts);
        f(&mut context)
    }
}

/// Operations to propagate and search.
impl Space {
    /// Run the scheduled propagators until none is scheduled anymore or one of them fails.
    ///
    /// Propagators run in order of [`crate::propagation::Priority`], and in the order in which
    /// they were scheduled among equal priorities. At a fixpoint, the branchers are asked for a
    /// [`Choice`]; if none of them has one the space is solved.
    pub fn propagate(&mut self) -> SpaceStatus {
        if self.is_failed() {
            return SpaceStatus::Failed;
        }

        // The initial domain events are due to posted predicates or a committed choice.
        self.notify_propagators(None);

        while let Some(propagator_id) = self.propagator_queue.pop() {
            if !self.propagators.is_active(propagator_id) {
                continue;
            }

            if let Err(inconsistency) = self.propagate_propagator(propagator_id) {
                trace!(
                    "{} ({propagator_id}) failed: {inconsistency:?}",
                    self.propagators[propagator_id].name()
                );
                self.fail(Some(propagator_id));
                return SpaceStatus::Failed;
            }
        }

        if cfg!(feature = "debug-checks") {
            self.debug_check_fixpoint();
        }

        self.choice = self.next_choice();
        if self.choice.is_some() {
            SpaceStatus::Branch
        } else {
            SpaceStatus::Solved
        }
    }

    fn propagate_propagator(&mut self, propagator_id: PropagatorId) -> Result<(), Inconsistency> {
        self.statistics.num_propagations += 1;

        let propagation = {
            let context = PropagationContext::new(
                &mut self.trailed_values,
                &mut self.assignments,
                &mut self.watch_list,
                propagator_id,
            );
            self.propagators[propagator_id].propagate(context)?
        };

        match propagation {
            Propagation::AtFixpoint => self.notify_propagators(Some(propagator_id)),
            Propagation::NotAtFixpoint => self.notify_propagators(None),
            Propagation::Subsumed => {
                self.watch_list.unwatch_propagator(propagator_id);
                self.propagators.subsume(propagator_id);
                self.notify_propagators(None);
            }
        }

        Ok(())
    }

    /// Turn the pending domain events into notifications, and schedule the propagators which
    /// ask for it. The `idempotent` propagator is notified but not scheduled.
    fn notify_propagators(&mut self, idempotent: Option<PropagatorId>) {
        let events = self.assignments.drain_domain_events().collect::<Vec<_>>();

        for (event, domain) in events {
            for &watcher in self.watch_list.get_affected_propagators(event, domain) {
                let propagator = &mut self.propagators[watcher.propagator];
                let context = NotificationContext::new(&mut self.trailed_values, &self.assignments);
                let decision =
                    propagator.notify(context, watcher.variable, OpaqueDomainEvent::from(event));

                if decision == EnqueueDecision::Enqueue && idempotent != Some(watcher.propagator) {
                    self.propagator_queue
                        .enqueue_propagator(watcher.propagator, propagator.priority());
                }
            }
        }
    }

    /// Check that running any propagator from scratch does not change the domains anymore.
    fn debug_check_fixpoint(&self) {
        for (propagator_id, propagator) in self.propagators.iter_active() {
            let mut assignments = self.assignments.clone();
            let mut trailed_values = self.trailed_values.clone();
            let mut watch_list = self.watch_list.clone();

            let context = PropagationContext::new(
                &mut trailed_values,
                &mut assignments,
                &mut watch_list,
                propagator_id,
            );
            let result = propagator.propagate_from_scratch(context);

            marrow_assert_extreme!(
                result.is_ok() && !assignments.has_pending_events(),
                "{} ({propagator_id}) is not at a fixpoint",
                propagator.name()
            );
        }
    }

    fn next_choice(&mut self) -> Option<Choice> {
        let mut branchers = std::mem::take(&mut self.branchers);
        let choice = self.with_selection_context(|context| {
            branchers
                .iter_mut()
                .find_map(|brancher| brancher.next_choice(context))
        });
        self.branchers = branchers;
        choice
    }

    fn fail(&mut self, propagator: Option<PropagatorId>) {
        self.failed_at = Some(self.get_checkpoint());
        self.choice = None;
        self.propagator_queue.clear();
        self.assignments.clear_events();
        self.statistics.num_failures += 1;

        if let Some(propagator_id) = propagator {
            let mut failure_counts = self
                .failure_counts
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let index = propagator_id.0 as usize;
            if failure_counts.len() <= index {
                failure_counts.resize(index + 1, 0);
            }
            failure_counts[index] += 1;
        }
    }

    /// Inform the branchers of a solution.
    pub fn on_solution(&mut self, solution: &Solution) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_solution(solution));
    }

    /// Inform the branchers that the search restarts from this space.
    pub fn on_restart(&mut self) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_restart());
    }

    /// Whether restarting from this space could lead the branchers to different choices.
    pub fn is_restart_pointless(&mut self) -> bool {
        self.branchers
            .iter_mut()
            .fold(true, |pointless, brancher| {
                brancher.is_restart_pointless() && pointless
            })
    }
}

/// Operations for trail-based backtracking.
impl Space {
    /// The current checkpoint. The root of a space is checkpoint 0.
    pub fn get_checkpoint(&self) -> usize {
        self.assignments.get_checkpoint()
    }

    /// Create a checkpoint of the current space, that can be returned to with
    /// [`Space::restore_to`].
    ///
    /// The space has to be at a fixpoint, i.e. [`Space::propagate`] has to be called after the
    /// last change.
    ///
    /// # Example
    /// ```
    /// # use marrow_core::predicate;
    /// # use marrow_core::propagation::ReadDomains;
    /// # use marrow_core::Space;
    /// let mut space = Space::default();
    /// let variable = space.new_bounded_integer(1, 10).unwrap();
    ///
    /// assert_eq!(space.get_checkpoint(), 0);
    ///
    /// space.new_checkpoint();
    /// assert_eq!(space.get_checkpoint(), 1);
    ///
    /// space.post(predicate!(variable <= 5));
    /// assert_eq!(space.upper_bound(&variable), 5);
    ///
    /// space.restore_to(0);
    /// assert_eq!(space.get_checkpoint(), 0);
    /// assert_eq!(space.upper_bound(&variable), 10);
    /// ```
    pub fn new_checkpoint(&mut self) {
        marrow_assert_simple!(
            self.propagator_queue.is_empty() && !self.assignments.has_pending_events(),
            "Can only create a new checkpoint when all propagation has occurred"
        );
        self.assignments.new_checkpoint();
        self.trailed_values.new_checkpoint();
        self.watch_list.new_checkpoint();
        self.propagators.new_checkpoint();
    }

    /// Undo every change made since `checkpoint + 1` was created, including propagators that
    /// were added or subsumed since then.
    ///
    /// If the space failed after that moment, it is no longer failed afterwards. Restoring the
    /// current checkpoint is a no-op.
    pub fn restore_to(&mut self, checkpoint: usize) {
        marrow_assert_simple!(checkpoint <= self.get_checkpoint());
        if checkpoint == self.get_checkpoint() {
            return;
        }

        self.assignments.synchronise(checkpoint);
        self.trailed_values.synchronise(checkpoint);
        self.watch_list.synchronise(checkpoint);
        self.propagators.synchronise(checkpoint);
        self.propagator_queue.clear();
        self.choice = None;

        if self
            .failed_at
            .is_some_and(|failed_at| checkpoint < failed_at)
        {
            self.failed_at = None;
        }

        for propagator in self.propagators.iter_active_mut() {
            let domains = Domains::new(&self.assignments, &mut self.trailed_values);
            propagator.synchronise(domains);
        }
    }
}

impl HasAssignments for Space {
    fn assignments(&self) -> &Assignments {
        &self.assignments
    }
}
