use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;

use log::debug;
use log::warn;

use super::is_solution_limit_reached;
use super::log_outcome;
use super::propagate_node;
use super::termination::Indefinite;
use super::termination::StopFlag;
use super::termination::TerminationCondition;
use super::Backtracking;
use super::Dfs;
use super::Outcome;
use super::SearchEngine;
use super::SearchOptions;
use super::SearchStatistics;
use super::WorkerPool;
use crate::basic_types::Solution;
use crate::Space;
use crate::SpaceStatus;

/// How often the calling thread polls the termination condition while the workers search.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A depth-first search which shares the open nodes between the workers of a [`WorkerPool`].
///
/// Every worker takes an open node from the shared frontier and dives into it, exploring the first
/// alternative of every choice itself and adding the other alternatives to the frontier. The
/// calling thread polls the termination condition and stops the workers when it triggers, so
/// limits on nodes and failures are enforced with a small delay. The order in which solutions are
/// found is not deterministic.
///
/// A pool without workers makes this a sequential [`Dfs`].
#[derive(Debug)]
pub struct ParallelDfs<'pool> {
    pool: &'pool WorkerPool,
    backtracking: Backtracking,
    solution_limit: Option<usize>,
}

impl<'pool> ParallelDfs<'pool> {
    pub fn new(pool: &'pool WorkerPool, options: &SearchOptions) -> Self {
        ParallelDfs {
            pool,
            backtracking: options.backtracking,
            solution_limit: options.solution_limit,
        }
    }
}

/// The state shared by the workers of one search.
#[derive(Debug)]
struct SharedSearch {
    frontier: Mutex<Frontier>,
    /// Signalled whenever the frontier changes, or a worker becomes idle or finishes.
    changed: Condvar,
    stop: StopFlag,
    solution_limit: Option<usize>,
    solutions: Mutex<Vec<Solution>>,
    statistics: Mutex<SearchStatistics>,
    nodes: AtomicU64,
    failures: AtomicU64,
}

#[derive(Debug, Default)]
struct Frontier {
    open: Vec<(Space, u64)>,
    /// The number of workers exploring a node taken from the frontier.
    busy: usize,
    /// The number of workers which have not finished.
    running: usize,
}

impl SharedSearch {
    fn new(root: Space, solution_limit: Option<usize>) -> SharedSearch {
        SharedSearch {
            frontier: Mutex::new(Frontier {
                open: vec![(root, 0)],
                busy: 0,
                running: 0,
            }),
            changed: Condvar::new(),
            stop: StopFlag::new(),
            solution_limit,
            solutions: Mutex::default(),
            statistics: Mutex::default(),
            nodes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    fn lock_frontier(&self) -> MutexGuard<'_, Frontier> {
        self.frontier.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The body of a worker.
    fn work(&self) {
        let mut statistics = SearchStatistics::default();

        while let Some((space, depth)) = self.take_node() {
            self.dive(space, depth, &mut statistics);

            self.lock_frontier().busy -= 1;
            self.changed.notify_all();
        }

        self.statistics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .absorb(statistics);
        self.lock_frontier().running -= 1;
        self.changed.notify_all();
    }

    /// Wait for an open node. Returns [`None`] when the search is stopped, or when the frontier is
    /// empty and no worker can add to it anymore.
    fn take_node(&self) -> Option<(Space, u64)> {
        let mut frontier = self.lock_frontier();
        loop {
            if self.stop.is_raised() {
                return None;
            }
            if let Some(node) = frontier.open.pop() {
                frontier.busy += 1;
                return Some(node);
            }
            if frontier.busy == 0 {
                return None;
            }
            frontier = self
                .changed
                .wait(frontier)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Explore the first alternatives below the given node, until a failed or solved node.
    fn dive(&self, space: Space, depth: u64, statistics: &mut SearchStatistics) {
        let mut current = Some((space, depth));

        while let Some((mut space, depth)) = current.take() {
            if self.stop.is_raised() {
                self.give_back(vec![(space, depth)]);
                return;
            }

            let status = propagate_node(&mut space, depth, statistics, &mut Indefinite);
            let _ = self.nodes.fetch_add(1, Ordering::Relaxed);

            match status {
                SpaceStatus::Failed => {
                    let _ = self.failures.fetch_add(1, Ordering::Relaxed);
                }
                SpaceStatus::Solved => self.record_solution(space, depth, statistics),
                SpaceStatus::Branch => {
                    let Some(choice) = space.choice().cloned() else {
                        continue;
                    };
                    let last = choice.num_alternatives() - 1;

                    let mut children = (0..last)
                        .map(|alternative| {
                            let mut child = space.clone();
                            child.commit(&choice, alternative);
                            (child, depth + 1)
                        })
                        .collect::<Vec<_>>();
                    space.commit(&choice, last);
                    children.push((space, depth + 1));

                    let mut children = children.into_iter();
                    current = children.next();
                    self.give_back(children.rev().collect());
                }
            }
        }
    }

    /// Add nodes to the frontier; the last one is taken first.
    fn give_back(&self, nodes: Vec<(Space, u64)>) {
        if nodes.is_empty() {
            return;
        }

        self.lock_frontier().open.extend(nodes);
        self.changed.notify_all();
    }

    fn record_solution(&self, space: Space, depth: u64, statistics: &mut SearchStatistics) {
        let mut solutions = self.solutions.lock().unwrap_or_else(PoisonError::into_inner);

        if is_solution_limit_reached(self.solution_limit, solutions.len()) {
            // Another worker reached the limit first; the node stays open.
            statistics.solutions -= 1;
            drop(solutions);
            self.give_back(vec![(space, depth)]);
            return;
        }

        solutions.push(space.solution());
        if is_solution_limit_reached(self.solution_limit, solutions.len()) {
            self.stop.raise();
            self.changed.notify_all();
        }
    }
}

impl SearchEngine for ParallelDfs<'_> {
    fn search(&mut self, root: Space, termination: &mut impl TerminationCondition) -> Outcome {
        if self.pool.num_workers() == 0 {
            warn!("No worker threads available, searching on the calling thread");
            let dfs = Dfs::with_backtracking(self.backtracking);
            let dfs = match self.solution_limit {
                Some(limit) => dfs.with_solution_limit(limit),
                None => dfs,
            };

            let outcome = dfs.explore(root, termination);
            log_outcome("dfs", &outcome);
            return outcome;
        }

        let shared = Arc::new(SharedSearch::new(root, self.solution_limit));
        for _ in 0..self.pool.num_workers() {
            shared.lock_frontier().running += 1;

            let worker_shared = Arc::clone(&shared);
            if !self.pool.execute(move || worker_shared.work()) {
                shared.lock_frontier().running -= 1;
            }
        }
        debug!(
            "Started parallel depth-first search with {} workers",
            self.pool.num_workers()
        );

        let mut reported_nodes = 0;
        let mut reported_failures = 0;
        let mut frontier = shared.lock_frontier();
        while frontier.running > 0 {
            let nodes = shared.nodes.load(Ordering::Relaxed);
            let failures = shared.failures.load(Ordering::Relaxed);
            (reported_nodes..nodes).for_each(|_| termination.node_expanded());
            (reported_failures..failures).for_each(|_| termination.failure_occurred());
            reported_nodes = nodes;
            reported_failures = failures;

            if !shared.stop.is_raised() && termination.should_stop() {
                debug!("Stopping the workers");
                shared.stop.raise();
                shared.changed.notify_all();
            }

            frontier = match shared.changed.wait_timeout(frontier, POLL_INTERVAL) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        let incomplete = !frontier.open.is_empty();
        drop(frontier);

        let outcome = Outcome {
            solutions: std::mem::take(
                &mut *shared
                    .solutions
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            ),
            incomplete,
            statistics: *shared
                .statistics
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        };
        log_outcome("parallel", &outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_models::distinct_values_of;
    use crate::search::test_models::queens;
    use crate::search::test_models::sum_of_distinct;

    #[test]
    fn finds_the_same_solutions_as_sequential_search() {
        let pool = WorkerPool::new(4);
        let (space, queens) = queens(6);
        let sequential = Dfs::default().search(space.clone(), &mut Indefinite);

        let outcome =
            ParallelDfs::new(&pool, &SearchOptions::default()).search(space, &mut Indefinite);

        assert!(!outcome.incomplete);
        assert_eq!(
            distinct_values_of(&outcome.solutions, &queens),
            distinct_values_of(&sequential.solutions, &queens)
        );
        assert_eq!(outcome.solutions.len(), 4);
        assert_eq!(outcome.statistics.nodes, sequential.statistics.nodes);
        assert_eq!(outcome.statistics.failures, sequential.statistics.failures);
    }

    #[test]
    fn pool_can_be_reused() {
        let pool = WorkerPool::new(2);

        for _ in 0..3 {
            let (space, variables) = sum_of_distinct();
            let outcome =
                ParallelDfs::new(&pool, &SearchOptions::default()).search(space, &mut Indefinite);
            assert_eq!(distinct_values_of(&outcome.solutions, &variables).len(), 4);
        }
    }

    #[test]
    fn pool_without_workers_searches_sequentially() {
        let pool = WorkerPool::new(0);
        let (space, variables) = sum_of_distinct();

        let outcome =
            ParallelDfs::new(&pool, &SearchOptions::default()).search(space, &mut Indefinite);

        assert!(!outcome.incomplete);
        assert_eq!(distinct_values_of(&outcome.solutions, &variables).len(), 4);
    }

    #[test]
    fn raised_stop_flag_leaves_the_search_incomplete() {
        let pool = WorkerPool::new(2);
        let (space, _) = queens(6);
        let mut stop = StopFlag::new();
        stop.raise();

        let outcome = ParallelDfs::new(&pool, &SearchOptions::default()).search(space, &mut stop);

        assert!(outcome.incomplete);
        assert!(outcome.solutions.is_empty());
    }

    #[test]
    fn solution_limit_is_not_exceeded() {
        let pool = WorkerPool::new(4);
        let (space, _) = queens(6);
        let options = SearchOptions {
            solution_limit: Some(1),
            ..Default::default()
        };

        let outcome = ParallelDfs::new(&pool, &options).search(space, &mut Indefinite);

        assert_eq!(outcome.solutions.len(), 1);
        assert_eq!(outcome.statistics.solutions, 1);
    }
}
