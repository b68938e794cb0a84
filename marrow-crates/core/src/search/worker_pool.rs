use std::fmt::Debug;
use std::thread;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use log::debug;
use log::warn;

use super::SearchError;

type Job = Box<dyn FnOnce() + Send>;

/// A fixed set of worker threads which run the jobs handed to them.
///
/// Jobs are sent to the workers over a channel. The pool is owned by the caller, and can be used
/// for several searches. It is shut down explicitly with [`WorkerPool::shutdown`] or when it is
/// dropped; both wait for the queued jobs to finish.
pub struct WorkerPool {
    /// Dropped on shutdown, which ends the workers once the channel is empty.
    jobs: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_workers", &self.workers.len())
            .field("queued_jobs", &self.jobs.as_ref().map_or(0, Sender::len))
            .finish()
    }
}

impl WorkerPool {
    /// Start a pool with `num_threads` workers.
    ///
    /// When not every worker can be started, the pool continues with the ones that did start. When
    /// none of them can be started, the pool has no workers and the searches using it run on the
    /// calling thread.
    pub fn new(num_threads: usize) -> WorkerPool {
        match WorkerPool::start(num_threads) {
            Ok(pool) => pool,
            Err(error) => {
                warn!("{error}; searching on the calling thread");
                WorkerPool {
                    jobs: None,
                    workers: vec![],
                }
            }
        }
    }

    /// Start a pool with `num_threads` workers, failing when not a single worker can be started.
    pub fn start(num_threads: usize) -> Result<WorkerPool, SearchError> {
        let (sender, receiver) = crossbeam_channel::unbounded::<Job>();
        let mut workers = Vec::with_capacity(num_threads);
        let mut last_error = None;

        for index in 0..num_threads {
            let spawned = thread::Builder::new()
                .name(format!("marrow-worker-{index}"))
                .spawn({
                    let receiver = receiver.clone();
                    move || work(&receiver)
                });

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(error) => {
                    warn!("Failed to spawn worker {index}: {error}");
                    last_error = Some(error);
                }
            }
        }

        if workers.is_empty() {
            return Err(SearchError::ThreadSpawn {
                requested: num_threads,
                source: last_error.unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, "no threads requested")
                }),
            });
        }
        if workers.len() < num_threads {
            warn!(
                "Continuing with {} of {num_threads} worker threads",
                workers.len()
            );
        }

        debug!("Started {} worker threads", workers.len());
        Ok(WorkerPool {
            jobs: Some(sender),
            workers,
        })
    }

    /// The number of running workers.
    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Hand a job to the workers. Returns `false` when the pool has no workers or is shut down, in
    /// which case the job is dropped.
    pub(crate) fn execute(&self, job: impl FnOnce() + Send + 'static) -> bool {
        match &self.jobs {
            Some(sender) if !self.workers.is_empty() => sender.send(Box::new(job)).is_ok(),
            _ => false,
        }
    }

    /// Stop the workers once the queued jobs are done, and wait for them.
    pub fn shutdown(&mut self) {
        drop(self.jobs.take());

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                warn!("A worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Run jobs until the pool drops its sender and the channel is drained.
fn work(jobs: &Receiver<Job>) {
    while let Ok(job) = jobs.recv() {
        job();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::sync::mpsc;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn jobs_run_on_the_workers() {
        let pool = WorkerPool::new(3);
        assert_eq!(pool.num_workers(), 3);

        let (sender, receiver) = mpsc::channel();
        for i in 0..10 {
            let sender = sender.clone();
            assert!(pool.execute(move || sender.send(i).expect("receiver alive")));
        }

        let mut received = receiver.iter().take(10).collect::<Vec<_>>();
        received.sort();
        assert_eq!(received, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn shutdown_finishes_the_queued_jobs() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut pool = WorkerPool::new(2);
        for _ in 0..20 {
            let counter = Arc::clone(&counter);
            let _ = pool.execute(move || {
                let _ = counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        pool.shutdown();

        assert_eq!(counter.load(Ordering::SeqCst), 20);
        assert_eq!(pool.num_workers(), 0);
        assert!(!pool.execute(|| {}));
    }

    #[test]
    fn pool_without_threads() {
        assert!(matches!(
            WorkerPool::start(0),
            Err(SearchError::ThreadSpawn { requested: 0, .. })
        ));

        let pool = WorkerPool::new(0);
        assert_eq!(pool.num_workers(), 0);
        assert!(!pool.execute(|| {}));
    }

    #[test]
    fn shutdown_survives_a_panicking_job() {
        let mut pool = WorkerPool::new(1);

        assert!(pool.execute(|| panic!("the job fails")));
        pool.shutdown();

        assert_eq!(pool.num_workers(), 0);
        assert!(!pool.execute(|| {}));
    }
}
