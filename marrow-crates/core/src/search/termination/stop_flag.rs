use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the shared flag is raised, e.g. from a signal
/// handler or from another thread.
///
/// Clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct StopFlag {
    raised: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> StopFlag {
        StopFlag::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::Relaxed);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
    }

    /// The underlying flag, for registering it with a signal handler.
    pub fn as_atomic(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.raised)
    }
}

impl TerminationCondition for StopFlag {
    fn should_stop(&mut self) -> bool {
        self.is_raised()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let mut flag = StopFlag::new();
        let other = flag.clone();
        assert!(!flag.should_stop());

        other.raise();
        assert!(flag.should_stop());
    }

    #[test]
    fn raising_through_the_atomic_is_observed() {
        let mut flag = StopFlag::new();
        flag.as_atomic().store(true, Ordering::Relaxed);
        assert!(flag.should_stop());
    }
}
