use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers when one of two given [`TerminationCondition`]s
/// triggers.
#[derive(Clone, Copy, Debug)]
pub struct Combinator<T1, T2> {
    t1: T1,
    t2: T2,
}

impl<T1, T2> Combinator<T1, T2> {
    /// Combine two [`TerminationCondition`]s into one.
    pub fn new(t1: T1, t2: T2) -> Self {
        Combinator { t1, t2 }
    }
}

impl<T1: TerminationCondition, T2: TerminationCondition> TerminationCondition
    for Combinator<T1, T2>
{
    fn should_stop(&mut self) -> bool {
        self.t1.should_stop() || self.t2.should_stop()
    }

    fn node_expanded(&mut self) {
        self.t1.node_expanded();
        self.t2.node_expanded();
    }

    fn failure_occurred(&mut self) {
        self.t1.failure_occurred();
        self.t2.failure_occurred();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::termination::FailBudget;
    use crate::search::termination::NodeBudget;

    #[test]
    fn triggers_when_either_condition_triggers() {
        let mut termination = Combinator::new(NodeBudget::new(2), FailBudget::new(1));
        assert!(!termination.should_stop());

        termination.node_expanded();
        assert!(!termination.should_stop());

        termination.failure_occurred();
        assert!(termination.should_stop());
    }
}
