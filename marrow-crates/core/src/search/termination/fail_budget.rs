use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the given number of failed nodes has been
/// encountered.
#[derive(Debug, Copy, Clone)]
pub struct FailBudget {
    budget: u64,
    num_failures: u64,
}

impl FailBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_failures: 0,
        }
    }
}

impl TerminationCondition for FailBudget {
    fn should_stop(&mut self) -> bool {
        self.num_failures >= self.budget
    }

    fn failure_occurred(&mut self) {
        self.num_failures += 1;
    }
}
