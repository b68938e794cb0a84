use super::Direction;
use super::TieBreaker;
use crate::basic_types::Random;

/// A tie breaker which selects the variable with the "best" value (according to the
/// [`Direction`]); if there is a tie then it selects any of the variables of this tie with equal
/// probability.
///
/// The random selection proceeds as follows:
/// - If no variable has been considered yet then the considered variable is selected.
/// - If a variable with a strictly better value is considered, it replaces the selection and the
///   tie count is reset to one.
/// - If a variable with an equal value is considered, it replaces the selection with probability
///   `1 / n` where `n` is the number of variables considered with this value so far.
#[derive(Clone)]
pub struct RandomTieBreaker<Var, Value> {
    selected: Option<(Var, Value)>,
    rng: Box<dyn Random>,
    /// The number of variables with the currently selected value
    num_variables_considered: usize,
    direction: Direction,
}

impl<Var, Value> std::fmt::Debug for RandomTieBreaker<Var, Value> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomTieBreaker").finish()
    }
}

impl<Var, Value> RandomTieBreaker<Var, Value> {
    pub fn new(direction: Direction, rng: Box<dyn Random>) -> Self {
        Self {
            selected: None,
            rng,
            num_variables_considered: 0,
            direction,
        }
    }
}

impl<Var, Value> TieBreaker<Var, Value> for RandomTieBreaker<Var, Value>
where
    Var: Copy + Send,
    Value: PartialOrd + Clone + Send,
{
    fn consider(&mut self, variable: Var, value: Value) {
        let Some((_, selected_value)) = &self.selected else {
            self.num_variables_considered = 1;
            self.selected = Some((variable, value));
            return;
        };

        if self.direction.improves(&value, selected_value) {
            self.num_variables_considered = 1;
            self.selected = Some((variable, value));
        } else if value == *selected_value {
            self.num_variables_considered += 1;
            if self
                .rng
                .generate_bool(1.0 / self.num_variables_considered as f64)
            {
                self.selected = Some((variable, value));
            }
        }
    }

    fn select(&mut self) -> Option<Var> {
        self.num_variables_considered = 0;
        self.selected.take().map(|(variable, _)| variable)
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::RandomTieBreaker;
    use crate::basic_types::TestRandom;
    use crate::branching::tie_breaking::Direction;
    use crate::branching::tie_breaking::TieBreaker;

    #[test]
    fn test_selection_new_value() {
        let mut breaker: RandomTieBreaker<i32, i32> =
            RandomTieBreaker::new(Direction::Minimum, Box::new(TestRandom::default()));

        assert!(breaker.select().is_none());

        breaker.consider(0, 1);

        assert_eq!(breaker.select(), Some(0));
    }

    #[test]
    fn test_selection_between_values_chooses_maximum() {
        let mut breaker: RandomTieBreaker<i32, i32> =
            RandomTieBreaker::new(Direction::Maximum, Box::new(TestRandom::default()));

        breaker.consider(0, 5);
        breaker.consider(1, 10);

        assert_eq!(breaker.select(), Some(1));
    }

    #[test]
    fn test_selection_between_values_chooses_minimum() {
        let mut breaker: RandomTieBreaker<i32, i32> =
            RandomTieBreaker::new(Direction::Minimum, Box::new(TestRandom::default()));

        breaker.consider(0, 5);
        breaker.consider(1, 10);

        assert_eq!(breaker.select(), Some(0));
    }

    #[test]
    fn test_selection_between_equal_values_follows_the_generator() {
        let rng = TestRandom {
            bools: vec![true, false],
            ..Default::default()
        };
        let mut breaker: RandomTieBreaker<i32, i32> =
            RandomTieBreaker::new(Direction::Maximum, Box::new(rng));

        breaker.consider(0, 5);
        breaker.consider(1, 5);
        breaker.consider(2, 5);

        // The second replaces the first, the third does not replace the second.
        assert_eq!(breaker.select(), Some(1));
    }
}
