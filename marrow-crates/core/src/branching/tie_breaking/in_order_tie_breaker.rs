use super::Direction;
use super::TieBreaker;

/// A tie breaker which selects the first variable with the best value (according to the
/// [`Direction`]) in the order in which the variables were considered.
#[derive(Debug, Clone)]
pub struct InOrderTieBreaker<Var, Value> {
    selected: Option<(Var, Value)>,
    direction: Direction,
}

impl<Var, Value> InOrderTieBreaker<Var, Value> {
    pub fn new(direction: Direction) -> Self {
        Self {
            selected: None,
            direction,
        }
    }
}

impl<Var, Value> TieBreaker<Var, Value> for InOrderTieBreaker<Var, Value>
where
    Var: Copy + Send,
    Value: PartialOrd + Clone + Send,
{
    fn consider(&mut self, variable: Var, value: Value) {
        let improves = self
            .selected
            .as_ref()
            .map_or(true, |(_, selected_value)| self.direction.improves(&value, selected_value));
        if improves {
            self.selected = Some((variable, value));
        }
    }

    fn select(&mut self) -> Option<Var> {
        self.selected.take().map(|(variable, _)| variable)
    }

    fn get_direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::InOrderTieBreaker;
    use crate::branching::tie_breaking::Direction;
    use crate::branching::tie_breaking::TieBreaker;
    use crate::variables::DomainId;

    #[test]
    fn test_selection_first_value() {
        let mut breaker = InOrderTieBreaker::new(Direction::Minimum);

        breaker.consider(DomainId::new(0), 10);
        breaker.consider(DomainId::new(1), 10);
        breaker.consider(DomainId::new(2), 10);

        assert_eq!(breaker.select(), Some(DomainId::new(0)));
    }

    #[test]
    fn test_selection_picks_lowest_value() {
        let mut breaker = InOrderTieBreaker::new(Direction::Minimum);

        breaker.consider(DomainId::new(0), 10);
        breaker.consider(DomainId::new(1), 5);
        breaker.consider(DomainId::new(2), 10);

        assert_eq!(breaker.select(), Some(DomainId::new(1)));
    }

    #[test]
    fn test_selection_picks_highest_value() {
        let mut breaker = InOrderTieBreaker::new(Direction::Maximum);

        breaker.consider(DomainId::new(0), 10);
        breaker.consider(DomainId::new(1), 5);
        breaker.consider(DomainId::new(2), 12);

        assert_eq!(breaker.select(), Some(DomainId::new(2)));
    }

    #[test]
    fn select_resets_the_tie_breaker() {
        let mut breaker = InOrderTieBreaker::new(Direction::Minimum);
        breaker.consider(DomainId::new(0), 1);

        assert!(breaker.select().is_some());
        assert!(breaker.select().is_none());
    }
}
