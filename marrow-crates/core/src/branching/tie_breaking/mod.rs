//! Tie breakers decide between variables which a variable selector considers equally good.
mod in_order_tie_breaker;
mod random_tie_breaker;

pub use in_order_tie_breaker::InOrderTieBreaker;
pub use random_tie_breaker::RandomTieBreaker;

/// Whether a tie breaker looks for the variable with the largest or the smallest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximum,
    Minimum,
}

impl Direction {
    /// Whether `value` is strictly better than `selected` in this direction.
    pub(crate) fn improves<Value: PartialOrd>(self, value: &Value, selected: &Value) -> bool {
        match self {
            Direction::Maximum => value > selected,
            Direction::Minimum => value < selected,
        }
    }
}

/// A tie breaker is fed every candidate variable together with its value for the selection
/// criterion, and then selects one of the best candidates.
///
/// After [`TieBreaker::select`] the tie breaker is reset and can be used for the next selection.
pub trait TieBreaker<Var, Value>: Clone + Send {
    /// Consider `variable` with the given `value`.
    fn consider(&mut self, variable: Var, value: Value);

    /// Select one of the best variables considered since the last selection, and reset.
    fn select(&mut self) -> Option<Var>;

    fn get_direction(&self) -> Direction;
}
