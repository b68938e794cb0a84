use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::branchers::IndependentVariableValueBrancher;
use super::tie_breaking::Direction;
use super::tie_breaking::RandomTieBreaker;
use super::value_selection::*;
use super::variable_selection::*;
use super::Brancher;
use crate::variables::DomainId;

/// The named variable selection heuristics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VariableSelectionStrategy {
    /// See [`InputOrder`].
    #[default]
    InputOrder,
    /// See [`FirstFail`].
    FirstFail,
    /// See [`AntiFirstFail`].
    AntiFirstFail,
    /// See [`Smallest`].
    Smallest,
    /// See [`Largest`].
    Largest,
    /// See [`MaxWeightedDegree`].
    MaxWeightedDegree,
}

/// The named value selection heuristics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ValueSelectionStrategy {
    /// See [`InDomainMin`].
    #[default]
    Min,
    /// See [`InDomainMax`].
    Max,
    /// See [`InDomainSplit`].
    Split,
    /// See [`InDomainReverseSplit`].
    ReverseSplit,
    /// See [`InDomainMedian`].
    Median,
    /// See [`InDomainRandom`].
    Random,
    /// See [`InDomainValues`].
    Values,
}

/// How ties between equally ranked variables are broken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TieBreaking {
    /// See [`super::tie_breaking::InOrderTieBreaker`].
    #[default]
    InOrder,
    /// See [`RandomTieBreaker`].
    Random,
}

/// A branching strategy assembled from named heuristics.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchingStrategy {
    pub variable_selection: VariableSelectionStrategy,
    pub value_selection: ValueSelectionStrategy,
    pub tie_breaking: TieBreaking,
    /// Prefer the value of a variable in the last solution, see [`InDomainLastValue`].
    pub last_value: bool,
    /// The seed of the random tie breaker.
    pub seed: u64,
}

impl BranchingStrategy {
    /// Create a brancher over `variables` following this strategy.
    pub fn create_brancher(&self, variables: &[DomainId]) -> Box<dyn Brancher> {
        Box::new(IndependentVariableValueBrancher::new(
            self.variable_selector(variables),
            self.value_selector(),
        ))
    }

    fn variable_selector(&self, variables: &[DomainId]) -> Box<dyn VariableSelector<DomainId>> {
        use VariableSelectionStrategy as Strategy;

        match self.tie_breaking {
            TieBreaking::InOrder => match self.variable_selection {
                Strategy::InputOrder => Box::new(InputOrder::new(variables)),
                Strategy::FirstFail => Box::new(FirstFail::new(variables)),
                Strategy::AntiFirstFail => Box::new(AntiFirstFail::new(variables)),
                Strategy::Smallest => Box::new(Smallest::new(variables)),
                Strategy::Largest => Box::new(Largest::new(variables)),
                Strategy::MaxWeightedDegree => Box::new(MaxWeightedDegree::new(variables)),
            },
            TieBreaking::Random => match self.variable_selection {
                Strategy::InputOrder => Box::new(InputOrder::new(variables)),
                Strategy::FirstFail => Box::new(FirstFail::with_tie_breaker(
                    variables,
                    self.random_tie_breaker(Direction::Minimum),
                )),
                Strategy::AntiFirstFail => Box::new(AntiFirstFail::with_tie_breaker(
                    variables,
                    self.random_tie_breaker(Direction::Maximum),
                )),
                Strategy::Smallest => Box::new(Smallest::with_tie_breaker(
                    variables,
                    self.random_tie_breaker(Direction::Minimum),
                )),
                Strategy::Largest => Box::new(Largest::with_tie_breaker(
                    variables,
                    self.random_tie_breaker(Direction::Maximum),
                )),
                Strategy::MaxWeightedDegree => Box::new(MaxWeightedDegree::with_tie_breaker(
                    variables,
                    self.random_tie_breaker(Direction::Maximum),
                )),
            },
        }
    }

    fn value_selector(&self) -> Box<dyn ValueSelector<DomainId>> {
        let selector: Box<dyn ValueSelector<DomainId>> = match self.value_selection {
            ValueSelectionStrategy::Min => Box::new(InDomainMin),
            ValueSelectionStrategy::Max => Box::new(InDomainMax),
            ValueSelectionStrategy::Split => Box::new(InDomainSplit),
            ValueSelectionStrategy::ReverseSplit => Box::new(InDomainReverseSplit),
            ValueSelectionStrategy::Median => Box::new(InDomainMedian),
            ValueSelectionStrategy::Random => Box::new(InDomainRandom),
            ValueSelectionStrategy::Values => Box::new(InDomainValues),
        };

        if self.last_value {
            Box::new(InDomainLastValue::new(selector))
        } else {
            selector
        }
    }

    fn random_tie_breaker<Value>(&self, direction: Direction) -> RandomTieBreaker<DomainId, Value> {
        RandomTieBreaker::new(direction, Box::new(SmallRng::seed_from_u64(self.seed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::branching::Choice;
    use crate::branching::SelectionContext;
    use crate::predicate;
    use crate::propagation::HasAssignments;
    use crate::Space;

    #[test]
    fn strategy_combines_the_named_heuristics() {
        let mut space = Space::default();
        let x = space.new_bounded_integer(0, 10).unwrap();
        let y = space.new_bounded_integer(0, 3).unwrap();
        let strategy = BranchingStrategy {
            variable_selection: VariableSelectionStrategy::FirstFail,
            value_selection: ValueSelectionStrategy::Split,
            ..Default::default()
        };
        let mut brancher = strategy.create_brancher(&[x, y]);
        let mut test_rng = TestRandom::default();
        let mut context = SelectionContext::new(space.assignments(), &mut test_rng);

        assert_eq!(
            brancher.next_choice(&mut context),
            Some(Choice::binary(predicate!(y <= 1)))
        );
    }
}
