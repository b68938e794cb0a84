use std::fmt::Debug;
use std::ops::Range;

use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;
use rand::Rng;
use rand::SeedableRng;

use crate::marrow_asserts::marrow_assert_moderate;

/// Abstraction for randomness, in order to swap out different sources of randomness.
///
/// This is especially useful when testing heuristics, since tests can fix the values which are
/// "randomly" generated (see the `TestRandom` implementation in the tests of this module).
pub trait Random: Debug + DynClone + Send {
    /// Generates a bool which is true with probability `probability`. It should hold that
    /// `probability ∈ [0, 1]`.
    fn generate_bool(&mut self, probability: f64) -> bool;

    /// Generates a random usize in `[range.start, range.end)` with equal probability.
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;

    /// Generates a random i32 in `[lb, ub]` with equal probability.
    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32;
}

// A random generator is cloned together with the brancher or space holding it.
clone_trait_object!(Random);

// Any regular seedable random generator can be used wherever an implementation of [`Random`] is
// expected.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug + Clone + Send,
{
    fn generate_bool(&mut self, probability: f64) -> bool {
        marrow_assert_moderate!(
            (0.0..=1.0).contains(&probability),
            "It should hold that 0.0 <= {probability} <= 1.0"
        );

        self.gen_bool(probability)
    }

    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }

    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32 {
        self.gen_range(lb..=ub)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fmt::Debug;
    use std::ops::Range;

    use super::Random;
    use crate::marrow_asserts::marrow_assert_simple;

    /// A test "random" generator which takes as input a list of [`usize`]s, [`i32`]s and
    /// [`bool`]s and returns them in order. Generating more values than provided panics.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct TestRandom {
        pub(crate) usizes: Vec<usize>,
        pub(crate) integers: Vec<i32>,
        pub(crate) bools: Vec<bool>,
    }

    impl Random for TestRandom {
        fn generate_bool(&mut self, _probability: f64) -> bool {
            self.bools.remove(0)
        }

        fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32 {
            let selected = self.integers.remove(0);
            let range = lb..=ub;
            marrow_assert_simple!(
                range.contains(&selected),
                "The selected element by `TestRandom` ({selected}) is not in the provided range ({range:?}), please ensure that your test cases are correctly defined"
            );
            selected
        }

        fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
            let selected = self.usizes.remove(0);
            marrow_assert_simple!(
                range.contains(&selected),
                "The selected element by `TestRandom` ({selected}) is not in the provided range ({range:?}), please ensure that your test cases are correctly defined"
            );
            selected
        }
    }
}
