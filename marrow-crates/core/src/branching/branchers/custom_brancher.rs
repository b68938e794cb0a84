use std::fmt::Debug;

use crate::branching::Brancher;
use crate::branching::Choice;
use crate::branching::SelectionContext;

/// A [`Brancher`] defined by a closure which inspects the [`SelectionContext`] and returns the
/// next [`Choice`], or [`None`] when there is nothing left to branch on.
///
/// # Example
/// ```rust
/// # use marrow_core::branching::branchers::CustomBrancher;
/// # use marrow_core::branching::Choice;
/// # use marrow_core::predicate;
/// # use marrow_core::Space;
/// let mut space = Space::default();
/// let x = space.new_bounded_integer(0, 10).unwrap();
///
/// // Try the even values of `x` before the odd ones.
/// space.add_brancher(CustomBrancher::new(move |context| {
///     if context.is_integer_fixed(&x) {
///         return None;
///     }
///     let even = context.values(&x).into_iter().find(|value| value % 2 == 0);
///     let value = even.unwrap_or(context.lower_bound(&x));
///     Some(Choice::binary(predicate!(x == value)))
/// }));
/// ```
#[derive(Clone)]
pub struct CustomBrancher<Select> {
    select: Select,
}

impl<Select> Debug for CustomBrancher<Select> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomBrancher").finish()
    }
}

impl<Select> CustomBrancher<Select>
where
    Select: FnMut(&mut SelectionContext) -> Option<Choice> + Clone + Send + 'static,
{
    pub fn new(select: Select) -> Self {
        CustomBrancher { select }
    }
}

impl<Select> Brancher for CustomBrancher<Select>
where
    Select: FnMut(&mut SelectionContext) -> Option<Choice> + Clone + Send + 'static,
{
    fn next_choice(&mut self, context: &mut SelectionContext) -> Option<Choice> {
        (self.select)(context)
    }
}
