/// Trait for transforming a variable.
///
/// Instead of introducing a fresh variable and a linking constraint, a transformed view reads and
/// narrows the domain of the original variable through the transformation.
pub trait TransformableVariable<View> {
    /// Get a variable which domain is scaled compared to the domain of self.
    ///
    /// The scaled domain will have holes in it. E.g. if we have `dom(x) = {1, 2}`, then
    /// `dom(x.scaled(2)) = {2, 4}` and *not* `dom(x.scaled(2)) = {1, 2, 3, 4}`.
    fn scaled(&self, scale: i32) -> View;

    /// Get a variable which domain has a constant offset to the domain of self.
    fn offset(&self, offset: i32) -> View;
}
