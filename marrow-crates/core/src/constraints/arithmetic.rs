use super::Constraint;
use crate::basic_types::limits;
use crate::propagation::ReadDomains;
use crate::propagators::arithmetic::BinaryNotEqualsPropagatorArgs;
use crate::propagators::arithmetic::LinearLessOrEqualPropagatorArgs;
use crate::propagators::arithmetic::LinearNotEqualPropagatorArgs;
use crate::variables::IntegerVariable;
use crate::variables::view_array;
use crate::ConstraintOperationError;
use crate::Space;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    LessEqual,
    Equal,
    NotEqual,
}

impl Relation {
    fn location(self) -> &'static str {
        match self {
            Relation::LessEqual => "linear_less_equal",
            Relation::Equal => "linear_equals",
            Relation::NotEqual => "linear_not_equals",
        }
    }
}

struct LinearConstraint<Var> {
    weights: Box<[i32]>,
    vars: Box<[Var]>,
    rhs: i32,
    relation: Relation,
}

/// Creates the [`Constraint`] `\sum weights_i * vars_i <= rhs`.
///
/// Posting fails with [`ConstraintOperationError::SizeMismatch`] when `weights` and `vars` differ
/// in length, and with [`ConstraintOperationError::Overflow`] when the bounds of the sum do not
/// lie within [`limits::MIN`] and [`limits::MAX`].
pub fn linear_less_equal<Var: IntegerVariable>(
    weights: impl Into<Box<[i32]>>,
    vars: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    LinearConstraint {
        weights: weights.into(),
        vars: vars.into(),
        rhs,
        relation: Relation::LessEqual,
    }
}

/// Creates the [`Constraint`] `\sum weights_i * vars_i = rhs`.
///
/// The arguments are checked as in [`linear_less_equal`].
pub fn linear_equals<Var: IntegerVariable>(
    weights: impl Into<Box<[i32]>>,
    vars: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    LinearConstraint {
        weights: weights.into(),
        vars: vars.into(),
        rhs,
        relation: Relation::Equal,
    }
}

/// Creates the [`Constraint`] `\sum weights_i * vars_i != rhs`.
///
/// The arguments are checked as in [`linear_less_equal`].
pub fn linear_not_equals<Var: IntegerVariable>(
    weights: impl Into<Box<[i32]>>,
    vars: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    LinearConstraint {
        weights: weights.into(),
        vars: vars.into(),
        rhs,
        relation: Relation::NotEqual,
    }
}

/// Creates the [`Constraint`] `lhs <= rhs`.
pub fn less_than_or_equals<Var: IntegerVariable>(lhs: Var, rhs: Var) -> impl Constraint {
    linear_less_equal(vec![1, -1], vec![lhs, rhs], 0)
}

/// Creates the [`Constraint`] `lhs < rhs`.
pub fn less_than<Var: IntegerVariable>(lhs: Var, rhs: Var) -> impl Constraint {
    linear_less_equal(vec![1, -1], vec![lhs, rhs], -1)
}

/// Creates the [`Constraint`] `lhs = rhs`.
pub fn equals<Var: IntegerVariable>(lhs: Var, rhs: Var) -> impl Constraint {
    linear_equals(vec![1, -1], vec![lhs, rhs], 0)
}

/// Creates the [`Constraint`] `lhs != rhs`.
///
/// Posting fails with [`ConstraintOperationError::Overflow`] when the bounds of `lhs` or `rhs` do
/// not lie within [`limits::MIN`] and [`limits::MAX`].
pub fn binary_not_equals<AVar: IntegerVariable, BVar: IntegerVariable>(
    lhs: AVar,
    rhs: BVar,
) -> impl Constraint {
    BinaryNotEquals { lhs, rhs }
}

struct BinaryNotEquals<AVar, BVar> {
    lhs: AVar,
    rhs: BVar,
}

impl<AVar: IntegerVariable, BVar: IntegerVariable> Constraint for BinaryNotEquals<AVar, BVar> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        const LOCATION: &str = "binary_not_equals";
        view_array::check_limits(std::slice::from_ref(&self.lhs), &*space, LOCATION)?;
        view_array::check_limits(std::slice::from_ref(&self.rhs), &*space, LOCATION)?;

        BinaryNotEqualsPropagatorArgs {
            a: self.lhs,
            b: self.rhs,
        }
        .post(space)
    }
}

impl<Var: IntegerVariable> LinearConstraint<Var> {
    /// Check the arguments and drop the terms with weight zero.
    fn checked_terms(
        &self,
        space: &Space,
    ) -> Result<Vec<(i32, Var)>, ConstraintOperationError> {
        let location = self.relation.location();

        if self.weights.len() != self.vars.len() {
            return Err(ConstraintOperationError::SizeMismatch {
                location,
                expected: self.vars.len(),
                actual: self.weights.len(),
            });
        }
        limits::check(self.rhs as i64, location)?;

        let mut lower_bound_sum = 0_i64;
        let mut upper_bound_sum = 0_i64;
        let mut terms = vec![];

        for (&weight, var) in self.weights.iter().zip(self.vars.iter()) {
            if weight == 0 {
                continue;
            }
            limits::check(weight as i64, location)?;

            let at_lower_bound = weight as i64 * space.lower_bound(var) as i64;
            let at_upper_bound = weight as i64 * space.upper_bound(var) as i64;
            if !limits::is_valid(at_lower_bound) || !limits::is_valid(at_upper_bound) {
                return Err(ConstraintOperationError::Overflow { location });
            }

            lower_bound_sum += at_lower_bound.min(at_upper_bound);
            upper_bound_sum += at_lower_bound.max(at_upper_bound);
            terms.push((weight, var.clone()));
        }

        if !limits::is_valid(lower_bound_sum) || !limits::is_valid(upper_bound_sum) {
            return Err(ConstraintOperationError::Overflow { location });
        }

        Ok(terms)
    }
}

impl<Var: IntegerVariable> Constraint for LinearConstraint<Var> {
    fn post(self, space: &mut Space) -> Result<(), ConstraintOperationError> {
        let terms = self.checked_terms(space)?;
        let views = |sign: i32| {
            terms
                .iter()
                .map(|(weight, var)| var.scaled(sign * weight))
                .collect::<Box<[_]>>()
        };

        match self.relation {
            Relation::LessEqual => LinearLessOrEqualPropagatorArgs {
                x: views(1),
                c: self.rhs,
            }
            .post(space),
            Relation::Equal => {
                LinearLessOrEqualPropagatorArgs {
                    x: views(1),
                    c: self.rhs,
                }
                .post(space)?;
                LinearLessOrEqualPropagatorArgs {
                    x: views(-1),
                    c: -self.rhs,
                }
                .post(space)
            }
            Relation::NotEqual => LinearNotEqualPropagatorArgs {
                terms: views(1),
                rhs: self.rhs,
            }
            .post(space),
        }
    }
}
