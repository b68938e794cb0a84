//! The range of values a variable may take.

use super::ConstraintOperationError;

/// The largest value a variable may take.
pub const MAX: i32 = i32::MAX - 1;
/// The smallest value a variable may take.
pub const MIN: i32 = -MAX;

/// Returns whether `value` lies in `MIN..=MAX`.
pub fn is_valid(value: i64) -> bool {
    (MIN as i64..=MAX as i64).contains(&value)
}

/// Check that `value` is within the supported range, reporting a domain-limit error otherwise.
pub fn check(value: i64, location: &'static str) -> Result<(), ConstraintOperationError> {
    if is_valid(value) {
        Ok(())
    } else {
        Err(ConstraintOperationError::ValueOutOfRange { location, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extreme_values_are_rejected() {
        assert!(check(i32::MAX as i64, "test").is_err());
        assert!(check(i32::MIN as i64, "test").is_err());
        assert!(check(MAX as i64, "test").is_ok());
        assert!(check(MIN as i64, "test").is_ok());
    }
}
