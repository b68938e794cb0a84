//! Assertion macros with a compile-time level, so that expensive internal checks can be enabled
//! while developing without slowing down release builds.

pub(crate) const MARROW_ASSERT_LEVEL_DEFINITION: u8 = if cfg!(feature = "debug-checks") {
    MARROW_ASSERT_EXTREME
} else {
    MARROW_ASSERT_SIMPLE
};

pub(crate) const MARROW_ASSERT_SIMPLE: u8 = 1;
pub(crate) const MARROW_ASSERT_MODERATE: u8 = 2;
pub(crate) const MARROW_ASSERT_ADVANCED: u8 = 3;
pub(crate) const MARROW_ASSERT_EXTREME: u8 = 4;

macro_rules! marrow_assert_simple {
    ($($arg:tt)*) => {
        if $crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::marrow_asserts::MARROW_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

macro_rules! marrow_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::marrow_asserts::MARROW_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

macro_rules! marrow_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::marrow_asserts::MARROW_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

macro_rules! marrow_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::marrow_asserts::MARROW_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

macro_rules! marrow_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::marrow_asserts::MARROW_ASSERT_LEVEL_DEFINITION >= $crate::marrow_asserts::MARROW_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}

pub(crate) use marrow_assert_advanced;
pub(crate) use marrow_assert_eq_simple;
pub(crate) use marrow_assert_extreme;
pub(crate) use marrow_assert_moderate;
pub(crate) use marrow_assert_simple;
