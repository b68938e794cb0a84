//! Provides the [`ValueSelector`] trait which is required for value selectors to implement; the
//! main method in this trait is the [`ValueSelector::select_value`] method which returns the
//! [`crate::branching::Choice`] to branch on.
//!
//! All selectors except [`InDomainValues`] create binary choices.
mod in_domain_last_value;
mod in_domain_max;
mod in_domain_median;
mod in_domain_min;
mod in_domain_random;
mod in_domain_reverse_split;
mod in_domain_split;
mod in_domain_values;
mod value_selector;

pub use in_domain_last_value::*;
pub use in_domain_max::*;
pub use in_domain_median::*;
pub use in_domain_min::*;
pub use in_domain_random::*;
pub use in_domain_reverse_split::*;
pub use in_domain_split::*;
pub use in_domain_values::*;
pub use value_selector::ValueSelector;
