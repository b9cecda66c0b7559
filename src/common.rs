//! Defines some common functions used in this library.

/// Defines some numeric helpers such as the weighted median.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;


pub use utils::{EPS, weighted_median};
