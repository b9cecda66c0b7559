//! Provides the boosting protocol and the gradient boosting driver.

mod core;
mod gradient_boost;


/// Booster trait
pub use self::core::Booster;

pub use self::gradient_boost::{GBDT, train, train_ranking};
