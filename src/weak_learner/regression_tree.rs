//! Defines the regression tree fitted in every boosting round.

pub(crate) mod loss;
mod builder;
mod regression_tree_algorithm;
mod regression_tree_regressor;


pub use loss::LossType;
pub use builder::RegressionTreeBuilder;
pub use regression_tree_algorithm::RegressionTree;
pub use regression_tree_regressor::RegressionTreeRegressor;
