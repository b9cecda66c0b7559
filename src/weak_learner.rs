//! The files in `weak_learner/` directory defines
//! `WeakLearner` trait and the trees.

/// Provides WeakLearner trait.
pub mod core;

pub(crate) mod common;

/// Defines the entropy decision tree.
pub mod decision_tree;


/// Defines the regression tree of the boosting.
pub mod regression_tree;


pub use self::core::WeakLearner;

pub use self::common::{
    node::{Node, BranchNode, LeafNode},
    split_rule::{Splitter, LR},
    train_node::{PseudoResponse, SplitInfo},
};

pub use self::decision_tree::{
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
};


pub use self::regression_tree::{
    LossType,
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};
