//! Defines the entropy decision tree.

mod criterion;
mod builder;
mod decision_tree_algorithm;
mod decision_tree_classifier;


pub use builder::DecisionTreeBuilder;
pub use decision_tree_algorithm::DecisionTree;
pub use decision_tree_classifier::DecisionTreeClassifier;
