use crate::{DecisionTree, TreeParam};
use crate::error::{GbdtError, Result};
use crate::weak_learner::common::train_node::TreeLimits;
use crate::param::*;


/// A struct that builds `DecisionTree`.
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
///
/// # Example
///
/// ```no_run
/// use minigbdt::prelude::*;
///
/// let tree = DecisionTreeBuilder::new()
///     .max_level(3)
///     .min_values_in_leaf(1)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTreeBuilder {
    max_level: usize,
    max_leaf_number: usize,
    min_values_in_leaf: usize,
    max_x_values_number: usize,
    leaf_threshold: f64,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// max_level: 5,
    /// max_leaf_number: 20,
    /// min_values_in_leaf: 10,
    /// max_x_values_number: 200,
    /// leaf_threshold: 0.75,
    /// ```
    pub fn new() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            max_leaf_number: DEFAULT_MAX_LEAF_NUMBER,
            min_values_in_leaf: DEFAULT_MIN_VALUES_IN_LEAF,
            max_x_values_number: DEFAULT_MAX_X_VALUES_NUMBER,
            leaf_threshold: DEFAULT_LEAF_THRESHOLD,
        }
    }


    /// Take the tree parameters out of `param`.
    pub fn from_param(param: &TreeParam) -> Self {
        Self {
            max_level: param.max_level,
            max_leaf_number: param.max_leaf_number,
            min_values_in_leaf: param.min_values_in_leaf,
            max_x_values_number: param.max_x_values_number,
            leaf_threshold: param.leaf_threshold,
        }
    }


    /// Specify the maximal level of the tree.
    pub fn max_level(mut self, level: usize) -> Self {
        self.max_level = level;
        self
    }


    /// Specify the maximal number of leaves.
    pub fn max_leaf_number(mut self, n: usize) -> Self {
        self.max_leaf_number = n;
        self
    }


    /// A node with at most `n` samples becomes a leaf.
    pub fn min_values_in_leaf(mut self, n: usize) -> Self {
        self.min_values_in_leaf = n;
        self
    }


    /// Inspect at most `n` candidate values per feature.
    pub fn max_x_values_number(mut self, n: usize) -> Self {
        self.max_x_values_number = n;
        self
    }


    /// A node whose majority class holds at least `threshold`
    /// of the mass becomes a leaf.
    pub fn leaf_threshold(mut self, threshold: f64) -> Self {
        self.leaf_threshold = threshold;
        self
    }


    /// Build a `DecisionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> Result<DecisionTree> {
        if self.min_values_in_leaf == 0 {
            return Err(GbdtError::config("`min_values_in_leaf` must be >= 1"));
        }
        if self.max_x_values_number == 0 {
            return Err(GbdtError::config("`max_x_values_number` must be >= 1"));
        }

        let limits = TreeLimits {
            max_level: self.max_level,
            max_leaf_number: self.max_leaf_number,
            min_values_in_leaf: self.min_values_in_leaf,
        };
        Ok(DecisionTree::from_components(
            limits, self.max_x_values_number, self.leaf_threshold,
        ))
    }
}


impl Default for DecisionTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
