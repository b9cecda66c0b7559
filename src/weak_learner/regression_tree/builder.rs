use crate::{RegressionTree, TreeParam};
use crate::error::{GbdtError, Result};
use crate::weak_learner::common::train_node::TreeLimits;
use crate::param::*;
use super::loss::LossType;


/// A struct that builds `RegressionTree`.
/// `RegressionTreeBuilder` keeps parameters for constructing `RegressionTree`.
///
/// # Example
///
/// ```no_run
/// use minigbdt::prelude::*;
///
/// let tree = RegressionTreeBuilder::new()
///     .max_level(3)
///     .loss(LossType::Lad)
///     .learning_rate(0.05)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RegressionTreeBuilder {
    loss: LossType,
    max_level: usize,
    max_leaf_number: usize,
    min_values_in_leaf: usize,
    learning_rate: f64,
}


impl RegressionTreeBuilder {
    /// Construct a new instance of [`RegressionTreeBuilder`].
    /// By default, [`RegressionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// loss: LossType::Ls,
    /// max_level: 5,
    /// max_leaf_number: 20,
    /// min_values_in_leaf: 10,
    /// learning_rate: 0.1,
    /// ```
    pub fn new() -> Self {
        Self {
            loss: LossType::Ls,
            max_level: DEFAULT_MAX_LEVEL,
            max_leaf_number: DEFAULT_MAX_LEAF_NUMBER,
            min_values_in_leaf: DEFAULT_MIN_VALUES_IN_LEAF,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }


    /// Take the tree parameters out of `param`.
    pub fn from_param(param: &TreeParam) -> Self {
        Self {
            loss: param.loss,
            max_level: param.max_level,
            max_leaf_number: param.max_leaf_number,
            min_values_in_leaf: param.min_values_in_leaf,
            learning_rate: param.learning_rate,
        }
    }


    /// Set the loss function.
    pub fn loss(mut self, loss: LossType) -> Self {
        self.loss = loss;
        self
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


    /// Set the shrinkage applied to every leaf.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }


    /// Build a `RegressionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> Result<RegressionTree> {
        if self.min_values_in_leaf == 0 {
            return Err(GbdtError::config("`min_values_in_leaf` must be >= 1"));
        }
        if !(self.learning_rate > 0.0) {
            return Err(GbdtError::config(format!(
                "`learning_rate` must be positive, got {}", self.learning_rate
            )));
        }

        let limits = TreeLimits {
            max_level: self.max_level,
            max_leaf_number: self.max_leaf_number,
            min_values_in_leaf: self.min_values_in_leaf,
        };
        Ok(RegressionTree::from_components(
            self.loss, limits, self.learning_rate,
        ))
    }
}


impl Default for RegressionTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
