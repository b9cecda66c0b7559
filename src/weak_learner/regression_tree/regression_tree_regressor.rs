//! Defines the regression tree regressor.
use crate::{FeatureValue, Regressor};
use crate::weak_learner::common::node::Node;


/// Regression tree regressor.
/// This struct is just a wrapper of `Node`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTreeRegressor {
    root: Node,
}


impl From<Node> for RegressionTreeRegressor {
    #[inline]
    fn from(root: Node) -> Self {
        Self { root }
    }
}


impl Regressor for RegressionTreeRegressor {
    #[inline]
    fn predict(&self, x: &[FeatureValue]) -> f64 {
        self.root.predict(x)
    }
}


impl RegressionTreeRegressor {
    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }
}
