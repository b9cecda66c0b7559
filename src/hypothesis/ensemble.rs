//! Defines the additive ensemble produced by the boosting.
use log::warn;

use crate::{FeatureSpec, FeatureValue, Regressor};
use crate::error::{GbdtError, Result};
use crate::weak_learner::RegressionTreeRegressor;


/// A base score plus an ordered sequence of regression trees.
/// The prediction is `y0 + Σ tree(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    pub(crate) spec: FeatureSpec,
    pub(crate) y0: f64,
    pub(crate) trees: Vec<RegressionTreeRegressor>,
}


impl Ensemble {
    /// Construct an ensemble from its parts.
    pub fn new(
        spec: FeatureSpec,
        y0: f64,
        trees: Vec<RegressionTreeRegressor>,
    ) -> Self
    {
        Self { spec, y0, trees }
    }


    /// The feature spec the trees were trained on.
    pub fn spec(&self) -> &FeatureSpec {
        &self.spec
    }


    /// The base score.
    pub fn y0(&self) -> f64 {
        self.y0
    }


    /// The trees, in training order.
    pub fn trees(&self) -> &[RegressionTreeRegressor] {
        &self.trees[..]
    }


    /// Number of trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }


    /// Returns `true` if the ensemble has no tree.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }


    /// Predict `x` after checking it against the feature spec.
    /// Fails if `x` has the wrong width or a value of the wrong type.
    pub fn try_predict(&self, x: &[FeatureValue]) -> Result<f64> {
        if x.len() != self.spec.len() {
            return Err(GbdtError::config(format!(
                "the model takes {} features, got {}",
                self.spec.len(),
                x.len(),
            )));
        }
        let mismatch = x.iter()
            .zip(self.spec.iter())
            .position(|(v, ty)| v.feature_type() != *ty);
        if let Some(k) = mismatch {
            return Err(GbdtError::config(format!(
                "feature {k} is not {}", self.spec.types()[k]
            )));
        }
        Ok(self.predict(x))
    }


    /// Probability of the positive class
    /// for a model trained with the logistic loss,
    /// `1 / (1 + exp(-2 F(x)))`.
    pub fn predict_logistic(&self, x: &[FeatureValue]) -> f64 {
        1.0 / (1.0 + (-2.0 * self.predict(x)).exp())
    }


    /// Per-feature sum of the split gains over all trees,
    /// normalized to sum to `1`.
    ///
    /// Returns `None` if the gains are unknown,
    /// which is the case for a model loaded from a file.
    /// If no tree has a split, every importance is `0`.
    pub fn feature_importance(&self) -> Option<Vec<f64>> {
        let mut importance = vec![0.0; self.spec.len()];
        for tree in self.trees.iter() {
            if !tree.root().accumulate_gain(&mut importance[..]) {
                warn!("feature importance is unavailable, split gains are not recorded");
                return None;
            }
        }

        let total = importance.iter().sum::<f64>();
        if total > 0.0 {
            importance.iter_mut()
                .for_each(|v| { *v /= total; });
        }
        Some(importance)
    }
}


impl Regressor for Ensemble {
    /// # Panics
    ///
    /// Panics if `x` is narrower than the largest split feature.
    /// Use [`Ensemble::try_predict`] for unchecked input.
    fn predict(&self, x: &[FeatureValue]) -> f64 {
        self.y0 + self.trees.iter()
            .map(|tree| tree.predict(x))
            .sum::<f64>()
    }
}
