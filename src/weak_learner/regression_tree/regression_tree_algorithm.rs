use crate::{DatasetView, WeakLearner};

use crate::weak_learner::common::train_node::*;
use super::{
    loss::LossType,
    regression_tree_regressor::RegressionTreeRegressor,
};


use std::fmt;


/// Regression tree fitted to the pseudo-response of one boosting round.
///
/// Every split minimizes the weighted squared loss of the response.
/// The leaves follow the rule of the [`LossType`]:
/// the weighted mean (LS), the weighted median (LAD),
/// a clamped Newton step (logistic),
/// or `Σ lambda / Σ lambda'` (ranking).
/// Each leaf is multiplied by the learning rate unless it is at least `1`.
///
/// [`RegressionTree`] is constructed
/// by [`RegressionTreeBuilder`](crate::weak_learner::RegressionTreeBuilder).
#[derive(Debug, Clone)]
pub struct RegressionTree {
    loss: LossType,
    limits: TreeLimits,
    learning_rate: f64,
}


impl RegressionTree {
    /// Initialize [`RegressionTree`].
    /// This method is called only via `RegressionTreeBuilder::build`.
    #[inline]
    pub(super) fn from_components(
        loss: LossType,
        limits: TreeLimits,
        learning_rate: f64,
    ) -> Self
    {
        Self { loss, limits, learning_rate, }
    }
}


impl GrowthRule for RegressionTree {
    fn best_split(&self, ctx: &NodeContext<'_, '_>) -> Option<SplitInfo> {
        self.loss.best_split(ctx)
    }


    fn leaf_value(&self, ctx: &NodeContext<'_, '_>) -> f64 {
        self.loss.leaf_value(ctx)
    }


    fn shrinkage(&self) -> Option<f64> {
        Some(self.learning_rate)
    }
}


impl WeakLearner for RegressionTree {
    type Hypothesis = RegressionTreeRegressor;


    fn name(&self) -> &str {
        "Regression Tree"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Max level", format!("{}", self.limits.max_level)),
            ("Max leaves", format!("{}", self.limits.max_leaf_number)),
            ("Min values in leaf", format!("{}", self.limits.min_values_in_leaf)),
            ("Leaf rule", format!("{}", self.loss)),
            ("Learning rate", format!("{}", self.learning_rate)),
        ]);
        Some(info)
    }


    fn loss(&self) -> Option<LossType> {
        Some(self.loss)
    }


    /// Grow a tree on `view` against `work`
    /// and release the working arrays of every node.
    fn produce(&self, view: &DatasetView<'_>, work: &PseudoResponse)
        -> Self::Hypothesis
    {
        let root = grow(self, &self.limits, view, work);
        RegressionTreeRegressor::from(root)
    }
}


impl fmt::Display for RegressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\
            ----------\n\
            # Regression Tree Weak Learner\n\n\
            - Max level: {}\n\
            - Max leaves: {}\n\
            - Min values in leaf: {}\n\
            - Loss: {}\n\
            - Learning rate: {}\n\
            ----------\
            ",
            self.limits.max_level,
            self.limits.max_leaf_number,
            self.limits.min_values_in_leaf,
            self.loss,
            self.learning_rate,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dataset, FeatureSpec, FeatureValue, Sample};

    fn line(n: usize) -> Dataset {
        let mut builder = Dataset::builder(FeatureSpec::numerical(1));
        for i in 0..n {
            let x = vec![FeatureValue::Numerical((i + 1) as f64)];
            builder.push(Sample::new(x, 0.0)).unwrap();
        }
        builder.build().unwrap()
    }


    fn split_of(loss: LossType, response: Vec<f64>) -> SplitInfo {
        let dataset = line(response.len());
        let view = dataset.view();
        let work = PseudoResponse::new(response);
        let rows = (0..view.len()).collect::<Vec<_>>();
        let ctx = NodeContext::new(&view, &work, &rows[..]);
        loss.best_split(&ctx).unwrap()
    }


    #[test]
    fn side_values_follow_the_leaf_rule() {
        let response = vec![0.0, 0.0, 1.0, 9.0];

        let ls = split_of(LossType::Ls, response.clone());
        let lad = split_of(LossType::Lad, response.clone());
        let logistic = split_of(LossType::Logistic, response);

        // The threshold is chosen by the squared loss for every loss.
        let three = FeatureValue::Numerical(3.0);
        assert_eq!(ls.rule.threshold(), three);
        assert_eq!(lad.rule.threshold(), three);
        assert_eq!(logistic.rule.threshold(), three);

        assert!((ls.left_value - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(lad.left_value, 0.0);
        assert_eq!(logistic.left_value, 1.0);

        assert_eq!(ls.right_value, 9.0);
        assert_eq!(lad.right_value, 9.0);
        assert!((logistic.right_value - 9.0 / -63.0).abs() < 1e-12);
    }


    #[test]
    fn split_gain_is_the_loss_decrease() {
        let info = split_of(LossType::Ls, vec![0.0, 0.0, 1.0, 9.0]);
        let parent = [0.0_f64, 0.0, 1.0, 9.0].iter()
            .map(|r| (r - 2.5).powi(2))
            .sum::<f64>();
        assert!((info.gain - (parent - 2.0 / 3.0)).abs() < 1e-9);
    }


    #[test]
    fn max_level_zero_gives_a_single_leaf() {
        let dataset = line(20);
        let tree = crate::RegressionTreeBuilder::new()
            .max_level(0)
            .learning_rate(1.0)
            .build()
            .unwrap();
        let work = PseudoResponse::new((0..20).map(|i| i as f64).collect());
        let f = tree.produce(&dataset.view(), &work);
        assert_eq!(f.root().leaves(), 1);
        assert!((f.root().predict(dataset.get(0).features()) - 9.5).abs() < 1e-12);
    }
}
