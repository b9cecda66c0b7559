use crate::{Dataset, DatasetView, WeakLearner};
use crate::common::checker;
use crate::error::Result;


use crate::weak_learner::common::{
    split_rule::*,
    sweep::{best_cut, Accumulate},
    train_node::*,
};
use super::{
    criterion::*,
    decision_tree_classifier::DecisionTreeClassifier,
};


use std::fmt;


/// The entropy decision tree.
/// Given a set of training examples labeled `0`/`1`,
/// [`DecisionTree`] grows a binary tree that maximizes
/// the information gain at every split
/// and outputs a [`DecisionTreeClassifier`].
/// Each leaf predicts the weighted fraction of positive samples
/// that reached it.
///
/// [`DecisionTree`] is constructed
/// by [`DecisionTreeBuilder`](crate::weak_learner::DecisionTreeBuilder).
///
/// # Example
/// ```no_run
/// use minigbdt::prelude::*;
///
/// let spec = FeatureSpec::numerical(1);
/// let mut builder = Dataset::builder(spec);
/// for (x, y) in [(1.0, 0.0), (2.0, 0.0), (3.0, 1.0), (4.0, 1.0)] {
///     builder.push(Sample::new(vec![x.into()], y)).unwrap();
/// }
/// let dataset = builder.build().unwrap();
///
/// let tree = DecisionTreeBuilder::new()
///     .min_values_in_leaf(1)
///     .build()
///     .unwrap();
/// let f = tree.fit(&dataset).unwrap();
///
/// let p = f.confidence(&[2.5.into()]);
/// println!("P(y = 1 | x = 2.5) = {p}");
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTree {
    limits: TreeLimits,
    max_x_values_number: usize,
    leaf_threshold: f64,
}


impl DecisionTree {
    /// Initialize [`DecisionTree`].
    /// This method is called only via `DecisionTreeBuilder::build`.
    #[inline]
    pub(super) fn from_components(
        limits: TreeLimits,
        max_x_values_number: usize,
        leaf_threshold: f64,
    ) -> Self
    {
        Self { limits, max_x_values_number, leaf_threshold, }
    }


    /// Fit a tree on every sample of `dataset`.
    /// The labels are read as `positive` iff `y >= 1e-9`.
    pub fn fit(&self, dataset: &Dataset) -> Result<DecisionTreeClassifier> {
        checker::check_dataset(dataset)?;

        let view = dataset.view();
        let work = PseudoResponse::new(dataset.target());
        Ok(self.produce(&view, &work))
    }


    fn class_stats(&self, ctx: &NodeContext<'_, '_>) -> ClassStats {
        let mut stats = ClassStats::default();
        for &row in ctx.rows() {
            stats.merge(&ClassStats::of(ctx.response(row), ctx.weight(row)));
        }
        stats
    }
}


impl GrowthRule for DecisionTree {
    fn is_pure(&self, ctx: &NodeContext<'_, '_>) -> bool {
        let stats = self.class_stats(ctx);
        let total = stats.total();
        if total <= 0.0 {
            return true;
        }
        stats.positive.max(stats.negative) / total >= self.leaf_threshold
    }


    fn best_split(&self, ctx: &NodeContext<'_, '_>) -> Option<SplitInfo> {
        let parent = self.class_stats(ctx);

        // The cut minimizes the negated gain,
        // starting from a gain of `-1`.
        let cut = best_cut(
            ctx,
            Some(self.max_x_values_number),
            1.0,
            |row| ClassStats::of(ctx.response(row), ctx.weight(row)),
            |left, right| -information_gain(&parent, left, right),
        )?;

        Some(SplitInfo {
            rule: Splitter::new(cut.feature, cut.threshold),
            left_value: cut.left.positive_rate(),
            right_value: cut.right.positive_rate(),
            gain: -cut.score,
        })
    }


    fn leaf_value(&self, ctx: &NodeContext<'_, '_>) -> f64 {
        self.class_stats(ctx).positive_rate()
    }
}


impl WeakLearner for DecisionTree {
    type Hypothesis = DecisionTreeClassifier;


    fn name(&self) -> &str {
        "Decision Tree (entropy)"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Max level", format!("{}", self.limits.max_level)),
            ("Max leaves", format!("{}", self.limits.max_leaf_number)),
            ("Min values in leaf", format!("{}", self.limits.min_values_in_leaf)),
            ("Max candidates", format!("{}", self.max_x_values_number)),
            ("Leaf threshold", format!("{}", self.leaf_threshold)),
        ]);
        Some(info)
    }


    fn produce(&self, view: &DatasetView<'_>, work: &PseudoResponse)
        -> Self::Hypothesis
    {
        let root = grow(self, &self.limits, view, work);
        DecisionTreeClassifier::from(root)
    }
}


impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\
            ----------\n\
            # Decision Tree Weak Learner\n\n\
            - Max level: {}\n\
            - Max leaves: {}\n\
            - Min values in leaf: {}\n\
            - Max candidates: {}\n\
            - Leaf threshold: {}\n\
            ----------\
            ",
            self.limits.max_level,
            self.limits.max_leaf_number,
            self.limits.min_values_in_leaf,
            self.max_x_values_number,
            self.leaf_threshold,
        )
    }
}
