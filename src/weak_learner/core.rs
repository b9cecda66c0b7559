//! Provides `WeakLearner` trait.
use crate::DatasetView;
use super::common::train_node::PseudoResponse;
use super::regression_tree::LossType;


/// An interface for the tree learners.
/// A weak learner fits one tree against per-row working arrays.
pub trait WeakLearner {
    /// The tree type produced by this learner.
    type Hypothesis;


    /// Returns the name of the weak learner.
    fn name(&self) -> &str;


    /// Returns the parameters of the weak learner
    /// as `(key, value)` pairs.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// The loss whose leaf rule this learner applies.
    /// A booster driving the learner must use the same loss.
    fn loss(&self) -> Option<LossType> {
        None
    }


    /// Fit a tree on the rows of `view`.
    /// `work.response()[i]` is the target of `view.get(i)`.
    fn produce(&self, view: &DatasetView<'_>, work: &PseudoResponse)
        -> Self::Hypothesis;
}
