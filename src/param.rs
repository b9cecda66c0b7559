//! Training parameters shared by the trees and the boosting driver.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::common::checker;
use crate::error::{GbdtError, Result};
use crate::weak_learner::LossType;


/// Default maximal depth of a tree.
pub const DEFAULT_MAX_LEVEL: usize = 5;
/// Default maximal number of leaves of a tree.
pub const DEFAULT_MAX_LEAF_NUMBER: usize = 20;
/// Default number of candidates inspected per feature (entropy tree).
pub const DEFAULT_MAX_X_VALUES_NUMBER: usize = 200;
/// Default minimal number of samples a splittable node holds.
pub const DEFAULT_MIN_VALUES_IN_LEAF: usize = 10;
/// Default purity that stops the entropy tree.
pub const DEFAULT_LEAF_THRESHOLD: f64 = 0.75;
/// Default number of boosting rounds.
pub const DEFAULT_TREE_NUMBER: usize = 400;
/// Default shrinkage.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Default row sampling rate.
pub const DEFAULT_SAMPLE_RATE: f64 = 0.9;
/// Default NDCG cutoff.
pub const DEFAULT_NDCG_CUTOFF: usize = 8;


/// Metric optimized by the ranking loss.
/// NDCG is the only one supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMetric {
    /// Normalized Discounted Cumulative Gain.
    #[default]
    Ndcg,
}


impl FromStr for RankingMetric {
    type Err = GbdtError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ndcg" => Ok(Self::Ndcg),
            _ => Err(GbdtError::config(format!(
                "unknown ranking metric `{s}`"
            ))),
        }
    }
}


impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ndcg => write!(f, "ndcg"),
        }
    }
}


/// Parameters for growing trees and boosting them.
///
/// Every field has a default,
/// so a partial JSON object deserializes into a full `TreeParam`.
///
/// # Example
/// ```no_run
/// use minigbdt::prelude::*;
///
/// let param = TreeParam::default()
///     .loss(LossType::Lad)
///     .tree_number(100)
///     .learning_rate(0.05);
/// assert!(param.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParam {
    /// Print a progress table while training.
    pub verbose: bool,
    /// A node at this level becomes a leaf.
    pub max_level: usize,
    /// A tree stops splitting after emitting this many leaves.
    pub max_leaf_number: usize,
    /// Candidates inspected per feature by the entropy tree.
    pub max_x_values_number: usize,
    /// A node with at most this many samples becomes a leaf.
    pub min_values_in_leaf: usize,
    /// Entropy tree purity `max(pos, neg) / total` that makes a leaf.
    pub leaf_threshold: f64,
    /// Number of boosting rounds.
    pub tree_number: usize,
    /// Shrinkage applied to each leaf value.
    pub learning_rate: f64,
    /// Probability that a row takes part in a round.
    pub sample_rate: f64,
    /// Loss function.
    pub loss: LossType,
    /// Metric for the ranking loss.
    pub ranking_metric: RankingMetric,
    /// Truncation level of NDCG.
    pub ndcg_cutoff: usize,
    /// Seed of the row sampler.
    pub seed: u64,
}


impl Default for TreeParam {
    fn default() -> Self {
        Self {
            verbose: false,
            max_level: DEFAULT_MAX_LEVEL,
            max_leaf_number: DEFAULT_MAX_LEAF_NUMBER,
            max_x_values_number: DEFAULT_MAX_X_VALUES_NUMBER,
            min_values_in_leaf: DEFAULT_MIN_VALUES_IN_LEAF,
            leaf_threshold: DEFAULT_LEAF_THRESHOLD,
            tree_number: DEFAULT_TREE_NUMBER,
            learning_rate: DEFAULT_LEARNING_RATE,
            sample_rate: DEFAULT_SAMPLE_RATE,
            loss: LossType::Ls,
            ranking_metric: RankingMetric::Ndcg,
            ndcg_cutoff: DEFAULT_NDCG_CUTOFF,
            seed: 0,
        }
    }
}


impl TreeParam {
    /// Print the progress table while training.
    pub fn verbose(mut self, flag: bool) -> Self {
        self.verbose = flag;
        self
    }


    /// Set the maximal level of a tree.
    /// `0` makes every tree a single leaf.
    pub fn max_level(mut self, level: usize) -> Self {
        self.max_level = level;
        self
    }


    /// Set the maximal number of leaves.
    pub fn max_leaf_number(mut self, n: usize) -> Self {
        self.max_leaf_number = n;
        self
    }


    /// Set the number of candidates the entropy tree inspects per feature.
    pub fn max_x_values_number(mut self, n: usize) -> Self {
        self.max_x_values_number = n;
        self
    }


    /// Set the minimal number of samples a splittable node holds.
    pub fn min_values_in_leaf(mut self, n: usize) -> Self {
        self.min_values_in_leaf = n;
        self
    }


    /// Set the purity threshold of the entropy tree.
    pub fn leaf_threshold(mut self, threshold: f64) -> Self {
        self.leaf_threshold = threshold;
        self
    }


    /// Set the number of boosting rounds.
    pub fn tree_number(mut self, n: usize) -> Self {
        self.tree_number = n;
        self
    }


    /// Set the shrinkage.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }


    /// Set the row sampling rate.
    pub fn sample_rate(mut self, rate: f64) -> Self {
        self.sample_rate = rate;
        self
    }


    /// Set the loss function.
    pub fn loss(mut self, loss: LossType) -> Self {
        self.loss = loss;
        self
    }


    /// Set the ranking metric.
    pub fn ranking_metric(mut self, metric: RankingMetric) -> Self {
        self.ranking_metric = metric;
        self
    }


    /// Set the NDCG cutoff.
    pub fn ndcg_cutoff(mut self, k: usize) -> Self {
        self.ndcg_cutoff = k;
        self
    }


    /// Set the seed of the row sampler.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Parse a JSON object into `TreeParam`.
    /// Missing keys take their default values.
    pub fn from_json(text: &str) -> Result<Self> {
        let param: Self = serde_json::from_str(text)?;
        param.validate()?;
        Ok(param)
    }


    /// Check that every parameter is in its domain.
    pub fn validate(&self) -> Result<()> {
        checker::check_param(self)
    }
}
