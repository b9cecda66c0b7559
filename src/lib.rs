#![warn(missing_docs)]

//!
//! A crate that trains additive ensembles of binary decision trees
//! over tabular data.
//!
//! - Entropy decision tree
//!     A single classification tree grown by information gain.
//!     See [`DecisionTree`].
//!
//!
//! - Gradient boosting
//!     Regression trees fit to the pseudo-response of
//!     the squared error (`ls`), the absolute deviation (`lad`),
//!     the logistic loss (`logistic`),
//!     or the NDCG-driven pairwise ranking loss (`ranking`, LambdaMART).
//!     See [`train`], [`train_ranking`] and [`GBDT`].
//!
//! A trained [`Ensemble`] is persisted as JSON,
//! see [`Ensemble::save_json_file`] and [`Ensemble::load_json_file`].
//!
//! ```no_run
//! use minigbdt::prelude::*;
//!
//! # fn main() -> minigbdt::Result<()> {
//! let spec = FeatureSpec::numerical(2);
//! let mut builder = Dataset::builder(spec);
//! let x = |a: f64, b: f64| vec![FeatureValue::from(a), FeatureValue::from(b)];
//! builder.push(Sample::new(x(1.0, 0.5), 1.2))?;
//! builder.push(Sample::new(x(2.0, 0.1), 2.3))?;
//! let dataset = builder.build()?;
//!
//! let param = TreeParam::default()
//!     .tree_number(50)
//!     .min_values_in_leaf(1);
//! let model = train(&dataset, &param)?;
//! model.save_json_file("model.json")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod param;
pub mod common;
pub mod sample;
pub mod hypothesis;
pub mod weak_learner;
pub mod ranking;
pub mod booster;
pub mod logging;
pub mod prelude;


pub use error::{GbdtError, Result};
pub use param::{TreeParam, RankingMetric};

pub use sample::{
    FeatureType,
    FeatureValue,
    FeatureSpec,
    Sample,
    Dataset,
    DatasetBuilder,
    DatasetView,
};

pub use hypothesis::{Classifier, Regressor, Ensemble};

pub use weak_learner::{
    WeakLearner,
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    LossType,
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};

pub use ranking::{
    NdcgScorer,
    NdcgScore,
    DeltaMatrix,
    QueryGroups,
    evaluate_ndcg,
    NdcgReport,
};

pub use booster::{Booster, GBDT, train, train_ranking};
