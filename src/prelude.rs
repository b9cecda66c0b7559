//! Exports the standard trees, traits and the training entry points.
//!
pub use crate::booster::{
    // Booster trait
    Booster,

    GBDT,
    train,
    train_ranking,
};


pub use crate::weak_learner::{
    // Weak learner trait
    WeakLearner,


    // Classification ---------------------------
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,


    // Regression -------------------------------
    LossType,
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};


pub use crate::hypothesis::{
    Classifier,
    Regressor,
    Ensemble,
};


pub use crate::sample::{
    FeatureType,
    FeatureValue,
    FeatureSpec,
    Sample,
    Dataset,
    DatasetBuilder,
};


pub use crate::ranking::{
    NdcgScorer,
    QueryGroups,
    evaluate_ndcg,
};


pub use crate::param::TreeParam;
pub use crate::error::GbdtError;
