//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data, domain of parameters.

use crate::{Dataset, TreeParam};
use crate::error::{GbdtError, Result};
use crate::ranking::MAX_RELEVANCE;
use crate::weak_learner::LossType;


/// Check whether the training set is valid or not.
#[inline(always)]
pub(crate) fn check_dataset(dataset: &Dataset) -> Result<()> {
    let (n_sample, n_feature) = dataset.shape();

    if n_sample == 0 {
        return Err(GbdtError::dataset("the dataset has no rows"));
    }

    if n_feature == 0 {
        return Err(GbdtError::dataset("the dataset has no features"));
    }
    Ok(())
}


/// Check whether the parameters are valid or not.
pub(crate) fn check_param(param: &TreeParam) -> Result<()> {
    if param.min_values_in_leaf == 0 {
        return Err(GbdtError::config("`min_values_in_leaf` must be >= 1"));
    }

    if !(param.sample_rate > 0.0 && param.sample_rate <= 1.0) {
        return Err(GbdtError::config(format!(
            "`sample_rate` must be in (0, 1], got {}", param.sample_rate
        )));
    }

    if !(param.learning_rate > 0.0) {
        return Err(GbdtError::config(format!(
            "`learning_rate` must be positive, got {}", param.learning_rate
        )));
    }

    if param.loss == LossType::Ranking && param.sample_rate < 1.0 {
        return Err(GbdtError::config(
            "the ranking loss does not support row sampling, \
             set `sample_rate` to 1.0"
        ));
    }
    Ok(())
}


/// Ranking labels must be integer grades in `0..=MAX_RELEVANCE`.
pub(crate) fn check_relevance_labels(dataset: &Dataset) -> Result<()> {
    let bad = dataset.samples()
        .iter()
        .position(|s| {
            s.y < 0.0 || s.y > MAX_RELEVANCE as f64 || s.y.fract() != 0.0
        });

    match bad {
        Some(row) => Err(GbdtError::dataset(format!(
            "row {row} has the label {}, \
             ranking labels must be integers in 0..={MAX_RELEVANCE}",
            dataset.get(row).y,
        ))),
        None => Ok(()),
    }
}
