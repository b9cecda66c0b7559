use serde::Serialize;

use crate::{Dataset, Regressor};
use crate::common::checker;
use crate::error::{GbdtError, Result};
use super::ndcg::{NdcgScore, NdcgScorer};
use super::query_groups::QueryGroups;


/// NDCG of a model over every query group of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NdcgReport {
    /// The score of each group, in group order.
    pub per_query: Vec<NdcgScore>,
    /// Mean NDCG over the groups.
    pub mean: f64,
}


/// Rank the rows of each query group by the scores of `model`
/// (descending, ties keep the input order)
/// and measure the NDCG@`cutoff` of the resulting label order.
///
/// Fails if `groups` does not cover exactly the rows of `dataset`,
/// or if a label is not a relevance grade.
pub fn evaluate_ndcg<R>(
    model: &R,
    dataset: &Dataset,
    groups: &QueryGroups,
    cutoff: usize,
) -> Result<NdcgReport>
    where R: Regressor
{
    let n_sample = dataset.shape().0;
    if groups.n_rows() != n_sample {
        return Err(GbdtError::config(format!(
            "query groups cover {} rows, but the dataset has {n_sample}",
            groups.n_rows(),
        )));
    }
    checker::check_relevance_labels(dataset)?;

    let mut scorer = NdcgScorer::new(cutoff);
    let samples = dataset.samples();
    let predictions = model.predict_all(dataset);

    let per_query = groups.iter()
        .map(|range| {
            let mut rows = range.collect::<Vec<_>>();
            rows.sort_by(|&a, &b| predictions[b].total_cmp(&predictions[a]));
            let labels = rows.into_iter()
                .map(|r| samples[r].relevance())
                .collect::<Vec<_>>();
            scorer.score(&labels[..])
        })
        .collect::<Vec<_>>();

    let mean = if per_query.is_empty() {
        0.0
    } else {
        per_query.iter().map(|s| s.ndcg).sum::<f64>() / per_query.len() as f64
    };

    Ok(NdcgReport { per_query, mean })
}
