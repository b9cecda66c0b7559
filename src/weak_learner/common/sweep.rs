//! Candidate sweeps shared by the entropy tree and the loss trees.
//!
//! A sweep visits every candidate split value of one feature and scores
//! the induced partition of a node. Numerical features are swept once
//! over the rows sorted by value, categorical features are bucketed.
use rayon::prelude::*;

use std::collections::HashMap;

use crate::FeatureValue;
use crate::common::utils::evenly_spaced;
use super::train_node::NodeContext;


/// Per-side statistics that can be merged and subtracted.
pub(crate) trait Accumulate: Copy + Default + Send + Sync {
    /// Add `other` into `self`.
    fn merge(&mut self, other: &Self);
    /// Returns `self - other`.
    fn minus(&self, other: &Self) -> Self;
}


/// The best cut found on one feature.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cut<A> {
    pub(crate) feature: usize,
    pub(crate) threshold: FeatureValue,
    pub(crate) score: f64,
    pub(crate) left: A,
    pub(crate) right: A,
}


/// Returns the cut minimizing `score(left, right)` over all features.
///
/// A cut is accepted only if it scores strictly below `bound`
/// and strictly below every cut seen before it,
/// so ties keep the first feature and the first candidate.
/// `cap` limits the candidates inspected per feature
/// to evenly spaced entries of the candidate list.
pub(crate) fn best_cut<A, S, F>(
    ctx: &NodeContext<'_, '_>,
    cap: Option<usize>,
    bound: f64,
    stat: S,
    score: F,
) -> Option<Cut<A>>
    where A: Accumulate,
          S: Fn(usize) -> A + Sync,
          F: Fn(&A, &A) -> f64 + Sync,
{
    let n_feature = ctx.view().n_feature();
    let per_feature = (0..n_feature).into_par_iter()
        .map(|feature| {
            let candidates = ctx.view().candidates(feature);
            match cap {
                Some(k) => {
                    let candidates = evenly_spaced(candidates, k);
                    sweep(ctx, feature, &candidates[..], bound, &stat, &score)
                },
                None => {
                    sweep(ctx, feature, candidates, bound, &stat, &score)
                },
            }
        })
        .collect::<Vec<_>>();

    let mut best: Option<Cut<A>> = None;
    for cut in per_feature.into_iter().flatten() {
        let better = best.as_ref()
            .map_or(true, |b| cut.score < b.score);
        if better {
            best = Some(cut);
        }
    }
    best
}


/// Sweep the candidates of one feature.
fn sweep<A, S, F>(
    ctx: &NodeContext<'_, '_>,
    feature: usize,
    candidates: &[FeatureValue],
    bound: f64,
    stat: &S,
    score: &F,
) -> Option<Cut<A>>
    where A: Accumulate,
          S: Fn(usize) -> A,
          F: Fn(&A, &A) -> f64,
{
    let mut total = A::default();
    for &row in ctx.rows() {
        total.merge(&stat(row));
    }

    let mut best: Option<Cut<A>> = None;
    let mut best_score = bound;
    let mut consider = |threshold: FeatureValue, left: A| {
        let right = total.minus(&left);
        let s = score(&left, &right);
        if s < best_score {
            best_score = s;
            best = Some(Cut { feature, threshold, score: s, left, right });
        }
    };


    match candidates.first() {
        None => {},
        Some(FeatureValue::Numerical(_)) => {
            let mut rows = ctx.rows()
                .iter()
                .map(|&row| (ctx.x(row, feature).as_f64(), row))
                .collect::<Vec<_>>();
            rows.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = A::default();
            let mut p = 0;
            for &candidate in candidates {
                let threshold = candidate.as_f64();
                while p < rows.len() && rows[p].0 <= threshold {
                    left.merge(&stat(rows[p].1));
                    p += 1;
                }
                consider(candidate, left);
            }
        },
        Some(FeatureValue::Category(_)) => {
            let mut buckets: HashMap<i32, A> = HashMap::new();
            for &row in ctx.rows() {
                let code = ctx.x(row, feature).as_i32();
                buckets.entry(code)
                    .or_default()
                    .merge(&stat(row));
            }

            for &candidate in candidates {
                let left = buckets.get(&candidate.as_i32())
                    .copied()
                    .unwrap_or_default();
                consider(candidate, left);
            }
        },
    }
    best
}
