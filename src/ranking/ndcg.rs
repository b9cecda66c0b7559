//! NDCG with cached gains and discounts.
use serde::Serialize;

use crate::common::utils::EPS;
use super::delta_matrix::DeltaMatrix;


// The discount cache grows by this many entries at once.
const DISCOUNT_BLOCK: usize = 1000;

/// The largest relevance grade accepted for training and evaluation.
/// `2^31 - 1` is still an exact gain.
pub const MAX_RELEVANCE: usize = 31;


/// NDCG@k of one ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NdcgScore {
    /// `dcg / idcg`, or `0` when both are below `1e-9`.
    pub ndcg: f64,
    /// DCG@k of the given order.
    pub dcg: f64,
    /// DCG@k of the ideal order.
    pub idcg: f64,
}


/// Computes NDCG truncated at `cutoff`.
/// `gain(l) = 2^l - 1` and `discount(i) = 1 / log2(i + 2)`
/// are cached in the scorer and grown on demand.
#[derive(Debug, Clone)]
pub struct NdcgScorer {
    cutoff: usize,
    gain_cache: Vec<f64>,
    discount_cache: Vec<f64>,
}


impl NdcgScorer {
    /// Construct a scorer truncated at `cutoff`.
    pub fn new(cutoff: usize) -> Self {
        Self {
            cutoff,
            gain_cache: Vec::new(),
            discount_cache: Vec::with_capacity(DISCOUNT_BLOCK),
        }
    }


    /// The truncation level.
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }


    /// `2^label - 1`.
    /// Labels above [`MAX_RELEVANCE`] are scored as `MAX_RELEVANCE`.
    pub fn gain(&mut self, label: usize) -> f64 {
        let label = label.min(MAX_RELEVANCE);
        if label >= self.gain_cache.len() {
            let old = self.gain_cache.len();
            self.gain_cache.extend(
                (old..=label).map(|l| 2_f64.powi(l as i32) - 1.0)
            );
        }
        self.gain_cache[label]
    }


    /// `1 / log2(rank + 2)`, `rank` is 0-based.
    pub fn discount(&mut self, rank: usize) -> f64 {
        if rank >= self.discount_cache.len() {
            let old = self.discount_cache.len();
            let mut new = old + DISCOUNT_BLOCK;
            while new <= rank {
                new += DISCOUNT_BLOCK;
            }
            self.discount_cache.extend(
                (old..new).map(|i| 1.0 / ((i + 2) as f64).log2())
            );
        }
        self.discount_cache[rank]
    }


    /// DCG over the top `k` labels of the descending order.
    pub fn ideal_dcg(&mut self, labels: &[usize], k: usize) -> f64 {
        let mut sorted = labels.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        sorted.into_iter()
            .take(k)
            .enumerate()
            .map(|(i, l)| self.gain(l) * self.discount(i))
            .sum::<f64>()
    }


    /// NDCG@k of `labels` in the given order,
    /// with `k = min(cutoff, labels.len())`.
    pub fn score(&mut self, labels: &[usize]) -> NdcgScore {
        let k = self.cutoff.min(labels.len());
        let idcg = self.ideal_dcg(labels, k);

        let dcg = labels[..k].iter()
            .enumerate()
            .map(|(i, &l)| self.gain(l) * self.discount(i))
            .sum::<f64>();

        let ndcg = if dcg < EPS && idcg < EPS { 0.0 } else { dcg / idcg };
        NdcgScore { ndcg, dcg, idcg }
    }


    /// Swap costs of `labels` in the given order.
    ///
    /// With `k = min(cutoff, n)`, the entry `(i, j)`, `i < j`, `i < k`, is
    /// `|(gain_i - gain_j)(discount_i - discount_j) / idcg|`.
    /// Every other entry is `0`, and so is the whole matrix if `idcg = 0`.
    pub fn delta(&mut self, labels: &[usize]) -> DeltaMatrix {
        let n = labels.len();
        let k = self.cutoff.min(n);
        let idcg = self.ideal_dcg(labels, k);

        let mut delta = DeltaMatrix::zeros(n);
        if idcg <= 0.0 {
            return delta;
        }

        for i in 0..k {
            let gain_i = self.gain(labels[i]);
            let discount_i = self.discount(i);
            for j in (i + 1)..n {
                let d = (gain_i - self.gain(labels[j]))
                    * (discount_i - self.discount(j))
                    / idcg;
                delta.set(i, j, d.abs());
            }
        }
        delta
    }
}
