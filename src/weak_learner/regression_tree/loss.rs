//! Defines the loss functions of the gradient boosting.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::{Dataset, Sample};
use crate::common::utils::*;
use crate::error::{GbdtError, Result};
use crate::weak_learner::common::{
    split_rule::Splitter,
    sweep::{best_cut, Accumulate},
    train_node::{NodeContext, SplitInfo},
};


/// The type of loss (error) function.
/// Resolved once per training run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossType {
    /// Least squares.
    #[default]
    Ls,


    /// Least absolute deviation.
    Lad,


    /// Two-class logistic likelihood.
    /// Labels `0/1` (or `-1/+1`) are read as `y = -1/+1`.
    Logistic,


    /// LambdaMART with the NDCG swap cost.
    Ranking,
}


impl LossType {
    /// The tag of this loss.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ls => "ls",
            Self::Lad => "lad",
            Self::Logistic => "logistic",
            Self::Ranking => "ranking",
        }
    }
}


impl fmt::Display for LossType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loss = match self {
            Self::Ls => "LS (Least Squared) loss",
            Self::Lad => "LAD (Least Absolute Deviation) loss",
            Self::Logistic => "Logistic loss",
            Self::Ranking => "LambdaMART (NDCG) loss",
        };
        write!(f, "{loss}")
    }
}


impl FromStr for LossType {
    type Err = GbdtError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ls" => Ok(Self::Ls),
            "lad" => Ok(Self::Lad),
            "logistic" => Ok(Self::Logistic),
            "ranking" => Ok(Self::Ranking),
            _ => Err(GbdtError::config(format!("unknown loss `{s}`"))),
        }
    }
}


/// Maps a `0/1` or `-1/+1` label to `-1/+1`.
#[inline(always)]
pub(crate) fn signed_label(y: f64) -> f64 {
    if y > 0.0 { 1.0 } else { -1.0 }
}


/// Clamp of the mean signed label in the logistic base score.
const LOGISTIC_MEAN_BOUND: f64 = 1.0 - EPS;


impl LossType {
    /// The base score `y0` every prediction starts from.
    pub(crate) fn init(&self, dataset: &Dataset) -> f64 {
        let samples = dataset.samples();
        match self {
            Self::Ls | Self::Ranking => {
                weighted_mean(samples.iter().map(|s| (s.y, s.weight)))
            },
            Self::Lad => {
                let pairs = samples.iter()
                    .map(|s| (s.y, s.weight))
                    .collect();
                weighted_median(pairs)
            },
            Self::Logistic => {
                let mean = weighted_mean(
                    samples.iter().map(|s| (signed_label(s.y), s.weight))
                );
                let mean = mean.clamp(-LOGISTIC_MEAN_BOUND, LOGISTIC_MEAN_BOUND);
                0.5 * ((1.0 + mean) / (1.0 - mean)).ln()
            },
        }
    }


    /// The pseudo-response of one sample.
    /// The ranking loss has no pointwise response and returns `None`.
    #[inline]
    pub(crate) fn response(&self, y: f64, fx: f64) -> Option<f64> {
        match self {
            Self::Ls => Some(y - fx),
            Self::Lad => Some(sign(y - fx)),
            Self::Logistic => {
                let y = signed_label(y);
                Some(2.0 * y / (1.0 + (2.0 * y * fx).exp()))
            },
            Self::Ranking => None,
        }
    }


    /// Training loss of the current predictions `fx`.
    /// The ranking loss has no total loss.
    pub(crate) fn total_loss(&self, samples: &[Sample], fx: &[f64])
        -> Option<f64>
    {
        let pairs = samples.iter().zip(fx);
        match self {
            Self::Ls => {
                let loss = pairs.map(|(s, f)| s.weight * (s.y - f).powi(2))
                    .sum::<f64>();
                Some(loss)
            },
            Self::Lad => {
                let loss = pairs.map(|(s, f)| s.weight * (s.y - f).abs())
                    .sum::<f64>();
                Some(loss)
            },
            Self::Logistic => {
                let loss = pairs.map(|(s, f)| {
                        let y = signed_label(s.y);
                        s.weight * (-2.0 * y * f).exp().ln_1p()
                    })
                    .sum::<f64>();
                Some(loss)
            },
            Self::Ranking => None,
        }
    }


    /// The value of a leaf holding the rows of `ctx`.
    /// Every loss returns `0.0` for an empty leaf.
    pub(crate) fn leaf_value(&self, ctx: &NodeContext<'_, '_>) -> f64 {
        let rows = ctx.rows();
        match self {
            Self::Ls => {
                weighted_mean(
                    rows.iter().map(|&r| (ctx.response(r), ctx.weight(r)))
                )
            },
            Self::Lad => {
                let pairs = rows.iter()
                    .map(|&r| (ctx.response(r), ctx.weight(r)))
                    .collect();
                weighted_median(pairs)
            },
            Self::Logistic => {
                let (num, den) = rows.iter()
                    .fold((0.0, 0.0), |(num, den), &r| {
                        let w = ctx.weight(r);
                        let z = ctx.response(r);
                        let a = z.abs();
                        (num + z * w, den + a * (2.0 - a) * w)
                    });
                if den.abs() < EPS {
                    0.0
                } else {
                    (num / den).clamp(-1.0, 1.0)
                }
            },
            Self::Ranking => {
                let (num, den) = rows.iter()
                    .fold((0.0, 0.0), |(num, den), &r| {
                        (num + ctx.response(r), den + ctx.hessian(r))
                    });
                if den < EPS { 0.0 } else { num / den }
            },
        }
    }


    /// Find the split minimizing the weighted squared loss
    /// `Σ w (response - side mean)^2`.
    ///
    /// The split is chosen by the squared loss for every loss type.
    /// The reported side values follow the leaf rule of `self`,
    /// so LAD reports the side medians
    /// and logistic reports the clamped Newton steps.
    pub(crate) fn best_split(&self, ctx: &NodeContext<'_, '_>)
        -> Option<SplitInfo>
    {
        let stat = |row: usize| {
            let w = ctx.weight(row);
            let r = ctx.response(row);
            SquaredStats { w, wr: w * r, wrr: w * r * r }
        };
        let cut = best_cut(
            ctx,
            None,
            f64::MAX,
            stat,
            |left, right| left.loss() + right.loss(),
        )?;

        let mut parent = SquaredStats::default();
        parent.merge(&cut.left);
        parent.merge(&cut.right);

        let rule = Splitter::new(cut.feature, cut.threshold);
        let (left_value, right_value) = match self {
            Self::Ls => (cut.left.mean(), cut.right.mean()),
            _ => {
                let (lrows, rrows) = ctx.partition(&rule);
                (
                    self.leaf_value(&ctx.with_rows(&lrows[..])),
                    self.leaf_value(&ctx.with_rows(&rrows[..])),
                )
            },
        };

        Some(SplitInfo {
            rule,
            left_value,
            right_value,
            gain: parent.loss() - cut.score,
        })
    }
}


/// Sufficient statistics of the weighted squared loss on one side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SquaredStats {
    w: f64,
    wr: f64,
    wrr: f64,
}


impl SquaredStats {
    /// Weighted mean of the response, `0.0` on an empty side.
    #[inline]
    fn mean(&self) -> f64 {
        if self.w < EPS { 0.0 } else { self.wr / self.w }
    }


    /// `Σ w (r - mean)^2`.
    #[inline]
    fn loss(&self) -> f64 {
        let m = self.mean();
        self.wrr - 2.0 * m * self.wr + m * m * self.w
    }
}


impl Accumulate for SquaredStats {
    #[inline]
    fn merge(&mut self, other: &Self) {
        self.w += other.w;
        self.wr += other.wr;
        self.wrr += other.wrr;
    }


    #[inline]
    fn minus(&self, other: &Self) -> Self {
        Self {
            w: self.w - other.w,
            wr: self.wr - other.wr,
            wrr: self.wrr - other.wrr,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_loss_tags() {
        assert_eq!("lad".parse::<LossType>().unwrap(), LossType::Lad);
        assert!("huber".parse::<LossType>().is_err());
    }


    #[test]
    fn lad_response_of_zero_residual_is_positive() {
        assert_eq!(LossType::Lad.response(1.0, 1.0), Some(1.0));
        assert_eq!(LossType::Ranking.response(1.0, 0.0), None);
    }


    #[test]
    fn logistic_response_at_zero_is_label() {
        let r = LossType::Logistic.response(1.0, 0.0).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        let r = LossType::Logistic.response(0.0, 0.0).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }


    #[test]
    fn squared_loss_of_constant_side_is_zero() {
        let mut stats = SquaredStats::default();
        for _ in 0..3 {
            stats.merge(&SquaredStats { w: 2.0, wr: 2.0 * 1.5, wrr: 2.0 * 2.25 });
        }
        assert!(stats.loss().abs() < 1e-12);
        assert!((stats.mean() - 1.5).abs() < 1e-12);
    }
}
