//! Defines the entropic impurity used by the decision tree.
use crate::common::utils::EPS;
use crate::weak_learner::common::sweep::Accumulate;


/// Weighted counts of the positive/negative samples on a node.
/// A sample is positive if its label is at least `1e-9`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ClassStats {
    pub(crate) positive: f64,
    pub(crate) negative: f64,
}


impl ClassStats {
    #[inline]
    pub(crate) fn of(label: f64, weight: f64) -> Self {
        if label < EPS {
            Self { positive: 0.0, negative: weight }
        } else {
            Self { positive: weight, negative: 0.0 }
        }
    }


    #[inline]
    pub(crate) fn total(&self) -> f64 {
        self.positive + self.negative
    }


    /// Fraction of the positive mass, `0.0` on an empty node.
    #[inline]
    pub(crate) fn positive_rate(&self) -> f64 {
        let total = self.total();
        if total < EPS { 0.0 } else { self.positive / total }
    }


    /// Binary entropy in bits.
    pub(crate) fn entropy(&self) -> f64 {
        let total = self.total();
        if total < EPS {
            return 0.0;
        }

        entropy_part(self.positive, self.positive / total)
            + entropy_part(self.negative, self.negative / total)
    }
}


impl Accumulate for ClassStats {
    #[inline]
    fn merge(&mut self, other: &Self) {
        self.positive += other.positive;
        self.negative += other.negative;
    }


    #[inline]
    fn minus(&self, other: &Self) -> Self {
        Self {
            positive: self.positive - other.positive,
            negative: self.negative - other.negative,
        }
    }
}


// `0 log 0 = 0`.
#[inline]
fn entropy_part(mass: f64, p: f64) -> f64 {
    if mass < EPS { 0.0 } else { -p * p.log2() }
}


/// `H(parent) - (n_L / n) H(L) - (n_R / n) H(R)`.
pub(crate) fn information_gain(
    parent: &ClassStats,
    left: &ClassStats,
    right: &ClassStats,
) -> f64
{
    let n = parent.total();
    if n < EPS {
        return 0.0;
    }
    parent.entropy()
        - left.total() / n * left.entropy()
        - right.total() / n * right.entropy()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_node_has_one_bit() {
        let stats = ClassStats { positive: 2.0, negative: 2.0 };
        assert!((stats.entropy() - 1.0).abs() < 1e-12);
    }


    #[test]
    fn pure_split_recovers_full_entropy() {
        let parent = ClassStats { positive: 2.0, negative: 2.0 };
        let left = ClassStats { positive: 0.0, negative: 2.0 };
        let right = ClassStats { positive: 2.0, negative: 0.0 };
        let gain = information_gain(&parent, &left, &right);
        assert!((gain - 1.0).abs() < 1e-12);
    }
}
