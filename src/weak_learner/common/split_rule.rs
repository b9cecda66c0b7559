//! This file defines split rules for decision tree.
use crate::{FeatureType, FeatureValue};


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LR {
    /// The sample goes to the left child.
    Left,
    /// The sample goes to the right child.
    Right,
}


/// A binary test on one feature.
/// A numerical feature goes left iff `x <= threshold`,
/// a categorical feature goes left iff `x == threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splitter {
    pub(crate) feature: usize,
    pub(crate) threshold: FeatureValue,
}


impl Splitter {
    #[inline]
    pub(crate) fn new(feature: usize, threshold: FeatureValue) -> Self {
        Self { feature, threshold }
    }


    /// Index of the tested feature.
    #[inline]
    pub fn feature(&self) -> usize {
        self.feature
    }


    /// Type of the tested feature.
    #[inline]
    pub fn feature_type(&self) -> FeatureType {
        self.threshold.feature_type()
    }


    /// The threshold.
    #[inline]
    pub fn threshold(&self) -> FeatureValue {
        self.threshold
    }


    /// Defines the splitting.
    #[inline]
    pub fn split(&self, x: &[FeatureValue]) -> LR {
        let value = x[self.feature];

        let left = match self.threshold {
            FeatureValue::Numerical(t) => value.as_f64() <= t,
            FeatureValue::Category(c) => value.as_i32() == c,
        };

        if left { LR::Left } else { LR::Right }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numerical_threshold_is_inclusive() {
        let rule = Splitter::new(0, FeatureValue::Numerical(2.0));
        assert_eq!(rule.split(&[FeatureValue::Numerical(2.0)]), LR::Left);
        assert_eq!(rule.split(&[FeatureValue::Numerical(2.5)]), LR::Right);
    }


    #[test]
    fn category_goes_left_on_equality() {
        let rule = Splitter::new(1, FeatureValue::Category(3));
        let x = [FeatureValue::Numerical(0.0), FeatureValue::Category(3)];
        assert_eq!(rule.split(&x), LR::Left);
        let x = [FeatureValue::Numerical(0.0), FeatureValue::Category(1)];
        assert_eq!(rule.split(&x), LR::Right);
    }
}
