use crate::{Dataset, FeatureValue};


/// A trait that defines the behavor of classifier.
/// You only need to implement `confidence` method.
pub trait Classifier {
    /// Computes the confidence that `x` is positive.
    /// This code assumes that
    /// `Classifier::confidence` returns a value in `[0.0, 1.0]`.
    fn confidence(&self, x: &[FeatureValue]) -> f64;


    /// Predicts the label of `x`, `1` or `0`.
    fn predict(&self, x: &[FeatureValue]) -> i64 {
        let conf = self.confidence(x);
        if conf >= 0.5 { 1 } else { 0 }
    }


    /// Computes the confidence of every sample of `dataset`.
    fn confidence_all(&self, dataset: &Dataset) -> Vec<f64> {
        dataset.samples()
            .iter()
            .map(|s| self.confidence(s.features()))
            .collect::<Vec<_>>()
    }


    /// Predicts the labels of `dataset`.
    fn predict_all(&self, dataset: &Dataset) -> Vec<i64>
    {
        dataset.samples()
            .iter()
            .map(|s| self.predict(s.features()))
            .collect::<Vec<_>>()
    }
}


/// A trait that defines the behavor of regressor.
/// You only need to implement `predict` method.
pub trait Regressor {
    /// Predicts the target value of `x`.
    fn predict(&self, x: &[FeatureValue]) -> f64;


    /// Predicts the target values of `dataset`.
    fn predict_all(&self, dataset: &Dataset) -> Vec<f64>
    {
        dataset.samples()
            .iter()
            .map(|s| self.predict(s.features()))
            .collect::<Vec<_>>()
    }
}
