use super::feature_struct::*;
use super::sample_struct::Sample;


/// A borrowed subset of a [`Dataset`](crate::Dataset).
/// Holds references to the feature spec, the candidate lists,
/// and the selected samples. No sample is copied.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    spec: &'a FeatureSpec,
    candidates: &'a [Vec<FeatureValue>],
    samples: Vec<&'a Sample>,
}


impl<'a> DatasetView<'a> {
    pub(crate) fn new(
        spec: &'a FeatureSpec,
        candidates: &'a [Vec<FeatureValue>],
        samples: Vec<&'a Sample>,
    ) -> Self
    {
        Self { spec, candidates, samples }
    }


    /// Number of samples in this view.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }


    /// Returns `true` if this view has no sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }


    /// Number of features.
    #[inline]
    pub fn n_feature(&self) -> usize {
        self.spec.len()
    }


    /// The feature spec.
    #[inline]
    pub fn spec(&self) -> &'a FeatureSpec {
        self.spec
    }


    /// Candidate split values of the `feature`-th feature.
    #[inline]
    pub fn candidates(&self, feature: usize) -> &'a [FeatureValue] {
        &self.candidates[feature][..]
    }


    /// The `row`-th sample of this view.
    #[inline]
    pub fn get(&self, row: usize) -> &'a Sample {
        self.samples[row]
    }


    /// Iterate over the samples of this view.
    pub fn iter(&self) -> impl Iterator<Item = &'a Sample> + '_ {
        self.samples.iter().copied()
    }
}
