use polars::prelude::*;
use rayon::prelude::*;

use super::feature_struct::*;
use super::sample_view::DatasetView;
use crate::error::{GbdtError, Result};


/// At most this many rows contribute
/// to the candidate list of a numerical feature.
pub const MAX_CANDIDATES_NUMERICAL: usize = 100_000;
/// At most this many rows contribute
/// to the candidate list of a categorical feature.
pub const MAX_CANDIDATES_CATEGORY: usize = 1_024;
/// Two consecutive numerical candidates differ more than this.
const CANDIDATE_GAP: f64 = 1e-3;
/// Default weight of a sample.
pub const DEFAULT_WEIGHT: f64 = 1.0;


/// A single training example `(x, y, w)`.
/// The label `y` is either a continuous target
/// or an integer relevance grade for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub(crate) x: Vec<FeatureValue>,
    pub(crate) y: f64,
    pub(crate) weight: f64,
}


impl Sample {
    /// Construct a sample with weight `1.0`.
    pub fn new(x: Vec<FeatureValue>, y: f64) -> Self {
        Self { x, y, weight: DEFAULT_WEIGHT }
    }


    /// Set the weight of this sample.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }


    /// Feature values.
    #[inline]
    pub fn features(&self) -> &[FeatureValue] {
        &self.x[..]
    }


    /// The label.
    #[inline]
    pub fn label(&self) -> f64 {
        self.y
    }


    /// The label read as a relevance grade.
    #[inline]
    pub fn relevance(&self) -> usize {
        self.y.max(0.0) as usize
    }


    /// The weight.
    #[inline]
    pub fn sample_weight(&self) -> f64 {
        self.weight
    }
}


/// An owned, read-only training set.
/// Besides the samples, `Dataset` holds
/// the sorted candidate split values for each feature.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(super) spec: FeatureSpec,
    pub(super) samples: Vec<Sample>,
    pub(super) candidates: Vec<Vec<FeatureValue>>,
}


impl Dataset {
    /// Returns a builder for the given feature spec.
    pub fn builder(spec: FeatureSpec) -> DatasetBuilder {
        DatasetBuilder::new(spec)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Dataset`.
    /// `f64` columns become numerical features and
    /// integer columns become categorical features.
    pub fn from_dataframe(data: &DataFrame, target: &Series)
        -> Result<Self>
    {
        if target.len() != data.height() {
            return Err(GbdtError::dataset(format!(
                "the target has {} rows, the data has {}",
                target.len(),
                data.height(),
            )));
        }

        let columns = data.get_columns()
            .par_iter()
            .map(column_values)
            .collect::<Result<Vec<_>>>()?;

        let spec = columns.iter()
            .map(|(ty, _)| *ty)
            .collect::<FeatureSpec>();

        let target = target.cast(&DataType::Float64)?;
        let target = target.f64()?
            .into_iter()
            .map(|y| y.unwrap_or(0.0))
            .collect::<Vec<_>>();

        let mut builder = DatasetBuilder::new(spec);
        for (row, y) in target.into_iter().enumerate() {
            let x = columns.iter()
                .map(|(_, values)| values[row])
                .collect::<Vec<_>>();
            builder.push(Sample::new(x, y))?;
        }
        builder.build()
    }


    /// Returns the pair of the number of examples and
    /// the number of features.
    pub fn shape(&self) -> (usize, usize) {
        (self.samples.len(), self.spec.len())
    }


    /// The feature spec.
    pub fn spec(&self) -> &FeatureSpec {
        &self.spec
    }


    /// All samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples[..]
    }


    /// The `idx`-th sample.
    pub fn get(&self, idx: usize) -> &Sample {
        &self.samples[idx]
    }


    /// Candidate split values of every feature.
    pub fn candidates(&self) -> &[Vec<FeatureValue>] {
        &self.candidates[..]
    }


    /// Labels of all samples.
    pub fn target(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.y).collect()
    }


    /// A view over all samples.
    pub fn view(&self) -> DatasetView<'_> {
        let samples = self.samples.iter().collect();
        DatasetView::new(&self.spec, &self.candidates[..], samples)
    }


    /// A view over the samples at `indices`.
    pub fn view_of<I>(&self, indices: I) -> DatasetView<'_>
        where I: IntoIterator<Item = usize>
    {
        let samples = indices.into_iter()
            .map(|i| &self.samples[i])
            .collect();
        DatasetView::new(&self.spec, &self.candidates[..], samples)
    }
}


/// Collects samples and validates them against a spec.
/// `build` computes the candidate split values.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    spec: FeatureSpec,
    samples: Vec<Sample>,
}


impl DatasetBuilder {
    /// Construct an empty builder.
    pub fn new(spec: FeatureSpec) -> Self {
        Self { spec, samples: Vec::new() }
    }


    /// Append a sample.
    /// Fails if the sample does not conform to the feature spec,
    /// or if a numerical value, the label or the weight is not finite.
    pub fn push(&mut self, sample: Sample) -> Result<&mut Self> {
        let row = self.samples.len();
        if sample.x.len() != self.spec.len() {
            return Err(GbdtError::dataset(format!(
                "row {row} has {} features, expected {}",
                sample.x.len(),
                self.spec.len(),
            )));
        }

        let mismatch = sample.x.iter()
            .zip(self.spec.iter())
            .position(|(x, ty)| x.feature_type() != *ty);
        if let Some(k) = mismatch {
            return Err(GbdtError::dataset(format!(
                "row {row}, feature {k} is not {}",
                self.spec.types()[k],
            )));
        }

        let non_finite = sample.x.iter()
            .position(|x| matches!(x, FeatureValue::Numerical(v) if !v.is_finite()));
        if let Some(k) = non_finite {
            return Err(GbdtError::dataset(format!(
                "row {row}, feature {k} is not finite: {}", sample.x[k]
            )));
        }

        if !sample.y.is_finite() {
            return Err(GbdtError::dataset(format!(
                "row {row} has a non-finite label {}", sample.y
            )));
        }

        if !sample.weight.is_finite() || sample.weight < 0.0 {
            return Err(GbdtError::dataset(format!(
                "row {row} has an invalid weight {}", sample.weight
            )));
        }

        self.samples.push(sample);
        Ok(self)
    }


    /// Append many samples.
    pub fn extend<I>(&mut self, samples: I) -> Result<&mut Self>
        where I: IntoIterator<Item = Sample>
    {
        for sample in samples {
            self.push(sample)?;
        }
        Ok(self)
    }


    /// Build a `Dataset`.
    /// This method consumes `self`.
    pub fn build(self) -> Result<Dataset> {
        let Self { spec, samples } = self;
        if samples.is_empty() {
            return Err(GbdtError::dataset("the dataset has no rows"));
        }
        if spec.is_empty() {
            return Err(GbdtError::dataset("the dataset has no features"));
        }

        let candidates = spec.types()
            .par_iter()
            .enumerate()
            .map(|(k, ty)| candidate_values(&samples[..], k, *ty))
            .collect::<Vec<_>>();

        Ok(Dataset { spec, samples, candidates })
    }
}


/// Sorted, deduplicated split candidates of the `index`-th feature.
fn candidate_values(
    samples: &[Sample],
    index: usize,
    feature_type: FeatureType,
) -> Vec<FeatureValue>
{
    match feature_type {
        FeatureType::Numerical => {
            let n = samples.len().min(MAX_CANDIDATES_NUMERICAL);
            let mut values = samples[..n].iter()
                .map(|s| s.x[index].as_f64())
                .collect::<Vec<_>>();
            values.sort_by(f64::total_cmp);

            let mut out = Vec::with_capacity(values.len());
            let mut last = match values.first() {
                Some(first) => first - 2.0 * CANDIDATE_GAP,
                None => return out,
            };
            for x in values {
                if x - last > CANDIDATE_GAP {
                    out.push(FeatureValue::Numerical(x));
                    last = x;
                }
            }
            out
        },
        FeatureType::Category => {
            let n = samples.len().min(MAX_CANDIDATES_CATEGORY);
            let mut values = samples[..n].iter()
                .map(|s| s.x[index].as_i32())
                .collect::<Vec<_>>();
            values.sort_unstable();
            values.dedup();
            values.into_iter()
                .map(FeatureValue::Category)
                .collect()
        },
    }
}


fn column_values(series: &Series) -> Result<(FeatureType, Vec<FeatureValue>)> {
    match series.dtype() {
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64
        | DataType::UInt8 | DataType::UInt16 | DataType::UInt32 => {
            let series = series.cast(&DataType::Int32)?;
            let values = series.i32()?
                .into_iter()
                .map(|c| FeatureValue::Category(c.unwrap_or(0)))
                .collect();
            Ok((FeatureType::Category, values))
        },
        _ => {
            let series = series.cast(&DataType::Float64)?;
            let values = series.f64()?
                .into_iter()
                .map(|x| FeatureValue::Numerical(x.unwrap_or(0.0)))
                .collect();
            Ok((FeatureType::Numerical, values))
        },
    }
}
