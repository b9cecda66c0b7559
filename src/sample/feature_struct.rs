use serde::{Serialize, Deserialize};

use std::fmt;
use std::cmp::Ordering;
use std::slice::Iter;


/// The type of a feature.
/// A numerical feature is split by `x <= threshold`,
/// a categorical one by `x == threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    /// Real-valued feature.
    #[serde(rename = "numerical")]
    Numerical,
    /// Integer-coded categorical feature.
    #[serde(rename = "category")]
    Category,
}


impl FeatureType {
    /// The tag used in the model file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numerical => "numerical",
            Self::Category => "category",
        }
    }


    /// Parse the tag used in the model file.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "numerical" => Some(Self::Numerical),
            "category" => Some(Self::Category),
            _ => None,
        }
    }
}


impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


/// A feature value.
/// Comparison is defined per tag;
/// values of different tags are incomparable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FeatureValue {
    /// Value of a numerical feature.
    Numerical(f64),
    /// Value of a categorical feature.
    Category(i32),
}


impl FeatureValue {
    /// Returns the type tag of this value.
    #[inline]
    pub fn feature_type(&self) -> FeatureType {
        match self {
            Self::Numerical(_) => FeatureType::Numerical,
            Self::Category(_) => FeatureType::Category,
        }
    }


    /// Returns the value as `f64`.
    /// A category code is widened.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Numerical(x) => x,
            Self::Category(c) => c as f64,
        }
    }


    /// Returns the value as a category code.
    /// A numerical value is truncated.
    #[inline]
    pub fn as_i32(&self) -> i32 {
        match *self {
            Self::Numerical(x) => x as i32,
            Self::Category(c) => c,
        }
    }
}


impl PartialEq for FeatureValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Numerical(a), Self::Numerical(b)) => a == b,
            (Self::Category(a), Self::Category(b)) => a == b,
            _ => false,
        }
    }
}


impl PartialOrd for FeatureValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Numerical(a), Self::Numerical(b)) => a.partial_cmp(b),
            (Self::Category(a), Self::Category(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}


impl From<f64> for FeatureValue {
    #[inline]
    fn from(x: f64) -> Self {
        Self::Numerical(x)
    }
}


impl From<i32> for FeatureValue {
    #[inline]
    fn from(c: i32) -> Self {
        Self::Category(c)
    }
}


impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numerical(x) => write!(f, "{x}"),
            Self::Category(c) => write!(f, "{c}"),
        }
    }
}


/// The ordered sequence of feature types,
/// shared by every sample and every split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSpec(Vec<FeatureType>);


impl FeatureSpec {
    /// Construct a new spec from the given types.
    pub fn new(types: Vec<FeatureType>) -> Self {
        Self(types)
    }


    /// A spec with `n_feature` numerical features.
    pub fn numerical(n_feature: usize) -> Self {
        Self(vec![FeatureType::Numerical; n_feature])
    }


    /// Number of features.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if there is no feature.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }


    /// The type of `index`-th feature.
    #[inline]
    pub fn get(&self, index: usize) -> Option<FeatureType> {
        self.0.get(index).copied()
    }


    /// Iterate over the feature types.
    pub fn iter(&self) -> Iter<'_, FeatureType> {
        self.0.iter()
    }


    /// Returns the feature types as a slice.
    pub fn types(&self) -> &[FeatureType] {
        &self.0[..]
    }
}


impl FromIterator<FeatureType> for FeatureSpec {
    fn from_iter<I: IntoIterator<Item = FeatureType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
