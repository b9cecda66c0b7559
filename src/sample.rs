//! Typed samples, the owned training set, and borrowed views over it.
pub(crate) mod feature_struct;
pub(crate) mod sample_struct;
pub(crate) mod sample_view;


pub use feature_struct::{FeatureType, FeatureValue, FeatureSpec};
pub use sample_struct::{
    Sample,
    Dataset,
    DatasetBuilder,
    MAX_CANDIDATES_NUMERICAL,
    MAX_CANDIDATES_CATEGORY,
};
pub use sample_view::DatasetView;
