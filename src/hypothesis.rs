//! Provides the hypothesis traits and the boosted ensemble.
mod hypothesis_traits;
mod ensemble;
mod model_json;


pub use hypothesis_traits::{Classifier, Regressor};
pub use ensemble::Ensemble;
