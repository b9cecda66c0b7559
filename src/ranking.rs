//! NDCG scoring and the pairwise LambdaMART responses.
mod delta_matrix;
mod ndcg;
mod query_groups;
pub(crate) mod lambda;
mod evaluation;


pub use delta_matrix::DeltaMatrix;
pub use ndcg::{MAX_RELEVANCE, NdcgScore, NdcgScorer};
pub use query_groups::QueryGroups;
pub use evaluation::{evaluate_ndcg, NdcgReport};
