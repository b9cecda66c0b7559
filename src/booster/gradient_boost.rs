mod gbm;
mod train;


pub use gbm::GBDT;
pub use train::{train, train_ranking};
