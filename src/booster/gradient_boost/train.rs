use crate::{
    Booster,
    Dataset,
    Ensemble,
    RegressionTreeBuilder,
    TreeParam,
};
use crate::error::Result;
use crate::logging::ProgressLogger;
use super::gbm::GBDT;


/// Train an ensemble on `dataset` with the pointwise loss of `param`.
///
/// Fails before the first round if `dataset` is degenerate
/// or `param` is invalid.
/// The ranking loss needs query groups, see [`train_ranking`].
pub fn train(dataset: &Dataset, param: &TreeParam) -> Result<Ensemble> {
    let booster = GBDT::init(dataset, param)?;
    run(booster, param)
}


/// Train a LambdaMART ensemble.
/// `group_sizes` partitions the rows of `dataset`
/// into contiguous query groups, in order.
pub fn train_ranking(
    dataset: &Dataset,
    group_sizes: &[usize],
    param: &TreeParam,
) -> Result<Ensemble>
{
    let booster = GBDT::init(dataset, param)?
        .query_groups(group_sizes)?;
    run(booster, param)
}


fn run(mut booster: GBDT<'_>, param: &TreeParam) -> Result<Ensemble> {
    let weak_learner = RegressionTreeBuilder::from_param(param).build()?;
    if param.verbose {
        ProgressLogger::new(&mut booster, &weak_learner).run()
    } else {
        booster.run(&weak_learner)
    }
}
