//! Provides the gradient boosted regression trees ([`GBDT`]).
use log::{debug, info, warn};
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::{
    Booster,
    Dataset,
    Ensemble,
    Regressor,
    TreeParam,
    WeakLearner,
};
use crate::common::checker;
use crate::error::{GbdtError, Result};
use crate::logging::RoundLoss;
use crate::ranking::{lambda::lambda_gradients, NdcgScorer, QueryGroups};
use crate::weak_learner::{LossType, PseudoResponse, RegressionTreeRegressor};

use std::ops::ControlFlow;


/// Gradient boosting over regression trees,
/// following Friedman, 2001 for the pointwise losses
/// and LambdaMART for the ranking loss.
///
/// Each round fits a tree to the pseudo-response of the current
/// predictions `fx` and adds it to the ensemble.
/// The learning rate is applied by the tree itself.
///
/// # Example
///
/// ```no_run
/// use minigbdt::prelude::*;
///
/// # fn main() -> minigbdt::Result<()> {
/// # let dataset: Dataset = unimplemented!();
/// let param = TreeParam::default()
///     .tree_number(100)
///     .loss(LossType::Lad);
///
/// let weak_learner = RegressionTreeBuilder::from_param(&param).build()?;
/// let mut booster = GBDT::init(&dataset, &param)?;
/// let model = booster.run(&weak_learner)?;
///
/// let predictions = model.predict_all(&dataset);
/// println!("loss per round: {:?}", booster.loss_history());
/// # Ok(())
/// # }
/// ```
pub struct GBDT<'a> {
    // Training data
    dataset: &'a Dataset,


    loss: LossType,
    tree_number: usize,
    sample_rate: f64,
    seed: u64,
    rng: StdRng,


    // Query groups and the NDCG scorer of the ranking loss.
    groups: Option<QueryGroups>,
    scorer: NdcgScorer,


    // Base score and the current prediction of every row.
    y0: f64,
    fx: Vec<f64>,


    trees: Vec<RegressionTreeRegressor>,
    loss_history: Vec<f64>,
}


impl<'a> GBDT<'a> {
    /// Initialize the `GBDT`.
    /// Fails if `dataset` is degenerate or `param` is invalid.
    pub fn init(dataset: &'a Dataset, param: &TreeParam) -> Result<Self> {
        checker::check_dataset(dataset)?;
        param.validate()?;

        let n_sample = dataset.shape().0;
        Ok(Self {
            dataset,
            loss: param.loss,
            tree_number: param.tree_number,
            sample_rate: param.sample_rate,
            seed: param.seed,
            rng: StdRng::seed_from_u64(param.seed),

            groups: None,
            scorer: NdcgScorer::new(param.ndcg_cutoff),

            y0: 0.0,
            fx: vec![0.0; n_sample],

            trees: Vec::new(),
            loss_history: Vec::new(),
        })
    }


    /// Set the query groups of the ranking loss.
    /// `sizes` partitions the rows into contiguous groups.
    pub fn query_groups(mut self, sizes: &[usize]) -> Result<Self> {
        checker::check_relevance_labels(self.dataset)?;
        let groups = QueryGroups::from_sizes(sizes, self.dataset.shape().0)?;
        self.groups = Some(groups);
        Ok(self)
    }


    /// The total training loss after each round.
    /// Empty for the ranking loss.
    pub fn loss_history(&self) -> &[f64] {
        &self.loss_history[..]
    }


    /// The current predictions on the training rows.
    pub fn predictions(&self) -> &[f64] {
        &self.fx[..]
    }


    // Rows of the current round.
    // Each row is kept with probability `sample_rate`.
    fn sample_rows(&mut self) -> Vec<usize> {
        let n_sample = self.dataset.shape().0;
        if self.sample_rate >= 1.0 {
            return (0..n_sample).collect();
        }

        let rate = self.sample_rate;
        let rows = (0..n_sample)
            .filter(|_| self.rng.gen::<f64>() < rate)
            .collect::<Vec<_>>();

        if rows.is_empty() {
            debug!("the sampled round is empty, using every row");
            return (0..n_sample).collect();
        }
        rows
    }


    // Pseudo-response of `rows` against the current predictions.
    fn pseudo_response(&mut self, rows: &[usize]) -> Result<PseudoResponse> {
        let samples = self.dataset.samples();
        if self.loss == LossType::Ranking {
            let groups = self.groups.as_ref()
                .ok_or_else(|| GbdtError::config(
                    "the ranking loss needs query groups"
                ))?;
            let work = lambda_gradients(
                samples, &self.fx[..], groups, &mut self.scorer
            );
            return Ok(work);
        }

        let response = rows.iter()
            .map(|&i| {
                self.loss.response(samples[i].label(), self.fx[i])
                    .unwrap_or(0.0)
            })
            .collect::<Vec<_>>();
        Ok(PseudoResponse::new(response))
    }
}


impl Booster<RegressionTreeRegressor> for GBDT<'_> {
    type Output = Ensemble;


    fn name(&self) -> &str {
        "Gradient Boosted Decision Trees"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_sample, n_feature) = self.dataset.shape();
        let mut info = Vec::from([
            ("# of examples", format!("{n_sample}")),
            ("# of features", format!("{n_feature}")),
            ("Loss", format!("{}", self.loss)),
            ("# of trees", format!("{}", self.tree_number)),
            ("Sample rate", format!("{}", self.sample_rate)),
            ("Seed", format!("{}", self.seed)),
        ]);
        if let Some(groups) = self.groups.as_ref() {
            info.push(("# of queries", format!("{}", groups.len())));
            info.push(("NDCG cutoff", format!("{}", self.scorer.cutoff())));
        }
        Some(info)
    }


    fn preprocess<W>(
        &mut self,
        weak_learner: &W,
    ) -> Result<()>
        where W: WeakLearner<Hypothesis = RegressionTreeRegressor>
    {
        if self.loss == LossType::Ranking && self.groups.is_none() {
            return Err(GbdtError::config(
                "the ranking loss needs query groups"
            ));
        }

        match weak_learner.loss() {
            Some(loss) if loss == self.loss => {},
            Some(loss) => {
                return Err(GbdtError::config(format!(
                    "the booster uses the {} but `{}` uses the {loss}",
                    self.loss, weak_learner.name(),
                )));
            },
            None => {
                return Err(GbdtError::config(format!(
                    "`{}` does not tell its leaf rule, \
                     the {} cannot be checked against it",
                    weak_learner.name(), self.loss,
                )));
            },
        }

        let n_sample = self.dataset.shape().0;
        self.y0 = self.loss.init(self.dataset);
        self.fx = vec![self.y0; n_sample];

        self.rng = StdRng::seed_from_u64(self.seed);
        self.trees = Vec::with_capacity(self.tree_number);
        self.loss_history = Vec::with_capacity(self.tree_number);

        info!("{} rounds of the {} loss, y0 = {}", self.tree_number, self.loss, self.y0);
        Ok(())
    }


    fn boost<W>(
        &mut self,
        weak_learner: &W,
        iteration: usize,
    ) -> Result<ControlFlow<usize>>
        where W: WeakLearner<Hypothesis = RegressionTreeRegressor>,
    {
        if self.tree_number < iteration {
            return Ok(ControlFlow::Break(self.tree_number));
        }

        let rows = self.sample_rows();
        let work = self.pseudo_response(&rows[..])?;
        let view = self.dataset.view_of(rows.iter().copied());

        let tree = weak_learner.produce(&view, &work);


        // Every row is updated, sampled or not.
        self.fx.par_iter_mut()
            .zip(self.dataset.samples().par_iter())
            .for_each(|(f, s)| { *f += tree.predict(s.features()); });
        self.trees.push(tree);


        if let Some(loss) = self.loss.total_loss(self.dataset.samples(), &self.fx[..]) {
            info!("round {iteration}: {} loss = {loss}", self.loss);
            self.loss_history.push(loss);
        } else {
            info!("round {iteration}: done");
        }

        Ok(ControlFlow::Continue(()))
    }


    fn postprocess<W>(
        &mut self,
        _weak_learner: &W,
    ) -> Result<Self::Output>
        where W: WeakLearner<Hypothesis = RegressionTreeRegressor>
    {
        if self.sample_rate != 1.0 {
            warn!(
                "trees are fit on sampled rows (sample_rate = {}), \
                 feature importance may be biased",
                self.sample_rate,
            );
        }

        let trees = std::mem::take(&mut self.trees);
        Ok(Ensemble::new(self.dataset.spec().clone(), self.y0, trees))
    }
}


impl RoundLoss for GBDT<'_> {
    fn round_loss(&self) -> Option<f64> {
        if self.loss == LossType::Ranking {
            return None;
        }
        self.loss_history.last().copied()
    }
}
