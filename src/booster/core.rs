//! Provides `Booster` trait.
use crate::WeakLearner;
use crate::error::Result;

use std::ops::ControlFlow;


/// The trait [`Booster`](Booster) defines the standard framework of Boosting.
///
/// You need to implement [`Booster::preprocess`](Booster::preprocess),
/// [`Booster::boost`](Booster::boost),
/// and [`Booster::postprocess`](Booster::postprocess)
/// to write a new boosting algorithm.
pub trait Booster<F> {
    /// The combined hypothesis produced by [`Booster::run`].
    type Output;


    /// Returns the name of the boosting algorithm.
    fn name(&self) -> &str;


    /// Returns the settings of the boosting algorithm
    /// as `(key, value)` pairs.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// A main function that runs boosting algorithm.
    /// A failing round aborts the whole run.
    fn run<W>(
        &mut self,
        weak_learner: &W,
    ) -> Result<Self::Output>
        where W: WeakLearner<Hypothesis = F>
    {
        self.preprocess(weak_learner)?;

        let flow = (1..).try_for_each(|iter| {
            match self.boost(weak_learner, iter) {
                Ok(ControlFlow::Continue(())) => ControlFlow::Continue(()),
                Ok(ControlFlow::Break(_)) => ControlFlow::Break(Ok(())),
                Err(e) => ControlFlow::Break(Err(e)),
            }
        });
        if let ControlFlow::Break(Err(e)) = flow {
            return Err(e);
        }

        self.postprocess(weak_learner)
    }


    /// Pre-processing for `self`.
    /// As you can see in [`Booster::run`](Booster::run),
    /// this method is called before the boosting process.
    fn preprocess<W>(
        &mut self,
        weak_learner: &W,
    ) -> Result<()>
        where W: WeakLearner<Hypothesis = F>;


    /// Boosting step per iteration.
    /// This method returns
    /// `ControlFlow::Continue(())` while there are rounds left,
    /// `ControlFlow::Break(terminated_iter)` otherwise.
    fn boost<W>(
        &mut self,
        weak_learner: &W,
        iteration: usize,
    ) -> Result<ControlFlow<usize>>
        where W: WeakLearner<Hypothesis = F>;


    /// Post-processing.
    /// This method returns the combined hypothesis.
    fn postprocess<W>(
        &mut self,
        weak_learner: &W,
    ) -> Result<Self::Output>
        where W: WeakLearner<Hypothesis = F>;
}
