//! LambdaMART pseudo-responses.
use crate::Sample;
use crate::weak_learner::PseudoResponse;
use super::ndcg::NdcgScorer;
use super::query_groups::QueryGroups;


/// Pairwise pseudo-responses and second-order weights
/// of the current predictions `fx`.
///
/// Within each group the rows are ranked by descending label
/// (ties keep their input order).
/// Every rank pair `(i, j)` with `label_i > label_j` and a positive swap cost
/// pushes row `i` up and row `j` down by `rho * delta[i, j]`,
/// where `rho = 1 / (1 + exp(fx_i - fx_j))`.
/// Pairs whose ranks both exceed the cutoff are skipped.
pub(crate) fn lambda_gradients(
    samples: &[Sample],
    fx: &[f64],
    groups: &QueryGroups,
    scorer: &mut NdcgScorer,
) -> PseudoResponse
{
    let n_sample = samples.len();
    let cutoff = scorer.cutoff();
    let mut response = vec![0.0; n_sample];
    let mut hessian = vec![0.0; n_sample];

    for range in groups.iter() {
        let mut rows = range.collect::<Vec<_>>();
        rows.sort_by(|&a, &b| {
            samples[b].relevance().cmp(&samples[a].relevance())
        });

        let labels = rows.iter()
            .map(|&r| samples[r].relevance())
            .collect::<Vec<_>>();
        let delta = scorer.delta(&labels[..]);

        let n = rows.len();
        for i in 0..n {
            for j in 0..n {
                if i > cutoff && j > cutoff {
                    break;
                }
                if labels[i] <= labels[j] {
                    continue;
                }
                let d = delta.at(i, j);
                if d <= 0.0 {
                    continue;
                }

                let (ri, rj) = (rows[i], rows[j]);
                let rho = 1.0 / (1.0 + (fx[ri] - fx[rj]).exp());
                let lambda = rho * d;
                let lambda2 = rho * (1.0 - rho) * d;

                response[ri] += lambda;
                response[rj] -= lambda;
                hessian[ri] += lambda2;
                hessian[rj] += lambda2;
            }
        }
    }

    PseudoResponse::with_hessian(response, hessian)
}
