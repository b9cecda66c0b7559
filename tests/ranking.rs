use approx::assert_relative_eq;

use minigbdt::prelude::*;
use minigbdt::ranking::{DeltaMatrix, NdcgReport};


fn dcg(labels: &[usize]) -> f64 {
    labels.iter()
        .enumerate()
        .map(|(i, &l)| (2_f64.powi(l as i32) - 1.0) / ((i + 2) as f64).log2())
        .sum()
}


#[test]
fn gain_and_discount() {
    let mut scorer = NdcgScorer::new(3);
    assert_eq!(scorer.gain(0), 0.0);
    assert_eq!(scorer.gain(1), 1.0);
    assert_eq!(scorer.gain(2), 3.0);
    assert_eq!(scorer.discount(0), 1.0);
    assert_relative_eq!(scorer.discount(1), 1.0 / 3_f64.log2());
}


#[test]
fn ideal_dcg_takes_the_best_labels() {
    let labels = [3, 2, 3, 0, 1, 2];
    let mut scorer = NdcgScorer::new(3);

    let idcg = scorer.ideal_dcg(&labels, 3);
    assert_relative_eq!(idcg, dcg(&[3, 3, 2]), max_relative = 1e-12);

    let score = scorer.score(&labels);
    assert_relative_eq!(score.idcg, idcg, max_relative = 1e-12);
    assert_relative_eq!(score.dcg, dcg(&[3, 2, 3]), max_relative = 1e-12);
    assert_relative_eq!(score.ndcg, score.dcg / score.idcg, max_relative = 1e-12);
    assert!(score.ndcg < 1.0);
}


#[test]
fn ideal_order_scores_one() {
    let mut scorer = NdcgScorer::new(10);
    let score = scorer.score(&[4, 2, 2, 1, 0]);
    assert_relative_eq!(score.ndcg, 1.0, max_relative = 1e-12);
}


#[test]
fn delta_matrix_holds_the_swap_costs() {
    let labels = [2, 0, 1];
    let mut scorer = NdcgScorer::new(2);
    let delta: DeltaMatrix = scorer.delta(&labels);
    let idcg = dcg(&[2, 1]);

    let d = |i: usize, j: usize, gi: f64, gj: f64| {
        let di = 1.0 / ((i + 2) as f64).log2();
        let dj = 1.0 / ((j + 2) as f64).log2();
        ((gi - gj) * (di - dj) / idcg).abs()
    };

    assert_eq!(delta.size(), 3);
    assert_relative_eq!(delta.at(0, 1), d(0, 1, 3.0, 0.0), max_relative = 1e-12);
    assert_relative_eq!(delta.at(0, 2), d(0, 2, 3.0, 1.0), max_relative = 1e-12);
    assert_relative_eq!(delta.at(1, 2), d(1, 2, 0.0, 1.0), max_relative = 1e-12);
    assert_eq!(delta.at(2, 1), delta.at(1, 2));
    assert_eq!(delta.at(1, 1), 0.0);

    // Beyond the cutoff only the first `k` rows have costs.
    let mut scorer = NdcgScorer::new(1);
    let delta = scorer.delta(&labels);
    assert_eq!(delta.at(1, 2), 0.0);
    assert!(delta.at(0, 2) > 0.0);
}


#[test]
fn zero_ideal_dcg_gives_zero_costs() {
    let mut scorer = NdcgScorer::new(5);
    let delta = scorer.delta(&[0, 0, 0, 0]);
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(delta.at(i, j), 0.0);
        }
    }
}


// Three queries of five documents, the grade grows with x0.
fn ranking_data() -> (Dataset, Vec<usize>) {
    let mut builder = Dataset::builder(FeatureSpec::numerical(2));
    for q in 0..3 {
        for d in 0..5 {
            let x0 = ((d * 3 + q) % 5) as f64;
            let x1 = (q * 5 + d) as f64;
            let grade = (x0 / 2.0).floor();
            let x = vec![FeatureValue::Numerical(x0), FeatureValue::Numerical(x1)];
            builder.push(Sample::new(x, grade)).unwrap();
        }
    }
    (builder.build().unwrap(), vec![5, 5, 5])
}


#[test]
fn lambdamart_learns_the_order() {
    let (dataset, sizes) = ranking_data();
    let param = TreeParam::default()
        .loss(LossType::Ranking)
        .sample_rate(1.0)
        .tree_number(20)
        .min_values_in_leaf(1)
        .ndcg_cutoff(5);

    let model = train_ranking(&dataset, &sizes, &param).unwrap();
    assert_eq!(model.len(), 20);

    let groups = QueryGroups::from_sizes(&sizes, 15).unwrap();
    let report: NdcgReport = evaluate_ndcg(&model, &dataset, &groups, 5).unwrap();
    assert_eq!(report.per_query.len(), 3);
    assert_relative_eq!(report.mean, 1.0, max_relative = 1e-9);
}


#[test]
fn ranking_rejects_bad_inputs() {
    let (dataset, _) = ranking_data();
    let param = TreeParam::default()
        .loss(LossType::Ranking)
        .sample_rate(1.0);

    let res = train_ranking(&dataset, &[5, 5], &param);
    assert!(matches!(res, Err(GbdtError::DegenerateDataset(_))));

    let res = train_ranking(&dataset, &[], &param);
    assert!(matches!(res, Err(GbdtError::DegenerateDataset(_))));

    let res = train_ranking(&dataset, &[5, 5, 5], &param.clone().sample_rate(0.8));
    assert!(matches!(res, Err(GbdtError::InvalidConfig(_))));

    let mut builder = Dataset::builder(FeatureSpec::numerical(1));
    builder.push(Sample::new(vec![FeatureValue::Numerical(0.0)], 1.5)).unwrap();
    let fractional = builder.build().unwrap();
    let res = train_ranking(&fractional, &[1], &param);
    assert!(matches!(res, Err(GbdtError::DegenerateDataset(_))));
}


#[test]
fn evaluation_checks_the_groups() {
    let (dataset, sizes) = ranking_data();
    let param = TreeParam::default()
        .loss(LossType::Ranking)
        .sample_rate(1.0)
        .tree_number(2);
    let model = train_ranking(&dataset, &sizes, &param).unwrap();

    let other = QueryGroups::from_sizes(&[5, 5], 10).unwrap();
    let res = evaluate_ndcg(&model, &dataset, &other, 5);
    assert!(matches!(res, Err(GbdtError::InvalidConfig(_))));
}


#[test]
fn relevance_grades_are_capped() {
    let param = TreeParam::default()
        .loss(LossType::Ranking)
        .sample_rate(1.0);

    let mut builder = Dataset::builder(FeatureSpec::numerical(1));
    builder.push(Sample::new(vec![FeatureValue::Numerical(0.0)], 31.0)).unwrap();
    builder.push(Sample::new(vec![FeatureValue::Numerical(1.0)], 32.0)).unwrap();
    let dataset = builder.build().unwrap();

    let res = train_ranking(&dataset, &[2], &param);
    assert!(matches!(res, Err(GbdtError::DegenerateDataset(_))));
}


#[test]
fn ranking_booster_needs_a_ranking_tree() {
    let (dataset, sizes) = ranking_data();
    let param = TreeParam::default()
        .loss(LossType::Ranking)
        .sample_rate(1.0)
        .tree_number(2);

    let ls_tree = RegressionTreeBuilder::new().build().unwrap();
    let mut booster = GBDT::init(&dataset, &param)
        .unwrap()
        .query_groups(&sizes)
        .unwrap();
    let res = booster.run(&ls_tree);
    assert!(matches!(res, Err(GbdtError::InvalidConfig(_))));
}
