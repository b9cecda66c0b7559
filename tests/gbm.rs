use approx::assert_relative_eq;

use minigbdt::prelude::*;
use minigbdt::logging::ProgressLogger;
use minigbdt::weak_learner::Node;


// y = 3 x0 + (x1 == 2 ? 5 : 0) + small noise,
// x0 numerical and x1 categorical.
fn regression_data() -> Dataset {
    let spec = FeatureSpec::new(vec![FeatureType::Numerical, FeatureType::Category]);
    let mut builder = Dataset::builder(spec);
    for i in 0..60 {
        let x0 = i as f64 / 10.0;
        let x1 = (i % 3) as i32;
        let noise = ((i * 7) % 5) as f64 / 50.0;
        let y = 3.0 * x0 + if x1 == 2 { 5.0 } else { 0.0 } + noise;
        let x = vec![FeatureValue::Numerical(x0), FeatureValue::Category(x1)];
        builder.push(Sample::new(x, y)).unwrap();
    }
    builder.build().unwrap()
}


fn classification_data() -> Dataset {
    let mut builder = Dataset::builder(FeatureSpec::numerical(2));
    for i in 0..40 {
        let x0 = i as f64;
        let x1 = ((i * 13) % 7) as f64;
        let y = if x0 + x1 > 22.0 { 1.0 } else { 0.0 };
        let x = vec![FeatureValue::Numerical(x0), FeatureValue::Numerical(x1)];
        builder.push(Sample::new(x, y)).unwrap();
    }
    builder.build().unwrap()
}


fn squared_error(model: &Ensemble, dataset: &Dataset) -> f64 {
    model.predict_all(dataset)
        .into_iter()
        .zip(dataset.target())
        .map(|(p, y)| (y - p).powi(2))
        .sum::<f64>()
}


#[test]
fn ls_loss_never_increases_without_sampling() {
    let dataset = regression_data();
    let param = TreeParam::default()
        .tree_number(30)
        .sample_rate(1.0)
        .min_values_in_leaf(2)
        .max_level(3);

    let weak_learner = RegressionTreeBuilder::from_param(&param).build().unwrap();
    let mut booster = GBDT::init(&dataset, &param).unwrap();
    let model = booster.run(&weak_learner).unwrap();

    let history = booster.loss_history();
    assert_eq!(history.len(), 30);
    for pair in history.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "{} -> {}", pair[0], pair[1]);
    }

    assert_eq!(model.len(), 30);
    assert_relative_eq!(
        squared_error(&model, &dataset),
        history[history.len() - 1],
        max_relative = 1e-9,
    );
}


#[test]
fn base_score_is_the_weighted_mean() {
    let dataset = regression_data();
    let param = TreeParam::default().tree_number(0).sample_rate(1.0);
    let model = train(&dataset, &param).unwrap();

    let mean = dataset.target().iter().sum::<f64>() / 60.0;
    assert!(model.is_empty());
    assert_relative_eq!(model.y0(), mean, max_relative = 1e-12);
}


#[test]
fn lad_base_score_is_the_weighted_median() {
    let mut builder = Dataset::builder(FeatureSpec::numerical(1));
    for (y, w) in [(1.0, 1.0), (2.0, 1.0), (10.0, 5.0)] {
        let x = vec![FeatureValue::Numerical(y)];
        builder.push(Sample::new(x, y).weight(w)).unwrap();
    }
    let dataset = builder.build().unwrap();

    let param = TreeParam::default()
        .loss(LossType::Lad)
        .tree_number(0);
    let model = train(&dataset, &param).unwrap();
    assert_eq!(model.y0(), 10.0);
}


#[test]
fn lad_and_logistic_reduce_their_losses() {
    let dataset = regression_data();
    let param = TreeParam::default()
        .loss(LossType::Lad)
        .tree_number(40)
        .sample_rate(1.0)
        .min_values_in_leaf(2);
    let weak_learner = RegressionTreeBuilder::from_param(&param).build().unwrap();
    let mut booster = GBDT::init(&dataset, &param).unwrap();
    let _ = booster.run(&weak_learner).unwrap();
    let history = booster.loss_history();
    assert!(history[history.len() - 1] < history[0]);


    let dataset = classification_data();
    let param = TreeParam::default()
        .loss(LossType::Logistic)
        .tree_number(40)
        .learning_rate(0.3)
        .sample_rate(1.0)
        .min_values_in_leaf(2);
    let weak_learner = RegressionTreeBuilder::from_param(&param).build().unwrap();
    let mut booster = GBDT::init(&dataset, &param).unwrap();
    let model = booster.run(&weak_learner).unwrap();
    let history = booster.loss_history();
    assert!(history[history.len() - 1] < history[0]);

    let accuracy = dataset.samples()
        .iter()
        .filter(|s| {
            let p = model.predict_logistic(s.features());
            (p >= 0.5) == (s.label() > 0.0)
        })
        .count();
    assert!(accuracy >= 36, "accuracy {accuracy} / 40");
}


#[test]
fn max_level_zero_trees_are_single_leaves() {
    let dataset = regression_data();
    let param = TreeParam::default()
        .max_level(0)
        .tree_number(5)
        .sample_rate(1.0);

    let model = train(&dataset, &param).unwrap();
    for tree in model.trees() {
        assert!(matches!(tree.root(), Node::Leaf(_)));
    }
}


#[test]
fn single_sample_leaf_takes_its_response() {
    for loss in [LossType::Ls, LossType::Lad] {
        let mut builder = Dataset::builder(FeatureSpec::numerical(1));
        let x = vec![FeatureValue::Numerical(0.0)];
        builder.push(Sample::new(x, 4.0).weight(7.5)).unwrap();
        let dataset = builder.build().unwrap();

        let tree = RegressionTreeBuilder::new()
            .loss(loss)
            .learning_rate(1.0)
            .min_values_in_leaf(1)
            .build()
            .unwrap();
        let view = dataset.view();
        let work = minigbdt::weak_learner::PseudoResponse::new(vec![2.5]);
        let f = tree.produce(&view, &work);
        assert_eq!(f.predict(&[FeatureValue::Numerical(0.0)]), 2.5);
    }
}


#[test]
fn sampling_is_reproducible_with_a_seed() {
    let dataset = regression_data();
    let param = TreeParam::default()
        .tree_number(10)
        .sample_rate(0.5)
        .min_values_in_leaf(2)
        .seed(17);

    let a = train(&dataset, &param).unwrap();
    let b = train(&dataset, &param).unwrap();
    assert_eq!(a.predict_all(&dataset), b.predict_all(&dataset));
}


#[test]
fn feature_importance_sums_to_one() {
    let dataset = regression_data();
    let param = TreeParam::default()
        .tree_number(20)
        .sample_rate(1.0)
        .min_values_in_leaf(2);
    let model = train(&dataset, &param).unwrap();

    let importance = model.feature_importance().unwrap();
    assert_eq!(importance.len(), 2);
    assert_relative_eq!(importance.iter().sum::<f64>(), 1.0, max_relative = 1e-12);
    assert!(importance[0] > importance[1]);
}


#[test]
fn invalid_inputs_fail_before_training() {
    let dataset = regression_data();

    let param = TreeParam::default().min_values_in_leaf(0);
    assert!(matches!(train(&dataset, &param), Err(GbdtError::InvalidConfig(_))));

    let param = TreeParam::default().sample_rate(0.0);
    assert!(matches!(train(&dataset, &param), Err(GbdtError::InvalidConfig(_))));

    let param = TreeParam::default().loss(LossType::Ranking).sample_rate(1.0);
    assert!(matches!(train(&dataset, &param), Err(GbdtError::InvalidConfig(_))));

    let empty = Dataset::builder(FeatureSpec::numerical(1)).build();
    assert!(matches!(empty, Err(GbdtError::DegenerateDataset(_))));
}


#[test]
fn verbose_run_returns_the_same_model() {
    let dataset = regression_data();
    let param = TreeParam::default()
        .tree_number(5)
        .sample_rate(1.0)
        .min_values_in_leaf(2);

    let quiet = train(&dataset, &param).unwrap();
    let loud = train(&dataset, &param.clone().verbose(true)).unwrap();
    assert_eq!(quiet.predict_all(&dataset), loud.predict_all(&dataset));
}


#[test]
fn non_finite_values_are_rejected() {
    let mut builder = Dataset::builder(FeatureSpec::numerical(1));
    for x in [1.0, 2.0, 3.0] {
        builder.push(Sample::new(vec![FeatureValue::Numerical(x)], x)).unwrap();
    }

    let nan = Sample::new(vec![FeatureValue::Numerical(f64::NAN)], 0.0);
    assert!(matches!(builder.push(nan), Err(GbdtError::DegenerateDataset(_))));

    let inf = Sample::new(vec![FeatureValue::Numerical(f64::NEG_INFINITY)], 0.0);
    assert!(matches!(builder.push(inf), Err(GbdtError::DegenerateDataset(_))));

    let label = Sample::new(vec![FeatureValue::Numerical(4.0)], f64::NAN);
    assert!(matches!(builder.push(label), Err(GbdtError::DegenerateDataset(_))));

    // The rejected rows leave no trace, the rest still splits on 1 | 2.
    let dataset = builder.build().unwrap();
    assert_eq!(dataset.shape(), (3, 1));
    let param = TreeParam::default()
        .tree_number(1)
        .sample_rate(1.0)
        .min_values_in_leaf(1)
        .learning_rate(1.0);
    let model = train(&dataset, &param).unwrap();
    assert!(matches!(model.trees()[0].root(), Node::Branch(_)));
}


#[test]
fn tree_loss_must_match_the_booster() {
    let dataset = regression_data();
    let param = TreeParam::default()
        .tree_number(3)
        .sample_rate(1.0)
        .loss(LossType::Lad);

    let ls_tree = RegressionTreeBuilder::new().build().unwrap();
    let mut booster = GBDT::init(&dataset, &param).unwrap();
    let res = booster.run(&ls_tree);
    assert!(matches!(res, Err(GbdtError::InvalidConfig(_))));

    let res = ProgressLogger::new(&mut booster, &ls_tree).run();
    assert!(matches!(res, Err(GbdtError::InvalidConfig(_))));

    let lad_tree = RegressionTreeBuilder::from_param(&param).build().unwrap();
    let model = booster.run(&lad_tree).unwrap();
    assert_eq!(model.len(), 3);
}


#[test]
fn logger_without_round_lines_returns_the_same_model() {
    let dataset = regression_data();
    let param = TreeParam::default()
        .tree_number(4)
        .sample_rate(1.0)
        .min_values_in_leaf(2);
    let weak_learner = RegressionTreeBuilder::from_param(&param).build().unwrap();

    let mut booster = GBDT::init(&dataset, &param).unwrap();
    let plain = booster.run(&weak_learner).unwrap();

    let mut booster = GBDT::init(&dataset, &param).unwrap();
    let logged = ProgressLogger::new(&mut booster, &weak_learner)
        .print_every(usize::MAX)
        .run()
        .unwrap();
    assert_eq!(plain, logged);
}
