use minigbdt::prelude::*;
use minigbdt::weak_learner::Node;

use polars::prelude::*;


fn column(values: &[f64]) -> Vec<FeatureValue> {
    values.iter().map(|&v| FeatureValue::Numerical(v)).collect()
}


fn one_feature(xs: &[f64], ys: &[f64]) -> Dataset {
    let mut builder = Dataset::builder(FeatureSpec::numerical(1));
    for (x, &y) in column(xs).into_iter().zip(ys) {
        builder.push(Sample::new(vec![x], y)).unwrap();
    }
    builder.build().unwrap()
}


#[test]
fn entropy_split_separates_the_classes() {
    let dataset = one_feature(&[1.0, 2.0, 3.0, 4.0], &[0.0, 0.0, 1.0, 1.0]);
    let tree = DecisionTreeBuilder::new()
        .min_values_in_leaf(1)
        .build()
        .unwrap();

    let f = tree.fit(&dataset).unwrap();

    let Node::Branch(root) = f.root() else {
        panic!("the root must be split");
    };
    assert_eq!(root.rule().threshold(), FeatureValue::Numerical(2.0));
    assert!((root.gain().unwrap() - 1.0).abs() < 1e-12);
    assert_eq!(f.root().leaves(), 2);

    assert_eq!(f.predict_all(&dataset), vec![0, 0, 1, 1]);
    assert_eq!(f.confidence(&column(&[1.5])), 0.0);
    assert_eq!(f.confidence(&column(&[3.5])), 1.0);
}


#[test]
fn a_pure_root_is_a_leaf() {
    let dataset = one_feature(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0, 1.0, 0.0]);
    let tree = DecisionTreeBuilder::new()
        .min_values_in_leaf(1)
        .build()
        .unwrap();

    let f = tree.fit(&dataset).unwrap();
    assert_eq!(f.root().leaves(), 1);
    assert_eq!(f.confidence(&column(&[0.0])), 0.75);
}


#[test]
fn max_level_zero_gives_a_single_leaf() {
    let dataset = one_feature(&[1.0, 2.0, 3.0, 4.0], &[0.0, 0.0, 1.0, 1.0]);
    let tree = DecisionTreeBuilder::new()
        .max_level(0)
        .min_values_in_leaf(1)
        .build()
        .unwrap();

    let f = tree.fit(&dataset).unwrap();
    assert_eq!(f.root().depth(), 0);
    assert_eq!(f.confidence(&column(&[1.0])), 0.5);
}


#[test]
fn categorical_feature_splits_on_equality() {
    let spec = FeatureSpec::new(vec![FeatureType::Category]);
    let mut builder = Dataset::builder(spec);
    for (c, y) in [(3, 1.0), (3, 1.0), (7, 0.0), (9, 0.0), (7, 0.0)] {
        builder.push(Sample::new(vec![FeatureValue::Category(c)], y)).unwrap();
    }
    let dataset = builder.build().unwrap();

    let tree = DecisionTreeBuilder::new()
        .min_values_in_leaf(1)
        .build()
        .unwrap();
    let f = tree.fit(&dataset).unwrap();

    let Node::Branch(root) = f.root() else {
        panic!("the root must be split");
    };
    assert_eq!(root.rule().threshold(), FeatureValue::Category(3));
    assert_eq!(f.predict(&[FeatureValue::Category(3)]), 1);
    assert_eq!(f.predict(&[FeatureValue::Category(9)]), 0);
}


// Toy example  (o/x are the pos/neg examples)
//
// 15|                     |
//   |                   5 |
//   |                  x  |
//   |                     |         6
//   |                     |        x
// 10|       4             |________________________ 9.5
//   |      x              |             1
//   |                     |            o
//   |                     |
//   |                     |   0
//  5|                     |  o
//   |                     |                 2
//   |                     |                o
//   |            3        |
//   |           x         |
//   |_____________________|____________________
//  0            5         | 10            15
//                         |
//                        9.0
#[test]
fn dataframe_toy_example() {
    let s1 = Series::new("x", &[10.0, 14.0, 15.0, 5.0, 3.0, 8.0, 12.0]);
    let s2 = Series::new("y", &[5.0, 8.0, 3.0, 1.0, 9.0, 13.0, 11.0]);
    let target = Series::new("class", &[1_i64, 1, 1, 0, 0, 0, 0]);
    let df = DataFrame::new(vec![s1, s2]).unwrap();

    let dataset = Dataset::from_dataframe(&df, &target).unwrap();
    assert_eq!(dataset.shape(), (7, 2));

    let tree = DecisionTreeBuilder::new()
        .min_values_in_leaf(1)
        .leaf_threshold(1.0)
        .build()
        .unwrap();
    let f = tree.fit(&dataset).unwrap();

    assert_eq!(f.predict_all(&dataset), vec![1, 1, 1, 0, 0, 0, 0]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.dot");
    f.to_dot_file(&path).unwrap();
    let dot = std::fs::read_to_string(&path).unwrap();
    assert!(dot.starts_with("graph DecisionTree {"));
}
