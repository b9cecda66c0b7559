use minigbdt::common::weighted_median;


#[test]
fn weighted_median_ignores_the_input_order() {
    let pairs = vec![(5.0, 1.0), (-2.0, 0.5), (3.0, 2.0), (8.0, 0.25), (0.0, 1.5)];
    let expected = weighted_median(pairs.clone());

    let mut reversed = pairs.clone();
    reversed.reverse();
    assert_eq!(weighted_median(reversed), expected);

    for shift in 1..pairs.len() {
        let mut rotated = pairs.clone();
        rotated.rotate_left(shift);
        assert_eq!(weighted_median(rotated), expected);
    }
}


#[test]
fn weighted_median_follows_the_weights() {
    assert_eq!(weighted_median(vec![(1.0, 1.0), (2.0, 1.0), (3.0, 1.0)]), 2.0);
    assert_eq!(weighted_median(vec![(1.0, 1.0), (2.0, 1.0), (3.0, 5.0)]), 3.0);
    assert_eq!(weighted_median(vec![(7.0, 0.1)]), 7.0);
    assert_eq!(weighted_median(Vec::new()), 0.0);
}
