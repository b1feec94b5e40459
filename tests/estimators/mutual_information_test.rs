use approx::assert_relative_eq;
use infoflow::InfoFlowError;
use infoflow::estimators::DependenceScore;
use infoflow::estimators::approaches::{BinnedMutualInformation, MicEstimator};
use infoflow::estimators::mutual_information::MutualInformation;
use rstest::*;

use crate::test_helpers::{gaussian_series, uniform_series};

#[rstest]
#[case(MutualInformation::new_mic().name(), "mic")]
#[case(MutualInformation::new_binned(8).name(), "binned_mi")]
fn scorers_are_named(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(name, expected);
}

#[test]
fn mic_separates_functional_from_independent() {
    let x = uniform_series(400, 1);
    let sine: Vec<f64> = x.iter().map(|v| (6.0 * v).sin()).collect();
    let noise = uniform_series(400, 2);

    let functional = MutualInformation::mic(&x, &sine).unwrap();
    let independent = MutualInformation::mic(&x, &noise).unwrap();
    assert!(functional > 0.9, "functional MIC {functional}");
    assert!(independent < 0.4, "independent MIC {independent}");
    assert!(functional > independent);
}

#[rstest]
#[case(50)]
#[case(200)]
#[case(600)]
fn mic_stays_in_unit_interval(#[case] n: usize) {
    let x = gaussian_series(n, 0.0, 1.0, n as u64);
    let y: Vec<f64> = x
        .iter()
        .zip(gaussian_series(n, 0.0, 0.5, n as u64 + 1))
        .map(|(a, e)| a * a + e)
        .collect();
    let m = MicEstimator::new().mic(&x, &y).unwrap();
    assert!((0.0..=1.0).contains(&m));
}

#[test]
fn characteristic_matrix_respects_grid_budget() {
    let x = uniform_series(150, 3);
    let y = uniform_series(150, 4);
    let est = MicEstimator::new();
    let budget = est.grid_budget(150);
    let m = est.characteristic_matrix(&x, &y).unwrap();
    for (cols, row) in m.iter().enumerate() {
        for (rows, &v) in row.iter().enumerate() {
            if cols < 2 || rows < 2 || cols * rows > budget {
                assert_eq!(v, 0.0, "cell {cols}x{rows} outside budget");
            }
        }
    }
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(15)]
fn clump_factor_trades_resolution_for_cost(#[case] c: usize) {
    // A noiseless monotone relation is recovered at any clump factor.
    let x: Vec<f64> = (0..240).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|v| v.powi(3)).collect();
    let est = MicEstimator::new().with_clump_factor(c);
    assert_relative_eq!(est.mic(&x, &y).unwrap(), 1.0, epsilon = 1e-9);

    let noise = uniform_series(240, 5);
    let m = est.mic(&x, &noise).unwrap();
    assert!((0.0..1.0).contains(&m));
}

#[test]
fn clump_factor_is_at_least_one() {
    let x = uniform_series(120, 8);
    let y = uniform_series(120, 9);
    assert_eq!(
        MicEstimator::new().with_clump_factor(0).mic(&x, &y).unwrap(),
        MicEstimator::new().with_clump_factor(1).mic(&x, &y).unwrap()
    );
}

#[test]
fn smaller_alpha_shrinks_the_budget() {
    let wide = MicEstimator::new();
    let narrow = MicEstimator::new().with_alpha(0.4);
    assert!(narrow.grid_budget(1000) < wide.grid_budget(1000));
    assert_eq!(wide.grid_budget(3), 4);
}

#[test]
fn binned_mi_of_identical_uniform_sequence_is_its_entropy() {
    let x: Vec<f64> = (0..1024).map(|i| i as f64).collect();
    let mi = BinnedMutualInformation::new(8).score(&x, &x).unwrap();
    assert_relative_eq!(mi, 3.0, epsilon = 1e-12);
}

#[test]
fn binned_mi_independent_is_small() {
    let x = uniform_series(5000, 10);
    let y = uniform_series(5000, 11);
    let mi = BinnedMutualInformation::new(4).score(&x, &y).unwrap();
    assert!(mi < 0.01, "independent MI {mi}");
}

#[test]
fn degenerate_pairs_are_insufficient_data() {
    let x = uniform_series(30, 1);
    let flat = vec![2.0; 30];
    for scorer in [
        &MicEstimator::new() as &dyn DependenceScore,
        &BinnedMutualInformation::default(),
    ] {
        assert!(matches!(scorer.score(&x, &flat), Err(InfoFlowError::InsufficientData(_))));
        assert!(matches!(
            scorer.score(&x[..3], &x[1..4]),
            Err(InfoFlowError::InsufficientData(_))
        ));
        assert!(scorer.score(&x, &x[..20]).unwrap_err().is_configuration());
    }
}
