use infoflow::embedding::{DelaySelector, reconstruct_phase_space};
use infoflow::estimators::approaches::{BinnedMutualInformation, MicEstimator};
use infoflow::{AnalysisParams, DelayCriterion, Executor, InfoFlowError};

use crate::test_helpers::{executor, sine_series, uniform_series};

#[test]
fn ramp_selects_delay_in_range() {
    let series: Vec<f64> = (0..100).map(|v| v as f64).collect();
    let selection = DelaySelector::default()
        .with_max_delay(5)
        .with_subsample_factor(1)
        .select(&series, &executor())
        .unwrap();

    assert!((1..=5).contains(&selection.delay));
    assert_eq!(selection.max_delay(), 5);
    // A ramp is a noiseless function of its own shift at every lag.
    for d in 1..=5 {
        let s = selection.score(d).unwrap();
        assert!(s > 0.99, "delay {d}: {s}");
    }
}

#[test]
fn mic_finds_quarter_period_of_sine() {
    let series = sine_series(300, 20.7, 0.0, 0);
    let selection = DelaySelector::new(MicEstimator::new())
        .with_max_delay(10)
        .with_subsample_factor(1)
        .select(&series, &executor())
        .unwrap();
    assert!(
        (3..=8).contains(&selection.delay),
        "selected {} from {:?}",
        selection.delay,
        selection.scores
    );
}

#[test]
fn binned_mi_finds_quarter_period_of_sine() {
    let series = sine_series(2000, 37.3, 0.0, 0);
    let selection = DelaySelector::new(BinnedMutualInformation::new(16))
        .with_max_delay(18)
        .with_subsample_factor(1)
        .with_criterion(DelayCriterion::GlobalMinimum)
        .select(&series, &executor())
        .unwrap();
    assert!(
        (6..=13).contains(&selection.delay),
        "selected {} from {:?}",
        selection.delay,
        selection.scores
    );
}

#[test]
fn worker_count_does_not_change_the_result() {
    let series = uniform_series(400, 11);
    let selector = DelaySelector::new(BinnedMutualInformation::new(8))
        .with_max_delay(12)
        .with_subsample_factor(2);
    assert_eq!(selector.scorer(), &BinnedMutualInformation::new(8));
    let parallel = selector.select(&series, &executor()).unwrap();
    let sequential = selector
        .select(&series, &Executor::sequential().unwrap())
        .unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn subsampling_shrinks_the_admissible_range() {
    let series = uniform_series(200, 5);
    let err = DelaySelector::default()
        .with_max_delay(20)
        .with_subsample_factor(10)
        .select(&series, &executor())
        .unwrap_err();
    assert_eq!(
        err,
        InfoFlowError::InvalidDelayRange {
            max_delay: 20,
            subsampled_len: 20
        }
    );
}

#[test]
fn constant_series_has_no_scorable_delay() {
    let series = vec![0.25; 120];
    let err = DelaySelector::new(BinnedMutualInformation::default())
        .with_max_delay(5)
        .with_subsample_factor(1)
        .select(&series, &executor())
        .unwrap_err();
    assert!(matches!(err, InfoFlowError::InsufficientData(_)));
}

#[test]
fn non_finite_input_is_reported() {
    let mut series = uniform_series(100, 2);
    series[17] = f64::NAN;
    let err = DelaySelector::default()
        .with_max_delay(3)
        .with_subsample_factor(1)
        .select(&series, &executor())
        .unwrap_err();
    assert_eq!(err, InfoFlowError::NonFiniteValue(17));
}

#[test]
fn phase_space_uses_selected_delay() {
    let series = sine_series(600, 24.7, 0.01, 8);
    let params = AnalysisParams::default()
        .with_max_delay(12)
        .with_subsample_factor(1);
    let selector = DelaySelector::new(BinnedMutualInformation::new(12))
        .with_max_delay(params.max_delay)
        .with_subsample_factor(params.subsample_factor);

    let phase = reconstruct_phase_space(&series, 3, &selector, &executor()).unwrap();
    let tau = phase.selection.delay;
    assert_eq!(phase.trajectory.delay(), tau);
    assert_eq!(phase.trajectory.dimension(), 3);
    assert_eq!(phase.trajectory.len(), series.len() - 2 * tau);
}
