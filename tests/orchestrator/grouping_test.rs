use std::sync::atomic::{AtomicUsize, Ordering};

use infoflow::estimators::DependenceScore;
use infoflow::estimators::approaches::BinnedMutualInformation;
use infoflow::{
    AnalysisParams, ChannelGroup, ChannelSet, InfoFlowError, InformationFlow, RegionMap, Result,
};

use crate::test_helpers::{channels_from_rows, executor, gaussian_series, sine_series};

fn params() -> AnalysisParams {
    AnalysisParams::default()
        .with_max_delay(5)
        .with_subsample_factor(4)
        .with_num_bins(5)
}

fn montage() -> (ndarray::Array2<f64>, ChannelSet) {
    let rows = vec![
        sine_series(1200, 40.0, 0.3, 1),
        sine_series(1200, 40.0, 0.3, 2),
        sine_series(1200, 31.0, 0.3, 3),
        sine_series(1200, 31.0, 0.3, 4),
        gaussian_series(1200, 0.0, 1.0, 5),
        gaussian_series(1200, 0.0, 1.0, 6),
    ];
    let set = ChannelSet::new(["F3", "C3", "F4", "C4", "O1", "O2"]).unwrap();
    (channels_from_rows(&rows), set)
}

#[test]
fn hemispheric_reports_both_directions() {
    let (data, set) = montage();
    let exec = executor();
    let flow = InformationFlow::new(params(), &exec).unwrap();
    let left = ChannelGroup::new("Left", ["F3", "C3", "O1"]);
    let right = ChannelGroup::new("Right", ["F4", "C4", "O2"]);
    let table = flow.hemispheric(data.view(), &set, &left, &right).unwrap();

    let keys: Vec<String> = table.iter().map(|r| r.key()).collect();
    assert_eq!(keys, vec!["Left_to_Right".to_string(), "Right_to_Left".to_string()]);
    assert!(table.iter().all(|r| r.is_ok()));
}

#[test]
fn regional_covers_every_ordered_group_pair() {
    let (data, set) = montage();
    let exec = executor();
    let flow = InformationFlow::new(params(), &exec).unwrap();
    let regions = RegionMap::new()
        .with_group("Frontal", ["F3", "F4"])
        .with_group("Central", ["C3", "C4"])
        .with_group("Occipital", ["O1", "O2"])
        // Channels may belong to several groups.
        .with_group("Midline", ["C3", "O1"]);
    let table = flow.regional(data.view(), &set, &regions).unwrap();

    assert_eq!(table.len(), 12);
    assert!(table.pair("Frontal", "Occipital").unwrap().is_ok());
    assert!(table.pair("Midline", "Central").unwrap().is_ok());
}

#[test]
fn unknown_channel_aborts_before_analysis() {
    let (data, set) = montage();
    let exec = executor();
    let flow = InformationFlow::new(params(), &exec).unwrap();
    let regions = RegionMap::new()
        .with_group("Frontal", ["F3", "Fz"])
        .with_group("Central", ["C3", "C4"]);
    let err = flow.regional(data.view(), &set, &regions).unwrap_err();
    assert_eq!(
        err,
        InfoFlowError::UnknownChannel {
            group: "Frontal".into(),
            channel: "Fz".into()
        }
    );
}

#[test]
fn single_group_is_rejected() {
    let (data, set) = montage();
    let exec = executor();
    let flow = InformationFlow::new(params(), &exec).unwrap();
    let regions = RegionMap::new().with_group("All", ["F3", "F4", "C3"]);
    assert!(matches!(
        flow.regional(data.view(), &set, &regions),
        Err(InfoFlowError::InvalidGroup(_))
    ));
}

#[test]
fn group_with_failed_member_is_reported() {
    let (mut data, set) = montage();
    data.row_mut(5).fill(0.0);
    let exec = executor();
    let flow = InformationFlow::new(params(), &exec).unwrap();
    let regions = RegionMap::new()
        .with_group("Frontal", ["F3", "F4"])
        .with_group("Central", ["C3", "C4"])
        .with_group("Occipital", ["O1", "O2"]);
    let table = flow.regional(data.view(), &set, &regions).unwrap();

    assert_eq!(table.len(), 6);
    assert!(table.pair("Frontal", "Central").unwrap().is_ok());
    assert_eq!(table.failures().count(), 4);
    match table.pair("Occipital", "Frontal").and_then(|r| r.error()) {
        Some(InfoFlowError::ChannelFailed { channel, .. }) => assert_eq!(channel, "O2"),
        other => panic!("unexpected {other:?}"),
    }
}

/// Binned MI that counts how often it is asked to score a trial delay.
struct CountingScore<'a> {
    inner: BinnedMutualInformation,
    calls: &'a AtomicUsize,
}

impl DependenceScore for CountingScore<'_> {
    fn score(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.score(x, y)
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

#[test]
fn overlapping_groups_prepare_each_channel_once() {
    let (data, set) = montage();
    let exec = executor();
    let calls = AtomicUsize::new(0);
    let flow = InformationFlow::new(params(), &exec)
        .unwrap()
        .with_scorer(CountingScore {
            inner: BinnedMutualInformation::new(8),
            calls: &calls,
        });

    let mut regions = RegionMap::new()
        .with_group("Central", ["C3", "C4"])
        .with_group("Occipital", ["O1", "O2"]);
    regions.push(ChannelGroup::new("Midline", ["C3", "O1"]));
    regions.push(ChannelGroup::new("Frontal", ["F3", "F4", "C4"]));
    assert_eq!(regions.len(), 4);

    let table = flow.regional(data.view(), &set, &regions).unwrap();
    assert_eq!(table.len(), 12);
    // Six distinct channels, one sweep of max_delay trials each.
    assert_eq!(calls.load(Ordering::Relaxed), 6 * params().max_delay);

    calls.store(0, Ordering::Relaxed);
    let table = flow.all_pairs(data.view(), &set).unwrap();
    assert_eq!(table.len(), 30);
    assert_eq!(calls.load(Ordering::Relaxed), set.len() * params().max_delay);
}

#[test]
fn colliding_channel_keys_abort_before_analysis() {
    let (data, _) = montage();
    let data = data.slice(ndarray::s![..4, ..]).to_owned();
    let set = ChannelSet::new(["A_to_B", "C", "A", "B_to_C"]).unwrap();
    let exec = executor();
    let calls = AtomicUsize::new(0);
    let flow = InformationFlow::new(params(), &exec)
        .unwrap()
        .with_scorer(CountingScore {
            inner: BinnedMutualInformation::new(8),
            calls: &calls,
        });

    match flow.all_pairs(data.view(), &set) {
        Err(InfoFlowError::InvalidGroup(msg)) => assert!(msg.contains("A_to_B_to_C"), "{msg}"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn colliding_group_keys_are_rejected() {
    let (data, set) = montage();
    let exec = executor();
    let flow = InformationFlow::new(params(), &exec).unwrap();
    let regions = RegionMap::new()
        .with_group("X_to_Y", ["F3"])
        .with_group("Z", ["F4"])
        .with_group("X", ["C3"])
        .with_group("Y_to_Z", ["C4"]);
    let err = flow.regional(data.view(), &set, &regions).unwrap_err();
    assert!(err.is_configuration());
}
