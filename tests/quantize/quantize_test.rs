use infoflow::quantize::bin_edges;
use infoflow::{InfoFlowError, SymbolSequence, quantize};
use ndarray::array;
use rstest::*;

use crate::test_helpers::{gaussian_series, uniform_series};

#[test]
fn zero_to_nine_in_two_bins() {
    let data: Vec<f64> = (0..10).map(f64::from).collect();
    let q = quantize(&data, 2).unwrap();
    assert_eq!(q.symbols(), &array![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]);
    assert_eq!(q.num_bins(), 2);
}

#[rstest]
#[case(2)]
#[case(7)]
#[case(16)]
#[case(1000)]
fn symbols_stay_in_range(#[case] bins: usize) {
    let data = gaussian_series(2500, 3.0, 10.0, bins as u64);
    let q = quantize(&data, bins).unwrap();
    assert_eq!(q.len(), data.len());
    assert!(q.symbols().iter().all(|&s| s >= 0 && (s as usize) < bins));

    // Extremes land in the outer bins.
    let (imin, imax) = data.iter().enumerate().fold((0, 0), |(lo, hi), (i, &v)| {
        (if v < data[lo] { i } else { lo }, if v > data[hi] { i } else { hi })
    });
    assert_eq!(q.symbols()[imin], 0);
    assert_eq!(q.symbols()[imax] as usize, bins - 1);
}

#[test]
fn quantization_is_deterministic_and_order_preserving() {
    let data = uniform_series(800, 17);
    let a = quantize(&data, 12).unwrap();
    let b = quantize(&data, 12).unwrap();
    assert_eq!(a, b);
    for i in 0..data.len() {
        for j in 0..data.len() {
            if data[i] <= data[j] {
                assert!(a.symbols()[i] <= a.symbols()[j]);
            }
        }
    }
}

#[test]
fn constant_input_maps_to_single_bin() {
    let q = quantize(&[4.2; 9], 4).unwrap();
    let first = q.symbols()[0];
    assert!(q.symbols().iter().all(|&s| s == first));
    assert_eq!(bin_edges(4.2, 4.2, 4).first().copied(), Some(3.7));
}

#[test]
fn invalid_inputs() {
    assert_eq!(quantize(&[], 4).unwrap_err(), InfoFlowError::EmptyData);
    assert_eq!(quantize(&[1.0, 2.0], 1).unwrap_err(), InfoFlowError::InvalidBinCount(1));
    assert_eq!(
        quantize(&[1.0, f64::NAN], 3).unwrap_err(),
        InfoFlowError::NonFiniteValue(1)
    );
}

#[test]
fn averaging_truncates_and_aligns_on_common_prefix() {
    let a = SymbolSequence::new(array![0, 3, 3, 1, 2], 4).unwrap();
    let b = SymbolSequence::new(array![1, 2, 0, 1], 4).unwrap();
    let avg = SymbolSequence::average(&[&a, &b]).unwrap();
    assert_eq!(avg.symbols(), &array![0, 2, 1, 1]);
    assert_eq!(avg.num_bins(), 4);

    let other = SymbolSequence::new(array![0, 1], 2).unwrap();
    assert!(SymbolSequence::average(&[&a, &other]).is_err());
    assert_eq!(SymbolSequence::average(&[]).unwrap_err(), InfoFlowError::EmptyData);
}

#[test]
fn symbols_outside_alphabet_are_rejected() {
    assert!(SymbolSequence::new(array![0, 4], 4).is_err());
    assert!(SymbolSequence::new(array![-1, 0], 4).is_err());
}

#[rstest]
#[case(vec![-1e308, 0.0, 1e308], 4, vec![0, 1, 3])]
#[case(vec![f64::MAX, -f64::MAX], 2, vec![1, 0])]
fn ranges_wider_than_f64_max_keep_extremes_apart(
    #[case] data: Vec<f64>,
    #[case] bins: usize,
    #[case] expected: Vec<i32>,
) {
    let q = quantize(&data, bins).unwrap();
    assert_eq!(q.symbols().to_vec(), expected);
}
