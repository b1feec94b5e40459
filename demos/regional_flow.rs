// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Regional information flow on a synthetic 8-channel montage.
//!
//! Frontal channels carry a slow oscillation, central channels follow the frontal
//! ones with a lag, and occipital channels are independent noise. Run with
//! `RUST_LOG=infoflow=debug cargo run --example regional_flow` to see the pipeline.

use infoflow::estimators::approaches::BinnedMutualInformation;
use infoflow::{AnalysisParams, ChannelGroup, ChannelSet, Executor, InformationFlow, RegionMap};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{EnvFilter, fmt};

const SAMPLES: usize = 4000;
const LAG: usize = 3;

fn montage(seed: u64) -> (Array2<f64>, ChannelSet) {
    let mut rng = StdRng::seed_from_u64(seed);
    let names = ["Fp1", "Fp2", "F3", "F4", "C3", "C4", "O1", "O2"];
    let mut data = Array2::<f64>::zeros((names.len(), SAMPLES));

    for ch in 0..4 {
        let phase = rng.gen_range(0.0..std::f64::consts::TAU);
        for t in 0..SAMPLES {
            data[[ch, t]] = (t as f64 * 0.045 + phase).sin() + 0.4 * rng.gen_range(-1.0..1.0);
        }
    }
    for (ch, driver) in [(4, 2), (5, 3)] {
        for t in 0..SAMPLES {
            let drive = if t >= LAG { data[[driver, t - LAG]] } else { 0.0 };
            data[[ch, t]] = 0.8 * drive + 0.3 * rng.gen_range(-1.0..1.0);
        }
    }
    for ch in 6..8 {
        for t in 0..SAMPLES {
            data[[ch, t]] = rng.gen_range(-1.0..1.0);
        }
    }
    let set = ChannelSet::new(names).expect("channel names are unique");
    (data, set)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("infoflow=info")),
        )
        .with_target(false)
        .init();

    let (data, set) = montage(2024);
    let params = AnalysisParams::default()
        .with_max_delay(30)
        .with_subsample_factor(4)
        .with_num_bins(8);
    let executor = Executor::new(None)?;
    println!("worker threads: {}", executor.num_threads());

    let flow = InformationFlow::new(params, &executor)?.with_scorer(BinnedMutualInformation::new(16));

    let regions = RegionMap::new()
        .with_group("Frontal", ["Fp1", "Fp2", "F3", "F4"])
        .with_group("Central", ["C3", "C4"])
        .with_group("Occipital", ["O1", "O2"]);
    let table = flow.regional(data.view(), &set, &regions)?;
    println!("\nRegional transfer entropy (bits)");
    for entry in table.iter() {
        match &entry.value {
            Ok(bits) => println!("  {:<26} {bits:>8.4}", entry.key()),
            Err(e) => println!("  {:<26} failed: {e}", entry.key()),
        }
    }

    let left = ChannelGroup::new("Left", ["Fp1", "F3", "C3", "O1"]);
    let right = ChannelGroup::new("Right", ["Fp2", "F4", "C4", "O2"]);
    let hemi = flow.hemispheric(data.view(), &set, &left, &right)?;
    println!("\nHemispheric transfer entropy (bits)");
    for (key, value) in hemi.into_map() {
        match value {
            Ok(bits) => println!("  {key:<26} {bits:>8.4}"),
            Err(e) => println!("  {key:<26} failed: {e}"),
        }
    }
    Ok(())
}
