//! End-to-end tests for the `latency-cdf` pipeline.
//!
//! These drive `cli::run_cdf` against temporary input files and check the
//! CSV it leaves behind.

use clap::Parser;
use latency_tools::cdf::EmpiricalCdf;
use latency_tools::cli::{self, CdfCli};
use latency_tools::sampler::SamplingPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_samples(path: &Path, samples: &[f64]) {
    let body: String = samples.iter().map(|v| format!("{}\n", v)).collect();
    fs::write(path, body).unwrap();
}

fn run(args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["latency-cdf"];
    argv.extend_from_slice(args);
    cli::run_cdf(CdfCli::try_parse_from(argv).unwrap())
}

/// Parse the CSV written by `run_cdf`, checking the header on the way.
fn read_rows(path: &Path) -> Vec<(f64, f64)> {
    let text = fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("latency,cdf"));
    lines
        .map(|l| {
            let (lat, cdf) = l.split_once(',').unwrap();
            (lat.parse().unwrap(), cdf.parse().unwrap())
        })
        .collect()
}

fn random_samples(seed: u64, n: usize, max: u32) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..=max) as f64).collect()
}

#[test]
fn uniform_integers_small_range() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("nanos.txt");
    let output = dir.path().join("cdf.csv");
    let samples = random_samples(42, 10_000, 1000);
    write_samples(&input, &samples);

    run(&[
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--seed",
        "1",
    ])
    .unwrap();

    let cdf_len = EmpiricalCdf::from_samples(&samples).len();
    let expected = SamplingPolicy::targeting(2000, cdf_len).sparse_sample_size(cdf_len);
    let rows = read_rows(&output);
    // Fewer than 2000 distinct values: every point survives.
    assert_eq!(expected, cdf_len);
    assert_eq!(rows.len(), expected);
    assert!(rows.iter().all(|&(lat, _)| lat <= 1000.0 / 1000.0));
    assert_eq!(rows.last().unwrap().1, 1.0);
}

#[test]
fn uniform_integers_wide_range_are_downsampled() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("nanos.txt");
    let output = dir.path().join("cdf.csv");
    let samples = random_samples(7, 10_000, 1_000_000);
    write_samples(&input, &samples);

    run(&[
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--seed",
        "2",
    ])
    .unwrap();

    let cdf = EmpiricalCdf::from_samples(&samples);
    let expected = SamplingPolicy::targeting(2000, cdf.len()).sparse_sample_size(cdf.len());
    let rows = read_rows(&output);
    assert!(cdf.len() > 2000);
    assert_eq!(rows.len(), expected);

    let max = samples.iter().copied().fold(f64::MIN, f64::max);
    for w in rows.windows(2) {
        assert!(w[0].0 <= w[1].0);
        assert!(w[0].1 <= w[1].1);
    }
    assert!(rows.iter().all(|&(lat, _)| lat <= max / 1000.0));
}

#[test]
fn same_seed_writes_same_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("nanos.txt");
    write_samples(&input, &random_samples(3, 5_000, 100_000));

    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    for out in [&a, &b] {
        run(&[input.to_str().unwrap(), out.to_str().unwrap(), "--seed", "99"]).unwrap();
    }
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn log_files_use_second_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fio_clat.log");
    let output = dir.path().join("cdf.csv");
    fs::write(&input, "0, 2000, 0, 4096\n1, 1000, 0, 4096\n2, 2000, 0, 4096\n3, 4000, 0, 4096\n").unwrap();

    run(&[
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--sparse-frac",
        "1.0",
    ])
    .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, "latency,cdf\n1.0000,0.25\n2.0000,0.75\n4.0000,1.0\n");
}

#[test]
fn dense_region_is_kept_whole() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("nanos.txt");
    let output = dir.path().join("cdf.csv");
    let samples: Vec<f64> = (1..=1000).map(f64::from).collect();
    write_samples(&input, &samples);

    run(&[
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--threshold",
        "0.5",
        "--dense-region",
        "at-or-below",
        "--sparse-frac",
        "0.1",
        "--unit-divisor",
        "1",
    ])
    .unwrap();

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 500 + 50);
    for i in 1..=500 {
        assert_eq!(rows[i - 1].0, i as f64);
    }
}

#[test]
fn malformed_log_line_aborts() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.log");
    let output = dir.path().join("cdf.csv");
    fs::write(&input, "0,100\n1\n").unwrap();

    let err = run(&[input.to_str().unwrap(), output.to_str().unwrap()]).unwrap_err();
    assert!(format!("{err:#}").contains("line 2"));
    assert!(!output.exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("nope.txt");
    let output = dir.path().join("cdf.csv");

    let err = run(&[input.to_str().unwrap(), output.to_str().unwrap()]).unwrap_err();
    assert!(format!("{err:#}").contains("does not exist"));
}

#[test]
fn empty_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.txt");
    let output = dir.path().join("cdf.csv");
    fs::write(&input, "# nothing here\n\n").unwrap();

    let err = run(&[input.to_str().unwrap(), output.to_str().unwrap()]).unwrap_err();
    assert!(format!("{err:#}").contains("no latency samples"));
}

#[test]
fn bad_unit_divisor_keeps_previous_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("nanos.txt");
    let output = dir.path().join("cdf.csv");
    write_samples(&input, &[100.0, 200.0, 300.0]);
    fs::write(&output, "previous results\n").unwrap();

    let err = run(&[
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--unit-divisor",
        "0",
    ])
    .unwrap_err();
    assert!(format!("{err:#}").contains("invalid unit divisor"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous results\n");
}
