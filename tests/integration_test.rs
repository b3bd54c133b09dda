//! Integration tests for sweeplog
//!
//! These tests write sweep logs to disk and run them through the full
//! read, parse and channel pipeline.

use ndarray::{array, Ix1, Ix2};
use std::fs;
use std::path::{Path, PathBuf};
use sweeplog::filter::{apply_filter, FilterKind, FilterParams};
use sweeplog::loader::Loader;
use sweeplog::reader::{read_with_fallback, ReadError, TextSweepReader};
use sweeplog::summary::SweepSummary;
use sweeplog::sweep::{ReadOptions, ScaledRawClassifier, SweepError, SweepParser};
use tempfile::{tempdir, TempDir};

const IV_CURVE: &str = "#comment:= room temperature IV
#sweep_options:= dev bias, start 2, stop -2, npts 5
#readback numpy shape for line part: 1
#V\tI
2\t4.1
1\t2.0
0\t0.0
-1\t-2.0
-2\t-3.9
";

const ZIGZAG_RASTER: &str = "#com ...:= dmm1: 0.25
#com ...:= magnet: 1.5
#sweep_multi_options:= {'out': None, 'beforewait': [0.5, 0.02], 'start': 0.0, 'stop': 2.0, 'updown': 'alternate'}
#readback numpy shape for line part: 2
#gate\tbias\tlockin_x\tlockin_y
0\t0\t1\t0
0\t1\t2\t0
0\t2\t3\t0
10\t2\t6\t0
10\t1\t5\t0
10\t0\t4\t0
20\t0\t7\t1
20\t1\t8\t1
20\t2\t9\t1
";

const INTERRUPTED_RASTER: &str = "#sweep_multi_options:= {'beforewait': [0.1, 0.1], 'start': -1, 'stop': 1}
#readback numpy shape for line part: 1
#outer\tinner\tz
0\t-1\t1
0\t0\t2
0\t1\t3
1\t-1\t4
1\t0\t5
";

fn write_log(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn open(path: &Path) -> sweeplog::sweep::SweepDescriptor {
    SweepParser::new().open(path).unwrap()
}

#[test]
fn test_line_sweep_falls_back_to_flat_columns() {
    let dir = tempdir().unwrap();
    let path = write_log(&dir, "iv.txt", IV_CURVE);

    let raw = read_with_fallback(&TextSweepReader::new(), &path).unwrap();
    assert_eq!(raw.data()[0].ndim(), 1);

    let sweep = open(&path);
    assert_eq!(sweep.sweep_dim(), 1);
    assert_eq!(sweep.source(), Some(path.as_path()));
    assert_eq!(sweep.comments(), &[" room temperature IV".to_string()]);

    let range = sweep.axes()[0].range();
    assert_eq!(range.start, 2.0);
    assert_eq!(range.stop, -2.0);
    assert_eq!(range.step, -1.0);
    assert_eq!(range.to_string(), "[2, -2], npts: 5, step: -1");

    // descending sweep is flipped to ascending order
    let v = sweep
        .channel_data("V", ReadOptions::default())
        .unwrap()
        .into_dimensionality::<Ix1>()
        .unwrap();
    let i = sweep
        .channel_data("I", ReadOptions::default())
        .unwrap()
        .into_dimensionality::<Ix1>()
        .unwrap();
    assert_eq!(v, array![-2.0, -1.0, 0.0, 1.0, 2.0]);
    assert_eq!(i, array![-3.9, -2.0, 0.0, 2.0, 4.1]);
}

#[test]
fn test_zigzag_raster() {
    let dir = tempdir().unwrap();
    let path = write_log(&dir, "map.txt", ZIGZAG_RASTER);
    let sweep = open(&path);

    assert_eq!(sweep.sweep_dim(), 2);
    assert!(sweep.alternate());
    assert_eq!(sweep.output_titles(), vec!["lockin_x", "lockin_y"]);
    assert_eq!(sweep.before_wait(), Some(&[0.5, 0.02][..]));
    assert_eq!(sweep.extent(), Some([0.0, 20.0, 0.0, 2.0]));
    assert_eq!(sweep.device_logs().len(), 2);
    assert_eq!(sweep.device_logs()[1].device, "magnet");

    let scrambled = sweep
        .channel_data("lockin_x", ReadOptions::storage())
        .unwrap()
        .into_dimensionality::<Ix2>()
        .unwrap();
    assert_eq!(scrambled.row(1).to_vec(), vec![6.0, 5.0, 4.0]);

    let unscrambled = sweep
        .channel_data("lockin_x", ReadOptions::new().alternate(true))
        .unwrap()
        .into_dimensionality::<Ix2>()
        .unwrap();
    assert_eq!(
        unscrambled,
        array![[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]]
    );
}

#[test]
fn test_zigzag_raster_magnitude_and_trace() {
    let dir = tempdir().unwrap();
    let path = write_log(&dir, "map.txt", ZIGZAG_RASTER);
    let mut sweep = open(&path);

    sweep
        .generate_polar_from_cartesian("lockin_x", "lockin_y", true)
        .unwrap();
    let r = sweep
        .channel_data("lockin_x_R", ReadOptions::storage().alternate(true))
        .unwrap()
        .into_dimensionality::<Ix2>()
        .unwrap();
    assert_eq!(r.row(1).to_vec(), vec![4.0, 5.0, 6.0]);
    assert!((r[[2, 0]] - 50.0_f64.sqrt()).abs() < 1e-12);

    let trace = sweep.trace_at("lockin_x_R", 10.0, 2.0, true).unwrap();
    assert_eq!(trace.outer_index, 1);
    assert_eq!(trace.inner_index, 2);
    assert_eq!(trace.vertical.values, vec![4.0, 5.0, 6.0]);
}

#[test]
fn test_interrupted_raster_is_padded() {
    let dir = tempdir().unwrap();
    let path = write_log(&dir, "partial.txt", INTERRUPTED_RASTER);
    let sweep = open(&path);

    let z = sweep
        .channel_data("z", ReadOptions::storage())
        .unwrap()
        .into_dimensionality::<Ix2>()
        .unwrap();
    assert_eq!(z.dim(), (2, 3));
    assert_eq!(z[[1, 1]], 5.0);
    assert!(z[[1, 2]].is_nan());

    let axes = sweep.axes();
    assert_eq!(axes[1].range().start, -1.0);
    assert_eq!(axes[1].range().stop, 1.0);
    assert_eq!(axes[1].range().step, 1.0);
}

#[test]
fn test_scaled_raw_log() {
    let dir = tempdir().unwrap();
    let path = write_log(
        &dir,
        "scaled.txt",
        "#gate_scaled\tgate_raw\tbias\tI\n0\t0\t5\t1\n0\t0\t6\t2\n1\t100\t5\t3\n1\t100\t6\t4\n",
    );

    let sweep = open(&path);
    assert_eq!(sweep.axes()[1].title(), "bias");
    assert_eq!(sweep.output_titles(), vec!["I"]);

    let custom = SweepParser::with_classifier(ScaledRawClassifier::new("_s", "_r"))
        .open(&path)
        .unwrap();
    assert_eq!(custom.axes()[1].title(), "gate_raw");
    assert_eq!(custom.output_titles(), vec!["bias", "I"]);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.txt");

    match SweepParser::new().open(&path) {
        Err(SweepError::FileRead { path: failed, source }) => {
            assert_eq!(failed, path);
            assert!(matches!(source, ReadError::IoError(_)));
        }
        other => panic!("expected FileRead, got {:?}", other.map(|s| s.sweep_dim())),
    }
}

#[test]
fn test_garbage_file() {
    let dir = tempdir().unwrap();
    let path = write_log(&dir, "garbage.txt", "#a\tb\n1\tone\n2\ttwo\n");

    let err = SweepParser::new().open(&path).unwrap_err();
    assert!(matches!(err, SweepError::FileRead { .. }));
    assert!(err.to_string().contains("garbage.txt"));
}

#[test]
fn test_background_loader_and_summary() {
    let dir = tempdir().unwrap();
    let path = write_log(&dir, "map.txt", ZIGZAG_RASTER);

    let sweep = Loader::new().open(&path).unwrap().wait().unwrap();
    let summary = SweepSummary::new(&sweep);
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["sweep_dim"], 2);
    assert_eq!(json["alternate"], true);
    assert_eq!(json["outputs"][0]["shape"], serde_json::json!([3, 3]));
    assert_eq!(json["device_logs"][0]["device"], "dmm1");
}

#[test]
fn test_filtered_derivative_of_iv_curve() {
    let dir = tempdir().unwrap();
    let rows: String = (0..40).map(|k| format!("{}\t{}\n", k, 0.5 * k as f64)).collect();
    let path = write_log(&dir, "ramp.txt", &format!("#V\tI\n{}", rows));
    let sweep = open(&path);

    let current = sweep.channel_data("I", ReadOptions::default()).unwrap();
    let conductance = apply_filter(FilterKind::DerivativeY, &current, FilterParams::default()).unwrap();
    assert!((conductance[[20]] - 0.5).abs() < 1e-3);

    let smoothed = apply_filter(FilterKind::Gaussian, &current, FilterParams::default());
    assert!(matches!(smoothed, Err(SweepError::UnsupportedDimension { dim: 1, .. })));
}
