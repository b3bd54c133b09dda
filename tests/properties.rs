//! Property tests for range inference, scan-order handling and conversions.

use ndarray::{Array1, Array2, Ix2};
use proptest::prelude::*;
use sweeplog::reader::{MultiSweepMode, RawSweepFile, TextSweepReader};
use sweeplog::sweep::{infer_linear_range, parse, ReadOptions};

fn raster(outer: usize, inner: usize, seed: f64) -> RawSweepFile {
    let x = Array2::from_shape_fn((outer, inner), |(i, _)| i as f64);
    let y = Array2::from_shape_fn((outer, inner), |(i, j)| if i % 2 == 0 { j } else { inner - 1 - j } as f64);
    let z = Array2::from_shape_fn((outer, inner), |(i, j)| seed * (i * inner + j) as f64);
    RawSweepFile::new(
        vec!["x".into(), "y".into(), "z".into()],
        vec![x.into_dyn(), y.into_dyn(), z.into_dyn()],
        Vec::new(),
    )
}

proptest! {
    /// A linearly swept array gives back its start, stop and step
    #[test]
    fn test_linear_range_recovery(
        start in -1e3f64..1e3,
        step in prop_oneof![-10.0f64..-1e-3, 1e-3f64..10.0],
        count in 2usize..200,
    ) {
        let values = Array1::from_shape_fn(count, |i| start + step * i as f64);
        let range = infer_linear_range(values.view());

        prop_assert_eq!(range.count, count);
        prop_assert_eq!(range.start, start);
        prop_assert_eq!(range.stop, values[count - 1]);
        prop_assert!((range.step - step).abs() <= 1e-9 * step.abs().max(1.0));
        prop_assert_eq!(range.is_descending(), step < 0.0);
    }

    /// Polar to Cartesian and back restores radius and angle
    #[test]
    fn test_polar_round_trip(
        samples in prop::collection::vec(
            (
                1e-3f64..1e3,
                prop_oneof![
                    (-180.0f64..=180.0).prop_filter("above -180", |d| *d > -180.0),
                    Just(180.0),
                    Just(-179.9999),
                    Just(179.99999),
                ],
            ),
            1..50,
        ),
    ) {
        let index = Array1::from_shape_fn(samples.len(), |i| i as f64);
        let r: Array1<f64> = samples.iter().map(|(r, _)| *r).collect();
        let deg: Array1<f64> = samples.iter().map(|(_, d)| *d).collect();
        let raw = RawSweepFile::new(
            vec!["i".into(), "r".into(), "deg".into()],
            vec![index.into_dyn(), r.clone().into_dyn(), deg.clone().into_dyn()],
            Vec::new(),
        );
        let mut sweep = parse(raw).unwrap();

        sweep.generate_cartesian_from_polar("r", "deg", false).unwrap();
        sweep.generate_polar_from_cartesian("r_X", "deg_Y", false).unwrap();

        let r2 = sweep.channel_data("r_X_R", ReadOptions::default()).unwrap();
        let deg2 = sweep.channel_data("deg_Y_DEG", ReadOptions::default()).unwrap();
        for (a, b) in r.iter().zip(r2.iter()) {
            prop_assert!((a - b).abs() <= 1e-9 * a.max(1.0));
        }
        for (a, b) in deg.iter().zip(deg2.iter()) {
            prop_assert!((a - b).abs() <= 1e-6);
        }
    }

    /// Unscrambling reverses exactly the odd rows and transposing swaps axes
    #[test]
    fn test_read_options_on_raster(outer in 2usize..12, inner in 2usize..12, seed in 0.5f64..4.0) {
        let sweep = parse(raster(outer, inner, seed)).unwrap();
        prop_assert!(sweep.alternate());

        let storage = sweep
            .channel_data("z", ReadOptions::storage())
            .unwrap()
            .into_dimensionality::<Ix2>()
            .unwrap();
        let unscrambled = sweep
            .channel_data("z", ReadOptions::storage().alternate(true))
            .unwrap()
            .into_dimensionality::<Ix2>()
            .unwrap();
        for i in 0..outer {
            for j in 0..inner {
                let source = if i % 2 == 1 { inner - 1 - j } else { j };
                prop_assert_eq!(unscrambled[[i, j]], storage[[i, source]]);
            }
        }

        let transposed = sweep
            .channel_data("z", ReadOptions::new().alternate(true))
            .unwrap()
            .into_dimensionality::<Ix2>()
            .unwrap();
        prop_assert_eq!(transposed, unscrambled.t().to_owned());

        // reads never alter the descriptor
        let again = sweep.channel_data("z", ReadOptions::storage()).unwrap();
        prop_assert_eq!(again, storage.into_dyn());
    }

    /// Forced multi-sweep reading recovers the raster shape from text
    #[test]
    fn test_reader_recovers_raster_shape(outer in 2usize..10, inner in 2usize..10) {
        let mut text = String::from("#x\ty\tz\n");
        for i in 0..outer {
            for j in 0..inner {
                text.push_str(&format!("{}\t{}\t{}\n", i, j, i * inner + j));
            }
        }

        let raw = TextSweepReader::new().parse_str(&text, MultiSweepMode::Force).unwrap();
        for column in raw.data() {
            prop_assert_eq!(column.shape(), &[outer, inner][..]);
        }
        let sweep = parse(raw).unwrap();
        prop_assert_eq!(sweep.sweep_dim(), 2);
        prop_assert!(!sweep.alternate());
    }
}
