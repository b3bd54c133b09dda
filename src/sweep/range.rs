//! Best-effort reconstruction of swept axis ranges.
//!
//! Ranges are metadata, not measurements: any field that cannot be resolved
//! from the samples or the headers is NaN, and consumers treat such a range
//! as "extent unknown".

use std::fmt;

use log::debug;
use ndarray::{ArrayView1, ArrayView2, Axis};
use serde::Serialize;

use super::header::{parse_sweep_bounds, sweep_options_line};

/// Start, stop, number of points and step of a swept axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRange {
    /// First swept value
    pub start: f64,
    /// Last swept value
    pub stop: f64,
    /// Number of points
    pub count: usize,
    /// Signed increment between points
    pub step: f64,
}

impl SweepRange {
    /// A range with only the point count known
    pub fn unknown(count: usize) -> Self {
        Self {
            start: f64::NAN,
            stop: f64::NAN,
            count,
            step: f64::NAN,
        }
    }

    /// True when both bounds are defined
    pub fn is_resolved(&self) -> bool {
        !self.start.is_nan() && !self.stop.is_nan()
    }

    /// True when the step is known and negative
    pub fn is_descending(&self) -> bool {
        self.step < 0.0
    }
}

impl fmt::Display for SweepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}], npts: {}, step: {}",
            format_g(self.start, 3),
            format_g(self.stop, 3),
            self.count,
            format_g(self.step, 3)
        )
    }
}

/// Infer the range of a linearly swept 1-D array
///
/// `start` is the first sample. `stop` is the last sample when it is defined,
/// otherwise it is extrapolated from the first two samples.
pub fn infer_linear_range(values: ArrayView1<'_, f64>) -> SweepRange {
    let count = values.len();
    let mut range = SweepRange::unknown(count);

    let Some(&first) = values.first() else {
        return range;
    };
    if first.is_nan() {
        return range;
    }
    range.start = first;

    if count == 1 {
        range.stop = first;
        return range;
    }

    let last = values[count - 1];
    if !last.is_nan() {
        range.stop = last;
        range.step = (last - first) / (count - 1) as f64;
    } else if !values[1].is_nan() {
        range.step = values[1] - first;
        range.stop = first + range.step * (count - 1) as f64;
    }
    range
}

/// Infer `(x, y)` ranges of a 2-D raster
///
/// `x` and `y` have shape `(outer, inner)`. The inner (y) bounds come from the
/// sweep-options header line; the outer (x) range is always estimated from the
/// data because multi-axis logs do not record it reliably.
pub fn infer_raster_range(
    headers: &[String],
    x: ArrayView2<'_, f64>,
    y: ArrayView2<'_, f64>,
) -> (SweepRange, SweepRange) {
    let x_range = if x.ncols() > 0 {
        infer_linear_range(x.index_axis(Axis(1), 0))
    } else {
        SweepRange::unknown(x.nrows())
    };

    let mut y_range = SweepRange::unknown(y.len_of(Axis(1)));
    match sweep_options_line(headers) {
        Some(line) => {
            let (start, stop) = parse_sweep_bounds(line);
            if start.is_some() || stop.is_some() {
                y_range.start = start.unwrap_or(f64::NAN);
                y_range.stop = stop.unwrap_or(f64::NAN);
                y_range.step = (y_range.stop - y_range.start) / (y_range.count as f64 - 1.0);
            } else {
                debug!("Sweep options line has no start/stop: {}", line);
            }
        }
        None => debug!("No sweep options line in header, inner range unknown"),
    }

    (x_range, y_range)
}

/// Format a float like `%.{precision}g`
pub(crate) fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
