use std::path::{Path, PathBuf};

use ndarray::ArrayD;
use serde::Serialize;

use super::header::DeviceLog;
use super::range::SweepRange;

/// A named channel of samples
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub(crate) title: String,
    pub(crate) data: ArrayD<f64>,
}

impl Channel {
    /// Create a channel
    pub fn new(title: impl Into<String>, data: ArrayD<f64>) -> Self {
        Self {
            title: title.into(),
            data,
        }
    }

    /// Channel title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Channel samples, in storage orientation
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }
}

/// A swept (independent) variable
#[derive(Debug, Clone, PartialEq)]
pub struct SweepAxis {
    pub(crate) title: String,
    pub(crate) range: SweepRange,
    pub(crate) data: ArrayD<f64>,
}

impl SweepAxis {
    /// Axis title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Inferred range, fields may be NaN
    pub fn range(&self) -> &SweepRange {
        &self.range
    }

    /// Axis samples as recorded in the file
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }
}

/// Axis structure of a sweep
#[derive(Debug, Clone, PartialEq)]
pub enum SweepLayout {
    /// A single swept axis
    OneD {
        /// The swept axis
        axis: SweepAxis,
    },
    /// A raster: the outer loop runs over `x`, the inner loop over `y`
    TwoD {
        /// Outer-loop axis
        x: SweepAxis,
        /// Inner-loop axis
        y: SweepAxis,
        /// Consecutive passes were scanned in opposite directions
        alternate: bool,
    },
}

/// Direction of a coordinate conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Conversion {
    /// `(r, θ°)` to `(x, y)`
    PolarToCartesian,
    /// `(x, y)` to `(r, θ°)`
    CartesianToPolar,
}

/// The two channels produced by one coordinate conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedChannelPair {
    pub(crate) conversion: Conversion,
    pub(crate) channels: [Channel; 2],
}

impl ComputedChannelPair {
    /// Conversion that produced the pair
    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    /// Both computed channels
    pub fn channels(&self) -> &[Channel; 2] {
        &self.channels
    }
}

/// Parsed semantic model of a sweep-log file
///
/// Built by [`SweepParser`](super::SweepParser). Everything is fixed after
/// parsing except the computed-channel slot.
#[derive(Debug, Clone)]
pub struct SweepDescriptor {
    pub(crate) layout: SweepLayout,
    pub(crate) outputs: Vec<Channel>,
    pub(crate) computed: Option<ComputedChannelPair>,
    pub(crate) before_wait: Option<Vec<f64>>,
    pub(crate) config: Vec<String>,
    pub(crate) comments: Vec<String>,
    pub(crate) device_logs: Vec<DeviceLog>,
    pub(crate) source: Option<PathBuf>,
}

impl SweepDescriptor {
    /// Number of swept axes (1 or 2)
    pub fn sweep_dim(&self) -> usize {
        match self.layout {
            SweepLayout::OneD { .. } => 1,
            SweepLayout::TwoD { .. } => 2,
        }
    }

    /// Axis structure
    pub fn layout(&self) -> &SweepLayout {
        &self.layout
    }

    /// Swept axes, outer first
    pub fn axes(&self) -> Vec<&SweepAxis> {
        match &self.layout {
            SweepLayout::OneD { axis } => vec![axis],
            SweepLayout::TwoD { x, y, .. } => vec![x, y],
        }
    }

    /// Whether raster passes alternate direction (always false for 1-D)
    pub fn alternate(&self) -> bool {
        matches!(self.layout, SweepLayout::TwoD { alternate: true, .. })
    }

    /// Measured channels in file order
    pub fn outputs(&self) -> &[Channel] {
        &self.outputs
    }

    /// Titles of the measured channels
    pub fn output_titles(&self) -> Vec<&str> {
        self.outputs.iter().map(Channel::title).collect()
    }

    /// Current computed pair, if any
    pub fn computed(&self) -> Option<&ComputedChannelPair> {
        self.computed.as_ref()
    }

    /// Titles of the computed channels (empty or two entries)
    pub fn computed_titles(&self) -> Vec<&str> {
        self.computed
            .iter()
            .flat_map(|pair| pair.channels.iter().map(Channel::title))
            .collect()
    }

    /// Settle time before each measurement, per swept device
    pub fn before_wait(&self) -> Option<&[f64]> {
        self.before_wait.as_deref()
    }

    /// Header lines that are not comments
    pub fn config(&self) -> &[String] {
        &self.config
    }

    /// User comments from the header, prefix removed
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Device values logged at sweep start
    pub fn device_logs(&self) -> &[DeviceLog] {
        &self.device_logs
    }

    /// File the descriptor was read from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Plot extent `(x_start, x_stop, y_start, y_stop)` of a raster
    ///
    /// `None` for 1-D sweeps or when any bound is unknown.
    pub fn extent(&self) -> Option<[f64; 4]> {
        match &self.layout {
            SweepLayout::TwoD { x, y, .. } => {
                let extent = [x.range.start, x.range.stop, y.range.start, y.range.stop];
                extent.iter().all(|v| !v.is_nan()).then_some(extent)
            }
            SweepLayout::OneD { .. } => None,
        }
    }

    pub(crate) fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }
}
