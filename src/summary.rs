//! Printable overview of a parsed sweep, as shown by `sweeplog info`.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;
use serde::Serialize;

use crate::filter::FilterKind;
use crate::sweep::{format_g, DeviceLog, SweepAxis, SweepDescriptor, SweepRange};

/// One swept axis in a summary
#[derive(Debug, Clone, Serialize)]
pub struct AxisSummary {
    /// Axis title
    pub title: String,
    /// Inferred range; unknown fields serialize as `null`
    pub range: SweepRange,
}

/// One channel in a summary
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    /// Channel title
    pub title: String,
    /// Storage shape
    pub shape: Vec<usize>,
}

/// Human- and machine-readable overview of a parsed sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    /// Source file, when known
    pub file: Option<String>,
    /// Number of swept axes
    pub sweep_dim: usize,
    /// Whether raster passes alternate direction
    pub alternate: bool,
    /// Swept axes, outer first
    pub axes: Vec<AxisSummary>,
    /// Plot extent `(x_start, x_stop, y_start, y_stop)`
    pub extent: Option<[f64; 4]>,
    /// Measured channels
    pub outputs: Vec<ChannelSummary>,
    /// Computed channels
    pub computed: Vec<ChannelSummary>,
    /// Settle time per swept device
    pub before_wait: Option<Vec<f64>>,
    /// Header comments
    pub comments: Vec<String>,
    /// Number of configuration header lines
    pub config_lines: usize,
    /// Device values logged at sweep start
    pub device_logs: Vec<DeviceLog>,
    /// Labels of the filters applicable to this sweep
    pub filters: Vec<&'static str>,
}

impl SweepSummary {
    /// Summarize a descriptor
    pub fn new(sweep: &SweepDescriptor) -> Self {
        let channel = |c: &crate::sweep::Channel| ChannelSummary {
            title: c.title().to_string(),
            shape: c.data().shape().to_vec(),
        };
        let dim = sweep.sweep_dim();

        Self {
            file: sweep.source().map(|p| p.display().to_string()),
            sweep_dim: dim,
            alternate: sweep.alternate(),
            axes: sweep.axes().into_iter().map(AxisSummary::from).collect(),
            extent: sweep.extent(),
            outputs: sweep.outputs().iter().map(channel).collect(),
            computed: sweep
                .computed()
                .map(|pair| pair.channels().iter().map(channel).collect())
                .unwrap_or_default(),
            before_wait: sweep.before_wait().map(<[f64]>::to_vec),
            comments: sweep.comments().to_vec(),
            config_lines: sweep.config().len(),
            device_logs: sweep.device_logs().to_vec(),
            filters: FilterKind::available(dim)
                .iter()
                .map(|kind| kind.label(dim))
                .collect(),
        }
    }

    fn dimension_label(&self) -> String {
        if self.alternate {
            format!("{}-D (alternating)", self.sweep_dim)
        } else {
            format!("{}-D", self.sweep_dim)
        }
    }

    fn extent_label(&self) -> String {
        match self.extent {
            Some(e) => format!(
                "({}, {}, {}, {})",
                format_g(e[0], 3),
                format_g(e[1], 3),
                format_g(e[2], 3),
                format_g(e[3], 3)
            ),
            None => "unknown".to_string(),
        }
    }

    fn before_wait_label(&self) -> String {
        match &self.before_wait {
            Some(values) => {
                let values: Vec<String> = values.iter().map(|v| format_g(*v, 3)).collect();
                format!("[{}]", values.join(", "))
            }
            None => "unknown".to_string(),
        }
    }

    /// Format the summary with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style("Sweep Summary").bold().cyan()));
            output.push_str(&format!("{}\n", style("=============").cyan()));
            if let Some(file) = &self.file {
                output.push_str(&format!("{}: {}\n", style("File").bold(), file));
            }
            output.push_str(&format!(
                "{}: {}\n\n",
                style("Dimension").bold(),
                self.dimension_label()
            ));

            output.push_str(&format!("{}\n", style("Axes").bold()));
            for axis in &self.axes {
                output.push_str(&format!("  {}: {}\n", style(&axis.title).green(), axis.range));
            }
            let extent = self.extent_label();
            let extent = if self.extent.is_some() {
                style(extent).green()
            } else {
                style(extent).yellow()
            };
            output.push_str(&format!("{}: {}\n\n", style("Extent").bold(), extent));

            output.push_str(&format!(
                "{} ({})\n",
                style("Outputs").bold(),
                style(self.outputs.len()).cyan()
            ));
            for channel in &self.outputs {
                output.push_str(&format!("  {} {:?}\n", channel.title, channel.shape));
            }
            for channel in &self.computed {
                output.push_str(&format!(
                    "  {} {:?} {}\n",
                    style(&channel.title).magenta(),
                    channel.shape,
                    style("(computed)").dim()
                ));
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {}\n",
                style("Before wait").bold(),
                self.before_wait_label()
            ));
            output.push_str(&format!(
                "{}: {}\n",
                style("Config lines").bold(),
                self.config_lines
            ));
            if !self.comments.is_empty() {
                output.push_str(&format!("{}\n", style("Comments").bold()));
                for comment in &self.comments {
                    output.push_str(&format!("  {}\n", comment.trim()));
                }
            }
            if !self.device_logs.is_empty() {
                output.push_str(&format!("{}\n", style("Devices").bold()));
                for log in &self.device_logs {
                    output.push_str(&format!("  {} = {}\n", style(&log.device).green(), log.value));
                }
            }
            output.push_str(&format!(
                "{}: {}\n",
                style("Filters").bold(),
                self.filters.join(", ")
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl From<&SweepAxis> for AxisSummary {
    fn from(axis: &SweepAxis) -> Self {
        Self {
            title: axis.title().to_string(),
            range: *axis.range(),
        }
    }
}

impl fmt::Display for SweepSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sweep Summary")?;
        writeln!(f, "=============")?;
        if let Some(file) = &self.file {
            writeln!(f, "File: {}", file)?;
        }
        writeln!(f, "Dimension: {}", self.dimension_label())?;
        writeln!(f)?;

        writeln!(f, "Axes")?;
        for axis in &self.axes {
            writeln!(f, "  {}: {}", axis.title, axis.range)?;
        }
        writeln!(f, "Extent: {}", self.extent_label())?;
        writeln!(f)?;

        writeln!(f, "Outputs ({})", self.outputs.len())?;
        for channel in &self.outputs {
            writeln!(f, "  {} {:?}", channel.title, channel.shape)?;
        }
        for channel in &self.computed {
            writeln!(f, "  {} {:?} (computed)", channel.title, channel.shape)?;
        }
        writeln!(f)?;

        writeln!(f, "Before wait: {}", self.before_wait_label())?;
        writeln!(f, "Config lines: {}", self.config_lines)?;
        if !self.comments.is_empty() {
            writeln!(f, "Comments")?;
            for comment in &self.comments {
                writeln!(f, "  {}", comment.trim())?;
            }
        }
        if !self.device_logs.is_empty() {
            writeln!(f, "Devices")?;
            for log in &self.device_logs {
                writeln!(f, "  {} = {}", log.device, log.value)?;
            }
        }
        writeln!(f, "Filters: {}", self.filters.join(", "))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::RawSweepFile;
    use crate::sweep::parse;
    use ndarray::array;

    fn raster() -> SweepDescriptor {
        let raw = RawSweepFile::new(
            vec!["x".into(), "y".into(), "z".into()],
            vec![
                array![[0.0, 0.0], [1.0, 1.0]].into_dyn(),
                array![[5.0, 6.0], [6.0, 5.0]].into_dyn(),
                array![[1.0, 2.0], [3.0, 4.0]].into_dyn(),
            ],
            vec![
                "#comment:= base temperature".into(),
                "#com ...:= dmm1: 0.25".into(),
                "#sweep_multi_options:= {'beforewait': [0.1, 0.2], 'start': 5.0, 'stop': 6.0}".into(),
                "#shape".into(),
                "#x\ty\tz".into(),
            ],
        );
        parse(raw).unwrap()
    }

    #[test]
    fn test_summary_fields() {
        let summary = SweepSummary::new(&raster());
        assert_eq!(summary.sweep_dim, 2);
        assert!(summary.alternate);
        assert_eq!(summary.axes.len(), 2);
        assert_eq!(summary.extent, Some([0.0, 1.0, 5.0, 6.0]));
        assert_eq!(summary.outputs[0].shape, vec![2, 2]);
        assert_eq!(summary.before_wait, Some(vec![0.1, 0.2]));
        assert_eq!(summary.filters, vec!["No filter", "dz/dx", "dz/dy", "Gaussian filter"]);
    }

    #[test]
    fn test_summary_display() {
        let mut sweep = raster();
        sweep.generate_polar_from_cartesian("z", "z", false).unwrap();
        let text = SweepSummary::new(&sweep).to_string();

        assert!(text.contains("Dimension: 2-D (alternating)"));
        assert!(text.contains("  x: [0, 1], npts: 2, step: 1"));
        assert!(text.contains("Extent: (0, 1, 5, 6)"));
        assert!(text.contains("  z_R [2, 2] (computed)"));
        assert!(text.contains("Before wait: [0.1, 0.2]"));
        assert!(text.contains("  base temperature"));
        assert!(text.contains("  dmm1 = 0.25"));
    }

    #[test]
    fn test_summary_json_has_null_for_unknown() {
        let raw = RawSweepFile::new(
            vec!["V".into()],
            vec![array![f64::NAN, 1.0].into_dyn()],
            Vec::new(),
        );
        let summary = SweepSummary::new(&parse(raw).unwrap());
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["sweep_dim"], 1);
        assert!(json["axes"][0]["range"]["start"].is_null());
        assert!(json["extent"].is_null());
        assert_eq!(json["filters"][1], "dy/dx");
    }
}
