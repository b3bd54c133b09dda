use anyhow::{Context, Result};
use log::info;
use ndarray::{ArrayD, Axis};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use sweeplog::filter::{apply_filter, FilterKind, FilterParams};
use sweeplog::loader::Loader;
use sweeplog::reader::TextSweepReader;
use sweeplog::sweep::{ReadOptions, SweepDescriptor};

use super::Config;

/// Coordinate conversion requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Radius and angle channels to Cartesian
    PolarToCartesian { r: String, deg: String },
    /// Cartesian channels to radius and angle
    CartesianToPolar { x: String, y: String },
}

impl Conversion {
    /// Build from the two values of a `num_args = 2` flag
    pub fn from_pair(pair: Vec<String>, to_cartesian: bool) -> Option<Self> {
        let [first, second]: [String; 2] = pair.try_into().ok()?;
        Some(if to_cartesian {
            Conversion::PolarToCartesian { r: first, deg: second }
        } else {
            Conversion::CartesianToPolar { x: first, y: second }
        })
    }

    fn apply(&self, sweep: &mut SweepDescriptor, alternate: bool) -> Result<()> {
        match self {
            Conversion::PolarToCartesian { r, deg } => sweep
                .generate_cartesian_from_polar(r, deg, alternate)
                .context("Polar to Cartesian conversion failed"),
            Conversion::CartesianToPolar { x, y } => sweep
                .generate_polar_from_cartesian(x, y, alternate)
                .context("Cartesian to polar conversion failed"),
        }
    }
}

/// Arguments of the export command
#[derive(Debug)]
pub struct ExportArgs {
    pub file: PathBuf,
    pub channel: String,
    pub alternate: bool,
    pub no_transpose: bool,
    pub filter: Option<FilterKind>,
    pub sigma: Option<f64>,
    pub order: Option<usize>,
    pub conversion: Option<Conversion>,
    pub output: Option<PathBuf>,
}

/// Export one channel of a sweep log as CSV
pub fn run(args: ExportArgs, config: &Config) -> Result<()> {
    let loader = Loader::with_parts(config.parser(), TextSweepReader::new());
    let mut sweep = loader
        .open(&args.file)?
        .wait()
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let options = ReadOptions::new()
        .alternate(args.alternate || config.export.alternate.unwrap_or(false))
        .transpose(!args.no_transpose && config.export.transpose.unwrap_or(true));

    if let Some(conversion) = &args.conversion {
        conversion.apply(&mut sweep, options.alternate)?;
        info!("Computed channels: {:?}", sweep.computed_titles());
    }

    let mut data = sweep.channel_data(&args.channel, options)?;
    if let Some(kind) = args.filter {
        let defaults = FilterParams::default();
        let params = FilterParams {
            sigma: args.sigma.unwrap_or(defaults.sigma),
            order: args.order.unwrap_or(defaults.order),
        };
        data = apply_filter(kind, &data, params)?;
    }

    let delimiter = config.delimiter()?;
    let header = line_axis(&sweep, options)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_channel(BufWriter::new(file), delimiter, &args.channel, &data, header)?;
            info!("Wrote {} to {}", args.channel, path.display());
        }
        None => write_channel(io::stdout().lock(), delimiter, &args.channel, &data, header)?,
    }

    Ok(())
}

/// Title and samples of the swept axis of a line sweep, in output order
fn line_axis(sweep: &SweepDescriptor, options: ReadOptions) -> Result<Option<(String, ArrayD<f64>)>> {
    if sweep.sweep_dim() != 1 {
        return Ok(None);
    }
    let Some(first) = sweep.outputs().first() else {
        return Ok(None);
    };
    let samples = sweep.channel_data(first.title(), options)?;
    Ok(Some((first.title().to_string(), samples)))
}

/// Write a channel as CSV
///
/// Line sweeps become two columns, axis then channel, under a title row.
/// Rasters are written as a bare matrix, one row per lane of axis 0.
fn write_channel<W: Write>(
    out: W,
    delimiter: u8,
    title: &str,
    data: &ArrayD<f64>,
    axis: Option<(String, ArrayD<f64>)>,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(false)
        .from_writer(out);

    match (data.ndim(), axis) {
        (1, Some((axis_title, samples))) => {
            writer.write_record([axis_title.as_str(), title])?;
            for (x, v) in samples.iter().zip(data.iter()) {
                writer.write_record([x.to_string(), v.to_string()])?;
            }
        }
        (1, None) => {
            writer.write_record([title])?;
            for v in data.iter() {
                writer.write_record([v.to_string()])?;
            }
        }
        _ => {
            for row in data.axis_iter(Axis(0)) {
                writer.write_record(row.iter().map(|v| v.to_string()))?;
            }
        }
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
