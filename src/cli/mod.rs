use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use sweeplog::filter::FilterKind;

mod config;
mod export;
mod info;

pub use config::Config;
pub use export::{Conversion, ExportArgs};

/// sweeplog - Inspect and export lab-instrument sweep logs
#[derive(Parser)]
#[command(name = "sweeplog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Filter applied before export
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FilterArg {
    /// No filtering
    None,
    /// Derivative along axis 1 (dz/dx)
    DerivativeX,
    /// Derivative along axis 0 (dy/dx, dz/dy)
    DerivativeY,
    /// Gaussian filter on every axis
    Gaussian,
}

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::None => FilterKind::None,
            FilterArg::DerivativeX => FilterKind::DerivativeX,
            FilterArg::DerivativeY => FilterKind::DerivativeY,
            FilterArg::Gaussian => FilterKind::Gaussian,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Display the interpretation of a sweep log
    Info {
        /// Input sweep log
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export one channel as CSV
    Export {
        /// Input sweep log
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Title of the channel to export
        #[arg(short = 'c', long)]
        channel: String,

        /// Reverse odd passes of an alternating raster
        #[arg(long)]
        alternate: bool,

        /// Keep the (outer, inner) storage orientation
        #[arg(long)]
        no_transpose: bool,

        /// Filter applied to the channel
        #[arg(short = 'f', long, value_enum)]
        filter: Option<FilterArg>,

        /// Filter standard deviation, in samples
        #[arg(long, requires = "filter")]
        sigma: Option<f64>,

        /// Filter derivative order
        #[arg(long, requires = "filter")]
        order: Option<usize>,

        /// Compute `{R}_X` and `{DEG}_Y` from a radius and an angle channel
        #[arg(long, num_args = 2, value_names = ["R", "DEG"], conflicts_with = "cart_to_polar")]
        polar_to_cart: Option<Vec<String>>,

        /// Compute `{X}_R` and `{Y}_DEG` from two Cartesian channels
        #[arg(long, num_args = 2, value_names = ["X", "Y"])]
        cart_to_polar: Option<Vec<String>>,

        /// Output CSV path (stdout when omitted)
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Info { file, json } => info::run(file, json, &config),
        Commands::Export {
            file,
            channel,
            alternate,
            no_transpose,
            filter,
            sigma,
            order,
            polar_to_cart,
            cart_to_polar,
            output,
        } => {
            let conversion = match (polar_to_cart, cart_to_polar) {
                (Some(pair), _) => Conversion::from_pair(pair, true),
                (None, Some(pair)) => Conversion::from_pair(pair, false),
                (None, None) => None,
            };
            export::run(
                ExportArgs {
                    file,
                    channel,
                    alternate,
                    no_transpose,
                    filter: filter.map(FilterKind::from),
                    sigma,
                    order,
                    conversion,
                    output,
                },
                &config,
            )
        }
    }
}
