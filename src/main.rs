//! # sweeplog
//!
//! Command-line front end for interpreting lab-instrument sweep logs.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a sweep
//! sweeplog info scan_042.txt
//!
//! # Export the phase of a lock-in raster, unscrambled and smoothed
//! sweeplog export scan_042.txt --cart-to-polar lockin_x lockin_y \
//!     --channel lockin_y_DEG --alternate --filter gaussian --order 0 -o phase.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    dispatch(cli)
}
