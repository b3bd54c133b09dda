//! # sweeplog - Interpretation of Lab-Instrument Sweep Logs
//!
//! `sweeplog` reads the tab-separated logs written by measurement sweeps and
//! works out what they contain: which columns were swept, which were measured,
//! over which ranges, and in which scan order.
//!
//! ## Key Features
//!
//! - **Line and raster sweeps**: 1-D sweeps and 2-D rasters (an outer loop over
//!   one device, an inner loop over another) are detected from the data shape.
//!
//! - **Range recovery**: start, stop, point count and step of every swept axis
//!   are inferred from the samples and the free-form header, with NaN for
//!   anything that cannot be recovered.
//!
//! - **Scan-order handling**: descending sweeps are flipped to ascending order
//!   and alternating (zig-zag) rasters can be unscrambled on read.
//!
//! - **Derived channels**: polar/Cartesian conversion of channel pairs, e.g.
//!   lock-in X/Y to magnitude/phase.
//!
//! - **Filters**: Gaussian smoothing and derivative-of-Gaussian filters.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sweeplog::prelude::*;
//!
//! let sweep = SweepParser::new().open("scan_042.txt")?;
//! println!("{}", SweepSummary::new(&sweep));
//!
//! let current = sweep.channel_data("I", ReadOptions::default())?;
//! let didv = apply_filter(FilterKind::DerivativeY, &current, FilterParams::default())?;
//! println!("{:?}", didv.shape());
//! # Ok::<(), sweeplog::sweep::SweepError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`reader`]: Decoding of the text log into raw columns and header lines
//! - [`sweep`]: Interpretation of raw columns as a [`sweep::SweepDescriptor`]
//! - [`filter`]: Gaussian and derivative filters on channel data
//! - [`loader`]: Background loading on a worker thread
//! - [`summary`]: Text, colored and JSON overviews of a sweep

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod filter;
pub mod loader;
pub mod reader;
pub mod summary;
pub mod sweep;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::filter::{apply_filter, FilterKind, FilterParams};
    pub use crate::loader::{LoadRequest, Loader};
    pub use crate::reader::{
        read_with_fallback, MultiSweepMode, RawSweepFile, ReadError, ReaderConfig, SweepReader,
        TextSweepReader,
    };
    pub use crate::summary::SweepSummary;
    pub use crate::sweep::{
        ColumnRoleClassifier, ReadOptions, ScaledRawClassifier, SweepDescriptor, SweepError,
        SweepLayout, SweepParser, SweepRange,
    };
}
