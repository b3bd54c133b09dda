//! # Sweep-Log Reader Module
//!
//! This module decodes the lab-automation framework's text sweep logs into a
//! [`RawSweepFile`]: named numeric columns plus the raw header lines.
//!
//! ## File Layout
//!
//! ```text
//! #comment:= cooldown 3
//! #sweep_multi_options:= {'beforewait': [0.02, 0.02], 'start': -1.0, 'stop': 1.0}
//! #readback numpy shape for line part: 2
//! #gate_outer	gate_inner	lockin_x	lockin_y
//! 0.0	-1.0	1.2e-3	3.1e-4
//! 0.0	0.0	1.1e-3	3.0e-4
//! ...
//! ```
//!
//! Leading `#` lines are headers, the last of them carries the tab-separated
//! column titles. Data rows follow.
//!
//! ## Read Modes
//!
//! - [`MultiSweepMode::Force`]: rows are grouped into sweep passes (consecutive
//!   rows sharing the outer-loop value) and every column becomes a 2-D array.
//! - [`MultiSweepMode::Disabled`]: every column is a flat 1-D array.
//!
//! [`read_with_fallback`] tries both, in that order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sweeplog::reader::{read_with_fallback, TextSweepReader};
//!
//! let raw = read_with_fallback(&TextSweepReader::new(), "scan_042.txt".as_ref())?;
//! println!("{} columns: {:?}", raw.column_count(), raw.titles());
//! # Ok::<(), sweeplog::reader::ReadError>(())
//! ```

mod config;
mod error;
mod text;


pub use config::{MultiSweepMode, ReaderConfig};
pub use error::ReadError;
pub use text::TextSweepReader;

use std::path::Path;

use log::debug;
use ndarray::ArrayD;

/// Raw decoded form of a sweep-log file
///
/// Columns are kept in file order. The shape of every column depends on the
/// [`MultiSweepMode`] the file was read with.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSweepFile {
    titles: Vec<String>,
    data: Vec<ArrayD<f64>>,
    headers: Vec<String>,
}

impl RawSweepFile {
    /// Assemble a raw file from its parts
    pub fn new(titles: Vec<String>, data: Vec<ArrayD<f64>>, headers: Vec<String>) -> Self {
        Self {
            titles,
            data,
            headers,
        }
    }

    /// Column titles, in file order
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Column arrays, in file order
    pub fn data(&self) -> &[ArrayD<f64>] {
        &self.data
    }

    /// Raw header lines, without line terminators
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data columns
    pub fn column_count(&self) -> usize {
        self.data.len()
    }

    /// Split into `(titles, data, headers)`
    pub fn into_parts(self) -> (Vec<String>, Vec<ArrayD<f64>>, Vec<String>) {
        (self.titles, self.data, self.headers)
    }
}

/// A decoder for sweep-log files
///
/// Implementations must be usable from a background loader thread.
pub trait SweepReader: Send + Sync {
    /// Decode the file at `path` using the given row-grouping mode
    fn read(&self, path: &Path, mode: MultiSweepMode) -> Result<RawSweepFile, ReadError>;
}

/// Read a file with forced multi-sweep grouping, falling back to flat columns
///
/// Older logs often carry multi-sweep metadata that does not match the rows,
/// while the table itself is still usable as a single flat sweep. The error of
/// the last attempted mode is returned when every mode fails.
pub fn read_with_fallback<R>(reader: &R, path: &Path) -> Result<RawSweepFile, ReadError>
where
    R: SweepReader + ?Sized,
{
    let mut last_error = None;
    for mode in MultiSweepMode::FALLBACK_ORDER {
        match reader.read(path, mode) {
            Ok(raw) => {
                debug!("Read {} with {:?} mode", path.display(), mode);
                return Ok(raw);
            }
            Err(e) => {
                debug!("{:?} mode failed for {}: {}", mode, path.display(), e);
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or(ReadError::NoData))
}
