//! # Sweep Interpretation Module
//!
//! Turns a [`RawSweepFile`](crate::reader::RawSweepFile) into a
//! [`SweepDescriptor`]: which columns are swept axes, which are measured
//! outputs, the inferred axis ranges, and the metadata scraped from the header.
//!
//! ## Orientation
//!
//! Raster channels are stored as `(outer, inner)` arrays in file order, with
//! each axis flipped when its inferred step is negative. Reads through
//! [`SweepDescriptor::channel_data`] may additionally unscramble alternating
//! passes and transpose to `(inner, outer)`.
//!
//! ## Computed Channels
//!
//! At most one pair of derived channels exists at a time, produced by
//! [`SweepDescriptor::generate_cartesian_from_polar`] or
//! [`SweepDescriptor::generate_polar_from_cartesian`]. A successful generation
//! replaces the previous pair; a failed one leaves it untouched.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sweeplog::sweep::{ReadOptions, SweepParser};
//!
//! let mut sweep = SweepParser::new().open("scan_042.txt")?;
//! println!("{}-D sweep of {:?}", sweep.sweep_dim(), sweep.output_titles());
//!
//! sweep.generate_polar_from_cartesian("lockin_x", "lockin_y", sweep.alternate())?;
//! let phase = sweep.channel_data("lockin_y_DEG", ReadOptions::default())?;
//! println!("phase shape {:?}", phase.shape());
//! # Ok::<(), sweeplog::sweep::SweepError>(())
//! ```

mod channels;
mod descriptor;
mod error;
pub mod header;
mod parse;
mod range;
mod roles;
mod trace;


pub use channels::ReadOptions;
pub use descriptor::{Channel, ComputedChannelPair, Conversion, SweepAxis, SweepDescriptor, SweepLayout};
pub use error::SweepError;
pub use header::DeviceLog;
pub use parse::{parse, SweepParser};
pub use range::{infer_linear_range, infer_raster_range, SweepRange};
pub use roles::{ColumnRoleClassifier, LeadingColumns, RasterRoles, ScaledRawClassifier};
pub use trace::{Trace, TracePair};

pub(crate) use range::format_g;
