//! Assignment of axis roles to the columns of a 2-D raster.

use std::fmt;

/// Column indices of the two swept axes of a raster
///
/// Outputs are every column after `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterRoles {
    /// Outer-loop axis column
    pub x: usize,
    /// Inner-loop axis column
    pub y: usize,
}

impl RasterRoles {
    /// Index of the first measured output column
    pub fn first_output(&self) -> usize {
        self.y + 1
    }
}

impl Default for RasterRoles {
    fn default() -> Self {
        Self { x: 0, y: 1 }
    }
}

/// Decides which raster columns are swept axes
pub trait ColumnRoleClassifier: fmt::Debug + Send + Sync {
    /// Pick the axis columns given the column titles in file order
    fn classify(&self, titles: &[String]) -> RasterRoles;
}

/// The first two columns are the swept axes
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingColumns;

impl ColumnRoleClassifier for LeadingColumns {
    fn classify(&self, _titles: &[String]) -> RasterRoles {
        RasterRoles::default()
    }
}

/// Workaround for drivers that log a scaled device next to its raw value
///
/// When the first title ends with the scaled suffix and the second with the
/// raw suffix, the raw column is skipped and the inner axis is column 2.
/// Otherwise behaves like [`LeadingColumns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledRawClassifier {
    scaled_suffix: String,
    raw_suffix: String,
}

impl ScaledRawClassifier {
    /// Create a classifier with custom suffixes
    pub fn new(scaled_suffix: impl Into<String>, raw_suffix: impl Into<String>) -> Self {
        Self {
            scaled_suffix: scaled_suffix.into(),
            raw_suffix: raw_suffix.into(),
        }
    }
}

impl Default for ScaledRawClassifier {
    fn default() -> Self {
        Self::new("_scaled", "_raw")
    }
}

impl ColumnRoleClassifier for ScaledRawClassifier {
    fn classify(&self, titles: &[String]) -> RasterRoles {
        match titles {
            [first, second, ..]
                if first.ends_with(&self.scaled_suffix) && second.ends_with(&self.raw_suffix) =>
            {
                RasterRoles { x: 0, y: 2 }
            }
            _ => RasterRoles::default(),
        }
    }
}
