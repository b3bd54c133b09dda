/// How rows of a sweep log are grouped into sweep passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiSweepMode {
    /// Group consecutive rows sharing the first column value into passes,
    /// producing 2-D columns. Fails if the rows do not form such blocks.
    #[default]
    Force,
    /// Every column is a flat 1-D array of all rows
    Disabled,
}

impl MultiSweepMode {
    /// Modes tried, in order, when opening a file
    pub const FALLBACK_ORDER: [MultiSweepMode; 2] = [MultiSweepMode::Force, MultiSweepMode::Disabled];
}

/// Configuration for the text sweep-log reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field delimiter of data rows and of the titles line
    pub delimiter: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { delimiter: b'\t' }
    }
}
