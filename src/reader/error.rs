/// Errors that can occur while decoding a sweep-log file
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Tabular decoding error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// A data field is not a floating point number
    #[error("Invalid value {value:?} at data row {row}, column {column}")]
    InvalidValue {
        /// Zero-based data row
        row: usize,
        /// Zero-based column
        column: usize,
        /// Offending field text
        value: String,
    },

    /// A data row does not have the same number of fields as the first one
    #[error("Data row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        /// Zero-based data row
        row: usize,
        /// Number of fields found
        found: usize,
        /// Number of fields of the first row
        expected: usize,
    },

    /// The file has no data rows
    #[error("No data rows found")]
    NoData,

    /// Rows cannot be grouped into sweep passes
    #[error("Not a multi-sweep file: {0}")]
    NotMultiSweep(String),

    /// Column reshaping failed
    #[error("Shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),
}
