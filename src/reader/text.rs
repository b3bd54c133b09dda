use std::fs;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayD};

use super::{MultiSweepMode, RawSweepFile, ReadError, ReaderConfig, SweepReader};

/// Prefix of header lines
pub(crate) const HEADER_PREFIX: char = '#';

/// Reader for the text sweep-log format
#[derive(Debug, Clone, Default)]
pub struct TextSweepReader {
    config: ReaderConfig,
}

impl TextSweepReader {
    /// Create a reader with the default tab delimiter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with custom configuration
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Decode a sweep log from any byte source
    pub fn read_from<R: Read>(
        &self,
        mut source: R,
        mode: MultiSweepMode,
    ) -> Result<RawSweepFile, ReadError> {
        let mut content = String::new();
        source.read_to_string(&mut content)?;
        self.parse_str(&content, mode)
    }

    /// Decode a sweep log held in memory
    pub fn parse_str(&self, content: &str, mode: MultiSweepMode) -> Result<RawSweepFile, ReadError> {
        let (headers, body) = split_header(content);
        let columns = self.read_columns(body)?;

        let titles = self.titles_from_header(&headers, columns.len());

        let data = match mode {
            MultiSweepMode::Disabled => columns
                .into_iter()
                .map(|column| Array1::from(column).into_dyn())
                .collect(),
            MultiSweepMode::Force => reshape_passes(columns)?,
        };

        Ok(RawSweepFile::new(titles, data, headers))
    }

    fn read_columns(&self, body: &str) -> Result<Vec<Vec<f64>>, ReadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(false)
            .comment(Some(HEADER_PREFIX as u8))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let mut columns: Vec<Vec<f64>> = Vec::new();

        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;

            if row == 0 {
                columns = vec![Vec::new(); record.len()];
            } else if record.len() != columns.len() {
                return Err(ReadError::RaggedRow {
                    row,
                    found: record.len(),
                    expected: columns.len(),
                });
            }

            for (column, field) in record.iter().enumerate() {
                let value = field.parse::<f64>().map_err(|_| ReadError::InvalidValue {
                    row,
                    column,
                    value: field.to_string(),
                })?;
                columns[column].push(value);
            }
        }

        if columns.first().map_or(true, |c| c.is_empty()) {
            return Err(ReadError::NoData);
        }

        Ok(columns)
    }

    fn titles_from_header(&self, headers: &[String], column_count: usize) -> Vec<String> {
        let delimiter = char::from(self.config.delimiter);
        let titles: Vec<String> = headers
            .last()
            .map(|line| {
                line.trim_start_matches(HEADER_PREFIX)
                    .split(delimiter)
                    .map(|t| t.trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        if titles.len() == column_count {
            return titles;
        }

        if !headers.is_empty() {
            warn!(
                "Titles line has {} entries for {} columns, using generated titles",
                titles.len(),
                column_count
            );
        }
        (0..column_count).map(|i| format!("col{}", i)).collect()
    }
}

impl SweepReader for TextSweepReader {
    fn read(&self, path: &Path, mode: MultiSweepMode) -> Result<RawSweepFile, ReadError> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content, mode)
    }
}

/// Split leading header lines from the data body
fn split_header(content: &str) -> (Vec<String>, &str) {
    let mut headers = Vec::new();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.starts_with(HEADER_PREFIX) {
            headers.push(trimmed.to_string());
        } else if !trimmed.trim().is_empty() {
            break;
        }
        offset += line.len();
    }

    (headers, &content[offset..])
}

/// Group rows into sweep passes using the first column as the outer-loop value
///
/// The pass length is the number of leading rows sharing the first value. An
/// interrupted last pass is padded with NaN.
fn reshape_passes(columns: Vec<Vec<f64>>) -> Result<Vec<ArrayD<f64>>, ReadError> {
    let outer = &columns[0];
    let rows = outer.len();
    let inner = outer.iter().take_while(|v| **v == outer[0]).count();

    if inner < 2 || inner >= rows {
        return Err(ReadError::NotMultiSweep(format!(
            "first column does not repeat in blocks ({} leading equal values over {} rows)",
            inner, rows
        )));
    }

    if let Some(pass) = outer
        .chunks(inner)
        .position(|block| block.iter().any(|v| *v != block[0]))
    {
        return Err(ReadError::NotMultiSweep(format!(
            "outer value changes inside pass {}",
            pass
        )));
    }

    let passes = (rows + inner - 1) / inner;
    if passes * inner != rows {
        debug!(
            "Last pass is incomplete ({} of {} points), padding with NaN",
            rows - (passes - 1) * inner,
            inner
        );
    }

    columns
        .into_iter()
        .map(|mut column| -> Result<ArrayD<f64>, ReadError> {
            column.resize(passes * inner, f64::NAN);
            Ok(Array2::from_shape_vec((passes, inner), column)?.into_dyn())
        })
        .collect()
}
