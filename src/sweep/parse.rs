use std::path::Path;

use log::{debug, info};
use ndarray::{ArrayD, Axis, Ix1, Ix2, Slice};

use super::descriptor::{Channel, SweepAxis, SweepDescriptor, SweepLayout};
use super::header::{extract_before_wait, extract_device_logs, split_config_and_comments};
use super::range::{infer_linear_range, infer_raster_range};
use super::roles::{ColumnRoleClassifier, ScaledRawClassifier};
use super::SweepError;
use crate::reader::{read_with_fallback, RawSweepFile, SweepReader, TextSweepReader};

/// Turns raw sweep-log columns into a [`SweepDescriptor`]
#[derive(Debug)]
pub struct SweepParser {
    classifier: Box<dyn ColumnRoleClassifier>,
}

impl Default for SweepParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepParser {
    /// Create a parser using the default [`ScaledRawClassifier`]
    pub fn new() -> Self {
        Self::with_classifier(ScaledRawClassifier::default())
    }

    /// Create a parser with a custom raster column-role classifier
    pub fn with_classifier<C: ColumnRoleClassifier + 'static>(classifier: C) -> Self {
        Self {
            classifier: Box::new(classifier),
        }
    }

    /// Open and parse a text sweep log
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<SweepDescriptor, SweepError> {
        self.open_with(&TextSweepReader::new(), path.as_ref())
    }

    /// Open a file with a specific reader and parse it
    ///
    /// The reader is tried in forced multi-sweep mode first, then with flat
    /// columns. Failure of both is reported as [`SweepError::FileRead`].
    pub fn open_with<R>(&self, reader: &R, path: &Path) -> Result<SweepDescriptor, SweepError>
    where
        R: SweepReader + ?Sized,
    {
        info!("Opening {}", path.display());
        let raw = read_with_fallback(reader, path).map_err(|source| SweepError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.parse(raw)?.with_source(path))
    }

    /// Build the descriptor of a decoded file
    ///
    /// The rank of the first column decides the sweep dimension: 1 for a line
    /// sweep, 2 for a raster. Header scraping never fails the parse.
    pub fn parse(&self, raw: RawSweepFile) -> Result<SweepDescriptor, SweepError> {
        let (titles, data, headers) = raw.into_parts();

        let first = data
            .first()
            .ok_or_else(|| SweepError::MalformedInput("file has no columns".to_string()))?;
        if titles.len() != data.len() {
            return Err(SweepError::MalformedInput(format!(
                "{} titles for {} columns",
                titles.len(),
                data.len()
            )));
        }
        if let Some((title, column)) = titles
            .iter()
            .zip(&data)
            .find(|(_, column)| column.shape() != first.shape())
        {
            return Err(SweepError::MalformedInput(format!(
                "column {} has shape {:?}, expected {:?}",
                title,
                column.shape(),
                first.shape()
            )));
        }

        let (layout, outputs) = match first.ndim() {
            1 => build_line(titles, data)?,
            2 => self.build_raster(titles, data, &headers)?,
            rank => {
                return Err(SweepError::MalformedInput(format!(
                    "unsupported column rank {}",
                    rank
                )))
            }
        };

        let before_wait = extract_before_wait(&headers);
        if before_wait.is_none() {
            debug!("No before-wait settle times in header");
        }
        let (config, comments) = split_config_and_comments(&headers);
        let device_logs = extract_device_logs(&headers);

        Ok(SweepDescriptor {
            layout,
            outputs,
            computed: None,
            before_wait,
            config,
            comments,
            device_logs,
            source: None,
        })
    }

    fn build_raster(
        &self,
        titles: Vec<String>,
        data: Vec<ArrayD<f64>>,
        headers: &[String],
    ) -> Result<(SweepLayout, Vec<Channel>), SweepError> {
        let roles = self.classifier.classify(&titles);
        if data.len() <= roles.x.max(roles.y) {
            return Err(SweepError::MalformedInput(format!(
                "raster needs at least {} columns, found {}",
                roles.x.max(roles.y) + 1,
                data.len()
            )));
        }
        debug!("Raster axes: x = column {}, y = column {}", roles.x, roles.y);

        let x_data = data[roles.x].clone();
        let y_data = data[roles.y].clone();
        let x_view = x_data.view().into_dimensionality::<Ix2>()?;
        let y_view = y_data.view().into_dimensionality::<Ix2>()?;

        let (x_range, y_range) = infer_raster_range(headers, x_view, y_view);
        let alternate = y_view.nrows() >= 2 && y_view.row(0) != y_view.row(1);

        let x_title = titles[roles.x].clone();
        let mut y_title = titles[roles.y].clone();
        if y_title == x_title {
            y_title.push('_');
        }

        let mut outputs: Vec<Channel> = Vec::new();
        for (title, mut column) in titles
            .into_iter()
            .zip(data)
            .skip(roles.first_output())
        {
            if x_range.is_descending() {
                column = reverse_axis(column, Axis(0));
            }
            if y_range.is_descending() {
                column = reverse_axis(column, Axis(1));
            }
            let title = unique_title(title, &outputs);
            outputs.push(Channel::new(title, column));
        }

        let layout = SweepLayout::TwoD {
            x: SweepAxis {
                title: x_title,
                range: x_range,
                data: x_data,
            },
            y: SweepAxis {
                title: y_title,
                range: y_range,
                data: y_data,
            },
            alternate,
        };
        Ok((layout, outputs))
    }
}

/// Parse with the default [`SweepParser`]
pub fn parse(raw: RawSweepFile) -> Result<SweepDescriptor, SweepError> {
    SweepParser::new().parse(raw)
}

fn build_line(
    titles: Vec<String>,
    data: Vec<ArrayD<f64>>,
) -> Result<(SweepLayout, Vec<Channel>), SweepError> {
    let axis_data = data[0].clone();
    let range = infer_linear_range(axis_data.view().into_dimensionality::<Ix1>()?);

    let mut outputs: Vec<Channel> = Vec::new();
    for (title, column) in titles.iter().zip(data) {
        let column = if range.is_descending() {
            reverse_axis(column, Axis(0))
        } else {
            column
        };
        let title = unique_title(title.clone(), &outputs);
        outputs.push(Channel::new(title, column));
    }

    let axis = SweepAxis {
        title: titles[0].clone(),
        range,
        data: axis_data,
    };
    Ok((SweepLayout::OneD { axis }, outputs))
}

/// Standard-layout copy of `data` with `axis` in reverse order
pub(crate) fn reverse_axis(data: ArrayD<f64>, axis: Axis) -> ArrayD<f64> {
    data.slice_axis(axis, Slice::new(0, None, -1))
        .as_standard_layout()
        .into_owned()
}

/// Append `_` until `title` differs from every channel title
fn unique_title(mut title: String, taken: &[Channel]) -> String {
    while taken.iter().any(|c| c.title == title) {
        title.push('_');
    }
    title
}
