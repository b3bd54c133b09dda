use ndarray::{Array1, ArrayView1, Axis, Ix2};
use serde::Serialize;

use super::channels::ReadOptions;
use super::descriptor::{SweepAxis, SweepDescriptor, SweepLayout};
use super::parse::reverse_axis;
use super::SweepError;

/// One slice through a raster channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    /// Title of the axis the slice runs along
    pub axis_title: String,
    /// Axis coordinates, in the channel's orientation
    pub coordinates: Vec<f64>,
    /// Channel values along the slice
    pub values: Vec<f64>,
}

/// Horizontal and vertical slices through one picked raster point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TracePair {
    /// Outer-loop index of the picked point
    pub outer_index: usize,
    /// Inner-loop index of the picked point
    pub inner_index: usize,
    /// Values along x at the picked inner index
    pub horizontal: Trace,
    /// Values along y at the picked outer index
    pub vertical: Trace,
}

impl SweepDescriptor {
    /// Slice a raster channel through the sample nearest to `(x, y)`
    pub fn trace_at(
        &self,
        title: &str,
        x: f64,
        y: f64,
        alternate: bool,
    ) -> Result<TracePair, SweepError> {
        let (x_axis, y_axis) = match &self.layout {
            SweepLayout::TwoD { x, y, .. } => (x, y),
            SweepLayout::OneD { .. } => {
                return Err(SweepError::UnsupportedDimension {
                    operation: "Trace".to_string(),
                    dim: 1,
                })
            }
        };

        let data = self
            .channel_data(title, ReadOptions::storage().alternate(alternate))?
            .into_dimensionality::<Ix2>()?;

        let outer_coordinates = axis_coordinates(x_axis, Axis(1))?;
        let inner_coordinates = axis_coordinates(y_axis, Axis(0))?;

        let outer_index = nearest_index(outer_coordinates.view(), x)
            .ok_or_else(|| SweepError::UndefinedAxis(x_axis.title.clone()))?;
        let inner_index = nearest_index(inner_coordinates.view(), y)
            .ok_or_else(|| SweepError::UndefinedAxis(y_axis.title.clone()))?;

        Ok(TracePair {
            outer_index,
            inner_index,
            horizontal: Trace {
                axis_title: x_axis.title.clone(),
                coordinates: outer_coordinates.to_vec(),
                values: data.column(inner_index).to_vec(),
            },
            vertical: Trace {
                axis_title: y_axis.title.clone(),
                coordinates: inner_coordinates.to_vec(),
                values: data.row(outer_index).to_vec(),
            },
        })
    }
}

/// First lane of an axis' samples, reversed like the outputs when descending
fn axis_coordinates(axis: &SweepAxis, lane: Axis) -> Result<Array1<f64>, SweepError> {
    let mut data = axis.data.clone();
    let along = Axis(1 - lane.index());
    if axis.range.is_descending() {
        data = reverse_axis(data, along);
    }
    let data = data.into_dimensionality::<Ix2>()?;
    if data.len_of(lane) == 0 {
        return Ok(Array1::zeros(0));
    }
    Ok(data.index_axis(lane, 0).to_owned())
}

fn nearest_index(coordinates: ArrayView1<'_, f64>, target: f64) -> Option<usize> {
    coordinates
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_nan())
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .map(|(i, _)| i)
}
