use ndarray::{ArrayD, Axis, Slice, Zip};

use super::descriptor::{Channel, ComputedChannelPair, Conversion, SweepDescriptor};
use super::SweepError;

/// How [`SweepDescriptor::channel_data`] orients the returned copy
///
/// The default transposes rasters to `(inner, outer)` so that rows run along
/// the inner-loop axis, which is what image plotting expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Reverse odd raster rows to undo alternating scan direction
    pub alternate: bool,
    /// Swap rows and columns of raster data
    pub transpose: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            alternate: false,
            transpose: true,
        }
    }
}

impl ReadOptions {
    /// Default options: transposed, no unscrambling
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage orientation `(outer, inner)`, no unscrambling
    pub fn storage() -> Self {
        Self {
            alternate: false,
            transpose: false,
        }
    }

    /// Set odd-row unscrambling
    pub fn alternate(mut self, alternate: bool) -> Self {
        self.alternate = alternate;
        self
    }

    /// Set transposition
    pub fn transpose(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }
}

impl SweepDescriptor {
    /// Find an output channel, then a computed channel, by title
    pub fn channel(&self, title: &str) -> Result<&Channel, SweepError> {
        self.outputs
            .iter()
            .chain(self.computed.iter().flat_map(|pair| pair.channels.iter()))
            .find(|c| c.title == title)
            .ok_or_else(|| SweepError::UnknownChannel(title.to_string()))
    }

    /// Copy of a channel's samples
    ///
    /// The copy never aliases the descriptor. With `alternate` on a raster,
    /// rows 1, 3, 5, ... are reversed before the optional transposition.
    /// Neither option has an effect on 1-D data.
    pub fn channel_data(&self, title: &str, options: ReadOptions) -> Result<ArrayD<f64>, SweepError> {
        let mut data = self.channel(title)?.data.clone();

        if data.ndim() != 2 {
            return Ok(data);
        }
        if options.alternate {
            reverse_odd_rows(&mut data);
        }
        if options.transpose {
            data = data.reversed_axes().as_standard_layout().into_owned();
        }
        Ok(data)
    }

    /// Compute `x = r cos θ`, `y = r sin θ` from a radius and an angle in degrees
    ///
    /// Installs `{r}_X` and `{deg}_Y` as the computed pair, replacing any
    /// previous pair. On error the computed pair is left unchanged.
    pub fn generate_cartesian_from_polar(
        &mut self,
        r_title: &str,
        deg_title: &str,
        alternate: bool,
    ) -> Result<(), SweepError> {
        let (r, deg) = self.read_pair(r_title, deg_title, alternate)?;

        let x = Zip::from(&r)
            .and(&deg)
            .map_collect(|&r, &deg| r * deg.to_radians().cos());
        let y = Zip::from(&r)
            .and(&deg)
            .map_collect(|&r, &deg| r * deg.to_radians().sin());

        self.install_pair(
            Conversion::PolarToCartesian,
            Channel::new(format!("{}_X", r_title), x),
            Channel::new(format!("{}_Y", deg_title), y),
            alternate,
        );
        Ok(())
    }

    /// Compute `r = √(x² + y²)` and `θ = atan2(y, x)` in degrees
    ///
    /// Installs `{x}_R` and `{y}_DEG` as the computed pair, replacing any
    /// previous pair. On error the computed pair is left unchanged.
    pub fn generate_polar_from_cartesian(
        &mut self,
        x_title: &str,
        y_title: &str,
        alternate: bool,
    ) -> Result<(), SweepError> {
        let (x, y) = self.read_pair(x_title, y_title, alternate)?;

        let r = Zip::from(&x).and(&y).map_collect(|&x, &y| x.hypot(y));
        let deg = Zip::from(&x)
            .and(&y)
            .map_collect(|&x, &y| y.atan2(x).to_degrees());

        self.install_pair(
            Conversion::CartesianToPolar,
            Channel::new(format!("{}_R", x_title), r),
            Channel::new(format!("{}_DEG", y_title), deg),
            alternate,
        );
        Ok(())
    }

    /// Drop the computed pair
    pub fn clear_computed_channels(&mut self) {
        self.computed = None;
    }

    fn read_pair(
        &self,
        left: &str,
        right: &str,
        alternate: bool,
    ) -> Result<(ArrayD<f64>, ArrayD<f64>), SweepError> {
        let options = ReadOptions::storage().alternate(alternate);
        let left_data = self.channel_data(left, options)?;
        let right_data = self.channel_data(right, options)?;

        if left_data.shape() != right_data.shape() {
            return Err(SweepError::ShapeMismatch {
                left: left.to_string(),
                left_shape: left_data.shape().to_vec(),
                right: right.to_string(),
                right_shape: right_data.shape().to_vec(),
            });
        }
        Ok((left_data, right_data))
    }

    fn install_pair(
        &mut self,
        conversion: Conversion,
        mut first: Channel,
        mut second: Channel,
        alternate: bool,
    ) {
        // computed channels are kept in file order like the outputs
        if alternate {
            reverse_odd_rows(&mut first.data);
            reverse_odd_rows(&mut second.data);
        }
        for channel in [&mut first, &mut second] {
            while self.outputs.iter().any(|c| c.title == channel.title) {
                channel.title.push('_');
            }
        }

        self.computed = Some(ComputedChannelPair {
            conversion,
            channels: [first, second],
        });
    }
}

/// Reverse rows 1, 3, 5, ... of a 2-D array in place
pub(crate) fn reverse_odd_rows(data: &mut ArrayD<f64>) {
    if data.ndim() != 2 {
        return;
    }
    for mut row in data.axis_iter_mut(Axis(0)).skip(1).step_by(2) {
        let reversed = row.slice_axis(Axis(0), Slice::new(0, None, -1)).to_owned();
        row.assign(&reversed);
    }
}
