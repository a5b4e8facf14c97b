use super::GridShape2D;
use crate::error;
use crate::util::Result;
use snafu::ensure;

/// A dense band-sequential cube of `bands × rows × columns` cell values, as read from a raster file.
///
/// Band `b` occupies the contiguous slice `b * rows * columns .. (b + 1) * rows * columns`.
#[derive(Clone, Debug, PartialEq)]
pub struct RawCube {
    bands: usize,
    shape: GridShape2D,
    data: Vec<f64>,
}

impl RawCube {
    /// Creates a new `RawCube`
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::raster::{GridShape2D, RawCube};
    ///
    /// let cube = RawCube::new(2, GridShape2D::new(1, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    ///
    /// assert_eq!(cube.band(1), Some(&[3.0, 4.0][..]));
    /// assert_eq!(cube.get(1, 0, 0), Some(2.0));
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if `data` does not hold exactly `bands × rows × columns` values
    ///
    pub fn new(bands: usize, shape: GridShape2D, data: Vec<f64>) -> Result<Self> {
        let dimension_cap = bands * shape.number_of_elements();

        ensure!(
            dimension_cap == data.len(),
            error::DimensionCapacityDoesNotMatchDataCapacity {
                dimension_cap,
                data_cap: data.len()
            }
        );

        Ok(Self { bands, shape, data })
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    pub fn shape(&self) -> GridShape2D {
        self.shape
    }

    pub fn band(&self, band: usize) -> Option<&[f64]> {
        if band >= self.bands {
            return None;
        }

        let band_size = self.shape.number_of_elements();
        self.data.get(band * band_size..(band + 1) * band_size)
    }

    /// The value of the cell at (`column`, `row`) in `band`
    pub fn get(&self, column: usize, row: usize, band: usize) -> Option<f64> {
        let index = self.shape.linear_index(column, row)?;
        self.band(band).map(|values| values[index])
    }
}
