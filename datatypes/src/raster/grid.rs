use crate::error;
use crate::util::Result;
use serde::{Deserialize, Serialize};
use snafu::ensure;

/// The number of rows and columns of a 2-D raster grid
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape2D {
    pub rows: usize,
    pub columns: usize,
}

impl GridShape2D {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    pub fn number_of_elements(&self) -> usize {
        self.rows * self.columns
    }

    /// The linear offset of (`column`, `row`) in a row-major layout
    pub fn linear_index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }
}

/// A dense row-major 2-D grid of cell values
#[derive(Clone, Debug, PartialEq)]
pub struct Grid2D {
    shape: GridShape2D,
    data: Vec<f64>,
}

/// The per-cell means of a band range of a [`RawCube`](super::RawCube)
pub type AveragedGrid = Grid2D;

impl Grid2D {
    /// Creates a new `Grid2D`
    ///
    /// # Errors
    ///
    /// This constructor fails if the data container's capacity is different from the grid's dimension number of elements
    ///
    pub fn new(shape: GridShape2D, data: Vec<f64>) -> Result<Self> {
        ensure!(
            shape.number_of_elements() == data.len(),
            error::DimensionCapacityDoesNotMatchDataCapacity {
                dimension_cap: shape.number_of_elements(),
                data_cap: data.len()
            }
        );

        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> GridShape2D {
        self.shape
    }

    pub fn get(&self, column: usize, row: usize) -> Option<f64> {
        self.shape
            .linear_index(column, row)
            .map(|index| self.data[index])
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Iterates `(column, row, value)` in row-major order
    pub fn indexed_values(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let columns = self.shape.columns.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(index, &value)| (index % columns, index / columns, value))
    }
}
