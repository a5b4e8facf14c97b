use crate::error;
use crate::primitives::{BoundingBox2D, Coordinate2D};
use crate::util::Result;
use serde::{Deserialize, Serialize};
use snafu::ensure;

/// This is a typedef for the `GDAL GeoTransform`. It represents an affine transformation matrix.
pub type GdalGeoTransform = [f64; 6];

/// The `GeoTransform` is a more user friendly representation of the `GDAL GeoTransform` affine transformation matrix.
///
/// Unlike a north-up transform, it keeps both rotation terms, so cells may be arbitrary parallelograms in world space.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_coordinate: Coordinate2D,
    pub x_pixel_size: f64,
    pub row_rotation: f64,
    pub column_rotation: f64,
    pub y_pixel_size: f64,
}

impl GeoTransform {
    /// Generates a new north-up `GeoTransform`
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::raster::GeoTransform;
    ///
    /// let geo_transform = GeoTransform::new((0.0, 0.0).into(), 1.0, -1.0);
    /// ```
    ///
    pub fn new(origin_coordinate: Coordinate2D, x_pixel_size: f64, y_pixel_size: f64) -> Self {
        Self {
            origin_coordinate,
            x_pixel_size,
            row_rotation: 0.,
            column_rotation: 0.,
            y_pixel_size,
        }
    }

    /// Generates a new `GeoTransform` including the rotation terms, ordered like GDAL's coefficients
    pub fn new_rotated(
        origin_coordinate: Coordinate2D,
        x_pixel_size: f64,
        row_rotation: f64,
        column_rotation: f64,
        y_pixel_size: f64,
    ) -> Self {
        Self {
            origin_coordinate,
            x_pixel_size,
            row_rotation,
            column_rotation,
            y_pixel_size,
        }
    }

    /// A transform with a zero pixel width or height maps all cells onto lines
    pub fn is_degenerate(&self) -> bool {
        self.x_pixel_size == 0. || self.y_pixel_size == 0.
    }

    pub fn ensure_non_degenerate(&self) -> Result<()> {
        ensure!(
            !self.is_degenerate(),
            error::DegenerateGeoTransform {
                x_pixel_size: self.x_pixel_size,
                y_pixel_size: self.y_pixel_size,
            }
        );
        Ok(())
    }

    /// Transforms a grid position (column, row) into a SRS coordinate (x, y).
    /// See GDAL documentation for more details: <https://gdal.org/user/raster_data_model.html>
    ///
    /// Positions may be fractional or lie on the far edge of the grid, e.g. `(columns, rows)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::raster::GeoTransform;
    ///
    /// let geo_transform = GeoTransform::new((5.0, 5.0).into(), 1.0, -1.0);
    /// assert_eq!(geo_transform.grid_to_coordinate(1.0, 2.0), (6.0, 3.0).into());
    /// ```
    ///
    pub fn grid_to_coordinate(&self, column: f64, row: f64) -> Coordinate2D {
        Coordinate2D::new(
            self.origin_coordinate.x + column * self.x_pixel_size + row * self.row_rotation,
            self.origin_coordinate.y + column * self.column_rotation + row * self.y_pixel_size,
        )
    }

    /// The world-space bounding box of the cell at (`column`, `row`).
    ///
    /// All four cell corners are transformed and normalized per axis, so it holds for rotated
    /// and south-up transforms alike.
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::raster::GeoTransform;
    ///
    /// let geo_transform = GeoTransform::new((0.0, 2.0).into(), 1.0, -1.0);
    /// let cell = geo_transform.cell_bounds(1, 0);
    ///
    /// assert_eq!(cell.lower_left(), (1.0, 1.0).into());
    /// assert_eq!(cell.upper_right(), (2.0, 2.0).into());
    /// ```
    ///
    pub fn cell_bounds(&self, column: usize, row: usize) -> BoundingBox2D {
        let (column, row) = (column as f64, row as f64);

        let corners = [
            self.grid_to_coordinate(column, row),
            self.grid_to_coordinate(column + 1., row),
            self.grid_to_coordinate(column, row + 1.),
            self.grid_to_coordinate(column + 1., row + 1.),
        ];

        let lower_left = corners
            .iter()
            .fold(corners[0], |acc, corner| acc.min_elements(*corner));
        let upper_right = corners
            .iter()
            .fold(corners[0], |acc, corner| acc.max_elements(*corner));

        BoundingBox2D::new_unchecked(lower_left, upper_right)
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        GeoTransform::new((0.0, 0.0).into(), 1.0, -1.0)
    }
}

impl From<GdalGeoTransform> for GeoTransform {
    fn from(gdal_geo_transform: GdalGeoTransform) -> Self {
        Self::new_rotated(
            (gdal_geo_transform[0], gdal_geo_transform[3]).into(),
            gdal_geo_transform[1],
            gdal_geo_transform[2],
            gdal_geo_transform[4],
            gdal_geo_transform[5],
        )
    }
}

impl From<GeoTransform> for GdalGeoTransform {
    fn from(geo_transform: GeoTransform) -> GdalGeoTransform {
        [
            geo_transform.origin_coordinate.x,
            geo_transform.x_pixel_size,
            geo_transform.row_rotation,
            geo_transform.origin_coordinate.y,
            geo_transform.column_rotation,
            geo_transform.y_pixel_size,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    #[allow(clippy::float_cmp)]
    fn geo_transform_from_gdal() {
        let geo_transform = GeoTransform::from([10.0, 2.0, 0.5, 20.0, 0.25, -3.0]);

        assert_eq!(geo_transform.origin_coordinate, (10.0, 20.0).into());
        assert_eq!(geo_transform.x_pixel_size, 2.0);
        assert_eq!(geo_transform.row_rotation, 0.5);
        assert_eq!(geo_transform.column_rotation, 0.25);
        assert_eq!(geo_transform.y_pixel_size, -3.0);

        let gdal: GdalGeoTransform = geo_transform.into();
        assert_eq!(gdal, [10.0, 2.0, 0.5, 20.0, 0.25, -3.0]);
    }

    #[test]
    fn grid_to_coordinate_north_up() {
        let geo_transform = GeoTransform::new((5.0, 5.0).into(), 1.0, -1.0);

        assert_eq!(geo_transform.grid_to_coordinate(0., 0.), (5.0, 5.0).into());
        assert_eq!(geo_transform.grid_to_coordinate(1., 1.), (6.0, 4.0).into());
        assert_eq!(geo_transform.grid_to_coordinate(2., 2.), (7.0, 3.0).into());
    }

    #[test]
    fn grid_to_coordinate_rotated() {
        let geo_transform = GeoTransform::new_rotated((0.0, 0.0).into(), 1.0, 0.5, 0.25, -1.0);

        assert_eq!(geo_transform.grid_to_coordinate(2., 0.), (2.0, 0.5).into());
        assert_eq!(geo_transform.grid_to_coordinate(0., 2.), (1.0, -2.0).into());
    }

    #[test]
    fn cell_bounds_north_up() {
        let geo_transform = GeoTransform::new((0.0, 2.0).into(), 1.0, -1.0);

        let cell = geo_transform.cell_bounds(0, 1);

        assert_eq!(cell.lower_left(), (0.0, 0.0).into());
        assert_eq!(cell.upper_right(), (1.0, 1.0).into());
    }

    #[test]
    fn cell_bounds_south_up() {
        let geo_transform = GeoTransform::new((0.0, 0.0).into(), 1.0, 1.0);

        let cell = geo_transform.cell_bounds(0, 0);

        assert_eq!(cell.lower_left(), (0.0, 0.0).into());
        assert_eq!(cell.upper_right(), (1.0, 1.0).into());
    }

    #[test]
    fn cell_bounds_rotated_covers_all_corners() {
        let geo_transform = GeoTransform::new_rotated((0.0, 0.0).into(), 1.0, 0.5, 0.5, -1.0);

        let cell = geo_transform.cell_bounds(0, 0);

        // corners: (0, 0), (1, 0.5), (0.5, -1), (1.5, -0.5)
        assert!(approx_eq!(Coordinate2D, cell.lower_left(), (0.0, -1.0).into()));
        assert!(approx_eq!(Coordinate2D, cell.upper_right(), (1.5, 0.5).into()));
    }

    #[test]
    fn cells_have_positive_extent() {
        let transforms = [
            GeoTransform::new((0.0, 0.0).into(), 1.0, -1.0),
            GeoTransform::new((-180.0, 90.0).into(), 0.25, -0.25),
            GeoTransform::new_rotated((100.0, 100.0).into(), 2.0, 0.3, -0.1, -2.0),
            GeoTransform::new((0.0, 0.0).into(), -1.0, 1.0),
        ];

        for geo_transform in transforms {
            for row in 0..5 {
                for column in 0..7 {
                    assert!(geo_transform.cell_bounds(column, row).has_positive_extent());
                }
            }
        }
    }

    #[test]
    fn degenerate_transform() {
        let geo_transform = GeoTransform::new((0.0, 0.0).into(), 0.0, -1.0);

        assert!(geo_transform.is_degenerate());
        assert!(geo_transform.ensure_non_degenerate().is_err());
        assert!(GeoTransform::default().ensure_non_degenerate().is_ok());
    }
}
