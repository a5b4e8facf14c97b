use snafu::ensure;

use crate::error;
use crate::primitives::{BoundingBox2D, Coordinate2D};
use crate::util::Result;

type Ring = Vec<Coordinate2D>;

/// A simple feature polygon: one exterior ring followed by optional interior rings (holes).
///
/// The bounding box of the exterior ring is computed once on construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    polygon: geo::Polygon<f64>,
    bounding_box: BoundingBox2D,
}

impl Polygon {
    /// Creates a polygon from its rings, the first ring being the exterior.
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::primitives::Polygon;
    ///
    /// let square = Polygon::new(vec![vec![
    ///     (0.0, 0.0).into(),
    ///     (2.0, 0.0).into(),
    ///     (2.0, 1.0).into(),
    ///     (0.0, 1.0).into(),
    ///     (0.0, 0.0).into(),
    /// ]])
    /// .unwrap();
    ///
    /// assert_eq!(square.bounding_box().upper_right(), (2.0, 1.0).into());
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if there are no rings or if any ring is not closed or has fewer than four coordinates
    ///
    pub fn new(rings: Vec<Ring>) -> Result<Self> {
        ensure!(!rings.is_empty(), error::MissingExteriorRing);
        ensure!(
            rings.iter().all(|ring| Self::ring_is_valid(ring)),
            error::UnclosedPolygonRing
        );

        let mut rings = rings.into_iter().map(|ring| {
            geo::LineString::from_iter(ring.into_iter().map(geo::Coord::from))
        });

        let exterior = rings.next().ok_or(error::Error::MissingExteriorRing)?;
        let interiors = rings.collect();

        Self::try_from(geo::Polygon::new(exterior, interiors))
    }

    fn ring_is_valid(ring: &[Coordinate2D]) -> bool {
        if ring.len() < 4 {
            // must have at least four coordinates, i.e., a triangle that is closed
            return false;
        }

        // first and last coordinate must match, i.e., it is closed
        ring.first() == ring.last()
    }

    pub fn bounding_box(&self) -> BoundingBox2D {
        self.bounding_box
    }

    pub fn exterior(&self) -> impl Iterator<Item = Coordinate2D> + '_ {
        self.polygon.exterior().coords().copied().map(Coordinate2D::from)
    }

    pub fn number_of_interiors(&self) -> usize {
        self.polygon.interiors().len()
    }

    pub fn as_geo(&self) -> &geo::Polygon<f64> {
        &self.polygon
    }
}

impl TryFrom<geo::Polygon<f64>> for Polygon {
    type Error = error::Error;

    fn try_from(polygon: geo::Polygon<f64>) -> Result<Self> {
        // `geo` closes rings on construction, so only the coordinate count is left to check
        ensure!(
            polygon.exterior().0.len() >= 4
                && polygon.interiors().iter().all(|ring| ring.0.len() >= 4),
            error::UnclosedPolygonRing
        );

        let bounding_box = BoundingBox2D::from_coord_iter(
            polygon.exterior().coords().copied().map(Coordinate2D::from),
        )
        .ok_or(error::Error::MissingExteriorRing)?;

        Ok(Self {
            polygon,
            bounding_box,
        })
    }
}

impl From<Polygon> for geo::Polygon<f64> {
    fn from(polygon: Polygon) -> Self {
        polygon.polygon
    }
}
