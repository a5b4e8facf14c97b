use geo::{Area, BooleanOps, Centroid, CoordsIter, GeodesicArea};
use haze_datatypes::primitives::{BoundingBox2D, Coordinate2D, Polygon};
use haze_datatypes::spatial_reference::AreaMode;

use crate::error::Error;
use crate::util::Result;

/// The geometry operations needed for zonal statistics.
///
/// Implementations must be pure: the same inputs always yield the same outputs.
pub trait GeometryEngine: std::fmt::Debug {
    /// The intersection of `polygon` with the rectangle of a cell, `None` if it is empty
    fn intersection(
        &self,
        polygon: &Polygon,
        cell: &BoundingBox2D,
    ) -> Result<Option<geo::MultiPolygon<f64>>>;

    /// The unsigned area of an intersection result
    fn area(&self, geometry: &geo::MultiPolygon<f64>, mode: AreaMode) -> Result<f64>;

    /// The unsigned area of a feature polygon
    fn polygon_area(&self, polygon: &Polygon, mode: AreaMode) -> Result<f64>;

    fn centroid(&self, polygon: &Polygon) -> Result<Coordinate2D>;
}

/// [`GeometryEngine`] backed by the `geo` crate.
///
/// Geodesic areas are measured on the WGS 84 ellipsoid.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoGeometryEngine;

impl GeometryEngine for GeoGeometryEngine {
    fn intersection(
        &self,
        polygon: &Polygon,
        cell: &BoundingBox2D,
    ) -> Result<Option<geo::MultiPolygon<f64>>> {
        if !polygon
            .as_geo()
            .coords_iter()
            .all(|coord| coord.x.is_finite() && coord.y.is_finite())
        {
            return Err(Error::Geometry {
                reason: "polygon has non-finite coordinates".to_string(),
            });
        }

        let cell = geo::Rect::from(cell).to_polygon();
        let intersection = polygon.as_geo().intersection(&cell);

        if intersection.0.is_empty() {
            return Ok(None);
        }

        Ok(Some(intersection))
    }

    fn area(&self, geometry: &geo::MultiPolygon<f64>, mode: AreaMode) -> Result<f64> {
        let area = match mode {
            AreaMode::Planar => geometry.unsigned_area(),
            AreaMode::Geodesic => geometry.geodesic_area_unsigned(),
        };

        finite_area(area)
    }

    fn polygon_area(&self, polygon: &Polygon, mode: AreaMode) -> Result<f64> {
        let area = match mode {
            AreaMode::Planar => polygon.as_geo().unsigned_area(),
            AreaMode::Geodesic => polygon.as_geo().geodesic_area_unsigned(),
        };

        finite_area(area)
    }

    fn centroid(&self, polygon: &Polygon) -> Result<Coordinate2D> {
        let centroid = polygon
            .as_geo()
            .centroid()
            .map(Coordinate2D::from)
            .ok_or_else(|| Error::Geometry {
                reason: "polygon has no centroid".to_string(),
            })?;

        if centroid.is_finite() {
            Ok(centroid)
        } else {
            Err(Error::Geometry {
                reason: format!("centroid {centroid} is not finite"),
            })
        }
    }
}

fn finite_area(area: f64) -> Result<f64> {
    if area.is_finite() {
        Ok(area)
    } else {
        Err(Error::Geometry {
            reason: format!("area {area} is not finite"),
        })
    }
}
