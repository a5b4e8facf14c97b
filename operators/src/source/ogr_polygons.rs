use std::path::Path;

use gdal::vector::{Geometry, LayerAccess, OGRwkbGeometryType};
use haze_datatypes::primitives::{Coordinate2D, Polygon, VectorFeature};
use haze_datatypes::spatial_reference::SpatialReference;
use snafu::OptionExt;

use crate::error;
use crate::util::Result;
use crate::util::gdal::{
    coordinate_transform, gdal_open_vector_dataset, open_layer, spatial_reference_from_gdal,
};

/// Loads the polygon features of a vector layer in the coordinate reference system `target`.
///
/// Features are reprojected if the layer's CRS differs from `target`. Features without a
/// polygon geometry, or whose geometry cannot be reprojected or converted, are skipped.
/// A feature without a FID is identified by its position in the layer.
pub fn load_polygons(
    path: &Path,
    layer_name: Option<&str>,
    target: &SpatialReference,
) -> Result<Vec<VectorFeature>> {
    let dataset = gdal_open_vector_dataset(path)?;
    let mut layer = open_layer(&dataset, path, layer_name)?;

    let source_spatial_ref = layer
        .spatial_ref()
        .context(error::MissingSpatialReference { path })?;

    let transform = if spatial_reference_from_gdal(&source_spatial_ref)? == *target {
        None
    } else {
        tracing::debug!("reprojecting features of {} into {target}", path.display());
        Some(coordinate_transform(&source_spatial_ref, target)?)
    };

    let mut features = Vec::new();

    for (position, feature) in layer.features().enumerate() {
        let id = feature.fid().unwrap_or(position as u64);

        let Some(geometry) = feature.geometry() else {
            tracing::warn!("feature {id} has no geometry, skipping");
            continue;
        };

        if !is_polygon(geometry) {
            tracing::warn!("feature {id} is not a polygon, skipping");
            continue;
        }

        let polygon = match &transform {
            Some(transform) => geometry
                .transform(transform)
                .map_err(error::Error::from)
                .and_then(|geometry| polygon_from_ogr(&geometry)),
            None => polygon_from_ogr(geometry),
        };

        match polygon {
            Ok(polygon) => features.push(VectorFeature::new(id, polygon)),
            Err(error) => tracing::warn!("feature {id} could not be loaded, skipping: {error}"),
        }
    }

    tracing::debug!("loaded {} polygon(s) from {}", features.len(), path.display());

    Ok(features)
}

fn is_polygon(geometry: &Geometry) -> bool {
    // strips Z and M variants
    let flat_type = unsafe { gdal_sys::OGR_GT_Flatten(geometry.geometry_type()) };
    flat_type == OGRwkbGeometryType::wkbPolygon
}

fn polygon_from_ogr(geometry: &Geometry) -> Result<Polygon> {
    let rings = (0..geometry.geometry_count())
        .map(|ring| {
            let mut points = Vec::new();
            geometry.get_geometry(ring).get_points(&mut points);
            points
                .into_iter()
                .map(|(x, y, _z)| Coordinate2D::new(x, y))
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(Polygon::new(rings)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::gdal::crs_of;
    use approx::assert_relative_eq;
    use gdal::spatial_ref::SpatialRef;

    const FEATURES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 10,
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]
                }
            },
            {
                "type": "Feature",
                "id": 20,
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [0.5, 0.5] }
            },
            {
                "type": "Feature",
                "id": 30,
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[2, 2], [6, 2], [6, 6], [2, 6], [2, 2]],
                        [[3, 3], [4, 3], [4, 4], [3, 4], [3, 3]]
                    ]
                }
            }
        ]
    }"#;

    fn write_features(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("aoi.geojson");
        std::fs::write(&path, FEATURES).unwrap();
        path
    }

    #[test]
    fn loads_polygons_in_layer_crs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_features(&dir);
        let layer_crs = crs_of(&path, None).unwrap();

        let features = load_polygons(&path, None, &layer_crs).unwrap();

        assert_eq!(
            features.iter().map(VectorFeature::id).collect::<Vec<_>>(),
            vec![10, 30]
        );
        assert_eq!(features[1].polygon().number_of_interiors(), 1);
        assert_eq!(
            features[0].bounding_box().upper_right(),
            Coordinate2D::new(1., 1.)
        );
    }

    #[test]
    fn reprojects_into_target_crs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_features(&dir);
        let web_mercator =
            spatial_reference_from_gdal(&SpatialRef::from_epsg(3857).unwrap()).unwrap();

        let features = load_polygons(&path, None, &web_mercator).unwrap();

        let upper_right = features[0].bounding_box().upper_right();
        assert_relative_eq!(upper_right.x, 111_319.490_793_273_57, max_relative = 1e-9);
        assert!(upper_right.y > 111_000.);
        approx::assert_abs_diff_eq!(
            features[0].bounding_box().lower_left().x,
            0.,
            epsilon = 1e-6
        );
    }

    #[test]
    fn unknown_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_features(&dir);
        let layer_crs = crs_of(&path, None).unwrap();

        let result = load_polygons(&path, Some("nope"), &layer_crs);

        assert!(matches!(result, Err(error::Error::LayerNotFound { .. })));
    }
}
