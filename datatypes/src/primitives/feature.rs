use crate::primitives::{BoundingBox2D, Polygon};

/// An area of interest in the working CRS of a raster.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorFeature {
    id: u64,
    polygon: Polygon,
}

impl VectorFeature {
    pub fn new(id: u64, polygon: Polygon) -> Self {
        Self { id, polygon }
    }

    /// The identifier of the feature in its source, e.g. the OGR FID
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn bounding_box(&self) -> BoundingBox2D {
        self.polygon.bounding_box()
    }
}
