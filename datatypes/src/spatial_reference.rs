use crate::error;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The broad kind of a coordinate reference system
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystemKind {
    Geographic,
    Projected,
    Unknown,
}

/// A coordinate reference system given by its WKT definition.
///
/// Two spatial references are equal if their WKT definitions match ignoring ASCII case.
#[derive(Debug, Clone)]
pub struct SpatialReference {
    wkt: String,
    kind: CoordinateSystemKind,
}

impl SpatialReference {
    pub fn new(wkt: String, kind: CoordinateSystemKind) -> Self {
        Self { wkt, kind }
    }

    pub fn wkt(&self) -> &str {
        &self.wkt
    }

    pub fn kind(&self) -> CoordinateSystemKind {
        self.kind
    }

    pub fn is_geographic(&self) -> bool {
        self.kind == CoordinateSystemKind::Geographic
    }
}

impl PartialEq for SpatialReference {
    fn eq(&self, other: &Self) -> bool {
        self.wkt.eq_ignore_ascii_case(&other.wkt)
    }
}

impl Eq for SpatialReference {}

impl std::fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} CRS {}", self.kind, self.wkt)
    }
}

/// How areas are measured in a coordinate reference system.
///
/// Geographic systems measure on the ellipsoid, everything else in the plane of its coordinates.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AreaMode {
    Planar,
    Geodesic,
}

impl TryFrom<&SpatialReference> for AreaMode {
    type Error = error::Error;

    fn try_from(spatial_reference: &SpatialReference) -> Result<Self, Self::Error> {
        match spatial_reference.kind {
            CoordinateSystemKind::Geographic => Ok(AreaMode::Geodesic),
            CoordinateSystemKind::Projected => Ok(AreaMode::Planar),
            CoordinateSystemKind::Unknown => Err(error::Error::UndeterminedAreaMode {
                wkt: spatial_reference.wkt.clone(),
            }),
        }
    }
}
