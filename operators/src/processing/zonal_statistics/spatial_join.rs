use haze_datatypes::primitives::VectorFeature;

use super::cell_index::{CellHandle, CellIndex};

/// A feature together with the cells whose bounding box meets the feature's bounding box
#[derive(Debug, Clone)]
pub struct JoinResult<'f> {
    pub feature: &'f VectorFeature,
    pub candidates: Vec<CellHandle>,
}

impl JoinResult<'_> {
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// No cell is near the feature, e.g. because it lies outside the raster
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Looks up the candidate cells of a single feature.
///
/// This is a conservative filter: candidates may still miss the polygon itself.
pub fn join_feature<'f>(index: &CellIndex, feature: &'f VectorFeature) -> JoinResult<'f> {
    JoinResult {
        feature,
        candidates: index.query(&feature.bounding_box()),
    }
}

/// Looks up the candidate cells of every feature, preserving the feature order
pub fn join_features<'f>(index: &CellIndex, features: &'f [VectorFeature]) -> Vec<JoinResult<'f>> {
    features
        .iter()
        .map(|feature| join_feature(index, feature))
        .collect()
}
