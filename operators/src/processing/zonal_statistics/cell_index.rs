use haze_datatypes::primitives::BoundingBox2D;
use haze_datatypes::raster::{AveragedGrid, GeoTransform};
use rstar::{AABB, RStarInsertionStrategy, RTree, RTreeObject, RTreeParams};
use snafu::ResultExt;

use crate::error;
use crate::util::Result;

/// Maximum number of children per node of the cell tree
pub const TREE_NODE_CAPACITY: usize = 100;

#[derive(Debug)]
struct CellTreeParams;

impl RTreeParams for CellTreeParams {
    const MIN_SIZE: usize = 40;
    const MAX_SIZE: usize = TREE_NODE_CAPACITY;
    const REINSERTION_COUNT: usize = 30;
    type DefaultInsertionStrategy = RStarInsertionStrategy;
}

/// Refers to one [`CellRecord`] of the [`CellIndex`] it was obtained from
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellHandle(usize);

/// One raster cell: its world-space rectangle, its value and its grid position
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellRecord {
    pub bounds: BoundingBox2D,
    pub value: f64,
    pub column: usize,
    pub row: usize,
}

#[derive(Clone, Debug)]
struct CellEntry {
    handle: CellHandle,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f64; 2]>;

    #[inline]
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// A bulk-loaded R-tree over all cells of an averaged grid.
///
/// The index owns the cell records; query results borrow it and cannot outlive it.
/// It is immutable after construction.
#[derive(Debug)]
pub struct CellIndex {
    cells: Vec<CellRecord>,
    tree: RTree<CellEntry, CellTreeParams>,
}

impl CellIndex {
    /// Builds the index over every cell of `grid` placed by `geo_transform`.
    ///
    /// Fails if the transform is degenerate or the cell storage cannot be allocated.
    pub fn build(grid: &AveragedGrid, geo_transform: &GeoTransform) -> Result<Self> {
        geo_transform.ensure_non_degenerate()?;

        let number_of_cells = grid.shape().number_of_elements();

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(number_of_cells)
            .context(error::CellAllocation {
                cells: number_of_cells,
            })?;

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(number_of_cells)
            .context(error::CellAllocation {
                cells: number_of_cells,
            })?;

        for (column, row, value) in grid.indexed_values() {
            let bounds = geo_transform.cell_bounds(column, row);

            entries.push(CellEntry {
                handle: CellHandle(cells.len()),
                envelope: envelope(&bounds),
            });
            cells.push(CellRecord {
                bounds,
                value,
                column,
                row,
            });
        }

        let tree = RTree::bulk_load_with_params(entries);

        tracing::debug!("indexed {} cells", cells.len());

        Ok(Self { cells, tree })
    }

    /// All cells whose rectangle intersects `bbox`, touching included, in grid order
    pub fn query(&self, bbox: &BoundingBox2D) -> Vec<CellHandle> {
        let query_envelope = envelope(&bbox.inflated_by_tolerance());

        let mut handles: Vec<CellHandle> = self
            .tree
            .locate_in_envelope_intersecting(&query_envelope)
            .map(|entry| entry.handle)
            .filter(|&handle| self.cell(handle).bounds.intersects_bbox(bbox))
            .collect();

        handles.sort_unstable();
        handles
    }

    pub fn cell(&self, handle: CellHandle) -> &CellRecord {
        &self.cells[handle.0]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CellRecord] {
        &self.cells
    }
}

fn envelope(bbox: &BoundingBox2D) -> AABB<[f64; 2]> {
    AABB::from_corners(bbox.lower_left().into(), bbox.upper_right().into())
}
