use crate::error;
use crate::util::Result;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::ops::Range;

/// A contiguous selection of `size` bands starting at `offset`.
///
/// The empty selection `offset == 0 && size == 0` stands for all bands of a cube.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BandRange {
    pub offset: usize,
    pub size: usize,
}

impl BandRange {
    pub fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// Selects every band
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        self.offset == 0 && self.size == 0
    }

    /// Resolves the selection against a cube with `bands` bands.
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::raster::BandRange;
    ///
    /// assert_eq!(BandRange::all().resolve(4).unwrap(), 0..4);
    /// assert_eq!(BandRange::new(2, 2).resolve(4).unwrap(), 2..4);
    /// assert!(BandRange::new(3, 2).resolve(4).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Fails if the offset is not a band of the cube or the range reaches beyond the last band
    ///
    pub fn resolve(&self, bands: usize) -> Result<Range<usize>> {
        if self.is_all() {
            ensure!(
                bands > 0,
                error::BandRangeOutOfBounds {
                    offset: self.offset,
                    size: self.size,
                    bands,
                }
            );
            return Ok(0..bands);
        }

        ensure!(
            self.offset < bands
                && self.size > 0
                && self
                    .offset
                    .checked_add(self.size)
                    .is_some_and(|end| end <= bands),
            error::BandRangeOutOfBounds {
                offset: self.offset,
                size: self.size,
                bands,
            }
        );

        Ok(self.offset..self.offset + self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_in_bounds_ranges() {
        assert_eq!(BandRange::new(0, 1).resolve(1).unwrap(), 0..1);
        assert_eq!(BandRange::new(0, 2).resolve(4).unwrap(), 0..2);
        assert_eq!(BandRange::new(3, 1).resolve(4).unwrap(), 3..4);
    }

    #[test]
    fn rejects_offset_past_last_band() {
        assert!(matches!(
            BandRange::new(4, 1).resolve(4),
            Err(error::Error::BandRangeOutOfBounds {
                offset: 4,
                size: 1,
                bands: 4
            })
        ));
    }

    #[test]
    fn rejects_range_past_last_band() {
        assert!(BandRange::new(2, 3).resolve(4).is_err());
        assert!(BandRange::new(1, usize::MAX).resolve(4).is_err());
    }

    #[test]
    fn rejects_empty_non_default_range() {
        assert!(BandRange::new(1, 0).resolve(4).is_err());
    }

    #[test]
    fn all_bands_of_empty_cube() {
        assert!(BandRange::all().resolve(0).is_err());
    }
}
