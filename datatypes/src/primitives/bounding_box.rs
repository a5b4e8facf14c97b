use super::Coordinate2D;
use crate::error;
use crate::util::Result;
use crate::util::tolerance::{greater_or_near_equal, less_or_near_equal, slack};
use serde::{Deserialize, Serialize};
use snafu::ensure;

#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Debug)]
/// The axis-aligned bounding box of a geometry or raster cell.
/// Note: may degenerate to a point!
pub struct BoundingBox2D {
    lower_left_coordinate: Coordinate2D,
    upper_right_coordinate: Coordinate2D,
}

impl BoundingBox2D {
    /// Creates a new bounding box
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::primitives::{Coordinate2D, BoundingBox2D};
    ///
    /// let ll = Coordinate2D::new(1.0, 1.0);
    /// let ur = Coordinate2D::new(2.0, 2.0);
    /// let bbox = BoundingBox2D::new(ll, ur).unwrap();
    ///
    /// assert!(BoundingBox2D::new(ur, ll).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// This constructor fails if the coordinate's values are not in order
    ///
    pub fn new(
        lower_left_coordinate: Coordinate2D,
        upper_right_coordinate: Coordinate2D,
    ) -> Result<Self> {
        ensure!(
            lower_left_coordinate.x <= upper_right_coordinate.x
                && lower_left_coordinate.y <= upper_right_coordinate.y,
            error::InvalidBoundingBox {
                lower_left_coordinate,
                upper_right_coordinate
            }
        );
        Ok(Self {
            lower_left_coordinate,
            upper_right_coordinate,
        })
    }

    /// Creates a new bounding box unchecked
    pub fn new_unchecked(
        lower_left_coordinate: Coordinate2D,
        upper_right_coordinate: Coordinate2D,
    ) -> Self {
        Self {
            lower_left_coordinate,
            upper_right_coordinate,
        }
    }

    pub fn lower_left(&self) -> Coordinate2D {
        self.lower_left_coordinate
    }

    pub fn upper_right(&self) -> Coordinate2D {
        self.upper_right_coordinate
    }


    /// A bounding box has a positive extent if it is neither a line nor a point.
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::primitives::BoundingBox2D;
    ///
    /// let cell = BoundingBox2D::new((0.0, 0.0).into(), (1.0, 1.0).into()).unwrap();
    /// let line = BoundingBox2D::new((0.0, 0.0).into(), (0.0, 1.0).into()).unwrap();
    ///
    /// assert!(cell.has_positive_extent());
    /// assert!(!line.has_positive_extent());
    /// ```
    ///
    pub fn has_positive_extent(&self) -> bool {
        self.lower_left_coordinate.x < self.upper_right_coordinate.x
            && self.lower_left_coordinate.y < self.upper_right_coordinate.y
    }

    /// Checks if a coordinate lies within the bounding box, borders included
    pub fn contains_coordinate(&self, coordinate: &Coordinate2D) -> bool {
        coordinate.x >= self.lower_left_coordinate.x
            && coordinate.y >= self.lower_left_coordinate.y
            && coordinate.x <= self.upper_right_coordinate.x
            && coordinate.y <= self.upper_right_coordinate.y
    }

    /// Checks if `other_bbox` intersects this bounding box.
    ///
    /// Boxes that only share an edge or a corner intersect, and so do boxes that miss each other
    /// by less than the relative floating point tolerance.
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::primitives::BoundingBox2D;
    ///
    /// let bbox = BoundingBox2D::new((0.0, 0.0).into(), (1.0, 1.0).into()).unwrap();
    /// let touching = BoundingBox2D::new((1.0, 1.0).into(), (2.0, 2.0).into()).unwrap();
    /// let apart = BoundingBox2D::new((1.5, 0.0).into(), (2.0, 1.0).into()).unwrap();
    ///
    /// assert!(bbox.intersects_bbox(&touching));
    /// assert!(!bbox.intersects_bbox(&apart));
    /// ```
    ///
    pub fn intersects_bbox(&self, other_bbox: &Self) -> bool {
        less_or_near_equal(self.lower_left_coordinate.x, other_bbox.upper_right_coordinate.x)
            && greater_or_near_equal(
                self.upper_right_coordinate.x,
                other_bbox.lower_left_coordinate.x,
            )
            && less_or_near_equal(self.lower_left_coordinate.y, other_bbox.upper_right_coordinate.y)
            && greater_or_near_equal(
                self.upper_right_coordinate.y,
                other_bbox.lower_left_coordinate.y,
            )
    }

    /// Grows the bounding box by the tolerance slack of each of its bounds.
    ///
    /// Every box that [`intersects_bbox`](Self::intersects_bbox) this one also
    /// strictly intersects the inflated box.
    #[must_use]
    pub fn inflated_by_tolerance(&self) -> Self {
        let ll = self.lower_left_coordinate;
        let ur = self.upper_right_coordinate;

        let x_slack = slack(ll.x).max(slack(ur.x));
        let y_slack = slack(ll.y).max(slack(ur.y));

        Self::new_unchecked(
            Coordinate2D::new(ll.x - x_slack, ll.y - y_slack),
            Coordinate2D::new(ur.x + x_slack, ur.y + y_slack),
        )
    }

    pub fn extend_with_coord(&mut self, coord: Coordinate2D) {
        self.lower_left_coordinate = self.lower_left_coordinate.min_elements(coord);
        self.upper_right_coordinate = self.upper_right_coordinate.max_elements(coord);
    }

    /// Builds the smallest bounding box covering all coordinates, `None` for an empty iterator
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::primitives::{BoundingBox2D, Coordinate2D};
    ///
    /// let corners = [(2.0, 0.5), (1.0, 1.5), (3.0, -1.0)].map(Coordinate2D::from);
    ///
    /// let bbox = BoundingBox2D::from_coord_iter(corners).unwrap();
    ///
    /// assert_eq!(bbox.lower_left(), (1.0, -1.0).into());
    /// assert_eq!(bbox.upper_right(), (3.0, 1.5).into());
    /// ```
    ///
    pub fn from_coord_iter<I: IntoIterator<Item = Coordinate2D>>(iter: I) -> Option<Self> {
        let mut iterator = iter.into_iter();

        let first = iterator.next().map(|c| BoundingBox2D::new_unchecked(c, c));

        first.map(|mut f| {
            for c in iterator {
                f.extend_with_coord(c);
            }
            f
        })
    }
}

impl From<BoundingBox2D> for geo::Rect<f64> {
    fn from(bbox: BoundingBox2D) -> geo::Rect<f64> {
        geo::Rect::new(bbox.lower_left_coordinate, bbox.upper_right_coordinate)
    }
}

impl From<&BoundingBox2D> for geo::Rect<f64> {
    fn from(bbox: &BoundingBox2D) -> geo::Rect<f64> {
        geo::Rect::new(bbox.lower_left_coordinate, bbox.upper_right_coordinate)
    }
}

impl From<geo::Rect<f64>> for BoundingBox2D {
    fn from(rect: geo::Rect<f64>) -> BoundingBox2D {
        // `geo::Rect` normalizes its corners on construction
        BoundingBox2D::new_unchecked(rect.min().into(), rect.max().into())
    }
}
