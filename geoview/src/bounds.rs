use geo_types::{coord, CoordNum, Rect};
use thiserror::Error;

/// Two opposite corners in `(row, column)` order, i.e. Leaflet's
/// `[[lat, lng], [lat, lng]]`.
pub type LatLngBounds<T> = ((T, T), (T, T));

#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    #[error("expected a bounding box of 4 values (x1, y1, x2, y2), got {found}")]
    Arity { found: usize },
}

/// Rectangle given by two opposite corners `(x1, y1)` and `(x2, y2)`,
/// usually longitude/latitude. Corner order is not checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox<T: CoordNum = f64> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: CoordNum> BoundingBox<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Uses the min corner as `(x1, y1)` and the max corner as `(x2, y2)`.
    pub fn from_rect(rect: Rect<T>) -> Self {
        let (min, max) = (rect.min(), rect.max());
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// Normalizing rect over the two corners.
    pub fn rect(&self) -> Rect<T> {
        Rect::new(coord! { x: self.x1, y: self.y1 }, coord! { x: self.x2, y: self.y2 })
    }

    /// `(x1, y1, x2, y2) -> ((y1, x1), (y2, x2))`, swapping `y1` and `y2`
    /// first when `invert_y` is set.
    pub fn to_lat_lng_bounds(self, invert_y: bool) -> LatLngBounds<T> {
        let Self {
            x1,
            mut y1,
            x2,
            mut y2,
        } = self;
        if invert_y {
            std::mem::swap(&mut y1, &mut y2);
        }
        ((y1, x1), (y2, x2))
    }
}

impl<T: CoordNum> TryFrom<&[T]> for BoundingBox<T> {
    type Error = BoundsError;

    fn try_from(value: &[T]) -> Result<Self, Self::Error> {
        match *value {
            [x1, y1, x2, y2] => Ok(Self::new(x1, y1, x2, y2)),
            _ => Err(BoundsError::Arity { found: value.len() }),
        }
    }
}

impl<T: CoordNum> From<[T; 4]> for BoundingBox<T> {
    fn from([x1, y1, x2, y2]: [T; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl<T: CoordNum> From<(T, T, T, T)> for BoundingBox<T> {
    fn from((x1, y1, x2, y2): (T, T, T, T)) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl<T: CoordNum> From<BoundingBox<T>> for [T; 4] {
    fn from(value: BoundingBox<T>) -> Self {
        [value.x1, value.y1, value.x2, value.y2]
    }
}

/// Changes a bounding box from `(lon1, lat1, lon2, lat2)` to leaflet
/// notation `((lat1, lon1), (lat2, lon2))`.
pub fn convert_bounds<T: CoordNum>(
    bbox: &[T],
    invert_y: bool,
) -> Result<LatLngBounds<T>, BoundsError> {
    BoundingBox::try_from(bbox).map(|b| b.to_lat_lng_bounds(invert_y))
}
