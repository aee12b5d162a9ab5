use std::str::FromStr;

use derive_more::Display;
use geo::{coord, AffineTransform, BoundingRect, MultiPoint, Point, Rect};
use geoview::BoundingBox;
use thiserror::Error;

pub const WGS84: u32 = 4326;

/// Coordinate reference system of a raster.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Crs {
    #[display("EPSG:{_0}")]
    Epsg(u32),
    /// Lon/lat on WGS84, same axes as EPSG:4326 on a web map.
    #[display("OGC:CRS84")]
    Crs84,
    #[display("{_0}")]
    Wkt(String),
}

impl Crs {
    pub fn wgs84() -> Self {
        Crs::Epsg(WGS84)
    }

    /// Only lon/lat in WGS84 can be drawn on a web map without reprojecting.
    pub fn is_geographic(&self) -> bool {
        matches!(self, Crs::Epsg(WGS84) | Crs::Crs84)
    }
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrsParseError {
    #[error("invalid EPSG code: {0:?}")]
    InvalidEpsgCode(String),
    #[error("unknown OGC crs: {0:?}")]
    UnknownOgc(String),
}

/// `EPSG:<code>` and `OGC:CRS84` are parsed case-insensitively; anything
/// without one of those authority prefixes is kept as WKT.
impl FromStr for Crs {
    type Err = CrsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => code
                .trim()
                .parse()
                .map(Crs::Epsg)
                .map_err(|_| CrsParseError::InvalidEpsgCode(code.to_owned())),
            Some((authority, name)) if authority.eq_ignore_ascii_case("ogc") => {
                if name.trim().eq_ignore_ascii_case("crs84") {
                    Ok(Crs::Crs84)
                } else {
                    Err(CrsParseError::UnknownOgc(name.to_owned()))
                }
            }
            _ => Ok(Crs::Wkt(s.to_owned())),
        }
    }
}

/// Pixel shape, pixel-to-world transform and CRS of a raster.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoBox {
    pub width: u32,
    pub height: u32,
    pub transform: AffineTransform<f64>,
    pub crs: Option<Crs>,
}

impl GeoBox {
    pub fn new(width: u32, height: u32, transform: AffineTransform<f64>, crs: Option<Crs>) -> Self {
        Self {
            width,
            height,
            transform,
            crs,
        }
    }

    /// North-up raster covering `bbox`, row 0 at the top.
    pub fn from_bbox(width: u32, height: u32, bbox: BoundingBox<f64>, crs: Option<Crs>) -> Self {
        let rect = bbox.rect();
        let (min, max) = (rect.min(), rect.max());
        let transform = AffineTransform::new(
            (max.x - min.x) / width as f64,
            0.0,
            min.x,
            0.0,
            -(max.y - min.y) / height as f64,
            max.y,
        );
        Self::new(width, height, transform, crs)
    }

    /// World coordinates of a pixel corner.
    pub fn pixel_to_world(&self, col: f64, row: f64) -> Point<f64> {
        self.transform.apply(coord! { x: col, y: row }).into()
    }

    /// Bounding rect of the four outer pixel corners in CRS units.
    pub fn extent(&self) -> Option<Rect<f64>> {
        let (w, h) = (self.width as f64, self.height as f64);
        let corners: MultiPoint<f64> = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)]
            .into_iter()
            .map(|(col, row)| self.pixel_to_world(col, row))
            .collect();
        corners.bounding_rect()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
