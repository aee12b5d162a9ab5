use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use geoview::{BoundingBox, ImageOverlay, Map, Overlayable};
use image::{DynamicImage, GenericImageView, GrayImage, ImageError, ImageOutputFormat};
use thiserror::Error;

pub mod geobox;
pub use geobox::*;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GeoRasterError {
    #[error("can't add raster to map without a crs")]
    MissingCrs,
    #[error("can't add raster in {0} to map, only EPSG:4326 and OGC:CRS84 are supported")]
    UnsupportedCrs(Crs),
    #[error("raster has no pixels")]
    EmptyRaster,
    #[error("geobox is {geobox:?} but the image is {image:?}")]
    ShapeMismatch {
        geobox: (u32, u32),
        image: (u32, u32),
    },
    #[error("band has {found} values, expected {expected}")]
    BandLength { expected: usize, found: usize },
    #[error("could not read image: {0}")]
    Open(ImageError),
    #[error("could not encode png: {0}")]
    Encode(ImageError),
}

/// A raster together with where it lies on the earth.
#[derive(Debug, Clone)]
pub struct GeoImage {
    image: DynamicImage,
    geobox: GeoBox,
    name: Option<String>,
    opacity: f64,
    vmin: Option<f64>,
    vmax: Option<f64>,
}

impl GeoImage {
    pub fn new(image: DynamicImage, geobox: GeoBox) -> Result<Self, GeoRasterError> {
        if (image.width(), image.height()) != (geobox.width, geobox.height) {
            return Err(GeoRasterError::ShapeMismatch {
                geobox: (geobox.width, geobox.height),
                image: (image.width(), image.height()),
            });
        }
        Ok(Self {
            image,
            geobox,
            name: None,
            opacity: 1.0,
            vmin: None,
            vmax: None,
        })
    }

    /// Decodes the image at `path` and places it covering `bbox`.
    pub fn open(
        path: impl AsRef<Path>,
        bbox: BoundingBox<f64>,
        crs: Option<Crs>,
    ) -> Result<Self, GeoRasterError> {
        let image = image::open(path).map_err(GeoRasterError::Open)?;
        let geobox = GeoBox::from_bbox(image.width(), image.height(), bbox, crs);
        Self::new(image, geobox)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Value range stretched to black..white for single band rasters.
    pub fn with_range(mut self, vmin: Option<f64>, vmax: Option<f64>) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    pub fn geobox(&self) -> &GeoBox {
        &self.geobox
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Extent in `(lon1, lat1, lon2, lat2)` order, `None` for a raster
    /// without pixels.
    pub fn bbox(&self) -> Option<BoundingBox<f64>> {
        if self.geobox.is_empty() {
            return None;
        }
        self.geobox.extent().map(BoundingBox::from_rect)
    }

    /// The raster as a `data:image/png;base64,...` URL.
    pub fn to_png_data_url(&self) -> Result<String, GeoRasterError> {
        let rgba = match self.band() {
            Some(values) => DynamicImage::ImageLuma8(self.stretch(&values)?),
            None => DynamicImage::ImageRgba8(self.image.to_rgba8()),
        };
        let mut png = Cursor::new(Vec::new());
        rgba.write_to(&mut png, ImageOutputFormat::Png)
            .map_err(GeoRasterError::Encode)?;
        let png = png.into_inner();
        tracing::trace!(bytes = png.len(), "encoded raster as png");
        Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
    }

    /// Raw values of a single band raster.
    fn band(&self) -> Option<Vec<f64>> {
        match &self.image {
            DynamicImage::ImageLuma8(b) => Some(b.pixels().map(|p| p.0[0] as f64).collect()),
            DynamicImage::ImageLuma16(b) => Some(b.pixels().map(|p| p.0[0] as f64).collect()),
            _ => None,
        }
    }

    fn stretch(&self, values: &[f64]) -> Result<GrayImage, GeoRasterError> {
        let vmin = self
            .vmin
            .unwrap_or_else(|| values.iter().copied().fold(f64::INFINITY, f64::min));
        let vmax = self
            .vmax
            .unwrap_or_else(|| values.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        let span = vmax - vmin;
        let pixels: Vec<u8> = values
            .iter()
            .map(|v| {
                if span > 0.0 {
                    (((v - vmin) / span).clamp(0.0, 1.0) * 255.0).round() as u8
                } else {
                    0
                }
            })
            .collect();
        let (width, height) = (self.image.width(), self.image.height());
        let found = pixels.len();
        GrayImage::from_raw(width, height, pixels).ok_or(GeoRasterError::BandLength {
            expected: width as usize * height as usize,
            found,
        })
    }
}

impl Overlayable for GeoImage {
    type Error = GeoRasterError;

    fn add_to(&self, map: &mut Map) -> Result<(), Self::Error> {
        let crs = self.geobox.crs.as_ref().ok_or(GeoRasterError::MissingCrs)?;
        if !crs.is_geographic() {
            return Err(GeoRasterError::UnsupportedCrs(crs.clone()));
        }
        let bbox = self.bbox().ok_or(GeoRasterError::EmptyRaster)?;
        let url = self.to_png_data_url()?;

        let mut overlay = ImageOverlay::new(url, bbox.to_lat_lng_bounds(false))
            .with_opacity(self.opacity);
        if let Some(name) = &self.name {
            overlay = overlay.with_name(name);
        }
        tracing::debug!(%crs, ?bbox, "adding raster overlay");
        overlay.add_to(map).map_err(|never| match never {})
    }
}
