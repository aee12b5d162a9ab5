mod layer;
pub use layer::*;

use thiserror::Error;

use crate::{FigureConf, LatLngBounds, MapConf};

/// Type can draw itself onto a [Map], supplying its own placement.
pub trait Overlayable {
    type Error: std::error::Error + 'static;
    /// Adds self as one or more children of `map`.
    fn add_to(&self, map: &mut Map) -> Result<(), Self::Error>;
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("zoom_start {zoom_start} is outside [{min_zoom}, {max_zoom}]")]
    ZoomOutOfRange {
        zoom_start: u8,
        min_zoom: u8,
        max_zoom: u8,
    },
    #[error("location ({lat}, {lng}) is not a valid lat/lng")]
    InvalidLocation { lat: f64, lng: f64 },
    #[error("tile layer needs a url")]
    EmptyTileUrl,
}

/// The page a map is drawn on.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width: String,
    pub height: String,
    pub title: String,
}

impl Figure {
    pub fn new(width: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
            ..Self::default()
        }
    }

    pub fn from_conf(conf: &FigureConf) -> Self {
        Self {
            width: conf.width.clone(),
            height: conf.height.clone(),
            title: conf.title.clone(),
        }
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::from_conf(&FigureConf::default())
    }
}

/// A web map: a view plus the layers drawn on it, in insertion order.
#[derive(Debug, Clone)]
pub struct Map {
    element: ElementName,
    conf: MapConf,
    children: Vec<Layer>,
    bounds: Option<LatLngBounds<f64>>,
    figure: Option<Figure>,
}

impl Map {
    /// Empty map over the whole world with an OpenStreetMap base layer.
    pub fn new() -> Map {
        Self::build(MapConf::default())
    }

    pub fn with_conf(conf: &MapConf) -> Result<Map, MapError> {
        if !(conf.min_zoom..=conf.max_zoom).contains(&conf.zoom_start) {
            return Err(MapError::ZoomOutOfRange {
                zoom_start: conf.zoom_start,
                min_zoom: conf.min_zoom,
                max_zoom: conf.max_zoom,
            });
        }
        if let Some((lat, lng)) = conf.location {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                return Err(MapError::InvalidLocation { lat, lng });
            }
        }
        if conf.tiles.url.trim().is_empty() {
            return Err(MapError::EmptyTileUrl);
        }
        Ok(Self::build(conf.clone()))
    }

    fn build(conf: MapConf) -> Map {
        let mut map = Map {
            element: ElementName::new("map"),
            children: Vec::new(),
            bounds: None,
            figure: None,
            conf,
        };
        let tiles = TileLayer::from_conf(&map.conf.tiles);
        map.add_child(tiles);
        tracing::debug!(map = %map.element, "created map");
        map
    }

    pub fn add_child(&mut self, child: impl Into<Layer>) -> &mut Self {
        let child = child.into();
        tracing::debug!(map = %self.element, child = %child.element(), "adding child");
        self.children.push(child);
        self
    }

    pub fn children(&self) -> &[Layer] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Fits the view to `bounds` once the map is displayed.
    pub fn fit_bounds(&mut self, bounds: LatLngBounds<f64>) -> &mut Self {
        tracing::debug!(map = %self.element, ?bounds, "fitting bounds");
        self.bounds = Some(bounds);
        self.add_child(FitBounds::new(bounds))
    }

    pub fn bounds(&self) -> Option<LatLngBounds<f64>> {
        self.bounds
    }

    /// Hosts the map on `figure`, replacing any previous one.
    pub fn set_figure(&mut self, figure: Figure) -> &mut Self {
        self.figure = Some(figure);
        self
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Center of the initial view, `[0, 0]` when no location is set.
    pub fn center(&self) -> (f64, f64) {
        self.conf.location.unwrap_or((0.0, 0.0))
    }

    /// Zoom of the initial view; maps without a location start zoomed out.
    pub fn zoom(&self) -> u8 {
        match self.conf.location {
            Some(_) => self.conf.zoom_start,
            None => self.conf.min_zoom.max(1).min(self.conf.max_zoom),
        }
    }

    pub fn conf(&self) -> &MapConf {
        &self.conf
    }

    pub fn element(&self) -> &ElementName {
        &self.element
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}
