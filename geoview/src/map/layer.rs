use std::convert::Infallible;

use derive_more::{Display, From};
use uuid::Uuid;

use crate::{LatLngBounds, LayerControlConf, Map, Overlayable, TileConf};

/// Unique element name, also used as the JS variable name when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct ElementName(String);

impl ElementName {
    pub fn new(kind: &str) -> Self {
        Self(format!("{kind}_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Child of a [Map], kept in insertion order.
#[derive(Debug, Clone, From)]
pub enum Layer {
    Tile(TileLayer),
    Image(ImageOverlay),
    Control(LayerControl),
    FitBounds(FitBounds),
}

impl Layer {
    pub fn element(&self) -> &ElementName {
        match self {
            Layer::Tile(x) => &x.element,
            Layer::Image(x) => &x.element,
            Layer::Control(x) => &x.element,
            Layer::FitBounds(x) => &x.element,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TileLayer {
    element: ElementName,
    pub url: String,
    pub attribution: String,
    pub name: String,
    pub max_zoom: u8,
}

impl TileLayer {
    pub fn new(url: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self::from_conf(&TileConf {
            url: url.into(),
            attribution: attribution.into(),
            ..TileConf::default()
        })
    }

    pub fn openstreetmap() -> Self {
        Self::from_conf(&TileConf::default())
    }

    pub fn from_conf(conf: &TileConf) -> Self {
        Self {
            element: ElementName::new("tile_layer"),
            url: conf.url.clone(),
            attribution: conf.attribution.clone(),
            name: conf.name.clone(),
            max_zoom: conf.max_zoom,
        }
    }

    /// Label of the layer in the layer control.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn element(&self) -> &ElementName {
        &self.element
    }
}

/// An image drawn over the map between two lat/lng corners.
#[derive(Debug, Clone)]
pub struct ImageOverlay {
    element: ElementName,
    pub url: String,
    pub bounds: LatLngBounds<f64>,
    pub name: String,
    opacity: f64,
    pub z_index: u32,
    pub interactive: bool,
    pub cross_origin: bool,
    pub show: bool,
}

impl ImageOverlay {
    /// `url` may be a remote URL or a `data:` URL.
    pub fn new(url: impl Into<String>, bounds: LatLngBounds<f64>) -> Self {
        let element = ElementName::new("image_overlay");
        Self {
            name: element.to_string(),
            element,
            url: url.into(),
            bounds,
            opacity: 1.0,
            z_index: 1,
            interactive: false,
            cross_origin: false,
            show: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = if opacity.is_nan() {
            tracing::warn!(opacity, "opacity is NaN, using 1");
            1.0
        } else if !(0.0..=1.0).contains(&opacity) {
            tracing::warn!(opacity, "opacity outside [0, 1], clamping");
            opacity.clamp(0.0, 1.0)
        } else {
            opacity
        };
        self
    }

    pub fn with_z_index(mut self, z_index: u32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn cross_origin(mut self, cross_origin: bool) -> Self {
        self.cross_origin = cross_origin;
        self
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn element(&self) -> &ElementName {
        &self.element
    }
}

impl Overlayable for ImageOverlay {
    type Error = Infallible;

    fn add_to(&self, map: &mut Map) -> Result<(), Self::Error> {
        map.add_child(self.clone());
        Ok(())
    }
}

/// Widget toggling the visibility of the map's layers.
#[derive(Debug, Clone)]
pub struct LayerControl {
    element: ElementName,
    pub position: String,
    pub collapsed: bool,
    pub auto_z_index: bool,
}

impl LayerControl {
    pub fn from_conf(conf: &LayerControlConf) -> Self {
        Self {
            element: ElementName::new("layer_control"),
            position: conf.position.clone(),
            collapsed: conf.collapsed,
            auto_z_index: conf.auto_z_index,
        }
    }

    pub fn add_to(self, map: &mut Map) -> &mut Map {
        map.add_child(self)
    }

    pub fn element(&self) -> &ElementName {
        &self.element
    }
}

impl Default for LayerControl {
    fn default() -> Self {
        Self::from_conf(&LayerControlConf::default())
    }
}

#[derive(Debug, Clone)]
pub struct FitBounds {
    element: ElementName,
    pub bounds: LatLngBounds<f64>,
    pub padding: Option<(u32, u32)>,
    pub max_zoom: Option<u8>,
}

impl FitBounds {
    pub fn new(bounds: LatLngBounds<f64>) -> Self {
        Self {
            element: ElementName::new("fit_bounds"),
            bounds,
            padding: None,
            max_zoom: None,
        }
    }

    /// Pixels kept free around the bounds, `(x, y)`.
    pub fn with_padding(mut self, x: u32, y: u32) -> Self {
        self.padding = Some((x, y));
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = Some(max_zoom);
        self
    }

    pub fn element(&self) -> &ElementName {
        &self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_names_are_unique() {
        let a = ElementName::new("image_overlay");
        let b = ElementName::new("image_overlay");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("image_overlay_"));
        assert!(!a.as_str().contains('-'));
    }

    #[test]
    fn test_tile_layers() {
        let osm = TileLayer::openstreetmap();
        assert_eq!(osm.url, crate::OSM_TILES);
        assert_eq!(osm.name, "openstreetmap");
        let topo = TileLayer::new("https://tiles.example.com/{z}/{x}/{y}.png", "example")
            .with_name("topo");
        assert_eq!(topo.attribution, "example");
        assert_eq!(topo.name, "topo");
        assert_eq!(topo.max_zoom, TileConf::default().max_zoom);
        assert_ne!(osm.element(), topo.element());
    }

    #[test]
    fn test_opacity_is_clamped() {
        let bounds = ((0.0, 0.0), (1.0, 1.0));
        assert_eq!(ImageOverlay::new("a.png", bounds).with_opacity(1.5).opacity(), 1.0);
        assert_eq!(ImageOverlay::new("a.png", bounds).with_opacity(-2.0).opacity(), 0.0);
        assert_eq!(ImageOverlay::new("a.png", bounds).with_opacity(f64::NAN).opacity(), 1.0);
        assert_eq!(ImageOverlay::new("a.png", bounds).with_opacity(0.4).opacity(), 0.4);
    }

    #[test]
    fn test_overlay_adds_itself() {
        let mut map = Map::new();
        let before = map.child_count();
        let overlay = ImageOverlay::new("a.png", ((0.0, 0.0), (1.0, 1.0))).with_name("raster");
        overlay.add_to(&mut map).unwrap();
        assert_eq!(map.child_count(), before + 1);
        assert!(matches!(map.children().last(), Some(Layer::Image(x)) if x.name == "raster"));
    }
}
