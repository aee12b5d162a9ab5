use serde::{Deserialize, Serialize};

pub const OSM_TILES: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Size and title of the page hosting a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConf {
    pub width: String,
    pub height: String,
    pub title: String,
}

impl Default for FigureConf {
    fn default() -> Self {
        Self {
            width: "600px".into(),
            height: "600px".into(),
            title: "geoview".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConf {
    pub url: String,
    pub attribution: String,
    pub name: String,
    pub max_zoom: u8,
}

impl Default for TileConf {
    fn default() -> Self {
        Self {
            url: OSM_TILES.into(),
            attribution: OSM_ATTRIBUTION.into(),
            name: "openstreetmap".into(),
            max_zoom: 19,
        }
    }
}

/// Initial view of a map. Without a `location` the map starts zoomed out
/// over `[0, 0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConf {
    pub location: Option<(f64, f64)>,
    pub zoom_start: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub tiles: TileConf,
    pub world_copy_jump: bool,
    pub scroll_wheel_zoom: bool,
    pub control_scale: bool,
}

impl Default for MapConf {
    fn default() -> Self {
        Self {
            location: None,
            zoom_start: 10,
            min_zoom: 0,
            max_zoom: 18,
            tiles: TileConf::default(),
            world_copy_jump: false,
            scroll_wheel_zoom: true,
            control_scale: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerControlConf {
    pub position: String,
    pub collapsed: bool,
    pub auto_z_index: bool,
}

impl Default for LayerControlConf {
    fn default() -> Self {
        Self {
            position: "topright".into(),
            collapsed: true,
            auto_z_index: true,
        }
    }
}

/// Everything `image_on_map_with` needs to lay out a figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConf {
    pub figure: FigureConf,
    pub map: MapConf,
    pub layer_control: LayerControlConf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_conf_uses_defaults() {
        let conf: ViewConf =
            serde_json::from_str(r#"{ "figure": { "width": "100%" }, "map": { "zoom_start": 4 } }"#)
                .unwrap();
        assert_eq!(conf.figure.width, "100%");
        assert_eq!(conf.figure.height, "600px");
        assert_eq!(conf.map.zoom_start, 4);
        assert_eq!(conf.map.tiles, TileConf::default());
        assert_eq!(conf.layer_control, LayerControlConf::default());
    }

    #[test]
    fn test_empty_conf_is_default() {
        let conf: ViewConf = serde_json::from_str("{}").unwrap();
        assert_eq!(conf, ViewConf::default());
    }
}
