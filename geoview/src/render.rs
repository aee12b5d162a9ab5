use std::fmt::Write;

use itertools::Itertools;
use serde_json::{json, Map as JsonMap, Value};
use thiserror::Error;

use crate::{FitBounds, ImageOverlay, LatLngBounds, Layer, LayerControl, Map, TileLayer};

pub const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js";
pub const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.css";

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not serialize options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not write script: {0}")]
    Fmt(#[from] std::fmt::Error),
}

fn js<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?)
}

fn js_bounds(((lat1, lng1), (lat2, lng2)): LatLngBounds<f64>) -> Result<String, RenderError> {
    js(&[[lat1, lng1], [lat2, lng2]])
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

impl Map {
    /// Standalone HTML page drawing the map with Leaflet.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let figure = self.figure().cloned().unwrap_or_default();
        let script = self.script()?.replace("</", "<\\/");
        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>{title}</title>
<link rel="stylesheet" href="{css}" />
<script src="{leaflet}"></script>
<style>
html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
#{id} {{ position: relative; width: {width}; height: {height}; }}
</style>
</head>
<body>
<div id="{id}"></div>
<script>
{script}
</script>
</body>
</html>
"#,
            title = escape_html(&figure.title),
            css = LEAFLET_CSS,
            leaflet = LEAFLET_JS,
            id = self.element(),
            width = escape_html(&figure.width),
            height = escape_html(&figure.height),
        );
        tracing::trace!(map = %self.element(), bytes = html.len(), "rendered html");
        Ok(html)
    }

    /// The page wrapped in an `<iframe>`, for embedding in notebook output.
    pub fn to_iframe(&self) -> Result<String, RenderError> {
        let figure = self.figure().cloned().unwrap_or_default();
        let html = self.to_html()?;
        Ok(format!(
            r#"<iframe srcdoc="{doc}" style="width: {width}; height: {height}; border: none;" sandbox="allow-scripts"></iframe>"#,
            doc = escape_html(&html),
            width = escape_html(&figure.width),
            height = escape_html(&figure.height),
        ))
    }

    fn script(&self) -> Result<String, RenderError> {
        let conf = self.conf();
        let (lat, lng) = self.center();
        let options = json!({
            "center": [lat, lng],
            "zoom": self.zoom(),
            "minZoom": conf.min_zoom,
            "maxZoom": conf.max_zoom,
            "worldCopyJump": conf.world_copy_jump,
            "scrollWheelZoom": conf.scroll_wheel_zoom,
            "zoomControl": true,
        });

        let mut script = String::new();
        writeln!(
            script,
            "var {id} = L.map({name}, {options});",
            id = self.element(),
            name = js(self.element().as_str())?,
            options = js(&options)?,
        )?;
        if conf.control_scale {
            writeln!(script, "L.control.scale().addTo({});", self.element())?;
        }
        for child in self.children() {
            let line = match child {
                Layer::Tile(x) => self.tile_layer(x)?,
                Layer::Image(x) => self.image_overlay(x)?,
                Layer::FitBounds(x) => self.fit_bounds_call(x)?,
                Layer::Control(x) => self.layer_control(x)?,
            };
            writeln!(script, "{line}")?;
        }
        Ok(script)
    }

    fn tile_layer(&self, layer: &TileLayer) -> Result<String, RenderError> {
        let options = json!({
            "attribution": layer.attribution,
            "maxZoom": layer.max_zoom,
        });
        Ok(format!(
            "var {id} = L.tileLayer({url}, {options}).addTo({map});",
            id = layer.element(),
            url = js(&layer.url)?,
            options = js(&options)?,
            map = self.element(),
        ))
    }

    fn image_overlay(&self, overlay: &ImageOverlay) -> Result<String, RenderError> {
        let options = json!({
            "opacity": overlay.opacity(),
            "zIndex": overlay.z_index,
            "interactive": overlay.interactive,
            "crossOrigin": overlay.cross_origin,
        });
        let add = if overlay.show {
            format!(".addTo({})", self.element())
        } else {
            String::new()
        };
        Ok(format!(
            "var {id} = L.imageOverlay({url}, {bounds}, {options}){add};",
            id = overlay.element(),
            url = js(&overlay.url)?,
            bounds = js_bounds(overlay.bounds)?,
            options = js(&options)?,
        ))
    }

    fn fit_bounds_call(&self, fit: &FitBounds) -> Result<String, RenderError> {
        let mut options = JsonMap::new();
        if let Some((x, y)) = fit.padding {
            options.insert("padding".into(), json!([x, y]));
        }
        if let Some(max_zoom) = fit.max_zoom {
            options.insert("maxZoom".into(), json!(max_zoom));
        }
        Ok(format!(
            "{map}.fitBounds({bounds}, {options});",
            map = self.element(),
            bounds = js_bounds(fit.bounds)?,
            options = js(&Value::Object(options))?,
        ))
    }

    fn layer_control(&self, control: &LayerControl) -> Result<String, RenderError> {
        let entries = |layers: Vec<(&str, String)>| -> Result<String, RenderError> {
            let body = layers
                .into_iter()
                .map(|(id, name)| js(&name).map(|name| format!("{name}: {id}")))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .join(", ");
            Ok(format!("{{{body}}}"))
        };
        let base_layers = entries(
            self.children()
                .iter()
                .filter_map(|x| match x {
                    Layer::Tile(t) => Some((t.element().as_str(), t.name.clone())),
                    _ => None,
                })
                .collect(),
        )?;
        let overlays = entries(
            self.children()
                .iter()
                .filter_map(|x| match x {
                    Layer::Image(i) => Some((i.element().as_str(), i.name.clone())),
                    _ => None,
                })
                .collect(),
        )?;
        let options = json!({
            "position": control.position,
            "collapsed": control.collapsed,
            "autoZIndex": control.auto_z_index,
        });
        Ok(format!(
            "var {id} = L.control.layers({base_layers}, {overlays}, {options}).addTo({map});",
            id = control.element(),
            options = js(&options)?,
            map = self.element(),
        ))
    }
}
