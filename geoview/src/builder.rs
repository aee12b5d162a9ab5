use thiserror::Error;

use crate::{
    convert_bounds, BoundsError, Figure, LayerControl, Map, MapError, Overlayable, ViewConf,
};

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ImageOnMapError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Overlay(E),
}

/// Draws `image` on a fresh map fitted to `bbox` (`(x1, y1, x2, y2)`),
/// with a layer control.
pub fn image_on_map<O: Overlayable>(
    image: &O,
    bbox: &[f64],
) -> Result<Map, ImageOnMapError<O::Error>> {
    image_on_map_with(image, bbox, &ViewConf::default())
}

pub fn image_on_map_with<O: Overlayable>(
    image: &O,
    bbox: &[f64],
    conf: &ViewConf,
) -> Result<Map, ImageOnMapError<O::Error>> {
    let bounds = convert_bounds(bbox, false)?;

    let figure = Figure::from_conf(&conf.figure);
    let mut map = Map::with_conf(&conf.map)?;
    map.set_figure(figure);
    image.add_to(&mut map).map_err(ImageOnMapError::Overlay)?;
    map.fit_bounds(bounds);
    LayerControl::from_conf(&conf.layer_control).add_to(&mut map);
    Ok(map)
}
