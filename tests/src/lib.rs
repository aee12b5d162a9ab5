#[cfg(test)]
mod tests {
    use geo_types::CoordNum;
    use geoview::*;
    use georaster::*;
    use image::{DynamicImage, Rgba, RgbaImage};
    use rand::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn random_bbox() -> [f64; 4] {
        [
            random_range(-180.0..180.0),
            random_range(-90.0..90.0),
            random_range(-180.0..180.0),
            random_range(-90.0..90.0),
        ]
    }

    fn flatten<T: CoordNum>(((a, b), (c, d)): LatLngBounds<T>) -> [T; 4] {
        [a, b, c, d]
    }

    fn raster(bbox: [f64; 4], crs: Option<Crs>) -> GeoImage {
        let rgba = RgbaImage::from_pixel(16, 8, Rgba([200, 30, 30, 128]));
        let geobox = GeoBox::from_bbox(16, 8, bbox.into(), crs);
        GeoImage::new(DynamicImage::ImageRgba8(rgba), geobox).unwrap()
    }

    #[test]
    fn test_convert_bounds_swaps_axes() {
        for _ in 0..1000 {
            let [x1, y1, x2, y2] = random_bbox();
            let bbox = [x1, y1, x2, y2];
            assert_eq!(convert_bounds(&bbox, false).unwrap(), ((y1, x1), (y2, x2)));
            assert_eq!(convert_bounds(&bbox, true).unwrap(), ((y2, x1), (y1, x2)));
        }
    }

    #[test]
    fn test_convert_bounds_integers() {
        for _ in 0..1000 {
            let bbox: [i64; 4] = [random(), random(), random(), random()];
            let [x1, y1, x2, y2] = bbox;
            assert_eq!(convert_bounds(&bbox, false).unwrap(), ((y1, x1), (y2, x2)));
        }
    }

    #[test]
    fn test_double_inversion_restores_order() {
        for _ in 0..1000 {
            let [x1, y1, x2, y2] = random_bbox();
            let swapped = [x1, y2, x2, y1];
            assert_eq!(
                convert_bounds(&swapped, true).unwrap(),
                convert_bounds(&[x1, y1, x2, y2], false).unwrap()
            );
            let once = flatten(convert_bounds(&swapped, false).unwrap());
            assert_eq!(once, flatten(convert_bounds(&[x1, y1, x2, y2], true).unwrap()));
        }
    }

    #[test]
    fn test_convert_bounds_examples() {
        let bbox = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(convert_bounds(&bbox, false).unwrap(), ((20.0, 10.0), (40.0, 30.0)));
        assert_eq!(convert_bounds(&bbox, true).unwrap(), ((40.0, 10.0), (20.0, 30.0)));
    }

    #[test]
    fn test_short_bbox_is_rejected() {
        for len in 0..4 {
            let bbox: Vec<f64> = (0..len).map(|_| random()).collect();
            assert_eq!(
                convert_bounds(&bbox, false),
                Err(BoundsError::Arity { found: len })
            );
        }
    }

    #[test]
    fn test_image_on_map_random_rasters() {
        init_tracing();
        let before = Map::new().child_count();
        for _ in 0..50 {
            let bbox = random_bbox();
            let image = raster(bbox, Some(Crs::wgs84()));
            let map = image_on_map(&image, &bbox).unwrap();
            assert!(map.child_count() >= before + 2);
            assert_eq!(map.bounds(), Some(convert_bounds(&bbox, false).unwrap()));

            // the overlay is placed by the image itself, normalized to min/max corners
            let overlay = map
                .children()
                .iter()
                .find_map(|x| match x {
                    Layer::Image(i) => Some(i),
                    _ => None,
                })
                .unwrap();
            let (lat1, lng1) = overlay.bounds.0;
            let (lat2, lng2) = overlay.bounds.1;
            assert!(lat1 <= lat2 && lng1 <= lng2);
        }
    }

    #[test]
    fn test_image_on_map_short_bbox() {
        init_tracing();
        let image = raster([0.0, 0.0, 1.0, 1.0], Some(Crs::wgs84()));
        let err = image_on_map(&image, &[0.0, 0.0, 1.0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected a bounding box of 4 values (x1, y1, x2, y2), got 3"
        );
    }

    #[test]
    fn test_image_on_map_missing_crs() {
        init_tracing();
        let image = raster([0.0, 0.0, 1.0, 1.0], None);
        let err = image_on_map(&image, &[0.0, 0.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            ImageOnMapError::Overlay(GeoRasterError::MissingCrs)
        ));
        assert_eq!(err.to_string(), "can't add raster to map without a crs");
    }

    #[test]
    fn test_rendered_page() {
        init_tracing();
        let bbox = [11.5, 55.2, 11.6, 55.3];
        let image = raster(bbox, Some(Crs::wgs84())).with_name("roads");
        let map = image_on_map(&image, &bbox).unwrap();
        let html = map.to_html().unwrap();

        assert_eq!(html.matches("L.imageOverlay(\"data:image/png;base64,").count(), 1);
        assert_eq!(html.matches("L.control.layers(").count(), 1);
        assert!(html.contains(".fitBounds([[55.2,11.5],[55.3,11.6]], {});"));
        assert!(html.contains("\"roads\": image_overlay_"));
        assert!(html.contains("width: 600px; height: 600px;"));
    }

    #[test]
    fn test_configured_view() {
        init_tracing();
        let conf: ViewConf = serde_json::from_str(
            r#"{
                "figure": { "width": "100%", "height": "400px", "title": "scene" },
                "map": { "location": [55.25, 11.55], "zoom_start": 12, "control_scale": true },
                "layer_control": { "collapsed": false }
            }"#,
        )
        .unwrap();
        let bbox = [11.5, 55.2, 11.6, 55.3];
        let image = raster(bbox, Some(Crs::wgs84()));
        let map = image_on_map_with(&image, &bbox, &conf).unwrap();
        assert_eq!(map.center(), (55.25, 11.55));
        assert_eq!(map.zoom(), 12);

        let html = map.to_html().unwrap();
        assert!(html.contains("<title>scene</title>"));
        assert!(html.contains("L.control.scale()"));
        assert!(html.contains("\"collapsed\":false"));

        let iframe = map.to_iframe().unwrap();
        assert!(iframe.contains("width: 100%; height: 400px;"));
    }
}
