use std::collections::HashMap;
use tracing::debug;

use crate::{
    map::{self, Layer, MapHandle, MapOptions, MapStyle, Marker, Source},
    shared::{Bounds, Coordinate},
};

/// Headless map widget. Behaves like the browser widget where it matters to
/// the reconciler: style swaps drop sources and layers, a new style must
/// finish loading before overlays can be added, and the camera is held
/// inside `max_bounds`.
#[derive(Debug, Clone)]
pub struct MemoryMap {
    style: MapStyle,
    style_loaded: bool,
    sources: HashMap<String, Source>,
    layers: Vec<Layer>,
    markers: Vec<Marker>,
    center: Coordinate,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    max_bounds: Bounds,
    style_swaps: usize,
}

impl MemoryMap {
    /// The first style starts loading immediately, like the real widget.
    pub fn new(options: MapOptions) -> Self {
        Self {
            style: options.style,
            style_loaded: false,
            sources: HashMap::new(),
            layers: Vec::new(),
            markers: Vec::new(),
            center: options.max_bounds.clamp(&options.center),
            zoom: options.zoom.clamp(options.min_zoom, options.max_zoom),
            min_zoom: options.min_zoom,
            max_zoom: options.max_zoom,
            max_bounds: options.max_bounds,
            style_swaps: 0,
        }
    }

    /// Marks the pending style as loaded; the caller then replays overlays.
    pub fn finish_style_load(&mut self) {
        self.style_loaded = true;
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn style_swaps(&self) -> usize {
        self.style_swaps
    }
}

impl MapHandle for MemoryMap {
    fn set_style(&mut self, style: MapStyle) {
        debug!("Swapping style to {}", style.url());
        self.style = style;
        self.style_loaded = false;
        self.sources.clear();
        self.layers.clear();
        self.style_swaps += 1;
    }

    fn style(&self) -> MapStyle {
        self.style
    }

    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }

    fn add_source(&mut self, id: &str, source: Source) -> Result<(), map::Error> {
        if !self.style_loaded {
            return Err(map::Error::StyleNotLoaded);
        }
        if self.sources.contains_key(id) {
            return Err(map::Error::DuplicateSource(id.to_string()));
        }
        self.sources.insert(id.to_string(), source);
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> Result<(), map::Error> {
        if self.layers.iter().any(|layer| layer.source == id) {
            return Err(map::Error::SourceInUse(id.to_string()));
        }
        self.sources.remove(id);
        Ok(())
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn source(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    fn add_layer(&mut self, layer: Layer) -> Result<(), map::Error> {
        if !self.style_loaded {
            return Err(map::Error::StyleNotLoaded);
        }
        if self.has_layer(&layer.id) {
            return Err(map::Error::DuplicateLayer(layer.id));
        }
        if !self.sources.contains_key(&layer.source) {
            return Err(map::Error::MissingSource(layer.source));
        }
        self.layers.push(layer);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) {
        self.layers.retain(|layer| layer.id != id);
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|layer| layer.id == id)
    }

    fn layer_ids(&self) -> Vec<String> {
        self.layers.iter().map(|layer| layer.id.clone()).collect()
    }

    fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn pan_to(&mut self, center: Coordinate) {
        self.center = self.max_bounds.clamp(&center);
    }

    fn fly_to(&mut self, center: Coordinate, zoom: f64) {
        self.center = self.max_bounds.clamp(&center);
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    fn center(&self) -> Coordinate {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}

#[cfg(test)]
fn loaded_map() -> MemoryMap {
    let mut map = MemoryMap::new(MapOptions {
        style: MapStyle::Streets,
        center: Coordinate::new(0.5, 0.5),
        zoom: 18.0,
        min_zoom: 16.0,
        max_zoom: 20.0,
        max_bounds: Bounds::new(0.0, 0.0, 1.0, 1.0),
    });
    map.finish_style_load();
    map
}

#[test]
fn style_swap_drops_overlays_but_keeps_markers() {
    let mut map = loaded_map();
    let source = Source {
        geometry: map::Geometry::LineString(vec![Coordinate::new(0.1, 0.1)]),
    };
    map.add_source("line", source).unwrap();
    map.set_markers(vec![Marker {
        location_id: "a".into(),
        coordinate: Coordinate::new(0.2, 0.2),
        style: crate::repository::LocationKind::Library.into(),
    }]);
    map.set_style(MapStyle::Dark);
    assert!(!map.has_source("line"));
    assert_eq!(map.markers().len(), 1);
    assert_eq!(
        map.add_source("line", Source {
            geometry: map::Geometry::LineString(Vec::new())
        }),
        Err(map::Error::StyleNotLoaded)
    );
}

#[test]
fn camera_is_held_inside_bounds() {
    let mut map = loaded_map();
    map.fly_to(Coordinate::new(2.0, -1.0), 25.0);
    assert_eq!(map.center(), Coordinate::new(1.0, 0.0));
    assert_eq!(map.zoom(), 20.0);
}
