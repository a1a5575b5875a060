mod marker;
mod memory;
pub mod overlay;
mod view;

pub use marker::*;
pub use memory::*;
pub use view::*;

use std::sync::Arc;
use thiserror::Error;

use crate::shared::{Bounds, Coordinate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Style is still loading")]
    StyleNotLoaded,
    #[error("Source {0} already exists")]
    DuplicateSource(String),
    #[error("Layer {0} already exists")]
    DuplicateLayer(String),
    #[error("Layer references missing source {0}")]
    MissingSource(String),
    #[error("Source {0} is still used by a layer")]
    SourceInUse(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MapStyle {
    #[default]
    Streets,
    Dark,
}

impl MapStyle {
    pub const fn for_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::Dark } else { Self::Streets }
    }

    pub const fn url(&self) -> &'static str {
        match self {
            Self::Streets => "mapbox://styles/mapbox/streets-v12",
            Self::Dark => "mapbox://styles/mapbox/dark-v11",
        }
    }
}

/// GeoJSON geometry backing a source.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    LineString(Vec<Coordinate>),
    /// Outer ring first, holes after.
    Polygon(Vec<Vec<Coordinate>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Line,
    Fill,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: &'static str,
    pub width: Option<f64>,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: String,
    pub source: String,
    pub kind: LayerKind,
    pub paint: Paint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub location_id: Arc<str>,
    pub coordinate: Coordinate,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub style: MapStyle,
    pub center: Coordinate,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub max_bounds: Bounds,
}

/// Imperative handle over an interactive map widget.
///
/// Sources and layers belong to the current style: swapping the style throws
/// them away, and nothing can be added until the new style has loaded.
/// Markers live outside the style and survive a swap.
pub trait MapHandle {
    fn set_style(&mut self, style: MapStyle);
    fn style(&self) -> MapStyle;
    fn is_style_loaded(&self) -> bool;

    fn add_source(&mut self, id: &str, source: Source) -> Result<(), self::Error>;
    fn remove_source(&mut self, id: &str) -> Result<(), self::Error>;
    fn has_source(&self, id: &str) -> bool;
    fn source(&self, id: &str) -> Option<&Source>;

    /// Adds the layer on top of every existing layer.
    fn add_layer(&mut self, layer: Layer) -> Result<(), self::Error>;
    fn remove_layer(&mut self, id: &str);
    fn has_layer(&self, id: &str) -> bool;
    /// Bottom to top.
    fn layer_ids(&self) -> Vec<String>;

    fn set_markers(&mut self, markers: Vec<Marker>);
    fn markers(&self) -> &[Marker];

    /// Moves the camera without changing zoom.
    fn pan_to(&mut self, center: Coordinate);
    fn fly_to(&mut self, center: Coordinate, zoom: f64);
    fn center(&self) -> Coordinate;
    fn zoom(&self) -> f64;
}
