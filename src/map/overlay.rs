//! Campus and route overlays, and the calls that put them on a map.

use crate::{
    directions::Route,
    map::{self, Geometry, Layer, LayerKind, MapHandle, Paint, Source},
    shared::{Coordinate, Polygon},
};

pub const MASK_SOURCE: &str = "campus-mask";
pub const MASK_LAYER: &str = "campus-mask-fill";
pub const BOUNDARY_SOURCE: &str = "campus-boundary";
pub const BOUNDARY_LAYER: &str = "campus-boundary-line";
pub const ROUTE_SOURCE: &str = "route";
pub const ROUTE_LAYER: &str = "route-line";
pub const ROUTE_OUTLINE_LAYER: &str = "route-line-outline";

const WORLD: [[f64; 2]; 5] = [
    [-180.0, -90.0],
    [180.0, -90.0],
    [180.0, 90.0],
    [-180.0, 90.0],
    [-180.0, -90.0],
];

/// A world-sized polygon with the campus cut out of it.
pub fn mask_source(boundary: &Polygon) -> Source {
    let world: Vec<Coordinate> = WORLD.into_iter().map(Coordinate::from_lng_lat).collect();
    Source {
        geometry: Geometry::Polygon(vec![world, boundary.ring().to_vec()]),
    }
}

pub fn boundary_source(boundary: &Polygon) -> Source {
    Source {
        geometry: Geometry::LineString(boundary.ring().to_vec()),
    }
}

pub fn route_source(route: &Route) -> Source {
    Source {
        geometry: Geometry::LineString(route.geometry.clone()),
    }
}

fn mask_layer(dark_mode: bool) -> Layer {
    Layer {
        id: MASK_LAYER.into(),
        source: MASK_SOURCE.into(),
        kind: LayerKind::Fill,
        paint: Paint {
            color: if dark_mode { "#111827" } else { "#f3f4f6" },
            width: None,
            opacity: 1.0,
        },
    }
}

fn boundary_layer() -> Layer {
    Layer {
        id: BOUNDARY_LAYER.into(),
        source: BOUNDARY_SOURCE.into(),
        kind: LayerKind::Line,
        paint: Paint {
            color: "#2563eb",
            width: Some(3.0),
            opacity: 0.8,
        },
    }
}

fn route_layers() -> [Layer; 2] {
    [
        Layer {
            id: ROUTE_OUTLINE_LAYER.into(),
            source: ROUTE_SOURCE.into(),
            kind: LayerKind::Line,
            paint: Paint {
                color: "#1e3a8a",
                width: Some(10.0),
                opacity: 0.5,
            },
        },
        Layer {
            id: ROUTE_LAYER.into(),
            source: ROUTE_SOURCE.into(),
            kind: LayerKind::Line,
            paint: Paint {
                color: "#3b82f6",
                width: Some(6.0),
                opacity: 0.95,
            },
        },
    ]
}

/// Draws the outside-campus mask and the boundary line, replacing earlier copies.
pub fn draw_campus<M: MapHandle>(
    map: &mut M,
    boundary: &Polygon,
    dark_mode: bool,
) -> Result<(), map::Error> {
    remove(map, &[BOUNDARY_LAYER, MASK_LAYER], &[BOUNDARY_SOURCE, MASK_SOURCE])?;
    map.add_source(MASK_SOURCE, mask_source(boundary))?;
    map.add_layer(mask_layer(dark_mode))?;
    map.add_source(BOUNDARY_SOURCE, boundary_source(boundary))?;
    map.add_layer(boundary_layer())
}

/// Draws the route as a wide dark outline under a narrow bright core, above
/// every other layer. A previous route is removed first.
pub fn draw_route<M: MapHandle>(map: &mut M, route: &Route) -> Result<(), map::Error> {
    clear_route(map)?;
    map.add_source(ROUTE_SOURCE, route_source(route))?;
    for layer in route_layers() {
        map.add_layer(layer)?;
    }
    Ok(())
}

pub fn clear_route<M: MapHandle>(map: &mut M) -> Result<(), map::Error> {
    remove(map, &[ROUTE_OUTLINE_LAYER, ROUTE_LAYER], &[ROUTE_SOURCE])
}

pub fn has_route<M: MapHandle>(map: &M) -> bool {
    map.has_source(ROUTE_SOURCE) && map.has_layer(ROUTE_LAYER) && map.has_layer(ROUTE_OUTLINE_LAYER)
}

fn remove<M: MapHandle>(map: &mut M, layers: &[&str], sources: &[&str]) -> Result<(), map::Error> {
    for layer in layers {
        if map.has_layer(layer) {
            map.remove_layer(layer);
        }
    }
    for source in sources {
        if map.has_source(source) {
            map.remove_source(source)?;
        }
    }
    Ok(())
}
