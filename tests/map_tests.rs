use campuscompass::{
    config::CampusConfig,
    directions::Route,
    map::{Geometry, MapHandle, MapStyle, MapView, MemoryMap, ViewState, overlay},
    repository::{Location, LocationKind},
    shared::{Coordinate, Distance, Duration},
};

fn location(id: &str, coordinate: Coordinate) -> Location {
    Location {
        index: 0,
        id: id.into(),
        name: id.into(),
        address: "North West University".into(),
        coordinate,
        kind: LocationKind::Library,
    }
}

fn route() -> Route {
    Route {
        distance: Distance::from_meters(500.0),
        duration: Duration::from_seconds(300.0),
        steps: Vec::new(),
        geometry: vec![
            Coordinate::new(-26.6885, 27.0915),
            Coordinate::new(-26.6880, 27.0920),
            Coordinate::new(-26.6900, 27.0950),
        ],
    }
}

fn mounted(locations: &[Location]) -> (MapView, MemoryMap) {
    let mut view = MapView::new(CampusConfig::default());
    let mut map = MemoryMap::new(view.options(false));
    view.mount(ViewState::default(), locations, &mut map).unwrap();
    map.finish_style_load();
    view.on_style_load(&mut map).unwrap();
    (view, map)
}

fn route_geometry(map: &MemoryMap) -> Option<Geometry> {
    map.source(overlay::ROUTE_SOURCE).map(|s| s.geometry.clone())
}

#[test]
fn mount_waits_for_style_then_draws_campus() {
    let campus = CampusConfig::default();
    let mut view = MapView::new(campus.clone());
    let mut map = MemoryMap::new(view.options(false));
    let library = location("lib", Coordinate::new(-26.6900, 27.0950));

    view.mount(ViewState::default(), [&library], &mut map).unwrap();
    assert!(map.layer_ids().is_empty());
    assert_eq!(map.markers().len(), 1);

    map.finish_style_load();
    view.on_style_load(&mut map).unwrap();
    assert!(map.has_layer(overlay::MASK_LAYER));
    assert!(map.has_layer(overlay::BOUNDARY_LAYER));
    assert_eq!(map.zoom(), campus.default_zoom);
    assert_eq!(map.center(), campus.center);
}

#[test]
fn mask_has_campus_hole() {
    let (view, map) = mounted(&[]);
    let Some(Geometry::Polygon(rings)) = map.source(overlay::MASK_SOURCE).map(|s| s.geometry.clone())
    else {
        panic!("mask should be a polygon");
    };
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[1], view.campus().boundary.ring());
}

#[test]
fn selection_pans_without_zoom() {
    let (mut view, mut map) = mounted(&[]);
    let zoom = map.zoom();
    let library = location("lib", Coordinate::new(-26.6900, 27.0950));

    view.reconcile(
        ViewState {
            selected: Some(library.clone()),
            ..Default::default()
        },
        &mut map,
    )
    .unwrap();
    assert_eq!(map.center(), library.coordinate);
    assert_eq!(map.zoom(), zoom);
}

#[test]
fn selection_outside_bounds_is_clamped() {
    let (mut view, mut map) = mounted(&[]);
    let far = location("far", Coordinate::new(-26.0, 28.0));
    view.reconcile(
        ViewState {
            selected: Some(far),
            ..Default::default()
        },
        &mut map,
    )
    .unwrap();
    let bounds = view.campus().bounds;
    assert_eq!(map.center(), Coordinate::new(bounds.north, bounds.east));
}

#[test]
fn route_survives_dark_mode_toggle() {
    let (mut view, mut map) = mounted(&[]);
    let with_route = ViewState {
        route: Some(route()),
        ..Default::default()
    };
    view.reconcile(with_route.clone(), &mut map).unwrap();
    let before = route_geometry(&map);
    assert!(before.is_some());

    view.reconcile(
        ViewState {
            dark_mode: true,
            ..with_route
        },
        &mut map,
    )
    .unwrap();
    assert_eq!(map.style(), MapStyle::Dark);
    assert!(!overlay::has_route(&map));

    map.finish_style_load();
    view.on_style_load(&mut map).unwrap();
    assert!(overlay::has_route(&map));
    assert_eq!(route_geometry(&map), before);
    assert_eq!(
        map.layer_ids(),
        vec![
            overlay::MASK_LAYER,
            overlay::BOUNDARY_LAYER,
            overlay::ROUTE_OUTLINE_LAYER,
            overlay::ROUTE_LAYER,
        ]
    );
}

#[test]
fn route_cleared_during_style_load_is_not_replayed() {
    let (mut view, mut map) = mounted(&[]);
    view.reconcile(
        ViewState {
            route: Some(route()),
            ..Default::default()
        },
        &mut map,
    )
    .unwrap();
    view.reconcile(
        ViewState {
            dark_mode: true,
            route: Some(route()),
            ..Default::default()
        },
        &mut map,
    )
    .unwrap();
    view.reconcile(
        ViewState {
            dark_mode: true,
            ..Default::default()
        },
        &mut map,
    )
    .unwrap();

    map.finish_style_load();
    view.on_style_load(&mut map).unwrap();
    assert!(!overlay::has_route(&map));
    assert!(map.has_layer(overlay::BOUNDARY_LAYER));
}

#[test]
fn clearing_route_keeps_style_and_markers() {
    let library = location("lib", Coordinate::new(-26.6900, 27.0950));
    let (mut view, mut map) = mounted(std::slice::from_ref(&library));
    view.reconcile(
        ViewState {
            route: Some(route()),
            ..Default::default()
        },
        &mut map,
    )
    .unwrap();
    view.reconcile(ViewState::default(), &mut map).unwrap();

    assert!(!overlay::has_route(&map));
    assert!(!map.has_source(overlay::ROUTE_SOURCE));
    assert_eq!(map.style(), MapStyle::Streets);
    assert_eq!(map.style_swaps(), 0);
    assert_eq!(map.markers().len(), 1);
    assert!(map.has_layer(overlay::MASK_LAYER));
}

#[test]
fn redrawing_route_replaces_previous() {
    let (_, mut map) = mounted(&[]);
    overlay::draw_route(&mut map, &route()).unwrap();
    let mut shorter = route();
    shorter.geometry.pop();
    overlay::draw_route(&mut map, &shorter).unwrap();

    assert_eq!(map.layer_ids().len(), 4);
    assert_eq!(
        route_geometry(&map),
        Some(Geometry::LineString(shorter.geometry))
    );
}
