use tracing::debug;

use crate::{
    config::CampusConfig,
    directions::Route,
    map::{self, MapHandle, MapOptions, MapStyle, Marker, overlay},
    repository::Location,
    shared::Bounds,
};

/// What the surrounding UI wants the map to show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub selected: Option<Location>,
    pub dark_mode: bool,
    pub route: Option<Route>,
}

/// Keeps a [`MapHandle`] in step with a [`ViewState`].
///
/// Holds the last applied state and, on every `reconcile`, issues only the
/// calls needed for the fields that changed. Overlays are owned by the style,
/// so whenever a style finishes loading the campus overlays and the applied
/// route are drawn again through [`MapView::on_style_load`].
#[derive(Debug, Clone)]
pub struct MapView {
    campus: CampusConfig,
    applied: ViewState,
}

impl MapView {
    pub fn new(campus: CampusConfig) -> Self {
        Self {
            campus,
            applied: ViewState::default(),
        }
    }

    pub fn campus(&self) -> &CampusConfig {
        &self.campus
    }

    pub fn applied(&self) -> &ViewState {
        &self.applied
    }

    pub fn options(&self, dark_mode: bool) -> MapOptions {
        MapOptions {
            style: MapStyle::for_dark_mode(dark_mode),
            center: self.campus.center,
            zoom: self.campus.default_zoom,
            min_zoom: self.campus.min_zoom,
            max_zoom: self.campus.max_zoom,
            max_bounds: self.campus.bounds,
        }
    }

    /// Places one marker per location and applies `state` from scratch.
    pub fn mount<'a, M: MapHandle>(
        &mut self,
        state: ViewState,
        locations: impl IntoIterator<Item = &'a Location>,
        map: &mut M,
    ) -> Result<(), map::Error> {
        map.set_markers(locations.into_iter().map(Marker::from).collect());
        let target = MapStyle::for_dark_mode(state.dark_mode);
        if map.style() != target {
            map.set_style(target);
        }
        if let Some(location) = &state.selected {
            map.pan_to(self.campus.bounds.clamp(&location.coordinate));
        }
        self.applied = state;
        self.on_style_load(map)
    }

    pub fn reconcile<M: MapHandle>(&mut self, next: ViewState, map: &mut M) -> Result<(), map::Error> {
        if next == self.applied {
            return Ok(());
        }
        reconcile_style(&self.applied, &next, map);
        reconcile_selection(&self.applied, &next, &self.campus.bounds, map);
        reconcile_route(&self.applied, &next, map)?;
        self.applied = next;
        Ok(())
    }

    /// Replays mask, boundary and the applied route, in that order.
    /// Does nothing while the style is still loading.
    pub fn on_style_load<M: MapHandle>(&mut self, map: &mut M) -> Result<(), map::Error> {
        if !map.is_style_loaded() {
            return Ok(());
        }
        overlay::draw_campus(map, &self.campus.boundary, self.applied.dark_mode)?;
        if let Some(route) = &self.applied.route {
            overlay::draw_route(map, route)?;
        }
        debug!("Replayed overlays on {}", map.style().url());
        Ok(())
    }
}

/// Swaps the tile style when dark mode flips.
pub fn reconcile_style<M: MapHandle>(prev: &ViewState, next: &ViewState, map: &mut M) {
    let target = MapStyle::for_dark_mode(next.dark_mode);
    if prev.dark_mode != next.dark_mode && map.style() != target {
        map.set_style(target);
    }
}

/// Pans, without zooming, to a newly selected location.
pub fn reconcile_selection<M: MapHandle>(
    prev: &ViewState,
    next: &ViewState,
    bounds: &Bounds,
    map: &mut M,
) {
    let Some(location) = &next.selected else {
        return;
    };
    if prev.selected.as_ref().map(|l| &l.id) != Some(&location.id) {
        map.pan_to(bounds.clamp(&location.coordinate));
    }
}

/// Draws or clears the route overlay. Skipped while a style is loading since
/// the replay after the load draws whatever route is applied by then.
pub fn reconcile_route<M: MapHandle>(
    prev: &ViewState,
    next: &ViewState,
    map: &mut M,
) -> Result<(), map::Error> {
    if prev.route == next.route || !map.is_style_loaded() {
        return Ok(());
    }
    match &next.route {
        Some(route) => overlay::draw_route(map, route),
        None => overlay::clear_route(map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        directions::Route,
        map::MemoryMap,
        shared::{Coordinate, Distance, Duration},
    };

    fn route() -> Route {
        Route {
            distance: Distance::from_meters(500.0),
            duration: Duration::from_seconds(300.0),
            steps: Vec::new(),
            geometry: vec![
                Coordinate::new(-26.6885, 27.0915),
                Coordinate::new(-26.6880, 27.0920),
            ],
        }
    }

    fn mounted() -> (MapView, MemoryMap) {
        let mut view = MapView::new(CampusConfig::default());
        let mut map = MemoryMap::new(view.options(false));
        map.finish_style_load();
        let locations: Vec<Location> = Vec::new();
        view.mount(ViewState::default(), &locations, &mut map).unwrap();
        (view, map)
    }

    #[test]
    fn mount_draws_mask_below_boundary() {
        let (_, map) = mounted();
        assert_eq!(
            map.layer_ids(),
            vec![overlay::MASK_LAYER, overlay::BOUNDARY_LAYER]
        );
    }

    #[test]
    fn route_goes_on_top() {
        let (mut view, mut map) = mounted();
        let next = ViewState {
            route: Some(route()),
            ..view.applied().clone()
        };
        view.reconcile(next, &mut map).unwrap();
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
    fn reconcile_same_state_is_noop() {
        let (mut view, mut map) = mounted();
        let same = view.applied().clone();
        view.reconcile(same, &mut map).unwrap();
        assert_eq!(map.style_swaps(), 0);
    }
}
