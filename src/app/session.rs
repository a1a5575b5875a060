use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    app::{Alert, Shell},
    config::CampusConfig,
    directions::DirectionsClient,
    map::{self, MapHandle, MapView},
    net::Fetcher,
    repository::Location,
    shared::Coordinate,
};

/// Why the device position could not be read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Position unavailable")]
    Unavailable,
    #[error("Timed out")]
    Timeout,
}

/// The app screen: shell state, the map it drives and the directions client.
///
/// Every handler updates the shell first and then reconciles the map with the
/// resulting view state.
pub struct Session<M, F> {
    shell: Shell,
    view: MapView,
    map: M,
    directions: DirectionsClient<F>,
    origin: Coordinate,
}

impl<M: MapHandle, F: Fetcher> Session<M, F> {
    /// Mounts `map` with one marker per location. Build the map from
    /// [`MapView::options`] so it starts on the campus.
    pub fn mount(
        campus: CampusConfig,
        shell: Shell,
        mut map: M,
        directions: DirectionsClient<F>,
        locations: &[Location],
    ) -> Result<Self, map::Error> {
        let origin = campus.origin;
        let mut view = MapView::new(campus);
        view.mount(shell.view_state(), locations, &mut map)?;
        Ok(Self {
            shell,
            view,
            map,
            directions,
            origin,
        })
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Direct access for widget callbacks such as finishing a style load.
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Directions start here until live positioning is wired in.
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn select_location(&mut self, location: Location) -> Result<(), map::Error> {
        self.shell.select_location(location);
        self.sync()
    }

    pub fn close_sheet(&mut self) -> Result<(), map::Error> {
        self.shell.close_sheet();
        self.sync()
    }

    pub fn toggle_dark_mode(&mut self) -> Result<(), map::Error> {
        self.shell.toggle_dark_mode();
        self.sync()
    }

    pub fn clear_route(&mut self) -> Result<(), map::Error> {
        self.shell.clear_route();
        self.sync()
    }

    /// Fetches a walking route to the selected location and draws it.
    /// Failures end up as an [`Alert`] rather than an error.
    pub async fn request_directions(&mut self) -> Result<(), map::Error> {
        let Some(request) = self.shell.begin_directions() else {
            return Ok(());
        };
        let result = self
            .directions
            .walking_route(&self.origin, &request.coordinate)
            .await;
        if let Err(err) = &result {
            warn!("Directions to {} failed: {err}", request.destination);
        }
        self.shell.finish_directions(&request, result);
        self.sync()
    }

    /// Call once the widget reports the current style as loaded.
    pub fn on_style_load(&mut self) -> Result<(), map::Error> {
        self.view.on_style_load(&mut self.map)
    }

    /// Flies to the reported position, kept inside the campus bounds.
    pub fn locate_me(&mut self, position: Result<Coordinate, GeolocationError>) {
        match position {
            Ok(coordinate) => {
                let campus = self.view.campus();
                let target = campus.bounds.clamp(&coordinate);
                debug!("Locating user at {target}");
                self.map.fly_to(target, campus.focus_zoom);
            }
            Err(err) => self.shell.raise(Alert::LocationUnavailable(err.to_string())),
        }
    }

    fn sync(&mut self) -> Result<(), map::Error> {
        self.view.reconcile(self.shell.view_state(), &mut self.map)
    }
}
