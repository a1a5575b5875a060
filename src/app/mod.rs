mod navigator;
mod session;

pub use navigator::*;
pub use session::*;

use std::{fmt::Display, sync::Arc};
use tracing::debug;

use crate::{
    directions::{self, Route},
    map::ViewState,
    repository::{Contact, Location},
    shared::Coordinate,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    Buildings,
    Contacts,
}

/// User facing notices raised by the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    DirectionsFailed(String),
    LocationUnavailable(String),
    NoDestination,
}

impl Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alert::DirectionsFailed(reason) => write!(f, "Failed to get directions: {reason}"),
            Alert::LocationUnavailable(reason) => {
                write!(f, "Unable to get your location: {reason}")
            }
            Alert::NoDestination => write!(f, "Select a destination first"),
        }
    }
}

/// A directions request in flight, tied to the location it was made for.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub destination: Arc<str>,
    pub coordinate: Coordinate,
}

/// UI state of the app screen.
///
/// A route only lives as long as the destination it was requested for:
/// closing the sheet or picking another location drops it. At most one of
/// the buildings and contacts menus is open.
#[derive(Debug, Clone, Default)]
pub struct Shell {
    tab: Tab,
    buildings_open: bool,
    contacts_open: bool,
    selected: Option<Location>,
    dark_mode: bool,
    route: Option<Route>,
    directions_pending: bool,
    alerts: Vec<Alert>,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn buildings_open(&self) -> bool {
        self.buildings_open
    }

    pub fn contacts_open(&self) -> bool {
        self.contacts_open
    }

    pub fn selected(&self) -> Option<&Location> {
        self.selected.as_ref()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn directions_pending(&self) -> bool {
        self.directions_pending
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    pub fn raise(&mut self, alert: Alert) {
        debug!("Alert: {alert}");
        self.alerts.push(alert);
    }

    pub fn select_location(&mut self, location: Location) {
        let changed = self.selected.as_ref().map(|l| &l.id) != Some(&location.id);
        if changed {
            self.route = None;
            self.directions_pending = false;
        }
        self.selected = Some(location);
    }

    pub fn close_sheet(&mut self) {
        self.selected = None;
        self.route = None;
        self.directions_pending = false;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn open_buildings(&mut self) {
        self.tab = Tab::Buildings;
        self.contacts_open = false;
        self.buildings_open = true;
    }

    pub fn open_contacts(&mut self) {
        self.tab = Tab::Contacts;
        self.buildings_open = false;
        self.contacts_open = true;
    }

    pub fn go_home(&mut self) {
        self.tab = Tab::Home;
        self.buildings_open = false;
        self.contacts_open = false;
    }

    /// Closing either menu also returns to the home tab.
    pub fn close_menus(&mut self) {
        self.go_home();
    }

    /// Marks a directions request as pending for the selected location,
    /// or raises [`Alert::NoDestination`] when nothing is selected.
    pub fn begin_directions(&mut self) -> Option<DirectionsRequest> {
        match &self.selected {
            Some(location) => {
                self.directions_pending = true;
                Some(DirectionsRequest {
                    destination: location.id.clone(),
                    coordinate: location.coordinate,
                })
            }
            None => {
                self.raise(Alert::NoDestination);
                None
            }
        }
    }

    /// Applies the outcome of `request`. Results for a location that is no
    /// longer selected are dropped. Requests to the same location are not
    /// cancelled, so the last result to arrive wins.
    pub fn finish_directions(
        &mut self,
        request: &DirectionsRequest,
        result: Result<Route, directions::Error>,
    ) {
        let current = self
            .selected
            .as_ref()
            .is_some_and(|l| l.id == request.destination);
        if !current {
            debug!("Dropping directions to {}", request.destination);
            return;
        }
        self.directions_pending = false;
        match result {
            Ok(route) => self.route = Some(route),
            Err(err) => self.raise(Alert::DirectionsFailed(err.to_string())),
        }
    }

    pub fn clear_route(&mut self) {
        self.route = None;
        self.directions_pending = false;
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            selected: self.selected.clone(),
            dark_mode: self.dark_mode,
            route: self.route.clone(),
        }
    }
}

/// Contacts menu content. Emergency lines are listed apart from the rest.
#[derive(Debug, Default, PartialEq)]
pub struct ContactDirectory<'a> {
    pub emergency: Vec<&'a Contact>,
    pub regular: Vec<&'a Contact>,
}

impl<'a> FromIterator<&'a Contact> for ContactDirectory<'a> {
    fn from_iter<T: IntoIterator<Item = &'a Contact>>(iter: T) -> Self {
        let (emergency, regular): (Vec<_>, Vec<_>) = iter.into_iter().partition(|c| c.emergency);
        Self { emergency, regular }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repository::LocationKind, shared::{Distance, Duration}};

    fn location(id: &str) -> Location {
        Location {
            index: 0,
            id: id.into(),
            name: id.into(),
            address: "".into(),
            coordinate: Coordinate::new(-26.688, 27.091),
            kind: LocationKind::Landmark,
        }
    }

    fn route() -> Route {
        Route {
            distance: Distance::from_meters(120.0),
            duration: Duration::from_seconds(90.0),
            steps: Vec::new(),
            geometry: vec![Coordinate::new(-26.6885, 27.0915)],
        }
    }

    #[test]
    fn menus_are_exclusive() {
        let mut shell = Shell::new();
        shell.open_buildings();
        shell.open_contacts();
        assert!(shell.contacts_open());
        assert!(!shell.buildings_open());
        assert_eq!(shell.tab(), Tab::Contacts);
        shell.close_menus();
        assert_eq!(shell.tab(), Tab::Home);
        assert!(!shell.contacts_open());
    }

    #[test]
    fn selecting_another_location_clears_route() {
        let mut shell = Shell::new();
        shell.select_location(location("a"));
        let request = shell.begin_directions().unwrap();
        shell.finish_directions(&request, Ok(route()));
        assert!(shell.route().is_some());

        shell.select_location(location("a"));
        assert!(shell.route().is_some());

        shell.select_location(location("b"));
        assert!(shell.route().is_none());
    }

    #[test]
    fn closing_sheet_clears_route() {
        let mut shell = Shell::new();
        shell.select_location(location("a"));
        let request = shell.begin_directions().unwrap();
        shell.finish_directions(&request, Ok(route()));
        shell.close_sheet();
        assert!(shell.selected().is_none());
        assert!(shell.route().is_none());
    }

    #[test]
    fn directions_without_destination_alerts() {
        let mut shell = Shell::new();
        assert_eq!(shell.begin_directions(), None);
        assert_eq!(shell.take_alerts(), vec![Alert::NoDestination]);
        assert!(shell.alerts().is_empty());
    }

    #[test]
    fn failed_directions_clear_pending() {
        let mut shell = Shell::new();
        shell.select_location(location("a"));
        let request = shell.begin_directions().unwrap();
        shell.finish_directions(&request, Err(directions::Error::NoRouteFound));
        assert!(!shell.directions_pending());
        assert!(matches!(shell.alerts(), [Alert::DirectionsFailed(_)]));
    }

    #[test]
    fn late_directions_for_previous_selection_are_dropped() {
        let mut shell = Shell::new();
        shell.select_location(location("a"));
        let request = shell.begin_directions().unwrap();
        shell.select_location(location("b"));
        shell.finish_directions(&request, Ok(route()));
        assert_eq!(shell.selected().map(|l| &*l.id), Some("b"));
        assert!(shell.route().is_none());

        shell.finish_directions(&request, Err(directions::Error::NoRouteFound));
        assert!(shell.alerts().is_empty());
    }

    #[test]
    fn last_directions_for_same_destination_win() {
        let mut shell = Shell::new();
        shell.select_location(location("a"));
        let first = shell.begin_directions().unwrap();
        let second = shell.begin_directions().unwrap();
        let mut later = route();
        later.distance = Distance::from_meters(300.0);
        shell.finish_directions(&second, Ok(route()));
        shell.finish_directions(&first, Ok(later.clone()));
        assert_eq!(shell.route(), Some(&later));
        assert!(!shell.directions_pending());
    }
}
