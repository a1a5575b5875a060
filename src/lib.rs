pub mod app;
pub mod config;
pub mod directions;
pub mod map;
pub mod net;
pub mod offline;
pub mod repository;
pub mod shared;

pub mod prelude {
    pub use crate::app::{Alert, Navigator, Session, Shell, Tab};
    pub use crate::config::Config;
    pub use crate::directions::{DirectionsClient, Route, RouteStep};
    pub use crate::map::{MapHandle, MapView, MemoryMap, ViewState};
    pub use crate::net::{Fetcher, HttpFetcher, Request, Response};
    pub use crate::offline::{OfflineCache, Registration, Strategy};
    pub use crate::repository::{
        Building, Contact, Location, LocationKind, Office, Repository,
        source::{Bundle, DataProvider, Fixtures, HttpProvider},
    };
    pub use crate::shared::{Bounds, Coordinate, Distance, Duration, Polygon};
}
