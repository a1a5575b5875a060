use reqwest::Url;
use thiserror::Error;

use crate::shared::{Bounds, Coordinate, Polygon};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid url in {name}: {reason}")]
    InvalidUrl { name: &'static str, reason: String },
    #[error("Invalid number in {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

pub const DEFAULT_PORT: u16 = 3000;
/// Limits for the server's outgoing cache unless the environment says otherwise.
pub const OUTGOING_MAX_ENTRIES: usize = 512;
pub const OUTGOING_MAX_AGE_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub campus: CampusConfig,
    pub cache: CacheConfig,
    pub directions: DirectionsConfig,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            campus: Default::default(),
            cache: Default::default(),
            directions: Default::default(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Defaults overridden by `MAPBOX_TOKEN`, `CAMPUSCOMPASS_ORIGIN`,
    /// `CAMPUSCOMPASS_CACHE_VERSION`, `CAMPUSCOMPASS_CACHE_MAX_ENTRIES`,
    /// `CAMPUSCOMPASS_CACHE_MAX_AGE` (seconds) and `PORT` when set.
    pub fn from_env() -> Result<Self, self::Error> {
        let mut config = Self::default();
        if let Ok(token) = std::env::var("MAPBOX_TOKEN") {
            config.directions.access_token = token;
        }
        if let Ok(origin) = std::env::var("CAMPUSCOMPASS_ORIGIN") {
            config.cache.origin = Url::parse(&origin).map_err(|err| Error::InvalidUrl {
                name: "CAMPUSCOMPASS_ORIGIN",
                reason: err.to_string(),
            })?;
        }
        if let Ok(version) = std::env::var("CAMPUSCOMPASS_CACHE_VERSION") {
            config.cache.version = version;
        }
        if let Ok(max_entries) = std::env::var("CAMPUSCOMPASS_CACHE_MAX_ENTRIES") {
            let max_entries = max_entries.parse().map_err(|_| Error::InvalidNumber {
                name: "CAMPUSCOMPASS_CACHE_MAX_ENTRIES",
                value: max_entries.clone(),
            })?;
            config.cache.max_entries = Some(max_entries);
        }
        if let Ok(max_age) = std::env::var("CAMPUSCOMPASS_CACHE_MAX_AGE") {
            let seconds = max_age.parse().map_err(|_| Error::InvalidNumber {
                name: "CAMPUSCOMPASS_CACHE_MAX_AGE",
                value: max_age.clone(),
            })?;
            config.cache.max_age = Some(chrono::Duration::seconds(seconds));
        }
        if let Ok(port) = std::env::var("PORT") {
            config.port = port.parse().map_err(|_| Error::InvalidNumber {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        Ok(config)
    }

    /// Cache settings for a server that only caches its outgoing calls:
    /// nothing to precache, and the dynamic cache is always bounded.
    pub fn outgoing_cache(&self) -> CacheConfig {
        let cache = self.cache.clone().with_precache(Vec::new());
        let max_entries = cache.max_entries.unwrap_or(OUTGOING_MAX_ENTRIES);
        let max_age = cache
            .max_age
            .unwrap_or_else(|| chrono::Duration::seconds(OUTGOING_MAX_AGE_SECS));
        cache.with_max_entries(max_entries).with_max_age(max_age)
    }
}

/// North West University, Potchefstroom.
#[derive(Debug, Clone)]
pub struct CampusConfig {
    pub name: String,
    pub center: Coordinate,
    pub default_zoom: f64,
    pub focus_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub boundary: Polygon,
    /// Tighter than the boundary envelope so the camera never shows the mask edge.
    pub bounds: Bounds,
    /// Mock origin used for directions until live positioning is wired in.
    pub origin: Coordinate,
}

const CAMPUS_BOUNDARY: [[f64; 2]; 17] = [
    [27.0930724, -26.6910479],
    [27.0948373, -26.691163],
    [27.0954488, -26.6842851],
    [27.0959745, -26.6810353],
    [27.0959745, -26.6803547],
    [27.0959531, -26.6797172],
    [27.0964788, -26.6775219],
    [27.0964627, -26.6768316],
    [27.0938127, -26.676822],
    [27.0929347, -26.6807396],
    [27.0925592, -26.6822159],
    [27.0853441, -26.6904551],
    [27.0895229, -26.6908097],
    [27.0861273, -26.6996857],
    [27.0887666, -26.6998726],
    [27.0892118, -26.6954251],
    [27.0926772, -26.695612],
];

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            name: "North West University".into(),
            center: Coordinate::new(-26.68825875, 27.09141145),
            default_zoom: 18.0,
            focus_zoom: 19.0,
            min_zoom: 16.0,
            max_zoom: 20.0,
            boundary: Polygon::new(CAMPUS_BOUNDARY.into_iter().map(Coordinate::from_lng_lat)),
            bounds: Bounds::new(27.0855, -26.6995, 27.0963, -26.6770),
            origin: Coordinate::new(-26.6885, 27.0915),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub prefix: String,
    pub version: String,
    pub origin: Url,
    /// Path prefix owned by the installed app.
    pub app_prefix: String,
    /// Served to navigations when both network and cache miss.
    pub shell_path: String,
    pub precache: Vec<String>,
    pub network_first_patterns: Vec<String>,
    pub static_patterns: Vec<String>,
    pub max_entries: Option<usize>,
    pub max_age: Option<chrono::Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefix: "campuscompass".into(),
            version: "v1".into(),
            origin: Url::parse("http://localhost:3000").expect("static origin is valid"),
            app_prefix: "/app".into(),
            shell_path: "/app".into(),
            precache: vec!["/app".into(), "/manifest.json".into()],
            network_first_patterns: vec![r"api\.mapbox\.com".into(), r"^https://api\.".into()],
            static_patterns: vec![r"\.(?:js|css|woff2?|png|jpg|jpeg|svg)$".into()],
            max_entries: None,
            max_age: None,
        }
    }
}

impl CacheConfig {
    pub fn static_cache_name(&self) -> String {
        format!("{}-static-{}", self.prefix, self.version)
    }

    pub fn dynamic_cache_name(&self) -> String {
        format!("{}-dynamic-{}", self.prefix, self.version)
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_origin(mut self, origin: Url) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_precache(mut self, precache: Vec<String>) -> Self {
        self.precache = precache;
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    pub fn with_max_age(mut self, max_age: chrono::Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub access_token: String,
    pub language: String,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mapbox.com/directions/v5/mapbox/walking".into(),
            access_token: String::new(),
            language: "en".into(),
        }
    }
}

#[test]
fn cache_names_follow_version() {
    let cache = CacheConfig::default().with_version("v7");
    assert_eq!(cache.static_cache_name(), "campuscompass-static-v7");
    assert_eq!(cache.dynamic_cache_name(), "campuscompass-dynamic-v7");
}

#[test]
fn outgoing_cache_is_bounded() {
    let cache = Config::default().outgoing_cache();
    assert!(cache.precache.is_empty());
    assert_eq!(cache.max_entries, Some(OUTGOING_MAX_ENTRIES));
    assert_eq!(
        cache.max_age,
        Some(chrono::Duration::seconds(OUTGOING_MAX_AGE_SECS))
    );

    let mut config = Config::default();
    config.cache = config.cache.with_max_entries(8);
    assert_eq!(config.outgoing_cache().max_entries, Some(8));
}

#[test]
fn campus_center_is_inside_boundary() {
    let campus = CampusConfig::default();
    assert!(campus.boundary.contains(&campus.center));
    assert!(campus.bounds.contains(&campus.center));
}
