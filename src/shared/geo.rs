use std::{
    cmp,
    fmt::Display,
    iter::Sum,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Distance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Distance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Self::from_meters(value)
    }
}

impl Display for Distance {
    /// Short display form: whole meters below one kilometer, one decimal above.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 < 1000.0 {
            write!(f, "{}m", self.0.round())
        } else {
            write!(f, "{:.1}km", self.as_kilometers())
        }
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

/// Averages the coordinates, useful for a rough centroid.
impl Sum for Coordinate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut count: usize = 0;
        let mut lat: f64 = 0.0;
        let mut lon: f64 = 0.0;
        iter.for_each(|coordinate| {
            count += 1;
            lat += coordinate.latitude;
            lon += coordinate.longitude;
        });
        if count == 0 {
            return Self::default();
        }
        let count = count as f64;
        Self {
            latitude: lat / count,
            longitude: lon / count,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Map widgets and the directions service order pairs as `[lng, lat]`.
    pub const fn from_lng_lat([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub const fn to_lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Great-circle distance.
    pub fn haversine_distance(&self, coord: &Self) -> Distance {
        let dist_lat = f64::to_radians(coord.latitude - self.latitude);
        let dist_lon = f64::to_radians(coord.longitude - self.longitude);
        let a = f64::powi(f64::sin(dist_lat / 2.0), 2)
            + f64::cos(f64::to_radians(self.latitude))
                * f64::cos(f64::to_radians(coord.latitude))
                * f64::powi(f64::sin(dist_lon / 2.0), 2);
        let c = 2.0 * f64::atan2(f64::sqrt(a), f64::sqrt(1.0 - a));
        Distance::from_kilometers(EARTH_RADIUS_KM * c)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Axis aligned envelope in `[west, south, east, north]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.west..=self.east).contains(&coordinate.longitude)
            && (self.south..=self.north).contains(&coordinate.latitude)
    }

    /// Pulls a coordinate onto the nearest point inside the envelope.
    pub fn clamp(&self, coordinate: &Coordinate) -> Coordinate {
        Coordinate {
            latitude: coordinate.latitude.clamp(self.south, self.north),
            longitude: coordinate.longitude.clamp(self.west, self.east),
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            latitude: (self.south + self.north) / 2.0,
            longitude: (self.west + self.east) / 2.0,
        }
    }

    pub const fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}

/// A closed ring of coordinates. The last point repeats the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    ring: Vec<Coordinate>,
}

impl Polygon {
    pub fn new(points: impl IntoIterator<Item = Coordinate>) -> Self {
        let mut ring: Vec<Coordinate> = points.into_iter().collect();
        match (ring.first().copied(), ring.last().copied()) {
            (Some(first), Some(last)) if first != last => ring.push(first),
            _ => {}
        }
        Self { ring }
    }

    pub fn ring(&self) -> &[Coordinate] {
        &self.ring
    }

    pub fn is_empty(&self) -> bool {
        self.ring.len() < 4
    }

    /// Ray casting point-in-polygon test.
    pub fn contains(&self, point: &Coordinate) -> bool {
        if self.is_empty() {
            return false;
        }
        let mut inside = false;
        for edge in self.ring.windows(2) {
            let (a, b) = (edge[0], edge[1]);
            let crosses = (a.latitude > point.latitude) != (b.latitude > point.latitude);
            if crosses {
                let lon_at = a.longitude
                    + (point.latitude - a.latitude) / (b.latitude - a.latitude)
                        * (b.longitude - a.longitude);
                if point.longitude < lon_at {
                    inside = !inside;
                }
            }
        }
        inside
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.ring.first()?;
        let init = Bounds::new(
            first.longitude,
            first.latitude,
            first.longitude,
            first.latitude,
        );
        Some(self.ring.iter().fold(init, |acc, c| Bounds {
            west: acc.west.min(c.longitude),
            south: acc.south.min(c.latitude),
            east: acc.east.max(c.longitude),
            north: acc.north.max(c.latitude),
        }))
    }

    pub fn to_lng_lat(&self) -> Vec<[f64; 2]> {
        self.ring.iter().map(Coordinate::to_lng_lat).collect()
    }
}

#[test]
fn distance_test() {
    let coord_a = Coordinate::new(48.85800943005911, 2.3514350059357927);
    let coord_b = Coordinate::new(51.5052389927712, -0.12495407345099824);
    let d = coord_a.haversine_distance(&coord_b);
    assert!((d.as_kilometers() - 343.5).abs() < 5.0);
}

#[test]
fn distance_eq_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(1.0);
    assert_eq!(dist_a, dist_b)
}

#[test]
fn distance_display_test() {
    assert_eq!(Distance::from_meters(499.6).to_string(), "500m");
    assert_eq!(Distance::from_meters(1240.0).to_string(), "1.2km");
}

#[test]
fn bounds_clamp_test() {
    let bounds = Bounds::new(27.0855, -26.6995, 27.0963, -26.6770);
    let outside = Coordinate::new(-26.60, 27.20);
    let clamped = bounds.clamp(&outside);
    assert_eq!(clamped, Coordinate::new(-26.6770, 27.0963));
    assert!(bounds.contains(&clamped));
}

#[test]
fn polygon_contains_test() {
    let square = Polygon::new([
        Coordinate::new(0.0, 0.0),
        Coordinate::new(0.0, 1.0),
        Coordinate::new(1.0, 1.0),
        Coordinate::new(1.0, 0.0),
    ]);
    assert_eq!(square.ring().len(), 5);
    assert!(square.contains(&Coordinate::new(0.5, 0.5)));
    assert!(!square.contains(&Coordinate::new(1.5, 0.5)));
}
