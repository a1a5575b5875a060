use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

/// Travel time in seconds, as reported by the directions service.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Duration(f64);

impl From<f64> for Duration {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, value| acc + value)
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let minutes = self.as_minutes();
        if minutes < 60 {
            write!(f, "{minutes} min")
        } else {
            write!(f, "{}h {}min", minutes / 60, minutes % 60)
        }
    }
}

impl Duration {
    pub const fn from_seconds(secs: f64) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> f64 {
        self.0
    }

    /// Rounded to the nearest whole minute.
    pub fn as_minutes(&self) -> u64 {
        (self.0.max(0.0) / 60.0).round() as u64
    }
}

#[test]
fn duration_display_minutes() {
    assert_eq!(Duration::from_seconds(300.0).to_string(), "5 min");
    assert_eq!(Duration::from_seconds(29.0).to_string(), "0 min");
}

#[test]
fn duration_display_hours() {
    assert_eq!(Duration::from_seconds(5400.0).to_string(), "1h 30min");
    assert_eq!(Duration::from_seconds(3600.0).to_string(), "1h 0min");
}
