use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Seconds in a Julian year (365.25 days)
pub const SECONDS_PER_YEAR: f64 = 31_557_600.0;

/// Years in a gigayear
const GYR_TO_YEARS: f64 = 1.0e9;

/// An age or duration using f64 precision.
///
/// Years are the base unit. Cooling grids tabulate their age axis in Gyr and
/// hosts usually integrate in seconds, so both conversions are provided.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// let age = Time::from_gyr(1.5);
/// assert!((age.to_years() - 1.5e9).abs() < 1e-3);
///
/// let step = Time::from_years(1.0e6);
/// assert!((step.to_gyr() - 1.0e-3).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: Years

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in years.
    pub fn from_years(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Time` from a value in gigayears.
    pub fn from_gyr(value: f64) -> Self {
        Self(value * GYR_TO_YEARS)
    }

    /// Creates a new `Time` from a value in seconds.
    pub fn from_seconds(value: f64) -> Self {
        Self(value / SECONDS_PER_YEAR)
    }

    /// Returns the time in years.
    pub fn to_years(&self) -> f64 {
        self.0
    }

    /// Returns the time in gigayears, the unit of the cooling-grid age axis.
    pub fn to_gyr(&self) -> f64 {
        self.0 / GYR_TO_YEARS
    }

    /// Returns the time in seconds.
    pub fn to_seconds(&self) -> f64 {
        self.0 * SECONDS_PER_YEAR
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

/// Allow f64 * Time (commutative multiplication)
impl Mul<Time> for f64 {
    type Output = Time;

    fn mul(self, rhs: Time) -> Time {
        rhs * self
    }
}
