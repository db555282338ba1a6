use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Mass of the Sun in kilograms (IAU nominal GM☉ / G)
pub const SOLAR_MASS_KG: f64 = 1.988416e30;

/// A stellar mass using f64 precision.
///
/// Solar masses are the base unit: every evolutionary grid in this workspace
/// tabulates its mass axis in M☉, so the conversion to grid coordinates is the
/// identity. SI kilograms are available for hosts that keep their state in SI.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let remnant = Mass::from_solar_masses(0.6);
/// let same = Mass::from_kg(0.6 * units::SOLAR_MASS_KG);
///
/// assert!((remnant.to_solar_masses() - same.to_solar_masses()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: Solar Masses

impl Mass {
    /// Creates a new `Mass` from a value in solar masses.
    ///
    /// # Arguments
    ///
    /// * `value` - The mass in solar masses
    pub fn from_solar_masses(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Mass` from a value in kilograms.
    ///
    /// # Arguments
    ///
    /// * `value` - The mass in kilograms
    ///
    /// # Examples
    ///
    /// ```rust
    /// use units::{Mass, SOLAR_MASS_KG};
    ///
    /// let sun = Mass::from_kg(SOLAR_MASS_KG);
    /// assert!((sun.to_solar_masses() - 1.0).abs() < 1e-12);
    /// ```
    pub fn from_kg(value: f64) -> Self {
        Self(value / SOLAR_MASS_KG)
    }

    /// Returns the mass in solar masses.
    pub fn to_solar_masses(&self) -> f64 {
        self.0
    }

    /// Returns the mass in kilograms.
    pub fn to_kg(&self) -> f64 {
        self.0 * SOLAR_MASS_KG
    }

    /// True when the mass is finite and strictly positive.
    pub fn is_physical(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

impl Div<f64> for Mass {
    type Output = Mass;

    fn div(self, rhs: f64) -> Mass {
        Mass(self.0 / rhs)
    }
}

/// Ratio of two masses (dimensionless)
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}
