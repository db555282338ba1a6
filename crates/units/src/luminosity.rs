use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Nominal solar luminosity in watts
pub const SOLAR_LUMINOSITY_W: f64 = 3.846e26;

/// A radiated power using f64 precision.
///
/// Watts are the base unit. Cooling grids tabulate log₁₀(L / L☉) and output
/// logs traditionally report L☉, so both scales are first-class.
///
/// # Examples
///
/// ```rust
/// use units::{Luminosity, SOLAR_LUMINOSITY_W};
///
/// let faint = Luminosity::from_log10_solar(-3.0);
/// assert!((faint.to_watts() - 1.0e-3 * SOLAR_LUMINOSITY_W).abs() < 1e18);
/// assert!((faint.to_solar_luminosities() - 1.0e-3).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Luminosity(f64); // Base unit: Watts

impl Luminosity {
    /// Creates a zero luminosity
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Luminosity` from a value in watts.
    pub fn from_watts(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Luminosity` from a value in solar luminosities.
    pub fn from_solar_luminosities(value: f64) -> Self {
        Self(value * SOLAR_LUMINOSITY_W)
    }

    /// Creates a new `Luminosity` from log₁₀(L / L☉).
    ///
    /// # Arguments
    ///
    /// * `value` - log₁₀ of the luminosity in solar units
    pub fn from_log10_solar(value: f64) -> Self {
        Self::from_solar_luminosities(10f64.powf(value))
    }

    /// Returns the luminosity in watts.
    pub fn to_watts(&self) -> f64 {
        self.0
    }

    /// Returns the luminosity in solar luminosities.
    pub fn to_solar_luminosities(&self) -> f64 {
        self.0 / SOLAR_LUMINOSITY_W
    }
}

impl Add for Luminosity {
    type Output = Luminosity;

    fn add(self, rhs: Luminosity) -> Luminosity {
        Luminosity(self.0 + rhs.0)
    }
}

/// Scale by a dimensionless fraction (for example a band fraction)
impl Mul<f64> for Luminosity {
    type Output = Luminosity;

    fn mul(self, rhs: f64) -> Luminosity {
        Luminosity(self.0 * rhs)
    }
}
