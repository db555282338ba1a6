use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// Effective temperature of the Sun in Kelvin
pub const SOLAR_TEFF_K: f64 = 5778.0;

/// An effective temperature using f64 precision.
///
/// Kelvin is the base unit. Cooling grids store log₁₀(T_eff / K), so the
/// logarithmic constructor is the one used on the interpolation path.
///
/// # Examples
///
/// ```rust
/// use units::Temperature;
///
/// let teff = Temperature::from_log10_kelvin(4.0);
/// assert!((teff.to_kelvin() - 10_000.0).abs() < 1e-9);
/// assert!((teff.log10() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Temperature(f64); // Base unit: Kelvin

impl Temperature {
    /// Creates a new `Temperature` from a value in Kelvin.
    pub fn from_kelvin(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Temperature` from log₁₀ of a value in Kelvin.
    ///
    /// # Arguments
    ///
    /// * `value` - log₁₀(T / K), as tabulated by the cooling grids
    pub fn from_log10_kelvin(value: f64) -> Self {
        Self(10f64.powf(value))
    }

    /// Returns the temperature in Kelvin.
    pub fn to_kelvin(&self) -> f64 {
        self.0
    }

    /// Returns log₁₀(T / K).
    pub fn log10(&self) -> f64 {
        self.0.log10()
    }

    /// Temperature relative to the solar effective temperature.
    pub fn to_solar(&self) -> f64 {
        self.0 / SOLAR_TEFF_K
    }
}

impl Mul<f64> for Temperature {
    type Output = Temperature;

    fn mul(self, rhs: f64) -> Temperature {
        Temperature(self.0 * rhs)
    }
}

/// Ratio of two temperatures (dimensionless)
impl Div for Temperature {
    type Output = f64;

    fn div(self, rhs: Temperature) -> f64 {
        self.0 / rhs.0
    }
}
