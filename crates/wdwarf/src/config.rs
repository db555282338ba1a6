//! Per-body configuration.
//!
//! Every field has a default, so a JSON document only needs to name what it
//! changes:
//!
//! ```json
//! { "name": "sirius_b", "mass_msun": 1.0, "age_yr": 1.2e8, "opacity": "cassisi" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use units::{Mass, Time};

use crate::error::WdwarfError;
use crate::interpolate::InterpolationOrder;
use crate::model::{Atmosphere, CoolingModel, MetallicityLevel, ModelKey, OpacityModel};
use crate::xuv::XuvConfig;

/// Settings for one white dwarf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteDwarfConfig {
    pub name: String,
    /// Mass (M☉), fixed for the run
    pub mass_msun: f64,
    /// Initial cooling age (yr)
    pub age_yr: f64,
    pub model: CoolingModel,
    pub opacity: OpacityModel,
    pub metallicity: MetallicityLevel,
    /// Helium envelope (DB) instead of hydrogen (DA)
    pub he_atmosphere: bool,
    /// Ask the host to stop once the body leaves the grid
    pub halt_at_grid_end: bool,
    /// Luminosity (L☉) to hold if the body starts outside the grid
    pub luminosity_lsun: Option<f64>,
    /// Effective temperature (K) to hold if the body starts outside the grid
    pub temperature_k: Option<f64>,
    /// `"linear"`/`"cubic"`, or the integer order `1`/`3`
    #[serde(deserialize_with = "deserialize_order")]
    pub order: InterpolationOrder,
    /// Report luminosities in L☉ instead of watts
    pub solar_units: bool,
    pub xuv: XuvConfig,
}

impl Default for WhiteDwarfConfig {
    fn default() -> Self {
        Self {
            name: "white_dwarf".to_string(),
            mass_msun: 0.6,
            age_yr: 1.0e8,
            model: CoolingModel::default(),
            opacity: OpacityModel::default(),
            metallicity: MetallicityLevel::default(),
            he_atmosphere: false,
            halt_at_grid_end: true,
            luminosity_lsun: None,
            temperature_k: None,
            order: InterpolationOrder::default(),
            solar_units: true,
            xuv: XuvConfig::default(),
        }
    }
}

impl WhiteDwarfConfig {
    pub fn from_json(json: &str) -> Result<Self, WdwarfError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WdwarfError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| WdwarfError::Io(path.to_path_buf(), e))?;
        Self::from_json(&json)
    }

    /// Checks values the type system does not.
    pub fn validate(&self) -> Result<(), WdwarfError> {
        if !self.mass().is_physical() {
            return Err(WdwarfError::InvalidConfig(format!(
                "mass of `{}` must be positive, got {}",
                self.name, self.mass_msun
            )));
        }
        if !(self.age_yr.is_finite() && self.age_yr >= 0.0) {
            return Err(WdwarfError::InvalidConfig(format!(
                "age of `{}` must be non-negative, got {}",
                self.name, self.age_yr
            )));
        }
        if let Some(l) = self.luminosity_lsun {
            if !(l.is_finite() && l >= 0.0) {
                return Err(WdwarfError::InvalidConfig(format!(
                    "luminosity of `{}` must be non-negative, got {}",
                    self.name, l
                )));
            }
        }
        if let Some(t) = self.temperature_k {
            if !(t.is_finite() && t > 0.0) {
                return Err(WdwarfError::InvalidConfig(format!(
                    "temperature of `{}` must be positive, got {}",
                    self.name, t
                )));
            }
        }
        if !(self.xuv.band_lo_hz >= 0.0 && self.xuv.band_lo_hz < self.xuv.band_hi_hz) {
            return Err(WdwarfError::InvalidConfig(format!(
                "XUV band [{}, {}] Hz is empty",
                self.xuv.band_lo_hz, self.xuv.band_hi_hz
            )));
        }
        Ok(())
    }

    pub fn atmosphere(&self) -> Atmosphere {
        Atmosphere::from_helium_flag(self.he_atmosphere)
    }

    pub fn key(&self) -> ModelKey {
        ModelKey::new(self.opacity, self.atmosphere(), self.metallicity)
    }

    pub fn mass(&self) -> Mass {
        Mass::from_solar_masses(self.mass_msun)
    }

    pub fn age(&self) -> Time {
        Time::from_years(self.age_yr)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrderOption {
    Integer(u8),
    Name(String),
}

fn deserialize_order<'de, D>(deserializer: D) -> Result<InterpolationOrder, D::Error>
where
    D: Deserializer<'de>,
{
    let order = match OrderOption::deserialize(deserializer)? {
        OrderOption::Integer(order) => InterpolationOrder::from_order(order)
            .ok_or_else(|| WdwarfError::UnknownOption("interpolation order", order.to_string())),
        OrderOption::Name(name) => {
            let lowered = name.trim().to_ascii_lowercase();
            match lowered.as_str() {
                "linear" => Ok(InterpolationOrder::Linear),
                "cubic" => Ok(InterpolationOrder::Cubic),
                _ => Err(WdwarfError::UnknownOption("interpolation order", name)),
            }
        }
    };
    order.map_err(serde::de::Error::custom)
}
