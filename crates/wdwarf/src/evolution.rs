//! Per-body cooling state and the derivative sources a host integrator calls.
//!
//! A [`WhiteDwarf`] starts out [`EvolutionMode::GridDriven`]: every update
//! interpolates luminosity and temperature from its resolved
//! [`CoolingTrack`]. The first time either quantity runs off the end of the
//! tabulated data the whole body switches to
//! [`EvolutionMode::FrozenConstant`] and holds its last values from then on.
//! Ages only move forward, so the switch is never undone.
//!
//! The tracked variables are assigned, not integrated: each [`Derivative`]
//! returns the new value of its variable rather than a rate.

use serde::{Deserialize, Serialize};

use units::{Luminosity, Mass, Temperature, Time};

use crate::config::WhiteDwarfConfig;
use crate::dispatch::{resolve, CoolingTrack};
use crate::error::WdwarfError;
use crate::grid::GridStore;
use crate::interpolate::InterpolationOrder;
use crate::model::{CoolingModel, ModelKey, Quantity};
use crate::xuv::{xuv_fraction_with, XuvConfig};

/// Where a body's luminosity and temperature come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvolutionMode {
    /// Interpolated from the cooling grids every update
    GridDriven,
    /// Held at the last values after leaving the grids
    FrozenConstant,
}

/// A variable a white dwarf contributes to the host's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Derivative {
    Luminosity,
    Temperature,
    /// XUV part of the luminosity, from the current temperature
    XuvLuminosity,
}

impl Derivative {
    /// Evaluation order within one update; XUV depends on the other two.
    pub const ALL: [Derivative; 3] = [
        Derivative::Luminosity,
        Derivative::Temperature,
        Derivative::XuvLuminosity,
    ];

    /// New value of the variable in SI units (W or K).
    ///
    /// Grid-driven quantities may switch `body` to
    /// [`EvolutionMode::FrozenConstant`]. Fatal lookup outcomes are returned
    /// as errors.
    pub fn evaluate(&self, body: &mut WhiteDwarf) -> Result<f64, WdwarfError> {
        match self {
            Derivative::Luminosity => body.evaluate_quantity(Quantity::Luminosity),
            Derivative::Temperature => body.evaluate_quantity(Quantity::Temperature),
            Derivative::XuvLuminosity => Ok(body.luminosity.to_watts()
                * xuv_fraction_with(body.temperature.to_kelvin(), &body.xuv)),
        }
    }
}

/// Named output descriptor a host registers for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
}

/// One output sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputValue {
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

pub const OUTPUT_LUMINOSITY: &str = "WDLuminosity";
pub const OUTPUT_TEMPERATURE: &str = "WDTemperature";
pub const OUTPUT_LXUV: &str = "WDLXUV";

/// A cooling white dwarf.
#[derive(Debug, Clone)]
pub struct WhiteDwarf {
    name: String,
    mass: Mass,
    age: Time,
    track: CoolingTrack,
    order: InterpolationOrder,
    mode: EvolutionMode,
    luminosity: Luminosity,
    temperature: Temperature,
    xuv_luminosity: Luminosity,
    left_grid_at: Option<Time>,
    halt_at_grid_end: bool,
    solar_units: bool,
    xuv: XuvConfig,
}

impl WhiteDwarf {
    /// Resolves the body's track and evaluates it at the initial age.
    ///
    /// Fails if the configuration is invalid, the model family has no grids,
    /// the initial mass or age lies below the tabulated range, or the body
    /// starts beyond the grids without a configured luminosity and
    /// temperature to hold.
    pub fn new(config: &WhiteDwarfConfig, store: &GridStore) -> Result<Self, WdwarfError> {
        config.validate()?;
        let track = match config.model {
            CoolingModel::Basti22 => resolve(store, &config.key())?,
        };
        let mass = config.mass();
        let age = config.age();

        let mut initial = [None, None];
        let mut left_grid = false;
        for (slot, quantity) in initial
            .iter_mut()
            .zip([Quantity::Luminosity, Quantity::Temperature])
        {
            let outcome = track.evaluate(quantity, mass, age, config.order);
            if outcome.is_usable() {
                *slot = Some(outcome.value);
            } else if let Some(err) =
                outcome
                    .status
                    .into_fatal(quantity, track.key(), mass, age, config.order.as_u8())
            {
                return Err(err);
            } else {
                left_grid = true;
            }
        }

        let [grid_luminosity, grid_temperature] = initial;
        if grid_luminosity.is_some() && config.luminosity_lsun.is_some() {
            log::info!(
                "`{}`: configured luminosity replaced by the {} cooling grid",
                config.name,
                track.key()
            );
        }
        if grid_temperature.is_some() && config.temperature_k.is_some() {
            log::info!(
                "`{}`: configured temperature replaced by the {} cooling grid",
                config.name,
                track.key()
            );
        }

        let luminosity = match (grid_luminosity, config.luminosity_lsun) {
            (Some(watts), _) => Luminosity::from_watts(watts),
            (None, Some(lsun)) => Luminosity::from_solar_luminosities(lsun),
            (None, None) => {
                return Err(WdwarfError::NoFrozenValue(
                    config.name.clone(),
                    Quantity::Luminosity,
                ))
            }
        };
        let temperature = match (grid_temperature, config.temperature_k) {
            (Some(kelvin), _) => Temperature::from_kelvin(kelvin),
            (None, Some(kelvin)) => Temperature::from_kelvin(kelvin),
            (None, None) => {
                return Err(WdwarfError::NoFrozenValue(
                    config.name.clone(),
                    Quantity::Temperature,
                ))
            }
        };

        let mut body = Self {
            name: config.name.clone(),
            mass,
            age,
            track,
            order: config.order,
            mode: EvolutionMode::GridDriven,
            luminosity,
            temperature,
            xuv_luminosity: Luminosity::zero(),
            left_grid_at: None,
            halt_at_grid_end: config.halt_at_grid_end,
            solar_units: config.solar_units,
            xuv: config.xuv,
        };
        if left_grid {
            body.freeze(if grid_luminosity.is_none() {
                Quantity::Luminosity
            } else {
                Quantity::Temperature
            });
        }
        body.xuv_luminosity = Luminosity::from_watts(Derivative::XuvLuminosity.evaluate(&mut body)?);

        log::info!(
            "`{}`: {} M☉ at {:.4e} yr on {}, L = {:.4e} L☉, T = {:.1} K",
            body.name,
            body.mass.to_solar_masses(),
            body.age.to_years(),
            body.track.key(),
            body.luminosity.to_solar_luminosities(),
            body.temperature.to_kelvin()
        );
        Ok(body)
    }

    fn evaluate_quantity(&mut self, quantity: Quantity) -> Result<f64, WdwarfError> {
        if self.mode == EvolutionMode::GridDriven {
            let outcome = self.track.evaluate(quantity, self.mass, self.age, self.order);
            if outcome.is_usable() {
                return Ok(outcome.value);
            }
            if let Some(err) = outcome.status.into_fatal(
                quantity,
                self.track.key(),
                self.mass,
                self.age,
                self.order.as_u8(),
            ) {
                return Err(err);
            }
            self.freeze(quantity);
        }
        Ok(match quantity {
            Quantity::Luminosity => self.luminosity.to_watts(),
            Quantity::Temperature => self.temperature.to_kelvin(),
        })
    }

    fn freeze(&mut self, quantity: Quantity) {
        self.mode = EvolutionMode::FrozenConstant;
        self.left_grid_at = Some(self.age);
        log::warn!(
            "`{}` left the {} {} grid at {:.4e} yr; holding L = {:.4e} L☉, T = {:.1} K",
            self.name,
            self.track.key(),
            quantity,
            self.age.to_years(),
            self.luminosity.to_solar_luminosities(),
            self.temperature.to_kelvin()
        );
        if self.halt_at_grid_end {
            log::info!(
                "`{}` requests a halt at {:.4e} yr: end of cooling grid",
                self.name,
                self.age.to_years()
            );
        }
    }

    /// Advances the body to `age` and re-evaluates every derivative source.
    pub fn update(&mut self, age: Time) -> Result<(), WdwarfError> {
        if age < self.age {
            return Err(WdwarfError::AgeDecreased {
                name: self.name.clone(),
                from_yr: self.age.to_years(),
                to_yr: age.to_years(),
            });
        }
        self.age = age;

        for derivative in self.derivatives() {
            let value = derivative.evaluate(self)?;
            match derivative {
                Derivative::Luminosity => self.luminosity = Luminosity::from_watts(value),
                Derivative::Temperature => self.temperature = Temperature::from_kelvin(value),
                Derivative::XuvLuminosity => self.xuv_luminosity = Luminosity::from_watts(value),
            }
        }

        log::trace!(
            "`{}` t = {:.4e} yr: L = {:.4e} W, T = {:.1} K, L_XUV = {:.4e} W",
            self.name,
            self.age.to_years(),
            self.luminosity.to_watts(),
            self.temperature.to_kelvin(),
            self.xuv_luminosity.to_watts()
        );
        Ok(())
    }

    /// Variables this body contributes, in evaluation order.
    pub fn derivatives(&self) -> Vec<Derivative> {
        Derivative::ALL.to_vec()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &ModelKey {
        self.track.key()
    }

    pub fn mass(&self) -> Mass {
        self.mass
    }

    pub fn age(&self) -> Time {
        self.age
    }

    pub fn mode(&self) -> EvolutionMode {
        self.mode
    }

    pub fn luminosity(&self) -> Luminosity {
        self.luminosity
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn xuv_luminosity(&self) -> Luminosity {
        self.xuv_luminosity
    }

    /// Age at which the body left the grids, if it has.
    pub fn left_grid_at(&self) -> Option<Time> {
        self.left_grid_at
    }

    pub fn has_left_grid(&self) -> bool {
        self.mode == EvolutionMode::FrozenConstant
    }

    /// True once the body has left the grids and was configured to stop the
    /// run when that happens.
    pub fn should_halt(&self) -> bool {
        self.halt_at_grid_end && self.has_left_grid()
    }

    fn luminosity_unit(&self) -> &'static str {
        if self.solar_units {
            "LSUN"
        } else {
            "W"
        }
    }

    fn report_luminosity(&self, luminosity: Luminosity) -> f64 {
        if self.solar_units {
            luminosity.to_solar_luminosities()
        } else {
            luminosity.to_watts()
        }
    }

    pub fn output_descriptors(&self) -> Vec<OutputDescriptor> {
        vec![
            OutputDescriptor {
                name: OUTPUT_LUMINOSITY,
                description: "White dwarf luminosity",
                unit: self.luminosity_unit(),
            },
            OutputDescriptor {
                name: OUTPUT_TEMPERATURE,
                description: "White dwarf effective temperature",
                unit: "K",
            },
            OutputDescriptor {
                name: OUTPUT_LXUV,
                description: "White dwarf XUV luminosity",
                unit: self.luminosity_unit(),
            },
        ]
    }

    pub fn outputs(&self) -> [OutputValue; 3] {
        [
            OutputValue {
                name: OUTPUT_LUMINOSITY,
                value: self.report_luminosity(self.luminosity),
                unit: self.luminosity_unit(),
            },
            OutputValue {
                name: OUTPUT_TEMPERATURE,
                value: self.temperature.to_kelvin(),
                unit: "K",
            },
            OutputValue {
                name: OUTPUT_LXUV,
                value: self.report_luminosity(self.xuv_luminosity),
                unit: self.luminosity_unit(),
            },
        ]
    }
}
