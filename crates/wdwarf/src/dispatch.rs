//! Model selection: from a [`ModelKey`] and a physical query to a grid lookup.
//!
//! [`lookup`] goes through the store on every call. A body resolves its
//! [`CoolingTrack`] once at setup instead and keeps it for the run.

use std::sync::Arc;

use units::{Mass, Time, SOLAR_LUMINOSITY_W};

use crate::error::WdwarfError;
use crate::grid::{Grid, GridStore};
use crate::interpolate::{
    interpolate_at, interpolate_with_order, InterpolationOrder, InterpolationOutcome, Status,
};
use crate::model::{ModelKey, Quantity};

/// Converts a tabulated log₁₀ value to SI: watts for luminosity, kelvin for
/// temperature.
pub fn to_physical(quantity: Quantity, log_value: f64) -> f64 {
    match quantity {
        Quantity::Luminosity => SOLAR_LUMINOSITY_W * 10f64.powf(log_value),
        Quantity::Temperature => 10f64.powf(log_value),
    }
}

fn evaluate_grid(
    grid: &Grid,
    quantity: Quantity,
    mass: Mass,
    age: Time,
    order: InterpolationOrder,
) -> InterpolationOutcome {
    interpolate_at(grid, mass.to_solar_masses(), age.to_gyr(), order)
        .map(|v| to_physical(quantity, v))
}

/// Interpolates `quantity` for a body of `mass` at `age`.
///
/// The returned value is in SI units (W or K). A model/quantity pair with no
/// grid yields [`Status::DataUnavailable`].
pub fn lookup(
    store: &GridStore,
    quantity: Quantity,
    key: &ModelKey,
    mass: Mass,
    age: Time,
    order: InterpolationOrder,
) -> InterpolationOutcome {
    match store.get(key, quantity) {
        Some(grid) => evaluate_grid(grid, quantity, mass, age, order),
        None => InterpolationOutcome::failed(Status::DataUnavailable),
    }
}

/// [`lookup`] with an integer interpolation order.
pub fn lookup_with_order(
    store: &GridStore,
    quantity: Quantity,
    key: &ModelKey,
    mass: Mass,
    age: Time,
    order: u8,
) -> InterpolationOutcome {
    match store.get(key, quantity) {
        Some(grid) => interpolate_with_order(grid, mass.to_solar_masses(), age.to_gyr(), order)
            .map(|v| to_physical(quantity, v)),
        None => InterpolationOutcome::failed(Status::DataUnavailable),
    }
}

/// Both grids of one model family, resolved once.
#[derive(Debug, Clone)]
pub struct CoolingTrack {
    key: ModelKey,
    luminosity: Arc<Grid>,
    temperature: Arc<Grid>,
}

impl CoolingTrack {
    pub fn key(&self) -> &ModelKey {
        &self.key
    }

    pub fn grid(&self, quantity: Quantity) -> &Grid {
        match quantity {
            Quantity::Luminosity => &self.luminosity,
            Quantity::Temperature => &self.temperature,
        }
    }

    /// Same as [`lookup`] without going through the store.
    pub fn evaluate(
        &self,
        quantity: Quantity,
        mass: Mass,
        age: Time,
        order: InterpolationOrder,
    ) -> InterpolationOutcome {
        evaluate_grid(self.grid(quantity), quantity, mass, age, order)
    }
}

/// Resolves the luminosity and temperature grids for `key`.
pub fn resolve(store: &GridStore, key: &ModelKey) -> Result<CoolingTrack, WdwarfError> {
    let fetch = |quantity| {
        store
            .get(key, quantity)
            .cloned()
            .ok_or(WdwarfError::DataUnavailable {
                quantity,
                key: *key,
            })
    };
    Ok(CoolingTrack {
        key: *key,
        luminosity: fetch(Quantity::Luminosity)?,
        temperature: fetch(Quantity::Temperature)?,
    })
}

impl Status {
    /// Error for the statuses that must abort a run, `None` otherwise.
    ///
    /// Leaving the grid at the high end or hitting a missing value is a mode
    /// change handled by the caller, not an error.
    pub fn into_fatal(
        self,
        quantity: Quantity,
        key: &ModelKey,
        mass: Mass,
        age: Time,
        order: u8,
    ) -> Option<WdwarfError> {
        match self {
            Status::OutOfBoundsLow => Some(WdwarfError::OutOfBoundsLow {
                quantity,
                key: *key,
                mass_msun: mass.to_solar_masses(),
                age_gyr: age.to_gyr(),
            }),
            Status::BadOrder => Some(WdwarfError::BadOrder { quantity, order }),
            Status::DataUnavailable => Some(WdwarfError::DataUnavailable {
                quantity,
                key: *key,
            }),
            Status::Exact
            | Status::LinearFallback
            | Status::OutOfBoundsHigh
            | Status::NonFinite => None,
        }
    }
}
