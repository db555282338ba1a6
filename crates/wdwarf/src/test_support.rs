//! Synthetic cooling grids shared by the unit tests.

use std::sync::Arc;

use ndarray::Array2;

use crate::axis::Axis;
use crate::grid::{Grid, GridStore};
use crate::model::{MassNodes, ModelKey, Quantity};

/// Short age axis (Gyr)
pub(crate) const AGES_GYR: [f64; 8] = [0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0];

/// log₁₀(L/L☉) as a function of mass and age index
pub(crate) fn log_luminosity(i: f64, j: f64) -> f64 {
    -1.0 - 0.4 * j - 0.05 * i + 0.002 * i * j
}

/// log₁₀(T/K) as a function of mass and age index
pub(crate) fn log_temperature(i: f64, j: f64) -> f64 {
    4.6 - 0.08 * j + 0.01 * i
}

/// Table of `f(i, j)` with every column from `truncate_from` on set to `NaN`.
pub(crate) fn table(
    rows: usize,
    cols: usize,
    truncate_from: Option<usize>,
    f: impl Fn(f64, f64) -> f64,
) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| match truncate_from {
        Some(end) if j >= end => f64::NAN,
        _ => f(i as f64, j as f64),
    })
}

pub(crate) fn grid(shape: MassNodes, quantity: Quantity, truncate_from: Option<usize>) -> Grid {
    let masses = Axis::for_masses(shape);
    let ages = Axis::new(AGES_GYR.to_vec()).unwrap();
    let f = match quantity {
        Quantity::Luminosity => log_luminosity,
        Quantity::Temperature => log_temperature,
    };
    let values = table(masses.len(), ages.len(), truncate_from, f);
    Grid::new(masses, ages, values).unwrap()
}

/// Store holding both quantities for `key`.
pub(crate) fn store(key: ModelKey, truncate_from: Option<usize>) -> Arc<GridStore> {
    let shape = key.mass_nodes().unwrap();
    let mut builder = GridStore::builder();
    for quantity in [Quantity::Luminosity, Quantity::Temperature] {
        builder
            .insert(key, quantity, grid(shape, quantity, truncate_from))
            .unwrap();
    }
    builder.build()
}
