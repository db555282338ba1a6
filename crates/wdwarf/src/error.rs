//! Error types for grid construction, configuration and fatal lookup outcomes.
//!
//! Recoverable interpolation outcomes (leaving the grid, hitting the end of a
//! truncated track) are not errors; they are reported through
//! [`Status`](crate::interpolate::Status) and absorbed by the evolution adapter.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{ModelKey, Quantity};

/// Errors that abort setup or a run.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WdwarfError {
    /// An axis is shorter than two nodes, contains a non-finite node, or is not
    /// strictly increasing.
    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    /// Table dimensions do not match the axes, or the mass axis does not match
    /// the catalog shape for the model.
    ///
    /// The first parameter describes what was checked, the second and third are
    /// the expected and actual lengths.
    #[error("Shape mismatch for {0}: expected {1}, got {2}")]
    ShapeMismatch(String, usize, usize),

    /// A grid was supplied for a model combination that has no tabulated family.
    #[error("No tabulated family for {0}")]
    UntabulatedModel(ModelKey),

    /// A second grid was supplied for a model and quantity already loaded.
    #[error("Duplicate {quantity} grid for {key}")]
    DuplicateGrid { quantity: Quantity, key: ModelKey },

    /// The requested combination has no grid in the store.
    #[error("No {quantity} grid available for {key}")]
    DataUnavailable { quantity: Quantity, key: ModelKey },

    /// Mass or age precedes the tabulated range.
    #[error("{quantity} out of bounds (low) for {key}: mass {mass_msun} Msun, age {age_gyr} Gyr")]
    OutOfBoundsLow {
        quantity: Quantity,
        key: ModelKey,
        mass_msun: f64,
        age_gyr: f64,
    },

    /// An unsupported interpolation order was requested.
    #[error("Bad {quantity} interpolation order {order}")]
    BadOrder { quantity: Quantity, order: u8 },

    /// The body left the grid before any value was computed and no constant was
    /// configured to freeze at.
    #[error("Body `{0}` left the grid before {1} was evaluated and no constant was configured")]
    NoFrozenValue(String, Quantity),

    /// The host asked a body to evolve backwards.
    #[error("Age of `{name}` decreased from {from_yr} yr to {to_yr} yr")]
    AgeDecreased { name: String, from_yr: f64, to_yr: f64 },

    /// Metallicity level outside `0..=5`.
    #[error("Unknown metallicity level {0}, must be 0-5")]
    InvalidMetallicity(u8),

    /// A string option did not match any known value.
    ///
    /// The first parameter is the option name, the second the rejected value.
    #[error("Unknown argument to {0}: `{1}`")]
    UnknownOption(&'static str, String),

    /// A configuration value is outside its physical range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read a configuration or grid file.
    #[error("Could not read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// Failed to parse a configuration or grid document.
    #[error("Could not parse document")]
    Json(#[from] serde_json::Error),
}
