pub mod axis;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod evolution;
pub mod grid;
pub mod integrator;
pub mod interpolate;
pub mod model;
pub mod xuv;

#[cfg(test)]
mod axis_test;
#[cfg(test)]
mod evolution_test;
#[cfg(test)]
mod test_support;

pub use axis::{Axis, OutOfBounds};
pub use config::WhiteDwarfConfig;
pub use dispatch::{lookup, lookup_with_order, resolve, CoolingTrack};
pub use error::WdwarfError;
pub use evolution::{Derivative, EvolutionMode, OutputDescriptor, OutputValue, WhiteDwarf};
pub use grid::{Grid, GridFile, GridStore, GridStoreBuilder};
pub use integrator::{DirectUpdate, Integrator, SystemState};
pub use interpolate::{InterpolationOrder, InterpolationOutcome, Status};
pub use model::{
    Atmosphere, CoolingModel, MassNodes, MetallicityLevel, ModelKey, OpacityModel, Quantity,
};
pub use xuv::{xuv_fraction, RombergConfig, XuvConfig};
