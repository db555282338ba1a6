//! Host-side stepping for a set of white dwarfs.
//!
//! This is the minimal driver a host needs to exercise the derivative
//! sources: it advances every body's age by a fixed timestep and lets each
//! body re-evaluate its variables. The white dwarf variables are assigned
//! rather than integrated, so no quadrature of rates is involved.

use units::Time;

use crate::error::WdwarfError;
use crate::evolution::WhiteDwarf;

/// State of a set of cooling bodies at a given time.
#[derive(Debug, Clone)]
pub struct SystemState {
    /// Time elapsed since the start of the run
    pub time: Time,
    pub bodies: Vec<WhiteDwarf>,
}

impl SystemState {
    pub fn new() -> Self {
        Self {
            time: Time::zero(),
            bodies: Vec::new(),
        }
    }

    /// Adds a body and returns its index.
    pub fn add_body(&mut self, body: WhiteDwarf) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// True if any body asks the run to stop.
    pub fn should_halt(&self) -> bool {
        self.bodies.iter().any(WhiteDwarf::should_halt)
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}

/// Advances a [`SystemState`] in time.
pub trait Integrator {
    /// Advance the system by one timestep
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state (modified in place)
    /// * `dt` - Timestep
    fn step(&self, state: &mut SystemState, dt: Time) -> Result<(), WdwarfError>;

    /// Advance the system by up to `n_steps` timesteps, stopping early once
    /// a body requests a halt.
    ///
    /// # Returns
    ///
    /// Time reached
    fn integrate(
        &self,
        state: &mut SystemState,
        dt: Time,
        n_steps: usize,
    ) -> Result<Time, WdwarfError> {
        for _ in 0..n_steps {
            if state.should_halt() {
                log::info!("Halting at t = {:.4e} yr", state.time.to_years());
                break;
            }
            self.step(state, dt)?;
        }
        Ok(state.time)
    }
}

/// Ages every body by `dt` and assigns the re-evaluated variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectUpdate;

impl Integrator for DirectUpdate {
    fn step(&self, state: &mut SystemState, dt: Time) -> Result<(), WdwarfError> {
        for body in state.bodies.iter_mut() {
            let age = body.age() + dt;
            body.update(age)?;
        }
        state.time = state.time + dt;
        Ok(())
    }
}
