pub mod luminosity;
pub mod mass;
pub mod temperature;
pub mod time;

#[cfg(test)]
mod time_test;

pub use luminosity::{Luminosity, SOLAR_LUMINOSITY_W};
pub use mass::{Mass, SOLAR_MASS_KG};
pub use temperature::{Temperature, SOLAR_TEFF_K};
pub use time::{Time, SECONDS_PER_YEAR};
