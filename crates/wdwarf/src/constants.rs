/// Planck constant (J·s)
pub const H_PLANCK: f64 = 6.626_070_15e-34;

/// Boltzmann constant (J/K)
pub const K_B: f64 = 1.380_649e-23;

/// Speed of light (m/s)
pub const C_LIGHT: f64 = 2.997_924_58e8;

/// Pi
pub const PI: f64 = std::f64::consts::PI;

/// Lower edge of the XUV band (Hz), about 124 nm
pub const XUV_NU_MIN: f64 = 2.48e15;

/// Upper edge of the XUV band (Hz), about 10 nm
pub const XUV_NU_MAX: f64 = 3.0e16;

/// Upper limit of the bolometric integral in units of kT/h
pub const BOLOMETRIC_CUTOFF: f64 = 100.0;

/// Trapezoid intervals on the first Romberg level
pub const ROMBERG_INITIAL_INTERVALS: usize = 100;

/// Maximum number of Romberg refinements
pub const ROMBERG_MAX_DEPTH: usize = 12;

/// Relative agreement between successive Romberg estimates
pub const ROMBERG_TOLERANCE: f64 = 1e-10;

/// Number of nodes on the tabulated age axis
pub const AGE_NODES: usize = 500;

/// log₁₀ of the first tabulated age (yr)
pub const LOG_AGE_MIN_YR: f64 = 6.1;

/// log₁₀ of the last tabulated age (yr)
pub const LOG_AGE_MAX_YR: f64 = 9.8;
