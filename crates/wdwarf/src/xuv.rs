//! XUV fraction of a blackbody.
//!
//! The fraction of the bolometric output emitted in the XUV band is the ratio
//! of two frequency integrals of the Planck energy density,
//!
//! ```text
//!            ∫[ν₁, ν₂] u(ν, T) dν
//! f_XUV = ──────────────────────────
//!          ∫[0, 100 kT/h] u(ν, T) dν
//! ```
//!
//! with `u(ν, T) = 8πhν³ / c³ / (exp(hν/kT) − 1)`. Both integrals are done
//! with Romberg quadrature. The upper limit of the bolometric integral sits
//! where `u` has fallen about 38 orders of magnitude below its peak.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BOLOMETRIC_CUTOFF, C_LIGHT, H_PLANCK, K_B, PI, ROMBERG_INITIAL_INTERVALS, ROMBERG_MAX_DEPTH,
    ROMBERG_TOLERANCE, XUV_NU_MAX, XUV_NU_MIN,
};

/// Stopping rules for [`romberg`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RombergConfig {
    /// Trapezoid intervals on the first level
    pub initial_intervals: usize,
    /// Number of interval doublings after the first level
    pub max_depth: usize,
    /// Relative agreement of successive diagonal estimates
    pub tolerance: f64,
}

impl Default for RombergConfig {
    fn default() -> Self {
        Self {
            initial_intervals: ROMBERG_INITIAL_INTERVALS,
            max_depth: ROMBERG_MAX_DEPTH,
            tolerance: ROMBERG_TOLERANCE,
        }
    }
}

/// Band edges and quadrature settings for [`xuv_fraction_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XuvConfig {
    /// Lower band edge (Hz)
    pub band_lo_hz: f64,
    /// Upper band edge (Hz)
    pub band_hi_hz: f64,
    /// Upper limit of the bolometric integral in units of kT/h
    pub bolometric_cutoff: f64,
    pub romberg: RombergConfig,
}

impl Default for XuvConfig {
    fn default() -> Self {
        Self {
            band_lo_hz: XUV_NU_MIN,
            band_hi_hz: XUV_NU_MAX,
            bolometric_cutoff: BOLOMETRIC_CUTOFF,
            romberg: RombergConfig::default(),
        }
    }
}

/// Spectral energy density of a blackbody (J m⁻³ Hz⁻¹).
///
/// # Arguments
///
/// * `frequency` - Frequency in Hz
/// * `temperature` - Temperature in K
///
/// The expression has a removable singularity at `ν = 0`, where the limit
/// is zero.
pub fn planck_energy_density(frequency: f64, temperature: f64) -> f64 {
    if frequency <= 0.0 {
        return 0.0;
    }
    let x = H_PLANCK * frequency / (K_B * temperature);
    8.0 * PI * H_PLANCK * frequency.powi(3) / C_LIGHT.powi(3) / x.exp_m1()
}

/// Composite trapezoid rule with `n` equal intervals.
fn trapezoid(f: &impl Fn(f64) -> f64, lo: f64, hi: f64, n: usize) -> f64 {
    let h = (hi - lo) / n as f64;
    let interior: f64 = (1..n).map(|k| f(lo + k as f64 * h)).sum();
    h * (0.5 * (f(lo) + f(hi)) + interior)
}

/// Romberg integration of `f` over `[lo, hi]`.
///
/// Level `j` is the trapezoid rule with `initial_intervals · 2ʲ` intervals,
/// built from level `j − 1` by adding the new midpoints. Each level is
/// Richardson-extrapolated,
///
/// ```text
/// R[j][k] = R[j][k−1] + (R[j][k−1] − R[j−1][k−1]) / (4ᵏ − 1)
/// ```
///
/// and the loop stops once two successive diagonal entries agree to the
/// configured tolerance, or after `max_depth` doublings.
pub fn romberg(f: impl Fn(f64) -> f64, lo: f64, hi: f64, config: &RombergConfig) -> f64 {
    let mut n = config.initial_intervals.max(1);
    let mut previous = vec![trapezoid(&f, lo, hi, n)];

    for j in 1..=config.max_depth {
        // Refine the trapezoid estimate with the midpoints of the old intervals
        let h = (hi - lo) / (2 * n) as f64;
        let midpoints: f64 = (0..n).map(|k| f(lo + (2 * k + 1) as f64 * h)).sum();
        let mut current = Vec::with_capacity(j + 1);
        current.push(0.5 * previous[0] + h * midpoints);
        n *= 2;

        let mut factor = 1.0;
        for k in 1..=j {
            factor *= 4.0;
            let value = current[k - 1] + (current[k - 1] - previous[k - 1]) / (factor - 1.0);
            current.push(value);
        }

        let estimate = current[j];
        let last = previous[j - 1];
        if (estimate - last).abs() <= config.tolerance * estimate.abs() {
            return estimate;
        }
        previous = current;
    }

    previous[previous.len() - 1]
}

/// Fraction of blackbody emission between 2.48×10¹⁵ and 3×10¹⁶ Hz.
pub fn xuv_fraction(temperature: f64) -> f64 {
    xuv_fraction_with(temperature, &XuvConfig::default())
}

/// Fraction of blackbody emission inside the configured band.
///
/// Non-positive and non-finite temperatures give zero. For very cold
/// blackbodies the band lies so deep in the Wien tail that the fraction is
/// below the smallest `f64` and the result rounds to exactly zero; with the
/// default band this happens below roughly 170 K.
pub fn xuv_fraction_with(temperature: f64, config: &XuvConfig) -> f64 {
    if !temperature.is_finite() || temperature <= 0.0 {
        return 0.0;
    }

    let density = |nu: f64| planck_energy_density(nu, temperature);
    let nu_max = config.bolometric_cutoff * K_B * temperature / H_PLANCK;

    let band = romberg(&density, config.band_lo_hz, config.band_hi_hz, &config.romberg);
    let total = romberg(&density, 0.0, nu_max, &config.romberg);
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    (band / total).clamp(0.0, 1.0)
}
