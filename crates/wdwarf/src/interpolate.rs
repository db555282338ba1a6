//! Bilinear and bicubic interpolation over a cooling grid.
//!
//! The bicubic patch follows the usual construction: at each of the four
//! corners of the bracketing cell we take the tabulated value and central
//! difference estimates of ∂f/∂x, ∂f/∂y and ∂²f/∂x∂y, map those 16 numbers
//! through a fixed basis-change matrix to polynomial coefficients `c[4j + i]`
//! and evaluate
//!
//! ```text
//! f(dx, dy) = Σⱼ dyʲ (c₄ⱼ + dx (c₄ⱼ₊₁ + dx (c₄ⱼ₊₂ + dx c₄ⱼ₊₃)))
//! ```
//!
//! Grids are truncated in age where a track ends, so the stencil can pick up
//! a `NaN` one node outside the cell even though the cell itself is complete.
//! In that case the engine drops to bilinear interpolation and reports
//! [`Status::LinearFallback`]. If any corner the bilinear formula needs is
//! missing, the data really ends here and the outcome is
//! [`Status::NonFinite`].

use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};

use crate::axis::OutOfBounds;
use crate::grid::Grid;

type Matrix16 = SMatrix<f64, 16, 16>;
type Vector16 = SVector<f64, 16>;

/// Basis change from `[f, fx, fy, fxy]` at corners `(0,0) (1,0) (0,1) (1,1)`
/// to the coefficients of the bicubic polynomial, row-major.
#[rustfmt::skip]
const BICUBIC_BASIS: [f64; 256] = [
     1.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,
     0.,  0.,  0.,  0.,  1.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,
    -3.,  3.,  0.,  0., -2., -1.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,
     2., -2.,  0.,  0.,  1.,  1.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,
     0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  1.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,
     0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  1.,  0.,  0.,  0.,
     0.,  0.,  0.,  0.,  0.,  0.,  0.,  0., -3.,  3.,  0.,  0., -2., -1.,  0.,  0.,
     0.,  0.,  0.,  0.,  0.,  0.,  0.,  0.,  2., -2.,  0.,  0.,  1.,  1.,  0.,  0.,
    -3.,  0.,  3.,  0.,  0.,  0.,  0.,  0., -2.,  0., -1.,  0.,  0.,  0.,  0.,  0.,
     0.,  0.,  0.,  0., -3.,  0.,  3.,  0.,  0.,  0.,  0.,  0., -2.,  0., -1.,  0.,
     9., -9., -9.,  9.,  6.,  3., -6., -3.,  6., -6.,  3., -3.,  4.,  2.,  2.,  1.,
    -6.,  6.,  6., -6., -3., -3.,  3.,  3., -4.,  4., -2.,  2., -2., -2., -1., -1.,
     2.,  0., -2.,  0.,  0.,  0.,  0.,  0.,  1.,  0.,  1.,  0.,  0.,  0.,  0.,  0.,
     0.,  0.,  0.,  0.,  2.,  0., -2.,  0.,  0.,  0.,  0.,  0.,  1.,  0.,  1.,  0.,
    -6.,  6.,  6., -6., -4., -2.,  4.,  2., -3.,  3., -3.,  3., -2., -1., -2., -1.,
     4., -4., -4.,  4.,  2.,  2., -2., -2.,  2., -2.,  2., -2.,  1.,  1.,  1.,  1.,
];

fn bicubic_basis() -> Matrix16 {
    Matrix16::from_row_slice(&BICUBIC_BASIS)
}

/// Polynomial order of the interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationOrder {
    Linear = 1,
    /// Bicubic with automatic linear fallback
    #[default]
    Cubic = 3,
}

impl InterpolationOrder {
    /// Maps the integer order used in option files, `1` or `3`.
    pub fn from_order(order: u8) -> Option<Self> {
        match order {
            1 => Some(InterpolationOrder::Linear),
            3 => Some(InterpolationOrder::Cubic),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// How an interpolated value was obtained, or why it could not be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Interpolated at the requested order
    Exact,
    /// Bicubic stencil hit a missing value, bilinear used instead
    LinearFallback,
    /// Query below the first node of an axis
    OutOfBoundsLow,
    /// Query above the last node of an axis
    OutOfBoundsHigh,
    /// The cell itself contains a missing value
    NonFinite,
    /// Order other than linear or cubic
    BadOrder,
    /// No grid for the requested model and quantity
    DataUnavailable,
}

impl Status {
    /// True if the outcome carries a physical value.
    pub fn is_usable(&self) -> bool {
        matches!(self, Status::Exact | Status::LinearFallback)
    }

    /// True for the expected ways of running off the end of a track.
    pub fn is_grid_exit(&self) -> bool {
        matches!(self, Status::OutOfBoundsHigh | Status::NonFinite)
    }
}

impl From<OutOfBounds> for Status {
    fn from(value: OutOfBounds) -> Self {
        match value {
            OutOfBounds::Low => Status::OutOfBoundsLow,
            OutOfBounds::High => Status::OutOfBoundsHigh,
        }
    }
}

/// Interpolated value together with its [`Status`].
///
/// Unusable outcomes carry `NaN` so a value can never be mistaken for data
/// without checking the status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationOutcome {
    pub value: f64,
    pub status: Status,
}

impl InterpolationOutcome {
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            status: Status::Exact,
        }
    }

    pub fn failed(status: Status) -> Self {
        Self {
            value: f64::NAN,
            status,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.status.is_usable()
    }

    /// Applies `f` to the value of a usable outcome.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        if self.is_usable() {
            Self {
                value: f(self.value),
                status: self.status,
            }
        } else {
            self
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Bilinear interpolation within the cell `[xi, xi+1] × [yi, yi+1]`.
///
/// A zero offset skips the blend along that direction, so the far row or
/// column is never read and may hold `NaN`.
pub fn bilinear(grid: &Grid, xi: usize, yi: usize, dx: f64, dy: f64) -> f64 {
    let (x, y) = (xi as isize, yi as isize);
    let row = |j: isize| {
        if dx == 0.0 {
            grid.get(x, j)
        } else {
            lerp(grid.get(x, j), grid.get(x + 1, j), dx)
        }
    };

    let c0 = row(y);
    if dy == 0.0 {
        return c0;
    }
    lerp(c0, row(y + 1), dy)
}

/// Bicubic interpolation within the cell `[xi, xi+1] × [yi, yi+1]`.
///
/// Derivatives come from central differences on the clamped stencil
/// `[xi-1, xi+2] × [yi-1, yi+2]`.
pub fn bicubic(grid: &Grid, xi: usize, yi: usize, dx: f64, dy: f64) -> f64 {
    let (x, y) = (xi as isize, yi as isize);
    let f = |i: isize, j: isize| grid.get(x + i, y + j);
    let fx = |i: isize, j: isize| 0.5 * (f(i + 1, j) - f(i - 1, j));
    let fy = |i: isize, j: isize| 0.5 * (f(i, j + 1) - f(i, j - 1));
    let fxy = |i: isize, j: isize| {
        0.25 * (f(i + 1, j + 1) - f(i - 1, j + 1) - f(i + 1, j - 1) + f(i - 1, j - 1))
    };

    let corners = [(0, 0), (1, 0), (0, 1), (1, 1)];
    let mut derivs = Vector16::zeros();
    for (k, &(i, j)) in corners.iter().enumerate() {
        derivs[k] = f(i, j);
        derivs[4 + k] = fx(i, j);
        derivs[8 + k] = fy(i, j);
        derivs[12 + k] = fxy(i, j);
    }

    let coeffs = bicubic_basis() * derivs;

    let mut result = 0.0;
    let mut dy_pow = 1.0;
    for j in 0..4 {
        let c = &coeffs.as_slice()[4 * j..4 * j + 4];
        result += dy_pow * (c[0] + dx * (c[1] + dx * (c[2] + dx * c[3])));
        dy_pow *= dy;
    }
    result
}

/// True if every corner [`bilinear`] reads for these offsets is finite.
fn linear_support_is_finite(grid: &Grid, xi: usize, yi: usize, dx: f64, dy: f64) -> bool {
    let (x, y) = (xi as isize, yi as isize);
    let xs: &[isize] = if dx == 0.0 { &[0] } else { &[0, 1] };
    let ys: &[isize] = if dy == 0.0 { &[0] } else { &[0, 1] };
    xs.iter()
        .all(|&i| ys.iter().all(|&j| grid.get(x + i, y + j).is_finite()))
}

/// Interpolates inside a located cell.
///
/// `dx` and `dy` are the normalized offsets within the cell.
pub fn interpolate(
    grid: &Grid,
    xi: usize,
    yi: usize,
    dx: f64,
    dy: f64,
    order: InterpolationOrder,
) -> InterpolationOutcome {
    match order {
        InterpolationOrder::Linear => {
            let value = bilinear(grid, xi, yi, dx, dy);
            if value.is_finite() {
                InterpolationOutcome::exact(value)
            } else {
                InterpolationOutcome::failed(Status::NonFinite)
            }
        }
        InterpolationOrder::Cubic => {
            let value = bicubic(grid, xi, yi, dx, dy);
            if value.is_finite() {
                return InterpolationOutcome::exact(value);
            }
            if !linear_support_is_finite(grid, xi, yi, dx, dy) {
                return InterpolationOutcome::failed(Status::NonFinite);
            }
            log::debug!(
                "Bicubic stencil incomplete at cell ({}, {}), using bilinear",
                xi,
                yi
            );
            InterpolationOutcome {
                value: bilinear(grid, xi, yi, dx, dy),
                status: Status::LinearFallback,
            }
        }
    }
}

/// Brackets `(mass, age)` on the grid axes, mass first.
fn locate_cell(grid: &Grid, mass: f64, age: f64) -> Result<(usize, usize, f64, f64), Status> {
    let (xi, dx) = grid.masses().bracket(mass)?;
    let (yi, dy) = grid.ages().bracket(age)?;
    Ok((xi, yi, dx, dy))
}

/// Locates `(mass, age)` on the grid axes and interpolates.
///
/// The mass axis is checked before the age axis, so a query outside both
/// reports the mass side.
pub fn interpolate_at(
    grid: &Grid,
    mass: f64,
    age: f64,
    order: InterpolationOrder,
) -> InterpolationOutcome {
    match locate_cell(grid, mass, age) {
        Ok((xi, yi, dx, dy)) => interpolate(grid, xi, yi, dx, dy, order),
        Err(status) => InterpolationOutcome::failed(status),
    }
}

/// Same as [`interpolate_at`] with an integer order, as found in option
/// files. Orders other than 1 and 3 give [`Status::BadOrder`] once the
/// query has been located.
pub fn interpolate_with_order(grid: &Grid, mass: f64, age: f64, order: u8) -> InterpolationOutcome {
    match (locate_cell(grid, mass, age), InterpolationOrder::from_order(order)) {
        (Err(status), _) => InterpolationOutcome::failed(status),
        (Ok(_), None) => InterpolationOutcome::failed(Status::BadOrder),
        (Ok((xi, yi, dx, dy)), Some(order)) => interpolate(grid, xi, yi, dx, dy, order),
    }
}
