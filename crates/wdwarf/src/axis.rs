//! Monotonic grid axes and the bounds locator.
//!
//! An [`Axis`] is validated once at construction. [`Axis::locate`] then assumes
//! strict monotonicity and only classifies the query against the axis range.

use serde::{Deserialize, Serialize};

use crate::constants::{AGE_NODES, LOG_AGE_MAX_YR, LOG_AGE_MIN_YR};
use crate::error::WdwarfError;
use crate::model::MassNodes;

/// Side of the axis a query fell off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfBounds {
    /// Below the first node, or not a number
    Low,
    /// Above the last node
    High,
}

/// Strictly increasing sequence of grid nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Axis {
    nodes: Vec<f64>,
}

impl Axis {
    /// Creates an axis, checking it has at least two finite, strictly
    /// increasing nodes.
    pub fn new(nodes: Vec<f64>) -> Result<Self, WdwarfError> {
        if nodes.len() < 2 {
            return Err(WdwarfError::InvalidAxis(format!(
                "need at least 2 nodes, got {}",
                nodes.len()
            )));
        }
        if let Some(bad) = nodes.iter().position(|n| !n.is_finite()) {
            return Err(WdwarfError::InvalidAxis(format!(
                "node {} is not finite",
                bad
            )));
        }
        if let Some(i) = nodes.windows(2).position(|w| w[1] <= w[0]) {
            return Err(WdwarfError::InvalidAxis(format!(
                "nodes {} and {} are not strictly increasing ({} >= {})",
                i,
                i + 1,
                nodes[i],
                nodes[i + 1]
            )));
        }
        Ok(Self { nodes })
    }

    /// Padded mass axis (M☉) of a tabulated family.
    pub fn for_masses(shape: MassNodes) -> Self {
        Self {
            nodes: shape.masses().to_vec(),
        }
    }

    /// Age axis (Gyr) shared by every tabulated family: 500 nodes evenly
    /// spaced in log age between 10^6.1 and 10^9.8 yr.
    pub fn standard_ages() -> Self {
        let step = (LOG_AGE_MAX_YR - LOG_AGE_MIN_YR) / (AGE_NODES - 1) as f64;
        let nodes = (0..AGE_NODES)
            .map(|i| 10f64.powf(LOG_AGE_MIN_YR + step * i as f64) / 1e9)
            .collect();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; an axis has at least two nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn first(&self) -> f64 {
        self.nodes[0]
    }

    pub fn last(&self) -> f64 {
        self.nodes[self.nodes.len() - 1]
    }

    /// Finds the lower index of the cell bracketing `query`.
    ///
    /// Returns the largest `i` with `axis[i] <= query`, except that a query
    /// equal to the last node returns `len - 2` so that `i + 1` is always a
    /// valid node.
    ///
    /// # Examples
    ///
    /// ```
    /// use wdwarf::axis::{Axis, OutOfBounds};
    ///
    /// let axis = Axis::new(vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(axis.locate(2.5), Ok(1));
    /// assert_eq!(axis.locate(3.0), Ok(1));
    /// assert_eq!(axis.locate(0.5), Err(OutOfBounds::Low));
    /// assert_eq!(axis.locate(3.5), Err(OutOfBounds::High));
    /// ```
    pub fn locate(&self, query: f64) -> Result<usize, OutOfBounds> {
        if query.is_nan() || query < self.first() {
            return Err(OutOfBounds::Low);
        }
        if query > self.last() {
            return Err(OutOfBounds::High);
        }
        // First node strictly greater than the query, minus one
        let upper = self.nodes.partition_point(|&n| n <= query);
        Ok((upper - 1).min(self.nodes.len() - 2))
    }

    /// Normalized offset of `query` within the cell starting at `index`.
    pub fn fraction(&self, index: usize, query: f64) -> f64 {
        let lo = self.nodes[index];
        let hi = self.nodes[index + 1];
        (query - lo) / (hi - lo)
    }

    /// Locates `query` and returns the bracketing index together with its
    /// normalized offset.
    pub fn bracket(&self, query: f64) -> Result<(usize, f64), OutOfBounds> {
        let index = self.locate(query)?;
        Ok((index, self.fraction(index, query)))
    }
}

impl TryFrom<Vec<f64>> for Axis {
    type Error = WdwarfError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Axis> for Vec<f64> {
    fn from(value: Axis) -> Self {
        value.nodes
    }
}
