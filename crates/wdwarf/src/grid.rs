//! Cooling grids and the shared, read-only grid store.
//!
//! A [`Grid`] pairs a mass axis and an age axis with a table of log₁₀ values
//! indexed `[mass][age]`. `NaN` entries mark ages past the end of a computed
//! track and are expected.
//!
//! The [`GridStore`] is built once through [`GridStoreBuilder`] and then shared
//! between bodies behind an `Arc`. Nothing mutates it after construction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::WdwarfError;
use crate::model::{Atmosphere, MetallicityLevel, ModelKey, OpacityModel, Quantity};

/// A tabulated quantity over a mass × age mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    masses: Axis,
    ages: Axis,
    values: Array2<f64>,
}

impl Grid {
    /// Creates a grid, checking the table is `masses.len() × ages.len()`.
    pub fn new(masses: Axis, ages: Axis, values: Array2<f64>) -> Result<Self, WdwarfError> {
        let (rows, cols) = values.dim();
        if rows != masses.len() {
            return Err(WdwarfError::ShapeMismatch(
                "grid rows vs mass axis".to_string(),
                masses.len(),
                rows,
            ));
        }
        if cols != ages.len() {
            return Err(WdwarfError::ShapeMismatch(
                "grid columns vs age axis".to_string(),
                ages.len(),
                cols,
            ));
        }
        Ok(Self {
            masses,
            ages,
            values,
        })
    }

    pub fn masses(&self) -> &Axis {
        &self.masses
    }

    pub fn ages(&self) -> &Axis {
        &self.ages
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Table entry at a signed index pair, clamped to the table edges.
    ///
    /// The bicubic stencil reaches one node beyond the bracketing cell on
    /// every side; at the first and last rows or columns those reads land on
    /// the edge node instead.
    pub fn get(&self, mass_index: isize, age_index: isize) -> f64 {
        let (rows, cols) = self.values.dim();
        let i = mass_index.clamp(0, rows as isize - 1) as usize;
        let j = age_index.clamp(0, cols as isize - 1) as usize;
        self.values[[i, j]]
    }
}

/// On-disk form of a single grid.
///
/// `null` table entries stand for `NaN`. The model key fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridFile {
    pub opacity: OpacityModel,
    pub atmosphere: Atmosphere,
    pub metallicity: MetallicityLevel,
    pub quantity: Quantity,
    pub masses: Vec<f64>,
    pub ages: Vec<f64>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl GridFile {
    pub fn key(&self) -> ModelKey {
        ModelKey::new(self.opacity, self.atmosphere, self.metallicity)
    }

    pub fn from_json(json: &str) -> Result<Self, WdwarfError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WdwarfError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| WdwarfError::Io(path.to_path_buf(), e))?;
        Self::from_json(&json)
    }

    /// Converts the document into a validated grid.
    pub fn into_grid(self) -> Result<Grid, WdwarfError> {
        let masses = Axis::new(self.masses)?;
        let ages = Axis::new(self.ages)?;

        let rows = self.values.len();
        let cols = ages.len();
        let mut flat = Vec::with_capacity(rows * cols);
        for (i, row) in self.values.into_iter().enumerate() {
            if row.len() != cols {
                return Err(WdwarfError::ShapeMismatch(
                    format!("grid row {}", i),
                    cols,
                    row.len(),
                ));
            }
            flat.extend(row.into_iter().map(|v| v.unwrap_or(f64::NAN)));
        }
        let actual = flat.len();
        let values = Array2::from_shape_vec((rows, cols), flat).map_err(|_| {
            WdwarfError::ShapeMismatch("grid table".to_string(), rows * cols, actual)
        })?;

        Grid::new(masses, ages, values)
    }
}

/// Read-only collection of grids keyed by model and quantity.
#[derive(Debug, Clone, Default)]
pub struct GridStore {
    grids: HashMap<(ModelKey, Quantity), Arc<Grid>>,
}

impl GridStore {
    pub fn builder() -> GridStoreBuilder {
        GridStoreBuilder::default()
    }

    /// Loads every grid document in `paths` into a shared store.
    pub fn from_files<P: AsRef<Path>>(
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Arc<Self>, WdwarfError> {
        let mut builder = Self::builder();
        for path in paths {
            builder.insert_file(GridFile::from_path(path)?)?;
        }
        Ok(builder.build())
    }

    pub fn get(&self, key: &ModelKey, quantity: Quantity) -> Option<&Arc<Grid>> {
        self.grids.get(&(*key, quantity))
    }

    pub fn contains(&self, key: &ModelKey, quantity: Quantity) -> bool {
        self.grids.contains_key(&(*key, quantity))
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

/// Collects grids before freezing them into a [`GridStore`].
#[derive(Debug, Default)]
pub struct GridStoreBuilder {
    grids: HashMap<(ModelKey, Quantity), Arc<Grid>>,
}

impl GridStoreBuilder {
    /// Adds a grid for `key`. Each model and quantity pair may be supplied once.
    ///
    /// The key must name a tabulated family and the grid's mass axis must
    /// have the length that family's catalog entry prescribes.
    pub fn insert(
        &mut self,
        key: ModelKey,
        quantity: Quantity,
        grid: Grid,
    ) -> Result<&mut Self, WdwarfError> {
        let shape = key
            .mass_nodes()
            .ok_or(WdwarfError::UntabulatedModel(key))?;
        if grid.masses().len() != shape.axis_len() {
            return Err(WdwarfError::ShapeMismatch(
                format!("mass axis of {} {}", key, quantity),
                shape.axis_len(),
                grid.masses().len(),
            ));
        }
        if self.grids.contains_key(&(key, quantity)) {
            return Err(WdwarfError::DuplicateGrid { quantity, key });
        }
        self.grids.insert((key, quantity), Arc::new(grid));
        Ok(self)
    }

    pub fn insert_file(&mut self, file: GridFile) -> Result<&mut Self, WdwarfError> {
        let key = file.key();
        let quantity = file.quantity;
        let grid = file.into_grid()?;
        self.insert(key, quantity, grid)
    }

    pub fn build(self) -> Arc<GridStore> {
        log::info!("Grid store ready with {} grids", self.grids.len());
        Arc::new(GridStore { grids: self.grids })
    }
}
