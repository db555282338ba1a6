//! Selection of the tabulated track family for a body.
//!
//! A [`ModelKey`] (opacity model, atmosphere, metallicity level) picks exactly
//! one family of cooling grids, or none if that combination was never
//! tabulated. The catalog of which families exist, and how many mass tracks
//! each carries, lives here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WdwarfError;

/// Source of the cooling sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum CoolingModel {
    /// BaSTI-IAC white dwarf sequences (Salaris et al. 2022)
    #[default]
    Basti22,
}

impl FromStr for CoolingModel {
    type Err = WdwarfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().chars().next() {
            Some('b') => Ok(CoolingModel::Basti22),
            _ => Err(WdwarfError::UnknownOption("cooling model", s.to_string())),
        }
    }
}

impl TryFrom<String> for CoolingModel {
    type Error = WdwarfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Physical quantity tabulated by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// log₁₀(L / L☉)
    Luminosity,
    /// log₁₀(T_eff / K)
    Temperature,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            Quantity::Luminosity => "luminosity",
            Quantity::Temperature => "temperature",
        };
        write!(f, "{}", str)
    }
}

/// Electron conduction opacity used to compute the cooling sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum OpacityModel {
    /// Blouin et al. (2020)
    #[default]
    Blouin20,
    /// Cassisi et al. (2007)
    Cassisi07,
}

impl FromStr for OpacityModel {
    type Err = WdwarfError;

    /// Only the first letter is significant: `b…` or `c…`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().chars().next() {
            Some('b') => Ok(OpacityModel::Blouin20),
            Some('c') => Ok(OpacityModel::Cassisi07),
            _ => Err(WdwarfError::UnknownOption("opacity model", s.to_string())),
        }
    }
}

impl TryFrom<String> for OpacityModel {
    type Error = WdwarfError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OpacityModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            OpacityModel::Blouin20 => "blouin20",
            OpacityModel::Cassisi07 => "cassisi07",
        };
        write!(f, "{}", str)
    }
}

/// Envelope composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Atmosphere {
    /// Hydrogen envelope (spectral type DA)
    #[default]
    Hydrogen,
    /// Helium envelope (spectral type DB)
    Helium,
}

impl Atmosphere {
    pub fn from_helium_flag(helium: bool) -> Self {
        if helium {
            Atmosphere::Helium
        } else {
            Atmosphere::Hydrogen
        }
    }

    pub fn is_helium(&self) -> bool {
        matches!(self, Atmosphere::Helium)
    }
}

impl fmt::Display for Atmosphere {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            Atmosphere::Hydrogen => "DA",
            Atmosphere::Helium => "DB",
        };
        write!(f, "{}", str)
    }
}

/// Nominal metal mass fraction for each level
const METAL_FRACTIONS: [f64; 6] = [0.0, 0.006, 0.01, 0.02, 0.03, 0.04];

/// Integral metallicity level, `0..=5`.
///
/// | level | Z     |
/// |-------|-------|
/// | 0     | 0     |
/// | 1     | 0.006 |
/// | 2     | 0.01  |
/// | 3     | 0.02  |
/// | 4     | 0.03  |
/// | 5     | 0.04  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MetallicityLevel(u8);

impl MetallicityLevel {
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, WdwarfError> {
        if level <= Self::MAX {
            Ok(Self(level))
        } else {
            Err(WdwarfError::InvalidMetallicity(level))
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Nominal metal mass fraction Z of the level
    pub fn metal_fraction(&self) -> f64 {
        METAL_FRACTIONS[self.0 as usize]
    }
}

impl TryFrom<u8> for MetallicityLevel {
    type Error = WdwarfError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MetallicityLevel> for u8 {
    fn from(value: MetallicityLevel) -> Self {
        value.0
    }
}

/// Number of tabulated mass tracks in a family.
///
/// Every family's mass axis carries one extrapolated node beyond each end
/// so the bicubic stencil has neighbours at the first and last real track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassNodes {
    Two,
    Three,
    Four,
    Seven,
}

impl MassNodes {
    /// Tabulated tracks, excluding the two extrapolated nodes
    pub fn tracks(&self) -> usize {
        match self {
            MassNodes::Two => 2,
            MassNodes::Three => 3,
            MassNodes::Four => 4,
            MassNodes::Seven => 7,
        }
    }

    /// Length of the mass axis including the extrapolated nodes
    pub fn axis_len(&self) -> usize {
        self.tracks() + 2
    }

    /// Mass axis in solar masses, including the extrapolated nodes.
    pub fn masses(&self) -> &'static [f64] {
        match self {
            MassNodes::Seven => &[0.53, 0.54, 0.61, 0.68, 0.77, 0.87, 1.00, 1.10, 1.11],
            MassNodes::Four => &[0.76, 0.77, 0.87, 1.00, 1.10, 1.11],
            MassNodes::Three => &[0.86, 0.87, 1.00, 1.10, 1.11],
            MassNodes::Two => &[0.99, 1.00, 1.10, 1.11],
        }
    }
}

/// Identifies one tabulated track family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ModelKey {
    pub opacity: OpacityModel,
    pub atmosphere: Atmosphere,
    pub metallicity: MetallicityLevel,
}

impl ModelKey {
    pub fn new(opacity: OpacityModel, atmosphere: Atmosphere, metallicity: MetallicityLevel) -> Self {
        Self {
            opacity,
            atmosphere,
            metallicity,
        }
    }

    /// Shape of the family selected by this key, or `None` if the
    /// combination was never tabulated.
    pub fn mass_nodes(&self) -> Option<MassNodes> {
        use Atmosphere::*;
        use MassNodes::*;
        use OpacityModel::*;

        match (self.opacity, self.atmosphere, self.metallicity.level()) {
            (Blouin20, Hydrogen, 1) => Some(Four),
            (Blouin20, Hydrogen, _) => Some(Seven),

            (Blouin20, Helium, 0) => Some(Seven),
            (Blouin20, Helium, 2) => Some(Two),
            (Blouin20, Helium, 3) => Some(Three),
            (Blouin20, Helium, 4) => Some(Four),
            (Blouin20, Helium, 5) => Some(Seven),

            (Cassisi07, Hydrogen, _) => Some(Seven),

            (Cassisi07, Helium, 0) => Some(Seven),
            (Cassisi07, Helium, 2) => Some(Three),
            (Cassisi07, Helium, 3) => Some(Four),
            (Cassisi07, Helium, 4) => Some(Seven),
            (Cassisi07, Helium, 5) => Some(Seven),

            // Helium envelopes at Z = 0.006 were never computed
            (_, Helium, _) => None,
        }
    }

    pub fn is_tabulated(&self) -> bool {
        self.mass_nodes().is_some()
    }

    /// Every key that has a tabulated family.
    pub fn tabulated() -> impl Iterator<Item = ModelKey> {
        [OpacityModel::Blouin20, OpacityModel::Cassisi07]
            .into_iter()
            .flat_map(|opacity| {
                [Atmosphere::Hydrogen, Atmosphere::Helium]
                    .into_iter()
                    .flat_map(move |atmosphere| {
                        (0..=MetallicityLevel::MAX).map(move |level| {
                            ModelKey::new(opacity, atmosphere, MetallicityLevel(level))
                        })
                    })
            })
            .filter(ModelKey::is_tabulated)
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} Z={}",
            self.opacity,
            self.atmosphere,
            self.metallicity.metal_fraction()
        )
    }
}
