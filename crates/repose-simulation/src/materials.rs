//! Mobile materials and their flow probabilities

use crate::Cell;
use serde::{Deserialize, Serialize};

/// A mobile grain type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    /// Flows like water: always slides into a single diagonal gap
    Fine,
    /// Moderately sticky
    Coarse,
}

/// Per-tick movement probabilities of a material
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialFlow {
    /// Chance to take the only open below-diagonal cell
    pub diagonal: f32,
    /// Chance to step into an open same-row neighbor
    pub lateral: f32,
}

impl MaterialFlow {
    pub const FINE: MaterialFlow = MaterialFlow {
        diagonal: 1.0,
        lateral: 0.9,
    };

    pub const COARSE: MaterialFlow = MaterialFlow {
        diagonal: 0.9,
        lateral: 0.4,
    };
}

impl Material {
    pub const ALL: [Material; 2] = [Material::Fine, Material::Coarse];

    /// Fixed flow probabilities for this material
    #[inline]
    pub fn flow(self) -> MaterialFlow {
        match self {
            Material::Fine => MaterialFlow::FINE,
            Material::Coarse => MaterialFlow::COARSE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Material::Fine => "fine",
            Material::Coarse => "coarse",
        }
    }
}

impl From<Material> for Cell {
    fn from(material: Material) -> Cell {
        match material {
            Material::Fine => Cell::Fine,
            Material::Coarse => Cell::Coarse,
        }
    }
}
