//! Grid cell states

use crate::Material;
use serde::{Deserialize, Serialize};

/// Occupancy of a single grid cell
///
/// The discriminant is the wire/raw code exposed to renderers
/// (0 = empty, 1 = fine, 2 = coarse, 3 = wall).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Vacant space
    #[default]
    Empty = 0,
    /// Fine grain, flows freely
    Fine = 1,
    /// Coarse grain, moderately sticky
    Coarse = 2,
    /// Static terrain, never moved by the step engine
    Wall = 3,
}

impl Cell {
    pub const ALL: [Cell; 4] = [Cell::Empty, Cell::Fine, Cell::Coarse, Cell::Wall];

    /// Raw code of this state
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a raw code, `None` for anything outside 0..=3
    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Fine),
            2 => Some(Cell::Coarse),
            3 => Some(Cell::Wall),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    /// True for the mobile materials (fine or coarse)
    #[inline]
    pub fn is_material(self) -> bool {
        matches!(self, Cell::Fine | Cell::Coarse)
    }

    /// The mobile material held by this cell, if any
    #[inline]
    pub fn material(self) -> Option<Material> {
        match self {
            Cell::Fine => Some(Material::Fine),
            Cell::Coarse => Some(Material::Coarse),
            Cell::Empty | Cell::Wall => None,
        }
    }

    /// Display color (RGBA)
    pub fn color(self) -> [u8; 4] {
        match self {
            Cell::Empty => [0xf7, 0xfb, 0xff, 0xff],
            Cell::Fine => [0xf4, 0xa2, 0x61, 0xff],
            Cell::Coarse => [0xb5, 0x65, 0x1d, 0xff],
            Cell::Wall => [0x0f, 0x17, 0x2a, 0xff],
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Cell::from_code(code).ok_or(code)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.code()
    }
}
