//! Cell and material data for the repose heap simulation
//!
//! This crate provides the foundational data types shared by the engine and
//! any renderer driving it:
//! - Grid cell states (Cell)
//! - Mobile materials and their flow probabilities (Material, MaterialFlow)

mod cell;
mod materials;

pub use cell::Cell;
pub use materials::{Material, MaterialFlow};
