//! Engine for the repose granular heap simulation
//!
//! Grains of two materials fall through a bounded grid containing static
//! walls and settle into heaps whose geometry can be measured.
//!
//! - `world`: grid state, terrain, emitter, step rule, metrics, RNG and stats seams
//! - `config`: construction parameters
//! - `error`: configuration errors

pub mod config;
pub mod error;
pub mod world;

pub use config::SimulationConfig;
pub use error::ConfigError;
pub use world::{
    Cell, FloorProfile, Grid, GridPoint, Material, MaterialFlow, MoveCounts, NoopStats,
    ScriptedRng, SettleSummary, SimRng, SimStats, Simulation, SimulationMetrics, Snapshot,
    SurfaceProfile,
};
