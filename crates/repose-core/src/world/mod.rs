//! Simulation world - grid state and the systems that read and mutate it

mod ca_update;
mod emitter;
mod grid;
pub mod metrics;
pub mod rng_trait;
mod simulation;
pub mod stats;
pub mod terrain;

// Re-export from repose-simulation so engine users need a single import
pub use repose_simulation::{Cell, Material, MaterialFlow};

pub use ca_update::CellularAutomataUpdater;
pub use emitter::Emitter;
pub use grid::{Grid, GridPoint};
pub use metrics::{MetricsAnalyzer, SimulationMetrics, SurfaceProfile};
pub use rng_trait::{ScriptedRng, SimRng};
pub use simulation::{SettleSummary, Simulation, Snapshot};
pub use stats::{MoveCounts, NoopStats, SimStats};
pub use terrain::{FloorProfile, TerrainGenerator};
