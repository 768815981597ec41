//! Step statistics collection trait

use serde::{Deserialize, Serialize};

/// Trait for collecting per-tick movement statistics
///
/// The step engine reports one event per particle decision; implementors decide
/// whether to keep them.
pub trait SimStats {
    /// A particle fell straight down
    fn record_fall(&mut self);

    /// A particle slid into a below-diagonal cell
    fn record_slide(&mut self);

    /// A particle spread into a same-row neighbor
    fn record_spread(&mut self);

    /// A particle found no legal move and locked in
    fn record_settled(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_fall(&mut self) {}
    fn record_slide(&mut self) {}
    fn record_spread(&mut self) {}
    fn record_settled(&mut self) {}
}

/// Running totals of step engine events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCounts {
    pub falls: u64,
    pub slides: u64,
    pub spreads: u64,
    pub settled: u64,
}

impl MoveCounts {
    /// Total cell-to-cell moves (settling is not a move)
    pub fn moves(&self) -> u64 {
        self.falls + self.slides + self.spreads
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Moves: {} (fall {} | slide {} | spread {}) | Settled: {}",
            self.moves(),
            self.falls,
            self.slides,
            self.spreads,
            self.settled
        )
    }
}

impl SimStats for MoveCounts {
    fn record_fall(&mut self) {
        self.falls += 1;
    }

    fn record_slide(&mut self) {
        self.slides += 1;
    }

    fn record_spread(&mut self) {
        self.spreads += 1;
    }

    fn record_settled(&mut self) {
        self.settled += 1;
    }
}
