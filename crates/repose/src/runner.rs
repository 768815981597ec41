//! Headless run loop: pour a heap, settle it, report

use repose_core::{ConfigError, MoveCounts, Simulation};

use crate::config::AppConfig;
use crate::report::RunReport;

/// Frames between progress lines
const PROGRESS_INTERVAL: usize = 100;

/// Drives one simulation through pouring and settling, tallying what happened
pub struct Runner {
    sim: Simulation,
    seed: u64,
    moves: MoveCounts,
    frames: usize,
    emitted: usize,
    blocked_emits: usize,
    settle_ticks: usize,
    quiescent: bool,
}

impl Runner {
    /// Build the engine; a missing seed is drawn here so the report can record it
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let seed = config.simulation.seed.unwrap_or_else(rand::random);
        let mut sim_config = config.simulation.clone();
        sim_config.seed = Some(seed);

        Ok(Self {
            sim: Simulation::new(&sim_config)?,
            seed,
            moves: MoveCounts::default(),
            frames: 0,
            emitted: 0,
            blocked_emits: 0,
            settle_ticks: 0,
            quiescent: false,
        })
    }

    /// One frame: emit at the source, then step once
    pub fn frame(&mut self) {
        if self.sim.emit() {
            self.emitted += 1;
        } else {
            self.blocked_emits += 1;
        }
        self.sim.step_with_stats(&mut self.moves);
        self.frames += 1;
    }

    pub fn pour(&mut self, frames: usize) {
        for _ in 0..frames {
            self.frame();
            if self.frames % PROGRESS_INTERVAL == 0 {
                log::debug!(
                    "Frame {}: {} grains, {} blocked emits",
                    self.frames,
                    self.sim.particle_count(),
                    self.blocked_emits
                );
            }
        }
    }

    /// Step until quiet or `max_iterations` ticks
    pub fn settle(&mut self, max_iterations: usize) {
        let summary = self.sim.settle_with_stats(max_iterations, &mut self.moves);
        self.settle_ticks += summary.moving_ticks;
        self.quiescent = summary.quiescent;
        if !self.quiescent {
            log::warn!("Heap still moving after {} settle ticks", max_iterations);
        }
    }

    /// Pour for the configured frames, then settle
    pub fn run(&mut self, config: &AppConfig) -> RunReport {
        log::info!("Pouring {} frames (seed {})", config.run.frames, self.seed);
        self.pour(config.run.frames);
        self.settle(config.run.settle_iterations);
        self.report()
    }

    pub fn report(&self) -> RunReport {
        let (floor_min, floor_max) = self.sim.floor_bounds();
        RunReport {
            seed: self.seed,
            width: self.sim.width(),
            height: self.sim.height(),
            floor_profile: self.sim.floor_profile(),
            floor_min,
            floor_max,
            frames: self.frames,
            emitted: self.emitted,
            blocked_emits: self.blocked_emits,
            settle_ticks: self.settle_ticks,
            quiescent: self.quiescent,
            particle_count: self.sim.particle_count(),
            floor_angle: self.sim.floor_angle(),
            metrics: self.sim.metrics(),
            moves: self.moves,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
