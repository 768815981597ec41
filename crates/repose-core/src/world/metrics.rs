//! Heap geometry derived from the grid

use serde::{Deserialize, Serialize};

use super::Grid;

/// Topmost material height per occupied column
///
/// `columns` and `heights` are parallel; columns without material are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceProfile {
    pub columns: Vec<usize>,
    pub heights: Vec<usize>,
}

impl SurfaceProfile {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of the highest point; the first one wins on ties
    pub fn peak_index(&self) -> Option<usize> {
        let mut peak: Option<usize> = None;
        for (i, &h) in self.heights.iter().enumerate() {
            match peak {
                Some(p) if h <= self.heights[p] => {}
                _ => peak = Some(i),
            }
        }
        peak
    }
}

/// Diagnostics for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Current fine/coarse insertion probability
    pub mix_ratio: f32,
    /// `top_height - bottom_height`, 0 with no material
    pub delta_h: usize,
    /// Height of the highest material cell
    pub top_height: usize,
    /// Height of the lowest material cell
    pub bottom_height: usize,
    /// Mean side slope of the heap in degrees
    pub heap_angle: f64,
}

/// Metrics analyzer - stateless queries over a grid
pub struct MetricsAnalyzer;

impl MetricsAnalyzer {
    /// Scan each column top to bottom for its first fine/coarse cell
    ///
    /// Height is measured from the bottom: `grid_height - row`.
    pub fn surface_profile(grid: &Grid) -> SurfaceProfile {
        let mut profile = SurfaceProfile::default();
        for x in 0..grid.width() {
            if let Some(y) = (0..grid.height()).find(|&y| grid.cell_at(x, y).is_material()) {
                profile.columns.push(x);
                profile.heights.push(grid.height() - y);
            }
        }
        profile
    }

    /// Heap angle of the current grid in degrees
    pub fn heap_angle(grid: &Grid) -> f64 {
        Self::profile_angle(&Self::surface_profile(grid))
    }

    /// Average of the left and right side regression angles, in degrees
    ///
    /// Both sides include the peak column. A side with fewer than two points or
    /// zero x-variance contributes nothing; with no usable side the angle is 0.
    pub fn profile_angle(profile: &SurfaceProfile) -> f64 {
        if profile.len() < 2 {
            return 0.0;
        }
        let Some(peak) = profile.peak_index() else {
            return 0.0;
        };

        let xs: Vec<f64> = profile.columns.iter().map(|&c| c as f64).collect();
        let ys: Vec<f64> = profile.heights.iter().map(|&h| h as f64).collect();

        let angles: Vec<f64> = [
            Self::regression_slope(&xs[..=peak], &ys[..=peak]),
            Self::regression_slope(&xs[peak..], &ys[peak..]),
        ]
        .into_iter()
        .flatten()
        .map(|slope| slope.atan().abs())
        .collect();

        if angles.is_empty() {
            return 0.0;
        }
        let mean = angles.iter().sum::<f64>() / angles.len() as f64;
        mean.to_degrees()
    }

    /// Ordinary least-squares slope, `None` for fewer than two points or zero x-variance
    pub fn regression_slope(xs: &[f64], ys: &[f64]) -> Option<f64> {
        debug_assert_eq!(xs.len(), ys.len());
        let n = xs.len();
        if n < 2 {
            return None;
        }
        let mean_x = xs.iter().sum::<f64>() / n as f64;
        let mean_y = ys.iter().sum::<f64>() / n as f64;

        let (num, den) = xs
            .iter()
            .zip(ys)
            .fold((0.0, 0.0), |(num, den), (&x, &y)| {
                let dx = x - mean_x;
                (num + dx * (y - mean_y), den + dx * dx)
            });
        if den == 0.0 {
            return None;
        }
        Some(num / den)
    }

    /// Height span of the material plus the heap angle
    pub fn metrics(grid: &Grid, mix_ratio: f32) -> SimulationMetrics {
        let mut rows: Option<(usize, usize)> = None;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.cell_at(x, y).is_material() {
                    rows = Some(match rows {
                        Some((top, bottom)) => (top.min(y), bottom.max(y)),
                        None => (y, y),
                    });
                }
            }
        }

        let (top_height, bottom_height) = match rows {
            Some((top_y, bottom_y)) => (grid.height() - top_y, grid.height() - bottom_y),
            None => (0, 0),
        };

        SimulationMetrics {
            mix_ratio,
            delta_h: top_height - bottom_height,
            top_height,
            bottom_height,
            heap_angle: Self::heap_angle(grid),
        }
    }

    /// Angle of the static slope in degrees, independent of material
    pub fn floor_angle(width: usize, floor_min: i32, floor_max: i32) -> f64 {
        let rise = floor_max.saturating_sub(floor_min).max(0) as f64;
        let run = width.saturating_sub(1).max(1) as f64;
        rise.atan2(run).to_degrees()
    }
}
