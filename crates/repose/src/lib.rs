//! # Repose - headless granular heap runs
//!
//! Pours grains onto a floor, settles the heap and reports its geometry.

pub mod config;
pub mod pixel_renderer;
pub mod report;
pub mod runner;

pub use config::AppConfig;
pub use pixel_renderer::PixelRenderer;
pub use report::RunReport;
pub use runner::Runner;
