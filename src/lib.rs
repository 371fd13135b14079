// THEORY:
// This file is the main entry point for the `panel_vision` library crate.
// It exposes the `PanelPipeline` (with `PipelineConfig` and `Report`) as the
// high-level interface, and the `core_modules` layers for callers who want to run
// the locator or the run scanner directly with their own predicates.
//
// Layers, bottom up:
// - `pixel`, `pixel_buffer`, `rectangle`: the raster and its geometry.
// - `color_predicate`: the per-pixel match question.
// - `histogram`, `region_locator`: projection histograms and box extraction.
// - `run_scanner`: contiguous runs along one scan line.
// - `debug_overlay`: optional painted diagnostics.
// Decoding, capture and display stay outside; `utils::image_helper` is the only
// bridge to files.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod parallel_locator;
pub mod pipeline;

pub use error::{Result, VisionError};
