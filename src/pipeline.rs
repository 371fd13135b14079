// THEORY:
// The `pipeline` module is the top-level API of the engine. It chains the layers
// into one recognizer for a "panel with rows" screen element, such as a game
// scoreboard:
//
// Stage 1: locate the panel (a flat-colored box) over the whole capture.
// Stage 2: restrict the search to the panel's leading columns and locate the inner
//          region (the column of portrait frames in a scoreboard).
// Stage 3: walk one column of the inner region and split it into row bands.
//
// Every heuristic (reference colors, tolerances, fractions) arrives through
// `PipelineConfig`; the pipeline holds no other state and can analyze any number
// of captures.

use crate::core_modules::color_predicate::{ColorPredicate, ToleratedColor};
use crate::core_modules::debug_overlay;
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::region_locator::{AxisThreshold, RegionLocator};
use crate::core_modules::run_scanner::{self, Interval};
use log::{info, warn};
use serde::{Deserialize, Serialize};

// Re-export key data structures for the public API.
pub use crate::core_modules::rectangle::Rectangle;

pub const PANEL_MARKER: Pixel = Pixel::rgb(255, 255, 0);
pub const INNER_MARKER: Pixel = Pixel::rgb(255, 0, 255);

/// How to find one region: what to match and how strictly to threshold each axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionQuery {
    pub predicate: ColorPredicate,
    pub locator: RegionLocator,
}

/// Configuration for the PanelPipeline, allowing for tunable behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// The outer box, searched over the whole capture.
    pub panel: RegionQuery,
    /// The nested box, searched inside the panel's leading columns.
    pub inner: RegionQuery,
    /// The inner search covers the leftmost `1 / inner_divisor` of the panel.
    pub inner_divisor: u32,
    /// Predicate whose runs form the bands.
    pub band_predicate: ColorPredicate,
    /// Horizontal position of the band scan line, as a fraction of the inner width.
    pub band_column_fraction: f64,
    /// Paint projection bars and matched band pixels when annotating.
    pub debug_overlay: bool,
}

impl Default for PipelineConfig {
    /// Scoreboard heuristics: a dark teal panel whose first eighth holds a column of
    /// gray-framed portraits.
    fn default() -> Self {
        Self {
            panel: RegionQuery {
                predicate: ColorPredicate::exact_set([
                    ToleratedColor::new(Pixel::rgb(24, 63, 60), 4),
                    ToleratedColor::new(Pixel::rgb(33, 69, 61), 4),
                ]),
                locator: RegionLocator::with_thresholds(
                    AxisThreshold::PeakDistance(30),
                    AxisThreshold::PeakDistance(30),
                ),
            },
            inner: RegionQuery {
                predicate: ColorPredicate::exact_set([
                    ToleratedColor::new(Pixel::rgb(29, 30, 32), 1),
                    ToleratedColor::new(Pixel::rgb(69, 69, 67), 1),
                    ToleratedColor::new(Pixel::rgb(74, 75, 74), 1),
                    ToleratedColor::new(Pixel::rgb(46, 47, 48), 1),
                ]),
                locator: RegionLocator::with_thresholds(
                    AxisThreshold::PeakDistance(5),
                    AxisThreshold::PeakDistance(5),
                ),
            },
            inner_divisor: 8,
            band_predicate: ColorPredicate::achromatic_band(4, 25, 80),
            band_column_fraction: 0.5,
            debug_overlay: false,
        }
    }
}

/// The geometry recovered from one capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelData {
    pub panel: Rectangle,
    /// The nested region; may be empty (sentinel) when nothing in the panel matched.
    pub inner: Rectangle,
    /// Row bands down the inner region, top to bottom.
    pub bands: Vec<Interval>,
}

/// The primary output of the pipeline for a single capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Report {
    NoPanel,
    PanelFound(PanelData),
}

pub struct PanelPipeline {
    config: PipelineConfig,
}

impl PanelPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn analyze(&self, buffer: &PixelBuffer) -> Report {
        // Stage 1: Panel
        let panel = self
            .config
            .panel
            .locator
            .locate(buffer, None, &self.config.panel.predicate);
        if panel.is_empty() {
            warn!("no panel found in {}x{} capture", buffer.width(), buffer.height());
            return Report::NoPanel;
        }
        info!("panel location: {}", panel);

        // Stage 2: Nested region
        let inner_search = self.inner_search(&panel);
        let inner = self
            .config
            .inner
            .locator
            .locate(buffer, Some(inner_search), &self.config.inner.predicate);
        info!("inner location: {}", inner);

        // Stage 3: Bands
        let bands = match self.band_column(&inner) {
            Some(column) => {
                run_scanner::scan_column(buffer, column, inner.rows(), &self.config.band_predicate)
                    .collect()
            }
            None => Vec::new(),
        };
        info!("found {} band(s): {:?}", bands.len(), bands);

        Report::PanelFound(PanelData { panel, inner, bands })
    }

    /// Draws the report onto the buffer: the panel outlined in yellow and the inner
    /// region in magenta. A query whose locator has `paint_debug` set also gets its
    /// projection bars; `debug_overlay` turns that on for the inner query and adds the
    /// matched band pixels.
    pub fn annotate(&self, buffer: &mut PixelBuffer, report: &Report) {
        let Report::PanelFound(data) = report else {
            return;
        };

        // Histograms are taken from the unpainted capture.
        let mut overlays = Vec::new();
        if self.config.panel.locator.paint_debug {
            overlays.push(self.config.panel.locator.histogram(
                buffer,
                None,
                &self.config.panel.predicate,
            ));
        }
        if self.config.debug_overlay || self.config.inner.locator.paint_debug {
            overlays.push(self.config.inner.locator.histogram(
                buffer,
                Some(self.inner_search(&data.panel)),
                &self.config.inner.predicate,
            ));
        }
        for histogram in &overlays {
            debug_overlay::paint_histogram(buffer, histogram);
        }

        if self.config.debug_overlay {
            if let Some(column) = self.band_column(&data.inner) {
                debug_overlay::paint_column_matches(
                    buffer,
                    column,
                    data.inner.rows(),
                    &self.config.band_predicate,
                );
            }
        }

        buffer.outline(&data.panel, PANEL_MARKER);
        buffer.outline(&data.inner, INNER_MARKER);
    }

    fn inner_search(&self, panel: &Rectangle) -> Rectangle {
        panel.leading_columns(self.config.inner_divisor)
    }

    fn band_column(&self, inner: &Rectangle) -> Option<i32> {
        if inner.is_empty() {
            return None;
        }
        let fraction = self.config.band_column_fraction.clamp(0.0, 1.0);
        let offset = (inner.width() as f64 * fraction) as i32;
        Some((inner.left + offset).min(inner.right - 1))
    }
}
