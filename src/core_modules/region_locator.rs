// THEORY:
// The `RegionLocator` finds the axis-aligned box in which a predicate "dominates".
// It is the engine of the spatial layer and implements a projection-histogram
// method rather than connected-component labeling: fast, approximate and tolerant
// of the compression noise and anti-aliasing found in real screenshots.
//
// Algorithm:
// 1.  **Resolve**: clamp the search rectangle (or the whole buffer) to the grid.
// 2.  **Project**: count predicate matches per column and per row.
// 3.  **Peak**: take each axis' maximum count inside the search range.
// 4.  **Threshold**: derive a per-axis acceptance bound from the peak. Columns and
//     rows get independent thresholds because edges degrade asymmetrically: a
//     panel's vertical borders are often crisper than its horizontal ones.
// 5.  **Extract**: the left edge is the smallest accepted column and the right edge
//     one past the largest accepted column; rows likewise. Scanning the full range
//     (no early exit) makes the result the min/max accepted index even when the
//     histogram has several separate peaks.
//
// When an axis has no accepted index its edges stay crossed (left at the search
// rectangle's right edge, right at its left edge). That inverted rectangle is the
// "no region" sentinel and `Rectangle::is_empty` reports it as empty.

use crate::core_modules::color_predicate::ColorPredicate;
use crate::core_modules::debug_overlay;
use crate::core_modules::histogram::{Count, ProjectionHistogram};
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::rectangle::{Coordinate, Rectangle};
use log::debug;
use serde::{Deserialize, Serialize};

/// How close to its axis' peak a column or row count must be to count as part of
/// the region. Zero counts are never accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisThreshold {
    /// Accept counts of at least `peak * fraction`. The fraction is clamped to
    /// `[0, 1]`; zero accepts every nonzero count, one accepts only the peak.
    PeakFraction(f64),
    /// Accept counts no more than `distance` below the peak.
    PeakDistance(Count),
}

impl AxisThreshold {
    /// The smallest count this threshold accepts for the given peak (never below one).
    pub fn minimum_count(&self, peak: Count) -> Count {
        let minimum = match *self {
            AxisThreshold::PeakFraction(fraction) => {
                let fraction = if fraction.is_nan() {
                    0.0
                } else {
                    fraction.clamp(0.0, 1.0)
                };
                (peak as f64 * fraction).ceil() as Count
            }
            AxisThreshold::PeakDistance(distance) => peak.saturating_sub(distance),
        };
        minimum.max(1)
    }
}

impl Default for AxisThreshold {
    fn default() -> Self {
        AxisThreshold::PeakFraction(0.0)
    }
}

/// Stateless projection locator. Holds only the per-axis thresholds and whether to
/// paint the histogram overlay when handed a mutable buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionLocator {
    pub column_threshold: AxisThreshold,
    pub row_threshold: AxisThreshold,
    #[serde(default)]
    pub paint_debug: bool,
}

impl RegionLocator {
    /// A locator using fractional tolerances on both axes.
    pub fn new(tolerance_x: f64, tolerance_y: f64) -> Self {
        Self {
            column_threshold: AxisThreshold::PeakFraction(tolerance_x),
            row_threshold: AxisThreshold::PeakFraction(tolerance_y),
            paint_debug: false,
        }
    }

    pub fn with_thresholds(column_threshold: AxisThreshold, row_threshold: AxisThreshold) -> Self {
        Self {
            column_threshold,
            row_threshold,
            paint_debug: false,
        }
    }

    pub fn with_debug_overlay(mut self, paint_debug: bool) -> Self {
        self.paint_debug = paint_debug;
        self
    }

    /// Locates the dominant region of `predicate` inside `search` (or the whole buffer).
    pub fn locate(
        &self,
        buffer: &PixelBuffer,
        search: Option<Rectangle>,
        predicate: &ColorPredicate,
    ) -> Rectangle {
        let histogram = self.histogram(buffer, search, predicate);
        self.extract(&histogram)
    }

    /// Same as `locate`, and additionally paints the projection overlay onto the buffer
    /// when `paint_debug` is set. The returned rectangle is identical either way.
    pub fn locate_mut(
        &self,
        buffer: &mut PixelBuffer,
        search: Option<Rectangle>,
        predicate: &ColorPredicate,
    ) -> Rectangle {
        let histogram = self.histogram(buffer, search, predicate);
        let region = self.extract(&histogram);
        if self.paint_debug {
            debug_overlay::paint_histogram(buffer, &histogram);
        }
        region
    }

    pub fn histogram(
        &self,
        buffer: &PixelBuffer,
        search: Option<Rectangle>,
        predicate: &ColorPredicate,
    ) -> ProjectionHistogram {
        let search = search.unwrap_or_else(|| buffer.bounds());
        ProjectionHistogram::accumulate(buffer, &search, predicate)
    }

    /// Turns a projection histogram into the bounding rectangle of its accepted
    /// columns and rows, or the inverted sentinel when an axis has none.
    pub fn extract(&self, histogram: &ProjectionHistogram) -> Rectangle {
        let search = histogram.search();
        let peak_column = histogram.peak_column();
        let peak_row = histogram.peak_row();
        let min_column = self.column_threshold.minimum_count(peak_column);
        let min_row = self.row_threshold.minimum_count(peak_row);

        let (left, right) =
            accepted_span(histogram.column_counts(), search.left, search.right, min_column);
        let (top, bottom) =
            accepted_span(histogram.row_counts(), search.top, search.bottom, min_row);
        let region = Rectangle::new(left, top, right, bottom);

        debug!(
            "located {} in {} (column peak {} >= {}, row peak {} >= {})",
            region, search, peak_column, min_column, peak_row, min_row
        );
        region
    }
}

/// Smallest and one-past-largest index in `[start, end)` whose count is at least
/// `minimum`. Returns `(end, start)` when nothing qualifies.
fn accepted_span(
    counts: &[Count],
    start: Coordinate,
    end: Coordinate,
    minimum: Count,
) -> (Coordinate, Coordinate) {
    let mut low = end;
    let mut high = start;
    for index in start..end {
        if counts[index as usize] >= minimum {
            low = low.min(index);
            high = high.max(index + 1);
        }
    }
    (low, high)
}
