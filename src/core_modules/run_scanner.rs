// THEORY:
// The run scanner splits a located region into bands. It walks a single scan line
// (one column, or one row) and reports each maximal stretch of consecutive pixels
// that satisfy a predicate.
//
// The walk is a two-state machine:
// - `OutsideRun` (initial): the first matching pixel opens a run at its position.
// - `InsideRun`: the first non-matching pixel closes the run, yielding
//   `[start, position)`.
// A run still open when the range ends is closed at the range end and yielded as
// well, so a band touching the bottom of the region is never lost.
//
// Scans are lazy iterators over a borrowed buffer. They are finite, cheap to clone,
// and restart from the beginning simply by asking for a new scan.

use crate::core_modules::color_predicate::ColorPredicate;
use crate::core_modules::debug_overlay;
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::rectangle::Coordinate;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::ops::Range;

/// A half-open span `[start, end)` of scan positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Interval {
    pub const fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        (self.end - self.start).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideRun,
    InsideRun { start: Coordinate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanLine {
    Column(Coordinate),
    Row(Coordinate),
}

/// Lazy sequence of the matching runs along one scan line.
#[derive(Debug, Clone)]
pub struct RunIntervals<'a> {
    buffer: &'a PixelBuffer,
    predicate: &'a ColorPredicate,
    line: ScanLine,
    position: Coordinate,
    end: Coordinate,
    state: ScanState,
}

impl<'a> RunIntervals<'a> {
    fn new(
        buffer: &'a PixelBuffer,
        predicate: &'a ColorPredicate,
        line: ScanLine,
        range: Range<Coordinate>,
    ) -> Self {
        let (line_index, line_limit, range_limit) = match line {
            ScanLine::Column(x) => (x, buffer.width(), buffer.height()),
            ScanLine::Row(y) => (y, buffer.height(), buffer.width()),
        };
        let start = range.start.max(0);
        let mut end = range.end.min(range_limit as Coordinate);
        if line_index < 0 || line_index as u32 >= line_limit {
            end = start;
        }

        Self {
            buffer,
            predicate,
            line,
            position: start,
            end: end.max(start),
            state: ScanState::OutsideRun,
        }
    }

    #[inline]
    fn pixel(&self, position: Coordinate) -> Pixel {
        match self.line {
            ScanLine::Column(x) => self.buffer.at(x, position),
            ScanLine::Row(y) => self.buffer.at(position, y),
        }
    }
}

impl Iterator for RunIntervals<'_> {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        while self.position < self.end {
            let position = self.position;
            self.position += 1;
            let matched = self.predicate.matches(&self.pixel(position));

            match (self.state, matched) {
                (ScanState::OutsideRun, true) => {
                    self.state = ScanState::InsideRun { start: position };
                }
                (ScanState::InsideRun { start }, false) => {
                    self.state = ScanState::OutsideRun;
                    return Some(Interval::new(start, position));
                }
                _ => {}
            }
        }

        if let ScanState::InsideRun { start } = self.state {
            self.state = ScanState::OutsideRun;
            return Some(Interval::new(start, self.end));
        }
        None
    }
}

impl FusedIterator for RunIntervals<'_> {}

/// Runs of `predicate` down `column`, restricted to `rows` (clamped to the buffer).
pub fn scan_column<'a>(
    buffer: &'a PixelBuffer,
    column: Coordinate,
    rows: Range<Coordinate>,
    predicate: &'a ColorPredicate,
) -> RunIntervals<'a> {
    RunIntervals::new(buffer, predicate, ScanLine::Column(column), rows)
}

/// Runs of `predicate` along `row`, restricted to `columns` (clamped to the buffer).
pub fn scan_row<'a>(
    buffer: &'a PixelBuffer,
    row: Coordinate,
    columns: Range<Coordinate>,
    predicate: &'a ColorPredicate,
) -> RunIntervals<'a> {
    RunIntervals::new(buffer, predicate, ScanLine::Row(row), columns)
}

/// Collects the column runs, then marks every matched pixel of the scanned range.
pub fn scan_column_painted(
    buffer: &mut PixelBuffer,
    column: Coordinate,
    rows: Range<Coordinate>,
    predicate: &ColorPredicate,
) -> Vec<Interval> {
    let runs: Vec<Interval> = scan_column(buffer, column, rows.clone(), predicate).collect();
    debug_overlay::paint_column_matches(buffer, column, rows, predicate);
    runs
}
