// THEORY:
// The debug overlay draws what the locator and scanner "saw" directly onto the
// buffer, so a saved screenshot shows the projection bars and matched runs next to
// the pixels that produced them. It is write-only: nothing in the engine ever reads
// the painted pixels back to make a decision.

use crate::core_modules::color_predicate::ColorPredicate;
use crate::core_modules::histogram::ProjectionHistogram;
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::rectangle::Coordinate;
use std::ops::Range;

/// Bars grown downward from the search rectangle's top edge, one per column.
pub const COLUMN_MARKER: Pixel = Pixel::rgb(0, 255, 255);
/// Bars grown rightward from the search rectangle's left edge, one per row.
pub const ROW_MARKER: Pixel = Pixel::rgb(255, 128, 0);
/// Pixels a run scan accepted.
pub const RUN_MARKER: Pixel = Pixel::rgb(255, 0, 0);

/// Paints each column's match count as a vertical bar and each row's as a horizontal one.
pub fn paint_histogram(buffer: &mut PixelBuffer, histogram: &ProjectionHistogram) {
    let search = histogram.search();
    if search.is_empty() {
        return;
    }

    for x in search.columns() {
        let count = histogram.column_counts()[x as usize] as Coordinate;
        let end = (search.top + count).min(search.bottom);
        for y in search.top..end {
            buffer.tint(x, y, COLUMN_MARKER);
        }
    }

    for y in search.rows() {
        let count = histogram.row_counts()[y as usize] as Coordinate;
        let end = (search.left + count).min(search.right);
        for x in search.left..end {
            buffer.tint(x, y, ROW_MARKER);
        }
    }
}

/// Marks every pixel of `column` within `rows` that satisfies `predicate`.
pub fn paint_column_matches(
    buffer: &mut PixelBuffer,
    column: Coordinate,
    rows: Range<Coordinate>,
    predicate: &ColorPredicate,
) {
    if column < 0 || column as u32 >= buffer.width() {
        return;
    }
    let rows = rows.start.max(0)..rows.end.min(buffer.height() as Coordinate);
    for y in rows {
        if predicate.matches(&buffer.at(column, y)) {
            buffer.tint(column, y, RUN_MARKER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color_predicate::ToleratedColor;
    use crate::core_modules::rectangle::Rectangle;

    const INK: Pixel = Pixel::rgb(10, 10, 10);

    fn ink() -> ColorPredicate {
        ColorPredicate::exact_set([ToleratedColor::new(INK, 0)])
    }

    fn rgb(pixel: Pixel) -> (u8, u8, u8) {
        (pixel.red, pixel.green, pixel.blue)
    }

    #[test]
    fn bars_follow_counts() {
        let mut buffer = PixelBuffer::create(4, 4).unwrap();
        buffer.fill(&Rectangle::new(1, 0, 2, 3), INK);
        let histogram = ProjectionHistogram::accumulate(&buffer, &buffer.bounds(), &ink());

        paint_histogram(&mut buffer, &histogram);

        // column 1 holds three matches: its bar covers rows 0..3
        assert_eq!(rgb(buffer.get(1, 2).unwrap()), rgb(COLUMN_MARKER));
        assert_eq!(buffer.get(1, 3).unwrap(), Pixel::default());
        // rows 0..3 hold one match each: their bar covers column 0 only
        assert_eq!(rgb(buffer.get(0, 2).unwrap()), rgb(ROW_MARKER));
        assert_eq!(buffer.get(0, 3).unwrap(), Pixel::default());
    }

    #[test]
    fn column_matches_are_marked_in_place() {
        let mut buffer = PixelBuffer::create(2, 5).unwrap();
        buffer.fill(&Rectangle::new(0, 1, 2, 3), INK);

        paint_column_matches(&mut buffer, 0, -3..50, &ink());

        assert_eq!(rgb(buffer.get(0, 1).unwrap()), rgb(RUN_MARKER));
        assert_eq!(rgb(buffer.get(0, 2).unwrap()), rgb(RUN_MARKER));
        assert_eq!(buffer.get(0, 0).unwrap(), Pixel::default());
        assert_eq!(rgb(buffer.get(1, 1).unwrap()), rgb(INK));
    }

    #[test]
    fn column_outside_buffer_is_ignored() {
        let mut buffer = PixelBuffer::create(2, 2).unwrap();
        let before = buffer.clone();
        paint_column_matches(&mut buffer, 7, 0..2, &ink());
        assert_eq!(buffer, before);
    }
}
