// THEORY:
// A `ProjectionHistogram` is the statistical summary the locator works from: for every
// column and every row of the buffer, how many pixels inside the search rectangle
// satisfied the predicate. Projecting a 2D mask onto both axes turns "where is the
// box?" into two 1D problems, each solved by looking at how close a count comes to
// its axis' peak.
//
// The arrays span the whole buffer so indices are plain pixel coordinates; entries
// outside the search rectangle simply stay zero. Histograms are transient. They
// are rebuilt on every locate call and never cached.

use crate::core_modules::color_predicate::ColorPredicate;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::rectangle::Rectangle;

pub type Count = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionHistogram {
    search: Rectangle,
    column_counts: Vec<Count>,
    row_counts: Vec<Count>,
}

impl ProjectionHistogram {
    /// A histogram with every counter at zero. `search` is clamped to `width x height`.
    pub fn zeroed(width: u32, height: u32, search: Rectangle) -> Self {
        Self {
            search: search.clamp_to(width, height),
            column_counts: vec![0; width as usize],
            row_counts: vec![0; height as usize],
        }
    }

    /// Counts predicate matches per column and per row over `search`. The rectangle
    /// is clamped to the buffer first, so any geometry is safe to pass.
    pub fn accumulate(buffer: &PixelBuffer, search: &Rectangle, predicate: &ColorPredicate) -> Self {
        let mut histogram = Self::zeroed(buffer.width(), buffer.height(), *search);
        let search = histogram.search;
        histogram.accumulate_strip(buffer, &search, predicate);
        histogram
    }

    /// Adds the matches of `strip` (a sub-rectangle of the search area) into this
    /// histogram.
    pub(crate) fn accumulate_strip(
        &mut self,
        buffer: &PixelBuffer,
        strip: &Rectangle,
        predicate: &ColorPredicate,
    ) {
        if strip.is_empty() {
            return;
        }
        for y in strip.rows() {
            let row = buffer.row(y);
            let mut row_matches = 0;
            for x in strip.columns() {
                if predicate.matches(&row[x as usize]) {
                    self.column_counts[x as usize] += 1;
                    row_matches += 1;
                }
            }
            self.row_counts[y as usize] += row_matches;
        }
    }

    /// Folds a partial histogram (built over a disjoint strip of the same search area)
    /// into this one.
    pub fn merge(&mut self, partial: &ProjectionHistogram) {
        for (total, count) in self.column_counts.iter_mut().zip(&partial.column_counts) {
            *total += count;
        }
        for (total, count) in self.row_counts.iter_mut().zip(&partial.row_counts) {
            *total += count;
        }
    }

    pub fn search(&self) -> Rectangle {
        self.search
    }

    pub fn column_counts(&self) -> &[Count] {
        &self.column_counts
    }

    pub fn row_counts(&self) -> &[Count] {
        &self.row_counts
    }

    /// Largest column count inside the search rectangle's column range.
    pub fn peak_column(&self) -> Count {
        Self::peak(&self.column_counts, self.search.left, self.search.right)
    }

    /// Largest row count inside the search rectangle's row range.
    pub fn peak_row(&self) -> Count {
        Self::peak(&self.row_counts, self.search.top, self.search.bottom)
    }

    fn peak(counts: &[Count], start: i32, end: i32) -> Count {
        if start >= end {
            return 0;
        }
        counts[start as usize..end as usize]
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color_predicate::ToleratedColor;
    use crate::core_modules::pixel::pixel::Pixel;

    const MARK: Pixel = Pixel::rgb(200, 10, 10);

    fn mark_predicate() -> ColorPredicate {
        ColorPredicate::exact_set([ToleratedColor::new(MARK, 0)])
    }

    #[test]
    fn counts_only_inside_search_rectangle() {
        let mut buffer = PixelBuffer::create(6, 4).unwrap();
        buffer.fill(&buffer.bounds(), MARK);

        let histogram =
            ProjectionHistogram::accumulate(&buffer, &Rectangle::new(1, 1, 4, 3), &mark_predicate());

        assert_eq!(histogram.column_counts(), &[0, 2, 2, 2, 0, 0]);
        assert_eq!(histogram.row_counts(), &[0, 3, 3, 0]);
        assert_eq!(histogram.peak_column(), 2);
        assert_eq!(histogram.peak_row(), 3);
    }

    #[test]
    fn out_of_bounds_search_is_clamped() {
        let mut buffer = PixelBuffer::create(3, 3).unwrap();
        buffer.fill(&buffer.bounds(), MARK);

        let histogram = ProjectionHistogram::accumulate(
            &buffer,
            &Rectangle::new(-4, -4, 40, 40),
            &mark_predicate(),
        );

        assert_eq!(histogram.search(), buffer.bounds());
        assert_eq!(histogram.column_counts(), &[3, 3, 3]);
    }

    #[test]
    fn zeroed_clamps_its_search() {
        let histogram = ProjectionHistogram::zeroed(4, 4, Rectangle::new(0, 0, 8, 8));
        assert_eq!(histogram.search(), Rectangle::new(0, 0, 4, 4));
        assert_eq!(histogram.peak_column(), 0);
        assert_eq!(histogram.peak_row(), 0);
    }

    #[test]
    fn empty_search_has_zero_peaks() {
        let buffer = PixelBuffer::create(3, 3).unwrap();
        let histogram =
            ProjectionHistogram::accumulate(&buffer, &Rectangle::new(2, 0, 2, 3), &mark_predicate());
        assert_eq!(histogram.peak_column(), 0);
        assert_eq!(histogram.peak_row(), 0);
    }

    #[test]
    fn merging_strips_equals_whole_accumulation() {
        let mut buffer = PixelBuffer::create(5, 6).unwrap();
        buffer.fill(&Rectangle::new(1, 0, 3, 5), MARK);
        let predicate = mark_predicate();
        let whole = ProjectionHistogram::accumulate(&buffer, &buffer.bounds(), &predicate);

        let mut merged = ProjectionHistogram::zeroed(5, 6, buffer.bounds());
        for strip in [Rectangle::new(0, 0, 5, 2), Rectangle::new(0, 2, 5, 6)] {
            let mut partial = ProjectionHistogram::zeroed(5, 6, buffer.bounds());
            partial.accumulate_strip(&buffer, &strip, &predicate);
            merged.merge(&partial);
        }

        assert_eq!(merged, whole);
    }
}
