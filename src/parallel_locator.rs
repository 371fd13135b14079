// THEORY:
// Histogram accumulation is the only expensive step of a locate call, and it is
// embarrassingly parallel: every pixel contributes to exactly one column counter
// and one row counter. The `ParallelRegionLocator` cuts the search rectangle into
// horizontal strips, accumulates each strip on a blocking worker, and folds the
// partial histograms together before running the ordinary threshold extraction.
//
// Row counters of different strips never overlap; column counters are summed in
// the merge. The result is bit-for-bit the sequential locator's result.

use crate::core_modules::color_predicate::ColorPredicate;
use crate::core_modules::histogram::ProjectionHistogram;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::rectangle::Rectangle;
use crate::core_modules::region_locator::RegionLocator;
use crate::error::Result;
use futures::future::join_all;
use log::trace;
use std::sync::Arc;

pub struct ParallelRegionLocator {
    locator: RegionLocator,
    workers: usize,
}

impl ParallelRegionLocator {
    /// One worker per logical CPU.
    pub fn new(locator: RegionLocator) -> Self {
        Self {
            locator,
            workers: num_cpus::get().max(1),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn locate(
        &self,
        buffer: Arc<PixelBuffer>,
        search: Option<Rectangle>,
        predicate: Arc<ColorPredicate>,
    ) -> Result<Rectangle> {
        let histogram = self.histogram(buffer, search, predicate).await?;
        Ok(self.locator.extract(&histogram))
    }

    pub async fn histogram(
        &self,
        buffer: Arc<PixelBuffer>,
        search: Option<Rectangle>,
        predicate: Arc<ColorPredicate>,
    ) -> Result<ProjectionHistogram> {
        let (width, height) = (buffer.width(), buffer.height());
        let search = search
            .unwrap_or_else(|| buffer.bounds())
            .clamp_to(width, height);
        let mut total = ProjectionHistogram::zeroed(width, height, search);
        if search.is_empty() {
            return Ok(total);
        }

        let strips = split_rows(&search, self.workers);
        let tasks = strips.into_iter().map(|strip| {
            let buffer = Arc::clone(&buffer);
            let predicate = Arc::clone(&predicate);
            tokio::task::spawn_blocking(move || {
                trace!("accumulating strip {}", strip);
                let mut partial = ProjectionHistogram::zeroed(width, height, search);
                partial.accumulate_strip(&buffer, &strip, &predicate);
                partial
            })
        });

        for partial in join_all(tasks).await {
            total.merge(&partial?);
        }
        Ok(total)
    }
}

/// Splits `search` into at most `parts` full-width strips of near-equal height.
fn split_rows(search: &Rectangle, parts: usize) -> Vec<Rectangle> {
    let height = search.height() as usize;
    let parts = parts.clamp(1, height.max(1));
    let step = height.div_ceil(parts) as i32;

    let mut strips = Vec::with_capacity(parts);
    let mut top = search.top;
    while top < search.bottom {
        let bottom = (top + step).min(search.bottom);
        strips.push(Rectangle { top, bottom, ..*search });
        top = bottom;
    }
    strips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color_predicate::ToleratedColor;
    use crate::core_modules::pixel::pixel::Pixel;

    const INK: Pixel = Pixel::rgb(12, 90, 200);

    fn ink() -> Arc<ColorPredicate> {
        Arc::new(ColorPredicate::exact_set([ToleratedColor::new(INK, 3)]))
    }

    fn sample() -> PixelBuffer {
        let mut buffer = PixelBuffer::create(40, 30).unwrap();
        buffer.fill(&Rectangle::new(5, 4, 31, 22), INK);
        buffer.fill(&Rectangle::new(33, 0, 35, 30), INK);
        buffer.fill(&Rectangle::new(10, 10, 12, 13), Pixel::rgb(0, 0, 0));
        buffer
    }

    #[test]
    fn strips_cover_search_without_overlap() {
        let search = Rectangle::new(3, 5, 9, 12);
        let strips = split_rows(&search, 3);
        assert_eq!(
            strips,
            vec![
                Rectangle::new(3, 5, 9, 8),
                Rectangle::new(3, 8, 9, 11),
                Rectangle::new(3, 11, 9, 12),
            ]
        );
        assert_eq!(split_rows(&search, 100).len(), 7);
    }

    #[tokio::test]
    async fn parallel_matches_sequential() {
        let buffer = sample();
        let locator = RegionLocator::new(0.5, 0.25);
        let sequential = locator.locate(&buffer, None, &ink());
        let sequential_histogram = locator.histogram(&buffer, None, &ink());

        let buffer = Arc::new(buffer);
        for workers in [1, 2, 3, 7, 64] {
            let parallel = ParallelRegionLocator::new(locator).with_workers(workers);
            let histogram = parallel.histogram(Arc::clone(&buffer), None, ink()).await.unwrap();
            let found = parallel.locate(Arc::clone(&buffer), None, ink()).await.unwrap();
            assert_eq!(histogram, sequential_histogram);
            assert_eq!(found, sequential);
        }
    }

    #[tokio::test]
    async fn empty_search_is_sentinel() {
        let buffer = Arc::new(sample());
        let parallel = ParallelRegionLocator::new(RegionLocator::default());
        let found = parallel
            .locate(buffer, Some(Rectangle::new(6, 6, 6, 20)), ink())
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
