// THEORY:
// A `ColorPredicate` is the per-pixel question the whole engine asks: "is this pixel
// part of the thing I am looking for?" It is a closed set of strategies, modeled as
// an enum so that the hot loops dispatch with a `match` and predicates can be cloned
// freely into worker threads.
//
// Strategies:
// - `ExactSet`: OR over several reference colors. A reference matches when each of
//   the R, G, B channels is within that reference's own tolerance. Useful for flat UI
//   fills that compression has nudged by a few levels.
// - `AchromaticBand`: the pixel is gray (no two channels differ by more than the
//   tolerance) and its truncated average lies in `[low, high]`. Useful for neutral
//   borders whose exact shade varies.
//
// Predicates hold only immutable reference data, so they are `Send + Sync` and pure.

use crate::core_modules::pixel::pixel::{Channel, Pixel};
use serde::{Deserialize, Serialize};

/// A reference color together with the per-channel tolerance used when matching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToleratedColor {
    pub color: Pixel,
    pub tolerance: Channel,
}

impl ToleratedColor {
    pub const fn new(color: Pixel, tolerance: Channel) -> Self {
        Self { color, tolerance }
    }

    /// Reads the legacy packed form, where the alpha slot of the reference color
    /// carries the tolerance.
    pub const fn from_packed(packed: Pixel) -> Self {
        Self {
            color: Pixel::rgb(packed.red, packed.green, packed.blue),
            tolerance: packed.alpha,
        }
    }

    pub fn matches(&self, pixel: &Pixel) -> bool {
        pixel.red.abs_diff(self.color.red) <= self.tolerance
            && pixel.green.abs_diff(self.color.green) <= self.tolerance
            && pixel.blue.abs_diff(self.color.blue) <= self.tolerance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorPredicate {
    ExactSet { references: Vec<ToleratedColor> },
    AchromaticBand {
        tolerance: Channel,
        low: Channel,
        high: Channel,
    },
}

impl ColorPredicate {
    pub fn exact_set(references: impl IntoIterator<Item = ToleratedColor>) -> Self {
        ColorPredicate::ExactSet {
            references: references.into_iter().collect(),
        }
    }

    pub fn achromatic_band(tolerance: Channel, low: Channel, high: Channel) -> Self {
        ColorPredicate::AchromaticBand {
            tolerance,
            low,
            high,
        }
    }

    #[inline]
    pub fn matches(&self, pixel: &Pixel) -> bool {
        match self {
            ColorPredicate::ExactSet { references } => references.iter().any(|r| r.matches(pixel)),
            ColorPredicate::AchromaticBand {
                tolerance,
                low,
                high,
            } => {
                pixel.channel_spread() <= *tolerance && (*low..=*high).contains(&pixel.average())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_pixel_matches_at_any_tolerance() {
        let pixel = Pixel::rgb(24, 63, 60);
        for tolerance in [0, 1, 4, 255] {
            let predicate = ColorPredicate::exact_set([ToleratedColor::new(pixel, tolerance)]);
            assert!(predicate.matches(&pixel));
        }
    }

    #[test]
    fn tolerance_is_per_reference() {
        let predicate = ColorPredicate::exact_set([
            ToleratedColor::new(Pixel::rgb(100, 100, 100), 0),
            ToleratedColor::new(Pixel::rgb(200, 0, 0), 10),
        ]);
        assert!(!predicate.matches(&Pixel::rgb(101, 100, 100)));
        assert!(predicate.matches(&Pixel::rgb(190, 10, 0)));
        assert!(!predicate.matches(&Pixel::rgb(189, 10, 0)));
    }

    #[test]
    fn exact_set_ignores_alpha() {
        let predicate = ColorPredicate::exact_set([ToleratedColor::new(Pixel::rgb(5, 5, 5), 0)]);
        assert!(predicate.matches(&Pixel::new(5, 5, 5, 0)));
    }

    #[test]
    fn tolerance_near_channel_limits_does_not_wrap() {
        let reference = ToleratedColor::new(Pixel::rgb(2, 253, 128), 4);
        assert!(reference.matches(&Pixel::rgb(0, 255, 130)));
        assert!(!reference.matches(&Pixel::rgb(7, 255, 130)));
    }

    #[test]
    fn packed_reference_reads_tolerance_from_alpha() {
        let reference = ToleratedColor::from_packed(Pixel::new(24, 63, 60, 4));
        assert_eq!(reference.tolerance, 4);
        assert_eq!(reference.color, Pixel::rgb(24, 63, 60));
    }

    #[test]
    fn achromatic_band_rejects_colored_pixels_in_band() {
        let predicate = ColorPredicate::achromatic_band(3, 20, 80);
        assert!(predicate.matches(&Pixel::rgb(50, 51, 52)));
        // average 50 is in band, but red and blue are 6 apart
        assert!(!predicate.matches(&Pixel::rgb(47, 50, 53)));
    }

    #[test]
    fn achromatic_band_bounds_are_inclusive() {
        let predicate = ColorPredicate::achromatic_band(0, 20, 80);
        assert!(predicate.matches(&Pixel::rgb(20, 20, 20)));
        assert!(predicate.matches(&Pixel::rgb(80, 80, 80)));
        assert!(!predicate.matches(&Pixel::rgb(19, 19, 19)));
        assert!(!predicate.matches(&Pixel::rgb(81, 81, 81)));
    }

    #[test]
    fn predicates_deserialize_from_tagged_json() {
        let json = r#"{"kind":"achromatic_band","tolerance":2,"low":10,"high":90}"#;
        let predicate: ColorPredicate = serde_json::from_str(json).unwrap();
        assert_eq!(predicate, ColorPredicate::achromatic_band(2, 10, 90));
    }
}
