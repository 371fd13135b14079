// THEORY:
// The `Pixel` module is the most fundamental unit of the vision system. It is a
// "dumb" data container for a single RGBA sample plus the few single-pixel measures
// the matchers need (channel sum, truncated average, channel spread). Nothing here
// looks at neighbors; anything that needs more than one pixel lives in the buffer,
// histogram or scanner layers.
//
// A note on alpha: captured screenshots carry no useful transparency, and historically
// the alpha slot of a *reference* color was reused to carry a match tolerance. That
// overload is gone. Tolerances live next to the color in `ToleratedColor`
// (see `color_predicate`), and `alpha` here is only ever a channel.

pub mod pixel {
    use crate::error::{Result, VisionError};
    use serde::{Deserialize, Serialize};

    pub type Byte = u8;
    pub type Channel = Byte;
    pub type Sum = u16;

    pub const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha channel value (0-255). Carried through untouched by every matcher.
        #[serde(default = "opaque")]
        pub alpha: Channel,
    }

    fn opaque() -> Channel {
        Channel::MAX
    }

    impl Pixel {
        pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// An opaque pixel.
        pub const fn rgb(red: Channel, green: Channel, blue: Channel) -> Self {
            Self::new(red, green, blue, Channel::MAX)
        }

        /// Raw sum of the three chromatic channels.
        pub fn sum(&self) -> Sum {
            self.red as Sum + self.green as Sum + self.blue as Sum
        }

        /// Integer-truncated mean of the chromatic channels.
        pub fn average(&self) -> Channel {
            (self.sum() / 3) as Channel
        }

        /// Largest absolute difference between any two chromatic channels.
        /// Zero for a perfect gray.
        pub fn channel_spread(&self) -> Channel {
            let max = self.red.max(self.green).max(self.blue);
            let min = self.red.min(self.green).min(self.blue);
            max - min
        }

        /// Copy of `self` with the chromatic channels replaced and alpha preserved.
        pub fn with_rgb(self, other: Pixel) -> Self {
            Pixel {
                red: other.red,
                green: other.green,
                blue: other.blue,
                alpha: self.alpha,
            }
        }
    }

    impl From<[Byte; CHANNELS]> for Pixel {
        fn from(bytes: [Byte; CHANNELS]) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl TryFrom<&[Byte]> for Pixel {
        type Error = VisionError;

        fn try_from(bytes: &[Byte]) -> Result<Self> {
            if bytes.len() != CHANNELS {
                return Err(VisionError::BufferSizeMismatch {
                    expected: CHANNELS,
                    actual: bytes.len(),
                });
            }
            Ok(Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3]))
        }
    }

    impl From<Pixel> for [Byte; CHANNELS] {
        fn from(pixel: Pixel) -> Self {
            [pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;

    #[test]
    fn average_truncates() {
        assert_eq!(Pixel::rgb(10, 10, 12).average(), 10);
        assert_eq!(Pixel::rgb(255, 255, 255).average(), 255);
    }

    #[test]
    fn spread_is_max_pairwise_difference() {
        assert_eq!(Pixel::rgb(40, 40, 40).channel_spread(), 0);
        assert_eq!(Pixel::rgb(10, 30, 20).channel_spread(), 20);
    }

    #[test]
    fn with_rgb_keeps_alpha() {
        let p = Pixel::new(1, 2, 3, 7).with_rgb(Pixel::rgb(9, 9, 9));
        assert_eq!(p, Pixel::new(9, 9, 9, 7));
    }

    #[test]
    fn slice_conversion_checks_length() {
        let bytes = [1u8, 2, 3];
        assert!(Pixel::try_from(&bytes[..]).is_err());
        let bytes = [1u8, 2, 3, 4];
        assert_eq!(Pixel::try_from(&bytes[..]).unwrap(), Pixel::new(1, 2, 3, 4));
    }
}
