// THEORY:
// `PixelBuffer` is the substrate every other layer reads: a fixed-size, row-major
// grid of RGBA `Pixel`s. It is created once per captured or decoded image, mutated in
// place by the painters, and released when its owner is done with it.
//
// Key architectural principles:
// 1.  **Exclusive Ownership**: the buffer is a plain owned value. `destroy` consumes it,
//     so a second release or a use-after-release does not compile.
// 2.  **Fallible Creation**: storage is reserved with `try_reserve_exact`, turning an
//     allocation failure into a `VisionError::AllocationFailure` instead of an abort.
// 3.  **Checked Access**: `get`/`set` report `IndexOutOfRange` and never clamp.
//     The region painters (`fill`, `outline`, `to_grayscale`) instead clamp their
//     rectangle to the grid first, because callers hand them located geometry that
//     may legitimately be empty or inverted.

use crate::core_modules::pixel::pixel::{Byte, CHANNELS, Pixel};
use crate::core_modules::rectangle::{Coordinate, Rectangle};
use crate::error::{Result, VisionError};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Allocates a zero-initialized `width x height` buffer.
    pub fn create(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VisionError::InvalidDimensions { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(VisionError::AllocationFailure { width, height })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| VisionError::AllocationFailure { width, height })?;
        pixels.resize(len, Pixel::default());

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a buffer from tightly packed RGBA8 bytes, as produced by an image decoder
    /// or a screen grab.
    pub fn from_rgba(width: u32, height: u32, bytes: &[Byte]) -> Result<Self> {
        let mut buffer = Self::create(width, height)?;
        let expected = buffer.pixels.len() * CHANNELS;
        if bytes.len() != expected {
            return Err(VisionError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        for (pixel, raw) in buffer.pixels.iter_mut().zip(bytes.chunks_exact(CHANNELS)) {
            *pixel = Pixel::new(raw[0], raw[1], raw[2], raw[3]);
        }
        Ok(buffer)
    }

    /// Packs the buffer back into RGBA8 bytes for a presentation sink.
    pub fn to_rgba(&self) -> Vec<Byte> {
        self.pixels
            .iter()
            .flat_map(|p| <[Byte; CHANNELS]>::from(*p))
            .collect()
    }

    /// Releases the storage. Consuming `self` makes a double release impossible.
    pub fn destroy(self) {
        debug!("releasing {}x{} pixel buffer", self.width, self.height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::covering(self.width, self.height)
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn get(&self, x: Coordinate, y: Coordinate) -> Result<Pixel> {
        let index = self.index_of(x, y)?;
        Ok(self.pixels[index])
    }

    pub fn set(&mut self, x: Coordinate, y: Coordinate, pixel: Pixel) -> Result<()> {
        let index = self.index_of(x, y)?;
        self.pixels[index] = pixel;
        Ok(())
    }

    /// One full row of pixels. `y` must be inside the buffer.
    pub(crate) fn row(&self, y: Coordinate) -> &[Pixel] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Unchecked-by-contract read used by the scanners after they have clamped their range.
    #[inline]
    pub(crate) fn at(&self, x: Coordinate, y: Coordinate) -> Pixel {
        self.pixels[x as usize + y as usize * self.width as usize]
    }

    /// Replaces the chromatic channels of one in-bounds pixel, keeping its alpha.
    #[inline]
    pub(crate) fn tint(&mut self, x: Coordinate, y: Coordinate, color: Pixel) {
        let index = x as usize + y as usize * self.width as usize;
        self.pixels[index] = self.pixels[index].with_rgb(color);
    }

    /// Paints every pixel of `rect` (clamped to the buffer) with `color`.
    pub fn fill(&mut self, rect: &Rectangle, color: Pixel) {
        let rect = rect.clamp_to(self.width, self.height);
        if rect.is_empty() {
            return;
        }
        for y in rect.rows() {
            for x in rect.columns() {
                self.tint(x, y, color);
            }
        }
    }

    /// Paints the one-pixel border of `rect` (clamped to the buffer) with `color`.
    pub fn outline(&mut self, rect: &Rectangle, color: Pixel) {
        let rect = rect.clamp_to(self.width, self.height);
        if rect.is_empty() {
            return;
        }
        for y in rect.rows() {
            self.tint(rect.left, y, color);
            self.tint(rect.right - 1, y, color);
        }
        for x in rect.columns() {
            self.tint(x, rect.top, color);
            self.tint(x, rect.bottom - 1, color);
        }
    }

    /// Replaces each pixel of `rect` (clamped to the buffer) with its truncated channel average.
    pub fn to_grayscale(&mut self, rect: &Rectangle) {
        let rect = rect.clamp_to(self.width, self.height);
        if rect.is_empty() {
            return;
        }
        for y in rect.rows() {
            for x in rect.columns() {
                let average = self.at(x, y).average();
                self.tint(x, y, Pixel::rgb(average, average, average));
            }
        }
    }

    fn index_of(&self, x: Coordinate, y: Coordinate) -> Result<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Err(VisionError::IndexOutOfRange {
                x: x as i64,
                y: y as i64,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x as usize + y as usize * self.width as usize)
    }
}
