// THEORY:
// `image_helper` is the thin bridge to the outside world. The engine itself never
// decodes or encodes files; this module plays the two external roles: the
// source-image provider (decode any format the `image` crate knows into an RGBA
// `PixelBuffer`) and the presentation sink (write a possibly annotated buffer back
// out as PNG).

pub mod image_helper {
    use crate::core_modules::pixel_buffer::PixelBuffer;
    use crate::error::Result;
    use image::ImageEncoder;
    use log::debug;
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::Path;

    /// Decodes an image file and normalizes it to RGBA8, top row first.
    pub fn load(path: &Path) -> Result<PixelBuffer> {
        let decoded = image::open(path)?.into_rgba8();
        let (width, height) = decoded.dimensions();
        debug!("decoded {} ({}x{})", path.display(), width, height);
        PixelBuffer::from_rgba(width, height, decoded.as_raw())
    }

    /// Encodes the buffer as an RGBA PNG.
    pub fn save(path: &Path, buffer: &PixelBuffer) -> Result<()> {
        let output = BufWriter::new(File::create(path)?);
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            &buffer.to_rgba(),
            buffer.width(),
            buffer.height(),
            image::ExtendedColorType::Rgba8,
        )?;

        debug!("wrote {}", path.display());
        Ok(())
    }
}
