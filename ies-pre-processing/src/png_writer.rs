/// PNG output for cookie buffers
use ies_photometry::PixelBuffer;
use image::{ImageFormat, RgbaImage};
use std::path::Path;

pub fn write_cookie_png(
    path: &Path,
    buffer: &PixelBuffer,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .ok_or_else(|| {
            format!(
                "Pixel buffer does not hold {}x{} RGBA pixels",
                buffer.width(),
                buffer.height()
            )
        })?;

    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
