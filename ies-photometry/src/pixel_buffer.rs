//! Owned RGBA8 cookie pixels

use constants::texture::{BYTES_PER_PIXEL, CHANNEL_MAX};

/// Quantise a normalised intensity to an 8-bit channel value.
/// Out-of-range input saturates and NaN maps to 0.
pub fn quantize(normalized: f32) -> u8 {
    (normalized * CHANNEL_MAX).round().clamp(0.0, CHANNEL_MAX) as u8
}

/// Row-major RGBA8 image where every pixel is grey with matching alpha.
///
/// Freshly created buffers are fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Write the same value to R, G, B and A
    pub fn set_intensity(&mut self, x: u32, y: u32, value: u8) {
        let offset = self.offset(x, y);
        self.data[offset..offset + BYTES_PER_PIXEL].fill(value);
    }

    /// Intensity stored at a pixel (its red channel)
    pub fn intensity(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y)]
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = self.offset(x, y);
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }

    /// Raw RGBA bytes, row-major from the top row
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rounds_and_saturates() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(0.2), 51);
        assert_eq!(quantize(1.7), 255);
        assert_eq!(quantize(-0.3), 0);
        assert_eq!(quantize(f32::NAN), 0);
    }

    #[test]
    fn test_grey_with_matching_alpha() {
        let mut buffer = PixelBuffer::new(3, 2);
        assert!(buffer.as_bytes().iter().all(|&byte| byte == 0));
        assert_eq!(buffer.as_bytes().len(), 3 * 2 * 4);

        buffer.set_intensity(2, 1, 77);
        assert_eq!(buffer.pixel(2, 1), [77, 77, 77, 77]);
        assert_eq!(buffer.intensity(2, 1), 77);
        assert_eq!(buffer.intensity(1, 1), 0);
        assert_eq!(&buffer.as_bytes()[20..24], &[77, 77, 77, 77]);
    }
}
