/// Six-face cube cookie resampled from a cylindrical source texture
use super::{TWO_PI, CylindricalTextureGenerator};
use crate::pixel_buffer::{PixelBuffer, quantize};
use crate::profile::PhotometricProfile;
use constants::cubemap::{CUBE_FACE_COUNT, CUBE_FACE_REMAP, CUBE_FACE_SIGNS};
use constants::texture::CHANNEL_MAX;
use std::f32::consts::PI;
use tracing::trace;

pub struct CubemapGenerator<'a> {
    profile: &'a PhotometricProfile,
}

impl<'a> CubemapGenerator<'a> {
    pub fn new(profile: &'a PhotometricProfile) -> Self {
        Self { profile }
    }

    /// Generate six `size` by `size` faces in +X, -X, +Y, -Y, +Z, -Z order.
    /// All faces sample one cylindrical texture of `2 * size` by `2 * size`.
    pub fn generate(&self, size: u32) -> [PixelBuffer; CUBE_FACE_COUNT] {
        trace!("Building {}x{} cubemap", size, size);

        let source = CylindricalTextureGenerator::new(self.profile).generate(2 * size, 2 * size);

        std::array::from_fn(|face| generate_face(&source, face, size))
    }
}

fn generate_face(source: &PixelBuffer, face: usize, size: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(size, size);
    let extent = size as f32;

    for v in 0..size {
        for h in 0..size {
            let face_uv = [
                h as f32 / extent * 2.0 - 1.0,
                v as f32 / extent * 2.0 - 1.0,
                1.0,
            ];
            let direction = face_direction(face, face_uv);
            let (x, y) = equirectangular_uv(direction);

            buffer.set_intensity(h, v, sample_clamped(source, x, y));
        }
    }

    buffer
}

/// Unit world direction through a face pixel
fn face_direction(face: usize, face_uv: [f32; 3]) -> [f32; 3] {
    let mut world = [0.0f32; 3];
    for axis in 0..3 {
        world[CUBE_FACE_REMAP[face][axis]] = face_uv[axis] * CUBE_FACE_SIGNS[face][axis];
    }

    let length = world.iter().map(|c| c * c).sum::<f32>().sqrt();
    world.map(|c| c / length)
}

/// Equirectangular texture coordinates in [0, 1] for a unit direction
fn equirectangular_uv(direction: [f32; 3]) -> (f32, f32) {
    let [x, y, z] = direction;

    let mut u = 0.75 - z.atan2(x) / TWO_PI;
    if u > 1.0 {
        u -= 1.0;
    }
    let v = 1.0 - y.clamp(-1.0, 1.0).acos() / PI;

    (u, v)
}

/// Bilinear tap of the source intensity with indices clamped to its edges
fn sample_clamped(source: &PixelBuffer, u: f32, v: f32) -> u8 {
    let width = source.width();
    let height = source.height();
    if width == 0 || height == 0 {
        return 0;
    }

    let x = u * width as f32;
    let y = v * height as f32;
    let x_floor = x.floor();
    let y_floor = y.floor();
    let fraction_x = x - x_floor;
    let fraction_y = y - y_floor;

    let x0 = (x_floor as i64).clamp(0, width as i64 - 1) as u32;
    let y0 = (y_floor as i64).clamp(0, height as i64 - 1) as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let tap = |x, y| source.intensity(x, y) as f32 / CHANNEL_MAX;

    let top = tap(x0, y0) * (1.0 - fraction_x) + tap(x1, y0) * fraction_x;
    let bottom = tap(x0, y1) * (1.0 - fraction_x) + tap(x1, y1) * fraction_x;

    quantize(top * (1.0 - fraction_y) + bottom * fraction_y)
}
