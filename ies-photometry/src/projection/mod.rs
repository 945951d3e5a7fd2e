//! Projections of a photometric profile onto light cookie textures.
//!
//! Builders assume a successfully parsed profile and never re-validate it.
//! Each call allocates and returns its own [`PixelBuffer`].

mod cubemap;
mod cylindrical;
mod gnomonic;

pub use cubemap::CubemapGenerator;
pub use cylindrical::CylindricalTextureGenerator;
pub use gnomonic::GnomonicTextureGenerator;

use crate::pixel_buffer::{PixelBuffer, quantize};
use crate::profile::PhotometricProfile;
use constants::cubemap::CUBE_FACE_COUNT;
use std::f32::consts::PI;

const HALF_PI: f32 = 0.5 * PI;
const TWO_PI: f32 = 2.0 * PI;

/// Scale a candela value against the profile peak and quantise it.
/// A profile with no light at all yields black.
fn normalized_intensity(candela: f32, max_candelas: f32) -> u8 {
    if max_candelas > 0.0 {
        quantize(candela / max_candelas)
    } else {
        0
    }
}

/// Number of steps across `samples` evenly spaced samples, at least 1
fn step_count(samples: u32) -> f32 {
    samples.saturating_sub(1).max(1) as f32
}

impl PhotometricProfile {
    /// Full-sphere cylindrical cookie of `2 * size` by `size` pixels.
    pub fn build_cylindrical(&self, size: u32) -> PixelBuffer {
        self.build_cylindrical_texture(2 * size, size)
    }

    /// Full-sphere cylindrical cookie at an explicit resolution.
    pub fn build_cylindrical_texture(&self, width: u32, height: u32) -> PixelBuffer {
        CylindricalTextureGenerator::new(self).generate(width, height)
    }

    /// Square perspective cookie covering a cone of `cone_angle` degrees.
    pub fn build_gnomonic(
        &self,
        cone_angle: f32,
        size: u32,
        apply_attenuation: bool,
    ) -> PixelBuffer {
        GnomonicTextureGenerator::new(self).generate(cone_angle, size, apply_attenuation)
    }

    /// Six `size` by `size` cube faces, ordered +X, -X, +Y, -Y, +Z, -Z.
    pub fn build_cubemap(&self, size: u32) -> [PixelBuffer; CUBE_FACE_COUNT] {
        CubemapGenerator::new(self).generate(size)
    }
}
