/// Equirectangular full-sphere projection, one mapping per photometric type
use super::{HALF_PI, TWO_PI, normalized_intensity, step_count};
use crate::pixel_buffer::PixelBuffer;
use crate::profile::{PhotometricProfile, PhotometricType};
use std::f32::consts::PI;
use tracing::trace;

pub struct CylindricalTextureGenerator<'a> {
    profile: &'a PhotometricProfile,
}

impl<'a> CylindricalTextureGenerator<'a> {
    pub fn new(profile: &'a PhotometricProfile) -> Self {
        Self { profile }
    }

    /// Generate a `width` by `height` cylindrical texture.
    /// Columns sweep longitude right to left, rows sweep latitude bottom to top.
    pub fn generate(&self, width: u32, height: u32) -> PixelBuffer {
        trace!(
            "Building {}x{} cylindrical texture for {}",
            width,
            height,
            self.profile.photometric_type()
        );

        match self.profile.photometric_type() {
            PhotometricType::A => self.generate_type_a(width, height),
            PhotometricType::B => self.generate_type_b(width, height),
            PhotometricType::C => self.generate_type_c(width, height),
        }
    }

    /// Type A maps longitude and latitude straight onto the grid angles
    fn generate_type_a(&self, width: u32, height: u32) -> PixelBuffer {
        let step_u = 360.0 / step_count(width);
        let step_v = 180.0 / step_count(height);
        let mut buffer = PixelBuffer::new(width, height);

        for y in 0..height {
            let latitude = y as f32 * step_v - 90.0; // [-90, 90]
            let vertical_position = self.profile.compute_vertical_position(latitude);

            for x in 0..width {
                let longitude = x as f32 * step_u - 180.0; // [-180, 180]
                let horizontal_position =
                    self.profile.compute_type_ab_horizontal_position(longitude);

                buffer.set_intensity(x, y, self.sample(horizontal_position, vertical_position));
            }
        }

        buffer
    }

    /// Type B luminaires lie on their side; rotate the polar axis to horizontal
    fn generate_type_b(&self, width: u32, height: u32) -> PixelBuffer {
        let step_u = TWO_PI / step_count(width);
        let step_v = PI / step_count(height);
        let mut buffer = PixelBuffer::new(width, height);

        for y in 0..height {
            let v = y as f32 * step_v - HALF_PI;
            let (sin_v, cos_v) = v.sin_cos();

            for x in 0..width {
                let u = PI - x as f32 * step_u;
                let (sin_u, cos_u) = u.sin_cos();

                let longitude = sin_v.atan2(cos_u * cos_v).to_degrees(); // [-180, 180]
                let latitude = (-sin_u * cos_v).asin().to_degrees(); // [-90, 90]

                let horizontal_position =
                    self.profile.compute_type_ab_horizontal_position(longitude);
                let vertical_position = self.profile.compute_vertical_position(latitude);

                buffer.set_intensity(x, y, self.sample(horizontal_position, vertical_position));
            }
        }

        buffer
    }

    /// Type C luminaires aim at nadir; orient nadir to the texture centre
    fn generate_type_c(&self, width: u32, height: u32) -> PixelBuffer {
        let step_u = TWO_PI / step_count(width);
        let step_v = PI / step_count(height);
        let mut buffer = PixelBuffer::new(width, height);

        for y in 0..height {
            let v = y as f32 * step_v - HALF_PI;
            let (sin_v, cos_v) = v.sin_cos();

            for x in 0..width {
                let u = PI - x as f32 * step_u;
                let (sin_u, cos_u) = u.sin_cos();

                let longitude = ((sin_u * cos_v).atan2(sin_v) + TWO_PI) % TWO_PI;
                let latitude = (-cos_u * cos_v).asin() + HALF_PI;

                let horizontal_position = self
                    .profile
                    .compute_type_c_horizontal_position(longitude.to_degrees()); // [0, 360)
                let vertical_position = self
                    .profile
                    .compute_vertical_position(latitude.to_degrees()); // [0, 180]

                buffer.set_intensity(x, y, self.sample(horizontal_position, vertical_position));
            }
        }

        buffer
    }

    fn sample(&self, horizontal_position: f32, vertical_position: f32) -> u8 {
        let candela = self
            .profile
            .interpolate_bilinear(horizontal_position, vertical_position);
        normalized_intensity(candela, self.profile.max_candelas())
    }
}
